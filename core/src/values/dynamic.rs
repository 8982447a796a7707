use core::fmt;
use std::sync::Arc;

use super::{Object, Value};

/// A dynamically typed value.
///
/// Numbers are `f64`. Objects are shared and compare by identity.
#[derive(Clone, Debug, Default)]
pub enum Dynamic {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Object(Arc<dyn Object<Dynamic>>),
}

impl Dynamic {
    pub fn object(object: impl Object<Dynamic> + 'static) -> Self {
        Dynamic::Object(Arc::new(object))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Dynamic::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Dynamic::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Null => "null",
            Dynamic::Bool(_) => "bool",
            Dynamic::Number(_) => "number",
            Dynamic::Str(_) => "string",
            Dynamic::Object(_) => "object",
        }
    }
}

impl Value for Dynamic {
    fn as_bool(&self) -> Option<bool> {
        match self {
            Dynamic::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn as_object(&self) -> Option<&dyn Object<Self>> {
        match self {
            Dynamic::Object(object) => Some(object.as_ref()),
            _ => None,
        }
    }
}

impl PartialEq for Dynamic {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Dynamic::Null, Dynamic::Null) => true,
            (Dynamic::Bool(a), Dynamic::Bool(b)) => a == b,
            (Dynamic::Number(a), Dynamic::Number(b)) => a == b,
            (Dynamic::Str(a), Dynamic::Str(b)) => a == b,
            (Dynamic::Object(a), Dynamic::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Integral numbers print without a fractional part.
fn format_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Null => write!(f, "null"),
            Dynamic::Bool(b) => write!(f, "{}", b),
            Dynamic::Number(n) => format_number(f, *n),
            Dynamic::Str(s) => write!(f, "{}", s),
            Dynamic::Object(object) => write!(f, "{:?}", object),
        }
    }
}

impl From<bool> for Dynamic {
    fn from(b: bool) -> Self {
        Dynamic::Bool(b)
    }
}

impl From<f64> for Dynamic {
    fn from(n: f64) -> Self {
        Dynamic::Number(n)
    }
}

impl From<i64> for Dynamic {
    fn from(n: i64) -> Self {
        Dynamic::Number(n as f64)
    }
}

impl From<i32> for Dynamic {
    fn from(n: i32) -> Self {
        Dynamic::Number(f64::from(n))
    }
}

impl From<&str> for Dynamic {
    fn from(s: &str) -> Self {
        Dynamic::Str(s.to_string())
    }
}

impl From<String> for Dynamic {
    fn from(s: String) -> Self {
        Dynamic::Str(s)
    }
}
