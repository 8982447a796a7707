//! Ready-made language presets.
//!
//! [`arithmetic`] returns a builder rather than a finished language, so
//! callers can add their own conditions and method names before building.
//!
//! ```
//! use exprkit_core::api::{Engine, EngineOptions};
//! use exprkit_core::stdlib;
//! use exprkit_core::values::Dynamic;
//!
//! let mut builder = stdlib::arithmetic().unwrap();
//! builder.constant(r"answer\b", Dynamic::Number(42.0)).unwrap();
//! let engine = Engine::from_builder(builder, EngineOptions::default()).unwrap();
//!
//! let value = engine.eval("answer // 5 == 8 ? 'yes' : 'no'", None, None).unwrap();
//! assert_eq!(value, Dynamic::from("yes"));
//! ```
//!
//! Functions and word operators must be registered before the identifier
//! pattern, otherwise identifiers shadow them. [`arithmetic_with`] runs the
//! extension at the right point:
//!
//! ```
//! use exprkit_core::api::{Engine, EngineOptions};
//! use exprkit_core::stdlib;
//! use exprkit_core::values::Dynamic;
//!
//! let builder = stdlib::arithmetic_with(|b| {
//!     b.function("double", |args: Vec<Dynamic>| {
//!         Ok(Dynamic::Number(args[0].as_number().unwrap_or(0.0) * 2.0))
//!     })?;
//!     Ok(())
//! })
//! .unwrap();
//! let engine = Engine::from_builder(builder, EngineOptions::default()).unwrap();
//! assert_eq!(engine.eval("double(21)", None, None).unwrap(), Dynamic::Number(42.0));
//! ```

use core::cmp::Ordering;

use crate::api::{ConfigError, LanguageBuilder};
use crate::evaluator::{HandlerResult, HostError};
use crate::values::{Dynamic, Value};

mod math;


use math::number;

/// A small general-purpose language over [`Dynamic`] values.
///
/// Operators, tightest first:
///
/// | group | operators |
/// |---|---|
/// | prefix | `-` |
/// | multiplicative | `*` `//` `/` `%` |
/// | additive | `+` `-` |
/// | ordering | `<=` `>=` `<` `>` |
/// | equality | `==` `!=` |
/// | negation | `!` |
/// | conjunction | `&&` |
/// | disjunction | `\|\|` |
/// | conditional | `? :` |
///
/// Conditions are numbers, single-quoted strings, `true`, `false`, `PI`, `E`
/// and identifiers. Identifiers only resolve through local bindings.
pub fn arithmetic() -> Result<LanguageBuilder<(), Dynamic>, ConfigError> {
    arithmetic_with(|_| Ok(()))
}

/// Same as [`arithmetic`], with `extend` registering extra operators,
/// functions or conditions ahead of the number and identifier patterns.
pub fn arithmetic_with(
    extend: impl FnOnce(&mut LanguageBuilder<(), Dynamic>) -> Result<(), ConfigError>,
) -> Result<LanguageBuilder<(), Dynamic>, ConfigError> {
    let mut b: LanguageBuilder<(), Dynamic> = LanguageBuilder::new();

    // Strings first so quoted text is never split into other tokens.
    b.condition("'[^']*'", |_, text| Ok(Dynamic::from(unquote(text))))?;

    b.unary("-", |v| Ok(Dynamic::Number(-number(&v)?)))?
        .binary_group(|g| {
            g.op("*", |a, b| Ok(Dynamic::Number(number(&a)? * number(&b)?)))
                .op("//", math::divide_whole)
                .op("/", math::divide)
                .op("%", math::remainder);
        })?
        .binary_group(|g| {
            g.op("+", add)
                .op("-", |a, b| Ok(Dynamic::Number(number(&a)? - number(&b)?)));
        })?
        .binary_group(|g| {
            g.op("<=", |a, b| compare(&a, &b, Ordering::is_le))
                .op(">=", |a, b| compare(&a, &b, Ordering::is_ge))
                .op("<", |a, b| compare(&a, &b, Ordering::is_lt))
                .op(">", |a, b| compare(&a, &b, Ordering::is_gt));
        })?
        .binary_group(|g| {
            g.op("==", |a, b| Ok(Dynamic::Bool(a == b)))
                .op("!=", |a, b| Ok(Dynamic::Bool(a != b)));
        })?
        .unary("!", |v| Ok(Dynamic::Bool(!truth(&v)?)))?
        .binary("&&", |a, b| Ok(Dynamic::Bool(truth(&a)? && truth(&b)?)))?
        .binary("||", |a, b| Ok(Dynamic::Bool(truth(&a)? || truth(&b)?)))?
        .ternary("?", ":", |c, t, e| Ok(if c { t } else { e }))?;

    b.function("abs", math::unary("abs", f64::abs))?
        .function("floor", math::unary("floor", f64::floor))?
        .function("ceil", math::unary("ceil", f64::ceil))?
        .function("round", math::unary("round", f64::round))?
        .function("sqrt", math::unary("sqrt", f64::sqrt))?
        .function("cbrt", math::unary("cbrt", f64::cbrt))?
        .function("pow", math::pow)?
        .function("exp", math::unary("exp", f64::exp))?
        .function("ln", math::unary("ln", f64::ln))?
        .function("log", math::log)?
        .function("sin", math::unary("sin", f64::sin))?
        .function("cos", math::unary("cos", f64::cos))?
        .function("tan", math::unary("tan", f64::tan))?
        .function("signum", math::unary("signum", math::signum))?
        .function("min", math::min)?
        .function("max", math::max)?
        .function("str", to_str)?
        .function("number", to_number)?
        .function("boolean", to_boolean)?;

    b.constant(r"true\b", Dynamic::Bool(true))?
        .constant(r"false\b", Dynamic::Bool(false))?
        .constant(r"PI\b", Dynamic::Number(core::f64::consts::PI))?
        .constant(r"E\b", Dynamic::Number(core::f64::consts::E))?;

    extend(&mut b)?;

    b.condition(r"[0-9]+(\.[0-9]+)?", |_, text| parse_number(text))?
        .condition_pattern("[a-zA-Z_][a-zA-Z0-9_.]*")?;

    b.delimiter(",")?
        .skip(" +")?
        .grouping(r"\(", r"\)")?
        .variable_marker(r"\$")?
        .method_reference("#")?
        .method("[a-zA-Z_][a-zA-Z0-9_]*")?;

    Ok(b)
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text)
}

fn parse_number(text: &str) -> HandlerResult<Dynamic> {
    text.trim()
        .parse::<f64>()
        .map(Dynamic::Number)
        .map_err(|_| HostError::new(format!("'{text}' is not a number")))
}

fn truth(value: &Dynamic) -> Result<bool, HostError> {
    value.as_bool().ok_or_else(|| {
        HostError::new(format!("expected a bool, found {}", value.type_name()))
    })
}

/// Numeric addition, or concatenation when either side is a string.
fn add(a: Dynamic, b: Dynamic) -> HandlerResult<Dynamic> {
    match (&a, &b) {
        (Dynamic::Str(_), _) | (_, Dynamic::Str(_)) => Ok(Dynamic::Str(format!("{a}{b}"))),
        _ => Ok(Dynamic::Number(number(&a)? + number(&b)?)),
    }
}

fn compare(a: &Dynamic, b: &Dynamic, test: fn(Ordering) -> bool) -> HandlerResult<Dynamic> {
    let ordering = match (a, b) {
        (Dynamic::Number(x), Dynamic::Number(y)) => x.partial_cmp(y),
        (Dynamic::Str(x), Dynamic::Str(y)) => Some(x.cmp(y)),
        _ => {
            return Err(HostError::new(format!(
                "cannot compare {} with {}",
                a.type_name(),
                b.type_name()
            )));
        }
    };
    // NaN is unordered: every comparison is false.
    Ok(Dynamic::Bool(ordering.is_some_and(test)))
}

fn single(name: &str, args: Vec<Dynamic>) -> Result<Dynamic, HostError> {
    math::expect_arity(name, &args, 1)?;
    Ok(args.into_iter().next().unwrap_or_default())
}

fn to_str(args: Vec<Dynamic>) -> HandlerResult<Dynamic> {
    let value = single("str", args)?;
    match value {
        Dynamic::Str(_) => Ok(value),
        other => Ok(Dynamic::Str(other.to_string())),
    }
}

fn to_number(args: Vec<Dynamic>) -> HandlerResult<Dynamic> {
    match single("number", args)? {
        Dynamic::Number(n) => Ok(Dynamic::Number(n)),
        Dynamic::Bool(b) => Ok(Dynamic::Number(if b { 1.0 } else { 0.0 })),
        Dynamic::Str(s) => parse_number(&s),
        other => Err(HostError::new(format!(
            "cannot convert {} to a number",
            other.type_name()
        ))),
    }
}

fn to_boolean(args: Vec<Dynamic>) -> HandlerResult<Dynamic> {
    let truth = match single("boolean", args)? {
        Dynamic::Null => false,
        Dynamic::Bool(b) => b,
        Dynamic::Number(n) => n != 0.0,
        Dynamic::Str(s) => !s.is_empty(),
        Dynamic::Object(_) => true,
    };
    Ok(Dynamic::Bool(truth))
}
