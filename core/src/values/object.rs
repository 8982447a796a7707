//! Manual method bindings for host values.

use core::fmt;

use super::{Dynamic, Object};
use crate::evaluator::HostError;

type MethodFn<T> = Box<dyn Fn(&T, &[Dynamic]) -> Result<Dynamic, HostError> + Send + Sync>;

struct Method<T> {
    name: String,
    /// `None` accepts any number of arguments.
    arity: Option<usize>,
    call: MethodFn<T>,
}

/// Exposes a host value to method calls through an explicit list of methods.
///
/// # Example
///
/// ```
/// use exprkit_core::values::{Dynamic, MethodTable, Object};
///
/// struct Account {
///     balance: f64,
/// }
///
/// let account = MethodTable::new("Account", Account { balance: 12.5 })
///     .method("balance", 0, |account, _| Ok(Dynamic::Number(account.balance)));
///
/// assert_eq!(
///     account.call_method("balance", &[]).unwrap(),
///     Dynamic::Number(12.5)
/// );
/// ```
pub struct MethodTable<T> {
    type_name: String,
    target: T,
    methods: Vec<Method<T>>,
}

impl<T> MethodTable<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(type_name: impl Into<String>, target: T) -> Self {
        Self {
            type_name: type_name.into(),
            target,
            methods: Vec::new(),
        }
    }

    /// Adds a method taking exactly `arity` arguments. A method may be added
    /// more than once with different arities.
    pub fn method<F>(self, name: impl Into<String>, arity: usize, f: F) -> Self
    where
        F: Fn(&T, &[Dynamic]) -> Result<Dynamic, HostError> + Send + Sync + 'static,
    {
        self.push(name.into(), Some(arity), Box::new(f))
    }

    /// Adds a method taking any number of arguments.
    pub fn variadic<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&T, &[Dynamic]) -> Result<Dynamic, HostError> + Send + Sync + 'static,
    {
        self.push(name.into(), None, Box::new(f))
    }

    fn push(mut self, name: String, arity: Option<usize>, call: MethodFn<T>) -> Self {
        self.methods.push(Method { name, arity, call });
        self
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_value(self) -> Dynamic {
        Dynamic::object(self)
    }

    fn find(&self, name: &str, args: usize) -> Option<&Method<T>> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.arity.is_none_or(|arity| arity == args))
    }
}

impl<T> fmt::Debug for MethodTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_name)
    }
}

impl<T> Object<Dynamic> for MethodTable<T>
where
    T: Send + Sync + 'static,
{
    fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for method in &self.methods {
            if !names.contains(&method.name) {
                names.push(method.name.clone());
            }
        }
        names
    }

    fn has_method(&self, name: &str, args: &[Dynamic]) -> bool {
        self.find(name, args.len()).is_some()
    }

    fn call_method(&self, name: &str, args: &[Dynamic]) -> Result<Dynamic, HostError> {
        match self.find(name, args.len()) {
            Some(method) => (method.call)(&self.target, args),
            None if self.methods.iter().any(|m| m.name == name) => Err(HostError::new(format!(
                "{}.{} does not take {} argument(s)",
                self.type_name,
                name,
                args.len()
            ))),
            None => Err(HostError::new(format!(
                "{} has no method '{}'",
                self.type_name, name
            ))),
        }
    }
}
