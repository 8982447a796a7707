use core::fmt::Debug;

use crate::evaluator::HostError;

/// A value produced and consumed by an interpreter.
pub trait Value: Clone + Debug {
    /// Truth value used to select a ternary branch. `None` if the value is
    /// not a boolean.
    fn as_bool(&self) -> Option<bool>;

    /// The method capability of this value, if it has one.
    fn as_object(&self) -> Option<&dyn Object<Self>> {
        None
    }
}

/// Name-indexed method invocation on a host value.
pub trait Object<V>: Debug + Send + Sync {
    /// Names of all invocable methods.
    fn method_names(&self) -> Vec<String>;

    /// Whether `name` can be invoked with arguments shaped like `args`.
    fn has_method(&self, name: &str, args: &[V]) -> bool;

    fn call_method(&self, name: &str, args: &[V]) -> Result<V, HostError>;
}
