//! Runtime values and the method capability consumed by method calls.
//!
//! The interpreter is generic over the value type. Callers either bring their
//! own type implementing [`Value`] or use [`Dynamic`].

pub mod dynamic;
pub mod object;
pub mod value;

pub use dynamic::Dynamic;
pub use object::MethodTable;
pub use value::{Object, Value};

#[cfg(test)]
mod object_test;
