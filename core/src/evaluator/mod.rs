//! Tree-walking interpreter for compiled expression trees.
//!
//! ## Design Principles
//!
//! - **Never panic**: unknown names, missing handlers and failing host code
//!   are all reported as [`ExecutionError`]s
//! - **Stack-safe**: depth tracking prevents stack overflow from deeply nested trees
//! - **Stateless**: every call re-walks the whole tree; nothing is cached
//!
//! ## Example
//!
//! ```
//! use exprkit_core::evaluator::{Handlers, Interpreter};
//! use exprkit_core::parser::Node;
//! use exprkit_core::values::Dynamic;
//!
//! let mut handlers: Handlers<(), Dynamic> = Handlers::new();
//! handlers.add_binary("+", |a, b| match (a.as_number(), b.as_number()) {
//!     (Some(a), Some(b)) => Ok(Dynamic::Number(a + b)),
//!     _ => Err("expected numbers".into()),
//! });
//! handlers
//!     .add_condition("[0-9]+", |_, text| {
//!         text.parse::<f64>().map(Dynamic::Number).map_err(|e| e.to_string().into())
//!     })
//!     .unwrap();
//!
//! let interpreter = Interpreter::new(handlers);
//! let tree = Node::binary("+", Node::condition("1"), Node::condition("2"));
//! assert_eq!(interpreter.execute(&tree, None, None).unwrap(), Dynamic::Number(3.0));
//! ```

mod bindings;
mod error;
mod handlers;
mod interpreter;


pub use bindings::Bindings;
pub use error::{ExecutionError, HandlerKind, HostError, ResourceExceededError, RuntimeError};
pub use handlers::{
    BinaryFn, ConditionRule, FallbackFn, FunctionFn, HandlerResult, Handlers, ResolverFn,
    TernaryFn, UnaryFn,
};
pub use interpreter::{DEFAULT_MAX_DEPTH, Interpreter};
