//! exprkit - build small expression languages at runtime
//!
//! # Overview
//!
//! exprkit lets a host application define an expression language as data:
//! token patterns, operator precedence groups and handler functions. Common
//! uses include:
//!
//! - Permission and visibility conditions in configuration files
//! - Filters and routing rules written by end users
//! - Small calculators with host-specific functions
//!
//! # Quick Start
//!
//! ```
//! use exprkit::{Dynamic, Engine, EngineOptions};
//!
//! let engine = Engine::<(), Dynamic>::new(EngineOptions::default(), |b| {
//!     b.skip(" +")?
//!         .binary("and", |a: Dynamic, b: Dynamic| {
//!             Ok(Dynamic::Bool(a == Dynamic::Bool(true) && b == Dynamic::Bool(true)))
//!         })?
//!         .constant(r"yes\b", Dynamic::Bool(true))?
//!         .constant(r"no\b", Dynamic::Bool(false))?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let expr = engine.compile("yes and no").unwrap();
//! assert_eq!(expr.run(&engine, None, None).unwrap(), Dynamic::Bool(false));
//! ```
//!
//! # Presets
//!
//! [`stdlib::arithmetic`] returns a builder with numbers, strings, the usual
//! arithmetic, comparison and boolean operators, and a set of math functions.
//! [`stdlib::arithmetic_with`] extends it:
//!
//! ```
//! use exprkit::{Dynamic, Engine, EngineOptions, stdlib};
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

// Re-export public API from exprkit_core
pub use exprkit_core::api::{
    CompilationOptions, CompiledExpression, ConfigError, Diagnostic, Engine, EngineOptions,
    Error, ExecutionOptions, Language, LanguageBuilder, Severity,
};

// Re-export commonly used types and values
pub use exprkit_core::evaluator::{self, Bindings, HostError, RuntimeError};
pub use exprkit_core::parser::{Node, Span};
pub use exprkit_core::values::{self, Dynamic, MethodTable, Object, Value};
pub use exprkit_core::{encoding, stdlib};

mod error_renderer;
pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
