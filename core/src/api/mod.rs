//! Public API for building and running expression languages.
//!
//! A language is configured once through a [`LanguageBuilder`], frozen into
//! an [`Engine`], and then used to compile any number of expressions.
//!
//! # Example
//!
//! ```
//! use exprkit_core::api::{Engine, EngineOptions};
//! use exprkit_core::stdlib;
//! use exprkit_core::values::Dynamic;
//!
//! let engine = Engine::from_builder(stdlib::arithmetic().unwrap(), EngineOptions::default())
//!     .unwrap();
//!
//! let expr = engine.compile("max(2, $x) * 10").unwrap();
//! let locals = [("x", Dynamic::Number(4.0))];
//! assert_eq!(
//!     expr.run(&engine, None, Some(&locals)).unwrap(),
//!     Dynamic::Number(40.0)
//! );
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod expression;
pub mod options;

pub use builder::{BinaryGroup, Language, LanguageBuilder, UnaryGroup};
pub use engine::Engine;
pub use error::{ConfigError, Diagnostic, Error, Severity};
pub use expression::CompiledExpression;
pub use options::{CompilationOptions, EngineOptions, ExecutionOptions};
