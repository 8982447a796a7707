//! Parsing: token sequences to expression trees.
//!
//! The grammar is not fixed. Operator signs, their arity and their relative
//! binding strength all come from an [`OperatorTable`] assembled at setup time.

pub mod error;
mod node;
mod operators;
pub mod parser;
mod syntax;

pub use error::{ParseError, ParseErrorKind};
pub use node::Node;
pub use operators::{OperatorEntry, OperatorKind, OperatorTable, PrecedenceGroup};
pub use parser::{DEFAULT_MAX_DEPTH, parse, parse_with_max_depth};
pub use syntax::Span;

#[cfg(test)]
mod parse_test;
