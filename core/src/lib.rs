//! Core of exprkit: a toolkit for building small expression languages at runtime.
//!
//! A language is assembled from data rather than a fixed grammar:
//!
//! - the [`lexer`] turns source text into tokens using registered patterns,
//! - the [`parser`] climbs a caller-supplied table of precedence groups and
//!   produces a fixed-arity [`parser::Node`] tree,
//! - the [`evaluator`] walks the tree against registered handler tables.
//!
//! The [`api`] module wires the three stages together behind a builder and an
//! [`api::Engine`]. Compiled trees are plain data and can be stored with
//! [`encoding`] and executed again later.

pub mod api;
pub mod encoding;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod stdlib;
pub mod values;
