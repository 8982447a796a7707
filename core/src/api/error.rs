//! Public error types.
//!
//! Internal errors (parse, execution, encoding) are converted to [`Error`] at
//! the API boundary. Setup mistakes are reported as [`ConfigError`] when the
//! language is being built.

use core::fmt;

use thiserror::Error;

use crate::encoding::EncodingError;
use crate::evaluator::{ExecutionError, ResourceExceededError, RuntimeError};
use crate::parser::{ParseError, Span};

/// A mistake in the language configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Operator group is empty")]
    EmptyGroup,

    /// A group mixes unary and binary signs, or is not a single ternary pair.
    #[error("Operator group mixes operator kinds: {}", .signs.join(" "))]
    MixedGroup { signs: Vec<String> },

    /// Two literal patterns overlap in a way that makes a required token
    /// ambiguous.
    #[error("Patterns '{first}' and '{second}' are ambiguous: one is a prefix of the other")]
    AmbiguousPatterns { first: String, second: String },

    #[error("Ternary operator '{open}' '{close}' is already registered")]
    DuplicateTernary { open: String, close: String },
}

/// Public error type for all operations.
#[derive(Debug)]
pub enum Error {
    /// The language configuration is invalid.
    Config(ConfigError),

    /// Compilation errors (unknown tokens, malformed expressions).
    ///
    /// Contains one or more diagnostics with source locations, plus the
    /// source line they refer to.
    Compilation {
        diagnostics: Vec<Diagnostic>,
        source: String,
    },

    /// Runtime errors during evaluation (unknown conditions, failing handlers).
    Runtime(RuntimeError),

    /// Resource limits exceeded (e.g., stack overflow).
    ResourceExceeded(ResourceExceededError),

    /// A stored tree could not be decoded.
    Decode(EncodingError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Config(err) => write!(f, "Configuration error: {}", err),
            Error::Compilation { diagnostics, .. } => {
                let error_count = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Error)
                    .count();
                write!(f, "Compilation failed with {} error(s)", error_count)?;
                if let Some(first) = diagnostics.first() {
                    write!(f, ": {}", first.message)?;
                }
                Ok(())
            }
            Error::Runtime(err) => write!(f, "Runtime error: {}", err),
            Error::ResourceExceeded(err) => write!(f, "Resource limit exceeded: {}", err),
            Error::Decode(err) => write!(f, "Decode error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Compilation { .. } => None,
            Error::Runtime(err) => Some(err),
            Error::ResourceExceeded(err) => Some(err),
            Error::Decode(err) => Some(err),
        }
    }
}

/// A diagnostic message (error, warning, or info) with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Suggestions on how to fix the issue.
    pub help: Vec<String>,

    /// Optional error code (e.g., "P001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - compilation cannot succeed.
    Error,
    /// Warning - suspicious code that might be wrong.
    Warning,
    /// Info - informational message.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Compilation {
            diagnostics: vec![err.to_diagnostic()],
            source: err.source,
        }
    }
}

impl From<ExecutionError> for Error {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::Runtime(err) => Error::Runtime(err),
            ExecutionError::ResourceExceeded(err) => Error::ResourceExceeded(err),
        }
    }
}

impl From<EncodingError> for Error {
    fn from(err: EncodingError) -> Self {
        Error::Decode(err)
    }
}
