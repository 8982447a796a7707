//! Runtime evaluation errors.
//!
//! - **Runtime errors**: resolution failures and failures reported by
//!   registered handlers or method capabilities.
//! - **Resource exceeded errors**: evaluation went deeper than the configured
//!   limit.

use core::fmt;

use thiserror::Error;

/// A failure reported by caller-supplied code: an operator, function or
/// condition handler, or a method capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for HostError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for HostError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Runtime evaluation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionError {
    Runtime(RuntimeError),
    ResourceExceeded(ResourceExceededError),
}

/// The handler table a missing handler was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Unary,
    Binary,
    Ternary,
    Function,
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerKind::Unary => write!(f, "unary operator"),
            HandlerKind::Binary => write!(f, "binary operator"),
            HandlerKind::Ternary => write!(f, "ternary operator"),
            HandlerKind::Function => write!(f, "function"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// No local binding, condition pattern or fallback resolves the name.
    #[error("Unknown condition \"{name}\"")]
    UnknownCondition { name: String },

    /// The tree names an operator or function this interpreter has no
    /// handler for.
    #[error("No handler for {kind} \"{name}\"")]
    MissingHandler { kind: HandlerKind, name: String },

    /// The receiver of a method call has no method capability.
    #[error("Condition \"{context}\" is not an object, cannot call \"{method}\"")]
    InvalidMethodTarget { context: String, method: String },

    #[error("Method \"{method}\" failed: {source}")]
    MethodFailed { method: String, source: HostError },

    #[error("\"{name}\" failed: {source}")]
    HandlerFailed { name: String, source: HostError },

    /// The first operand of a ternary is not a boolean.
    #[error("Condition of ternary \"{name}\" is not a boolean")]
    NonBooleanCondition { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceExceededError {
    /// Evaluation recursion depth exceeded.
    #[error("Evaluation stack overflow: depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::Runtime(e) => write!(f, "{}", e),
            ExecutionError::ResourceExceeded(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecutionError::Runtime(e) => Some(e),
            ExecutionError::ResourceExceeded(e) => Some(e),
        }
    }
}

impl From<RuntimeError> for ExecutionError {
    fn from(e: RuntimeError) -> Self {
        ExecutionError::Runtime(e)
    }
}

impl From<ResourceExceededError> for ExecutionError {
    fn from(e: ResourceExceededError) -> Self {
        ExecutionError::ResourceExceeded(e)
    }
}
