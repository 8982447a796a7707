//! Configuration options for the engine.

use crate::{evaluator, parser};

/// Configuration options for compilation.
///
/// # Example
///
/// ```
/// use exprkit_core::api::CompilationOptions;
///
/// let options = CompilationOptions { max_depth: 64 };
/// assert_eq!(CompilationOptions::default().max_depth, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationOptions {
    /// Maximum nesting of groups, call arguments, prefix operators and
    /// ternary branches. Also the maximum height of the compiled tree, so a
    /// chain of `n` binary operators needs a limit above `n`.
    ///
    /// Default: 256
    pub max_depth: usize,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self {
            max_depth: parser::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Configuration options for expression execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Maximum evaluation stack depth (for recursion protection).
    ///
    /// Default: 512
    pub max_depth: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            max_depth: evaluator::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Configuration options for the engine.
///
/// These set the defaults for compilation and execution, which can be
/// overridden on a per-call basis.
///
/// # Example
///
/// ```
/// use exprkit_core::api::{CompilationOptions, EngineOptions, ExecutionOptions};
///
/// let options = EngineOptions {
///     default_compilation_options: CompilationOptions::default(),
///     default_execution_options: ExecutionOptions { max_depth: 200 },
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Used by `Engine::compile()`.
    pub default_compilation_options: CompilationOptions,

    /// Used by `Engine::execute()` and `CompiledExpression::run()`.
    pub default_execution_options: ExecutionOptions,
}
