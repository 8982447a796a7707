//! Compiled expressions.

use super::{Engine, Error, ExecutionOptions};
use crate::encoding;
use crate::evaluator::Bindings;
use crate::parser::Node;
use crate::values::Value;

/// A compiled expression: the tree plus the source it came from.
///
/// Compiled expressions own their data. They can be run any number of times,
/// shared across threads, and stored with [`CompiledExpression::to_bytes`].
///
/// # Example
///
/// ```ignore
/// let expr = engine.compile("$price * 2")?;
///
/// let locals = [("price", Dynamic::Number(21.0))];
/// let result = expr.run(&engine, None, Some(&locals))?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledExpression {
    source: String,
    tree: Node,
}

impl CompiledExpression {
    /// Create a new compiled expression.
    ///
    /// This is called internally by Engine::compile().
    pub(crate) fn new(source: &str, tree: Node) -> Self {
        Self {
            source: source.to_string(),
            tree,
        }
    }

    /// Wrap an existing tree. The source becomes the tree's rendering.
    pub fn from_tree(tree: Node) -> Self {
        Self {
            source: tree.to_string(),
            tree,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn into_tree(self) -> Node {
        self.tree
    }

    /// Execute with the engine's default execution options.
    pub fn run<C, V: Value + 'static>(
        &self,
        engine: &Engine<C, V>,
        context: Option<&C>,
        locals: Option<&dyn Bindings<V>>,
    ) -> Result<V, Error> {
        engine.execute(&self.tree, context, locals)
    }

    pub fn run_with_options<C, V: Value + 'static>(
        &self,
        engine: &Engine<C, V>,
        context: Option<&C>,
        locals: Option<&dyn Bindings<V>>,
        options: &ExecutionOptions,
    ) -> Result<V, Error> {
        engine.execute_with_options(&self.tree, context, locals, options)
    }

    /// Encode the tree. The source text is not stored.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(encoding::encode(&self.tree)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self::from_tree(encoding::decode(bytes)?))
    }
}
