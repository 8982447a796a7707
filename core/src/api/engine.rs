//! The compilation and execution engine.

use super::{
    CompilationOptions, CompiledExpression, EngineOptions, Error, ExecutionOptions, Language,
    LanguageBuilder,
};
use crate::evaluator::Bindings;
use crate::lexer::Token;
use crate::parser::{self, Node};
use crate::values::Value;

/// A configured language plus default options.
///
/// The engine is immutable once built. Compiled trees do not borrow from it,
/// so they can be stored, encoded, and run later against the same engine.
///
/// # Example
///
/// ```
/// use exprkit_core::api::{Engine, EngineOptions};
/// use exprkit_core::values::Dynamic;
///
/// let engine = Engine::<(), Dynamic>::new(EngineOptions::default(), |b| {
///     b.skip(" +")?
///         .binary("+", |a: Dynamic, b: Dynamic| match (a.as_number(), b.as_number()) {
///             (Some(a), Some(b)) => Ok(Dynamic::Number(a + b)),
///             _ => Err("expected numbers".into()),
///         })?
///         .condition("[0-9]+", |_, text| {
///             text.parse::<f64>().map(Dynamic::Number).map_err(|e| e.to_string().into())
///         })?;
///     Ok(())
/// })
/// .unwrap();
///
/// let expr = engine.compile("40 + 2").unwrap();
/// assert_eq!(expr.run(&engine, None, None).unwrap(), Dynamic::Number(42.0));
/// ```
pub struct Engine<C, V> {
    language: Language<C, V>,
    options: EngineOptions,
}

impl<C, V: Value + 'static> Engine<C, V> {
    /// Create a new engine, configuring the language in `init`.
    pub fn new(
        options: EngineOptions,
        init: impl FnOnce(&mut LanguageBuilder<C, V>) -> Result<(), super::ConfigError>,
    ) -> Result<Self, Error> {
        let mut builder = LanguageBuilder::new();
        init(&mut builder)?;
        Self::from_builder(builder, options)
    }

    /// Create an engine from a prepared builder, e.g. a preset.
    pub fn from_builder(builder: LanguageBuilder<C, V>, options: EngineOptions) -> Result<Self, Error> {
        Ok(Self::from_language(builder.build()?, options))
    }

    pub fn from_language(language: Language<C, V>, options: EngineOptions) -> Self {
        Self { language, options }
    }

    pub fn language(&self) -> &Language<C, V> {
        &self.language
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Split `source` into tokens, skip tokens included.
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, Error> {
        Ok(self.language.lexer().analyze(source)?)
    }

    /// Compile an expression with the default compilation options.
    pub fn compile(&self, source: &str) -> Result<CompiledExpression, Error> {
        self.compile_with_options(source, &self.options.default_compilation_options)
    }

    pub fn compile_with_options(
        &self,
        source: &str,
        options: &CompilationOptions,
    ) -> Result<CompiledExpression, Error> {
        let tokens = self.tokenize(source)?;
        let tree =
            parser::parse_with_max_depth(&tokens, self.language.operators(), options.max_depth)?;
        Ok(CompiledExpression::new(source, tree))
    }

    /// Evaluate a tree with the default execution options.
    pub fn execute(
        &self,
        tree: &Node,
        context: Option<&C>,
        locals: Option<&dyn Bindings<V>>,
    ) -> Result<V, Error> {
        self.execute_with_options(tree, context, locals, &self.options.default_execution_options)
    }

    pub fn execute_with_options(
        &self,
        tree: &Node,
        context: Option<&C>,
        locals: Option<&dyn Bindings<V>>,
        options: &ExecutionOptions,
    ) -> Result<V, Error> {
        Ok(self
            .language
            .interpreter()
            .execute_with_limits(tree, context, locals, options.max_depth)?)
    }

    /// Compile and run `source` in one step.
    pub fn eval(
        &self,
        source: &str,
        context: Option<&C>,
        locals: Option<&dyn Bindings<V>>,
    ) -> Result<V, Error> {
        self.compile(source)?.run(self, context, locals)
    }
}
