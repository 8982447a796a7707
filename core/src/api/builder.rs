//! Setup-time registration of a language.

use tracing::debug;

use super::ConfigError;
use crate::evaluator::{BinaryFn, HandlerResult, Handlers, Interpreter, UnaryFn};
use crate::lexer::{Lexer, TokenKind, literal_pattern};
use crate::parser::{OperatorEntry, OperatorTable, PrecedenceGroup};
use crate::values::Value;

/// Signs and handlers of one unary precedence group.
pub struct UnaryGroup<V> {
    ops: Vec<(String, UnaryFn<V>)>,
}

impl<V> UnaryGroup<V> {
    pub fn op<F>(&mut self, sign: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(V) -> HandlerResult<V> + Send + Sync + 'static,
    {
        self.ops.push((sign.into(), Box::new(handler)));
        self
    }
}

/// Signs and handlers of one binary precedence group.
pub struct BinaryGroup<V> {
    ops: Vec<(String, BinaryFn<V>)>,
}

impl<V> BinaryGroup<V> {
    pub fn op<F>(&mut self, sign: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(V, V) -> HandlerResult<V> + Send + Sync + 'static,
    {
        self.ops.push((sign.into(), Box::new(handler)));
        self
    }
}

/// Collects token patterns, operator groups and handlers.
///
/// Order matters twice: token patterns are tried in the order they were
/// registered, and operator groups registered earlier bind tighter than later
/// ones.
///
/// # Example
///
/// ```
/// use exprkit_core::api::LanguageBuilder;
/// use exprkit_core::values::Dynamic;
///
/// let mut builder: LanguageBuilder<(), Dynamic> = LanguageBuilder::new();
/// builder
///     .binary_group(|g| {
///         g.op("*", |a: Dynamic, b: Dynamic| {
///             Ok(Dynamic::Number(a.as_number().unwrap_or(0.0) * b.as_number().unwrap_or(0.0)))
///         });
///     })
///     .unwrap()
///     .condition("[0-9]+", |_, text| {
///         text.parse::<f64>().map(Dynamic::Number).map_err(|e| e.to_string().into())
///     })
///     .unwrap();
/// let language = builder.build().unwrap();
/// assert_eq!(language.operators().len(), 1);
/// ```
pub struct LanguageBuilder<C, V> {
    lexer: Lexer,
    operators: OperatorTable,
    handlers: Handlers<C, V>,
}

impl<C, V> Default for LanguageBuilder<C, V> {
    fn default() -> Self {
        Self {
            lexer: Lexer::new(),
            operators: OperatorTable::new(),
            handlers: Handlers::new(),
        }
    }
}

impl<C, V: Value + 'static> LanguageBuilder<C, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a raw token pattern.
    pub fn token(&mut self, pattern: &str, kind: TokenKind) -> Result<&mut Self, ConfigError> {
        self.lexer.add_pattern(pattern, kind)?;
        Ok(self)
    }

    /// Unregisters a token pattern, for one kind or for all of them. Handlers
    /// stay registered. Returns the number of patterns removed.
    pub fn remove_token(&mut self, pattern: &str, kind: Option<TokenKind>) -> usize {
        self.lexer.remove_pattern(pattern, kind)
    }

    /// Text dropped between tokens, typically whitespace.
    pub fn skip(&mut self, pattern: &str) -> Result<&mut Self, ConfigError> {
        self.token(pattern, TokenKind::Skip)
    }

    /// Separator of call arguments.
    pub fn delimiter(&mut self, pattern: &str) -> Result<&mut Self, ConfigError> {
        self.token(pattern, TokenKind::Delimiter)
    }

    pub fn grouping(&mut self, open: &str, close: &str) -> Result<&mut Self, ConfigError> {
        self.token(open, TokenKind::GroupOpen)?
            .token(close, TokenKind::GroupClose)
    }

    pub fn variable_marker(&mut self, pattern: &str) -> Result<&mut Self, ConfigError> {
        self.token(pattern, TokenKind::VariableMarker)
    }

    pub fn method_reference(&mut self, pattern: &str) -> Result<&mut Self, ConfigError> {
        self.token(pattern, TokenKind::MethodReference)
    }

    /// Method names, only recognized right after a method reference.
    pub fn method(&mut self, pattern: &str) -> Result<&mut Self, ConfigError> {
        self.token(pattern, TokenKind::Method)
    }

    fn operator_token(&mut self, sign: &str) -> Result<(), ConfigError> {
        self.lexer
            .add_pattern(&literal_pattern(sign), TokenKind::Operator)
    }

    /// Registers a group of prefix operators sharing one precedence level.
    pub fn unary_group(
        &mut self,
        define: impl FnOnce(&mut UnaryGroup<V>),
    ) -> Result<&mut Self, ConfigError> {
        let mut group = UnaryGroup { ops: Vec::new() };
        define(&mut group);
        let entries = group
            .ops
            .iter()
            .map(|(sign, _)| OperatorEntry::unary(sign.as_str()))
            .collect();
        self.operators.add_group(entries)?;
        for (sign, handler) in group.ops {
            self.operator_token(&sign)?;
            self.handlers.add_unary(sign, handler);
        }
        Ok(self)
    }

    /// Registers a group of left-associative infix operators sharing one
    /// precedence level.
    pub fn binary_group(
        &mut self,
        define: impl FnOnce(&mut BinaryGroup<V>),
    ) -> Result<&mut Self, ConfigError> {
        let mut group = BinaryGroup { ops: Vec::new() };
        define(&mut group);
        let entries = group
            .ops
            .iter()
            .map(|(sign, _)| OperatorEntry::binary(sign.as_str()))
            .collect();
        self.operators.add_group(entries)?;
        for (sign, handler) in group.ops {
            self.operator_token(&sign)?;
            self.handlers.add_binary(sign, handler);
        }
        Ok(self)
    }

    /// A prefix operator on its own precedence level.
    pub fn unary<F>(&mut self, sign: &str, handler: F) -> Result<&mut Self, ConfigError>
    where
        F: Fn(V) -> HandlerResult<V> + Send + Sync + 'static,
    {
        self.unary_group(|g| {
            g.op(sign, handler);
        })
    }

    /// An infix operator on its own precedence level.
    pub fn binary<F>(&mut self, sign: &str, handler: F) -> Result<&mut Self, ConfigError>
    where
        F: Fn(V, V) -> HandlerResult<V> + Send + Sync + 'static,
    {
        self.binary_group(|g| {
            g.op(sign, handler);
        })
    }

    /// Registers `condition open then close else`. The handler receives the
    /// condition and both branches, all already evaluated.
    pub fn ternary<F>(&mut self, open: &str, close: &str, handler: F) -> Result<&mut Self, ConfigError>
    where
        F: Fn(bool, V, V) -> HandlerResult<V> + Send + Sync + 'static,
    {
        let duplicate = self.operators.groups().iter().any(|group| {
            matches!(group, PrecedenceGroup::Ternary { open: o, close: c } if o == open && c == close)
        });
        if duplicate {
            return Err(ConfigError::DuplicateTernary {
                open: open.to_string(),
                close: close.to_string(),
            });
        }
        self.operators.add_group(vec![
            OperatorEntry::ternary_open(open),
            OperatorEntry::ternary_close(close),
        ])?;
        self.operator_token(open)?;
        self.operator_token(close)?;
        self.handlers.add_ternary(format!("{open}{close}"), handler);
        Ok(self)
    }

    /// Names matching `pattern` are resolved by `resolver`, which also gets
    /// the execution context.
    pub fn condition<F>(&mut self, pattern: &str, resolver: F) -> Result<&mut Self, ConfigError>
    where
        F: Fn(Option<&C>, &str) -> HandlerResult<V> + Send + Sync + 'static,
    {
        self.lexer.add_pattern(pattern, TokenKind::Condition)?;
        self.handlers.add_condition(pattern, resolver)?;
        Ok(self)
    }

    /// Names matching `pattern` always resolve to `value`.
    pub fn constant(&mut self, pattern: &str, value: V) -> Result<&mut Self, ConfigError>
    where
        V: Send + Sync + 'static,
    {
        self.condition(pattern, move |_, _| Ok(value.clone()))
    }

    /// Registers a condition token without a resolver. Such names are
    /// resolved from local bindings or by the fallback.
    pub fn condition_pattern(&mut self, pattern: &str) -> Result<&mut Self, ConfigError> {
        self.token(pattern, TokenKind::Condition)
    }

    pub fn function<F>(&mut self, name: &str, handler: F) -> Result<&mut Self, ConfigError>
    where
        F: Fn(Vec<V>) -> HandlerResult<V> + Send + Sync + 'static,
    {
        self.lexer
            .add_pattern(&literal_pattern(name), TokenKind::Function)?;
        self.handlers.add_function(name, handler);
        Ok(self)
    }

    /// Resolves conditions that no local binding or pattern covers.
    pub fn fallback<F>(&mut self, resolver: F) -> &mut Self
    where
        F: Fn(&str) -> HandlerResult<V> + Send + Sync + 'static,
    {
        self.handlers.set_fallback(resolver);
        self
    }

    /// Validates the token table and freezes the configuration.
    pub fn build(self) -> Result<Language<C, V>, ConfigError> {
        self.lexer.check_prefix_free()?;
        debug!(
            patterns = self.lexer.len(),
            groups = self.operators.len(),
            conditions = self.handlers.conditions().len(),
            fallback = self.handlers.fallback().is_some(),
            "language built"
        );
        Ok(Language {
            lexer: self.lexer,
            operators: self.operators,
            interpreter: Interpreter::new(self.handlers),
        })
    }
}

/// A frozen language: token table, operator table and handlers.
pub struct Language<C, V> {
    lexer: Lexer,
    operators: OperatorTable,
    interpreter: Interpreter<C, V>,
}

impl<C, V> Language<C, V> {
    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    pub fn interpreter(&self) -> &Interpreter<C, V> {
        &self.interpreter
    }
}
