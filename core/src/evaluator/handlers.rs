//! Handler tables consulted by the interpreter.

use core::fmt;

use hashbrown::HashMap;
use regex::Regex;

use crate::api::ConfigError;
use crate::evaluator::HostError;

pub type HandlerResult<V> = Result<V, HostError>;

pub type UnaryFn<V> = Box<dyn Fn(V) -> HandlerResult<V> + Send + Sync>;
pub type BinaryFn<V> = Box<dyn Fn(V, V) -> HandlerResult<V> + Send + Sync>;
/// Receives the evaluated condition and both evaluated branches.
pub type TernaryFn<V> = Box<dyn Fn(bool, V, V) -> HandlerResult<V> + Send + Sync>;
pub type FunctionFn<V> = Box<dyn Fn(Vec<V>) -> HandlerResult<V> + Send + Sync>;
/// Resolves a condition from the execution context and the matched text.
pub type ResolverFn<C, V> = Box<dyn Fn(Option<&C>, &str) -> HandlerResult<V> + Send + Sync>;
pub type FallbackFn<V> = Box<dyn Fn(&str) -> HandlerResult<V> + Send + Sync>;

/// A condition pattern and the resolver for names it fully matches.
pub struct ConditionRule<C, V> {
    pattern: String,
    regex: Regex,
    resolver: ResolverFn<C, V>,
}

impl<C, V> ConditionRule<C, V> {
    pub fn new(pattern: &str, resolver: ResolverFn<C, V>) -> Result<Self, ConfigError> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            resolver,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    pub fn resolve(&self, context: Option<&C>, name: &str) -> HandlerResult<V> {
        (self.resolver)(context, name)
    }
}

/// Operator, function and condition handlers of one language.
///
/// Operators and functions are keyed by sign or name; registering a key again
/// replaces the previous handler. Condition rules are tried in registration
/// order.
pub struct Handlers<C, V> {
    unary: HashMap<String, UnaryFn<V>>,
    binary: HashMap<String, BinaryFn<V>>,
    ternary: HashMap<String, TernaryFn<V>>,
    functions: HashMap<String, FunctionFn<V>>,
    conditions: Vec<ConditionRule<C, V>>,
    fallback: Option<FallbackFn<V>>,
}

impl<C, V> Default for Handlers<C, V> {
    fn default() -> Self {
        Self {
            unary: HashMap::new(),
            binary: HashMap::new(),
            ternary: HashMap::new(),
            functions: HashMap::new(),
            conditions: Vec::new(),
            fallback: None,
        }
    }
}

impl<C, V> Handlers<C, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unary<F>(&mut self, sign: impl Into<String>, handler: F)
    where
        F: Fn(V) -> HandlerResult<V> + Send + Sync + 'static,
    {
        self.unary.insert(sign.into(), Box::new(handler));
    }

    pub fn add_binary<F>(&mut self, sign: impl Into<String>, handler: F)
    where
        F: Fn(V, V) -> HandlerResult<V> + Send + Sync + 'static,
    {
        self.binary.insert(sign.into(), Box::new(handler));
    }

    /// `name` is the open sign followed by the close sign.
    pub fn add_ternary<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(bool, V, V) -> HandlerResult<V> + Send + Sync + 'static,
    {
        self.ternary.insert(name.into(), Box::new(handler));
    }

    pub fn add_function<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(Vec<V>) -> HandlerResult<V> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Box::new(handler));
    }

    pub fn add_condition<F>(&mut self, pattern: &str, resolver: F) -> Result<(), ConfigError>
    where
        F: Fn(Option<&C>, &str) -> HandlerResult<V> + Send + Sync + 'static,
    {
        self.conditions
            .push(ConditionRule::new(pattern, Box::new(resolver))?);
        Ok(())
    }

    pub fn set_fallback<F>(&mut self, fallback: F)
    where
        F: Fn(&str) -> HandlerResult<V> + Send + Sync + 'static,
    {
        self.fallback = Some(Box::new(fallback));
    }

    pub fn unary(&self, sign: &str) -> Option<&UnaryFn<V>> {
        self.unary.get(sign)
    }

    pub fn binary(&self, sign: &str) -> Option<&BinaryFn<V>> {
        self.binary.get(sign)
    }

    pub fn ternary(&self, name: &str) -> Option<&TernaryFn<V>> {
        self.ternary.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionFn<V>> {
        self.functions.get(name)
    }

    /// The first condition rule whose pattern matches all of `name`.
    pub fn condition(&self, name: &str) -> Option<&ConditionRule<C, V>> {
        self.conditions.iter().find(|rule| rule.matches(name))
    }

    pub fn conditions(&self) -> &[ConditionRule<C, V>] {
        &self.conditions
    }

    pub fn fallback(&self) -> Option<&FallbackFn<V>> {
        self.fallback.as_ref()
    }
}

fn sorted_keys<T>(map: &HashMap<String, T>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

impl<C, V> fmt::Debug for Handlers<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("unary", &sorted_keys(&self.unary))
            .field("binary", &sorted_keys(&self.binary))
            .field("ternary", &sorted_keys(&self.ternary))
            .field("functions", &sorted_keys(&self.functions))
            .field(
                "conditions",
                &self
                    .conditions
                    .iter()
                    .map(ConditionRule::pattern)
                    .collect::<Vec<_>>(),
            )
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_patterns_match_whole_name() {
        let mut handlers: Handlers<(), i64> = Handlers::new();
        handlers
            .add_condition("[0-9]+", |_, text| {
                text.parse::<i64>()
                    .map_err(|e| HostError::new(e.to_string()))
            })
            .unwrap();
        assert!(handlers.condition("42").is_some());
        assert!(handlers.condition("42a").is_none());
        assert!(handlers.condition("a42").is_none());
    }

    #[test]
    fn test_first_matching_condition_wins() {
        let mut handlers: Handlers<(), i64> = Handlers::new();
        handlers.add_condition("x", |_, _| Ok(1)).unwrap();
        handlers.add_condition("[a-z]", |_, _| Ok(2)).unwrap();
        let rule = handlers.condition("x").unwrap();
        assert_eq!(rule.pattern(), "x");
        assert_eq!(rule.resolve(None, "x"), Ok(1));
        assert_eq!(handlers.condition("y").unwrap().resolve(None, "y"), Ok(2));
    }

    #[test]
    fn test_invalid_condition_pattern() {
        let mut handlers: Handlers<(), i64> = Handlers::new();
        let err = handlers.add_condition("[", |_, _| Ok(0)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}
