use regex::Regex;
use tracing::trace;

use super::{Token, TokenKind, patterns};
use crate::api::ConfigError;
use crate::parser::{ParseError, ParseErrorKind, Span};

#[derive(Debug, Clone)]
struct TokenRule {
    pattern: String,
    /// `pattern` anchored at the start of the remaining input.
    regex: Regex,
    kind: TokenKind,
}

/// Ordered table of token patterns.
///
/// # Example
///
/// ```
/// use exprkit_core::lexer::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new();
/// lexer.add_pattern("[0-9]+", TokenKind::Condition).unwrap();
/// lexer.add_pattern(r"\+", TokenKind::Operator).unwrap();
///
/// let tokens = lexer.analyze("1+2").unwrap();
/// let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, ["1", "+", "2", ""]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    rules: Vec<TokenRule>,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a regular expression for a token kind.
    ///
    /// Registration order is significant: when several patterns match at the
    /// same position, the one registered first wins. Registering the same
    /// `(pattern, kind)` pair twice has no effect.
    pub fn add_pattern(&mut self, pattern: &str, kind: TokenKind) -> Result<(), ConfigError> {
        if self
            .rules
            .iter()
            .any(|rule| rule.kind == kind && rule.pattern == pattern)
        {
            return Ok(());
        }
        let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
            ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        self.rules.push(TokenRule {
            pattern: pattern.to_string(),
            regex,
            kind,
        });
        Ok(())
    }

    /// Unregisters `pattern`, either for one kind or for every kind it was
    /// registered under. Returns the number of rules removed.
    pub fn remove_pattern(&mut self, pattern: &str, kind: Option<TokenKind>) -> usize {
        let before = self.rules.len();
        self.rules
            .retain(|rule| rule.pattern != pattern || kind.is_some_and(|k| k != rule.kind));
        before - self.rules.len()
    }

    /// Registered `(pattern, kind)` pairs in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = (&str, TokenKind)> {
        self.rules
            .iter()
            .map(|rule| (rule.pattern.as_str(), rule.kind))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rejects literal patterns that would make a requires-next chain
    /// ambiguous, e.g. a method reference `#` next to an operator `##`.
    pub fn check_prefix_free(&self) -> Result<(), ConfigError> {
        patterns::check_prefix_free(self.patterns())
    }

    /// Splits `code` into tokens.
    ///
    /// Skip tokens are kept in the output; the parser drops them. A synthetic
    /// [`TokenKind::EndOfInput`] token is always appended.
    pub fn analyze(&self, code: &str) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        let mut position = 0;
        let mut required: Option<TokenKind> = None;

        while position < code.len() {
            let rest = &code[position..];
            let matched = self
                .rules
                .iter()
                .filter(|rule| required.is_none_or(|kind| rule.kind == kind))
                .find_map(|rule| {
                    let found = rule.regex.find(rest)?;
                    // An empty match would never advance the cursor.
                    if found.end() == 0 {
                        return None;
                    }
                    if rule.kind.is_independent() || Some(rule.kind) == required {
                        Some((rule.kind, found.end()))
                    } else {
                        None
                    }
                });

            let Some((kind, len)) = matched else {
                let found = rest.chars().next().map(String::from).unwrap_or_default();
                let span = Span::new(position, position + found.len());
                return Err(ParseError::new(
                    ParseErrorKind::UnknownToken { found },
                    code.to_string(),
                    span,
                ));
            };

            let token = Token::new(kind, &rest[..len], position);
            trace!(kind = %token.kind, text = %token.text, position, "token");
            tokens.push(token);
            required = kind.requires_next();
            position += len;
        }

        tokens.push(Token::end_of_input(code.len()));
        Ok(tokens)
    }
}
