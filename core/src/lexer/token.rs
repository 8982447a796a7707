use core::fmt;
use core::hash::{Hash, Hasher};

use crate::parser::Span;

/// The closed set of token kinds a pattern can be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Synthetic token appended after the last lexeme.
    EndOfInput,
    /// A variable or literal, resolved at run time.
    Condition,
    /// Unary, binary and ternary operator signs.
    Operator,
    /// A function name, followed by a parenthesized argument list.
    Function,
    GroupOpen,
    GroupClose,
    /// Emitted by the lexer, dropped by the parser.
    Skip,
    /// Separates call arguments.
    Delimiter,
    /// A method name. Only recognized right after a [`TokenKind::MethodReference`].
    Method,
    MethodReference,
    /// Prefix that forces the next token to be read as a condition.
    VariableMarker,
}

impl TokenKind {
    /// Whether a token of this kind can be recognized without a preceding
    /// kind requiring it.
    pub const fn is_independent(self) -> bool {
        !matches!(self, TokenKind::Method)
    }

    /// The kind that must immediately follow a token of this kind.
    pub const fn requires_next(self) -> Option<TokenKind> {
        match self {
            TokenKind::MethodReference => Some(TokenKind::Method),
            TokenKind::VariableMarker => Some(TokenKind::Condition),
            _ => None,
        }
    }

    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::EndOfInput => "end of input",
            TokenKind::Condition => "condition",
            TokenKind::Operator => "operator",
            TokenKind::Function => "function",
            TokenKind::GroupOpen => "group open",
            TokenKind::GroupClose => "group close",
            TokenKind::Skip => "skip",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Method => "method",
            TokenKind::MethodReference => "method reference",
            TokenKind::VariableMarker => "variable marker",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A classified slice of source text.
///
/// Equality and hashing only look at `(kind, text)`; the position is
/// metadata used for error reporting.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of the token in the source.
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn end_of_input(position: usize) -> Self {
        Self::new(TokenKind::EndOfInput, "", position)
    }

    pub fn span(&self) -> Span {
        Span::new(self.position, self.position + self.text.len())
    }

    /// Returns true if the token has the given kind and exact text.
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    /// Human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndOfInput => self.kind.describe().to_string(),
            kind => format!("{} '{}'", kind, self.text),
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.text.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
