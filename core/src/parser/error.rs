use core::fmt;

use crate::api::{Diagnostic, Severity};
use crate::parser::Span;

/// Parser error with the source it was raised against.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub source: String,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// No pattern matches at the current position.
    UnknownToken { found: String },
    /// The source holds nothing but skip tokens.
    EmptyExpression,
    MissingClosingGroup { found: String },
    /// A function or method name not followed by a group open.
    ExpectedGroupOpen { callee: String, found: String },
    /// Inside an argument list, after an argument.
    ExpectedDelimiter { found: String },
    TernaryCloseExpected { expected: String, found: String },
    /// A method reference not followed by a method name.
    MethodExpected { reference: String, found: String },
    /// A variable marker not followed by a condition.
    ConditionExpected { marker: String, found: String },
    /// A token that cannot start an operand.
    UnknownCondition { found: String },
    /// A complete expression followed by more tokens.
    TrailingInput { found: String },
    /// Maximum nesting depth exceeded
    MaxDepthExceeded { depth: usize, max_depth: usize },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, source: String, span: Span) -> Self {
        Self { kind, source, span }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            ParseErrorKind::UnknownToken { found } => format!("Unknown token '{found}'"),
            ParseErrorKind::EmptyExpression => "Empty expression".to_string(),
            ParseErrorKind::MissingClosingGroup { found } => {
                format!("Missing closing group, found {found}")
            }
            ParseErrorKind::ExpectedGroupOpen { callee, found } => {
                format!("Expected '(' after '{callee}', found {found}")
            }
            ParseErrorKind::ExpectedDelimiter { found } => {
                format!("Expected delimiter or closing group, found {found}")
            }
            ParseErrorKind::TernaryCloseExpected { expected, found } => {
                format!("Expected '{expected}', found {found}")
            }
            ParseErrorKind::MethodExpected { reference, found } => {
                format!("Expected method name after '{reference}', found {found}")
            }
            ParseErrorKind::ConditionExpected { marker, found } => {
                format!("Expected condition after '{marker}', found {found}")
            }
            ParseErrorKind::UnknownCondition { found } => format!("Unknown condition {found}"),
            ParseErrorKind::TrailingInput { found } => {
                format!("Unexpected {found} after complete expression")
            }
            ParseErrorKind::MaxDepthExceeded { max_depth, .. } => format!(
                "Expression nesting depth exceeds maximum of {} levels",
                max_depth
            ),
        }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::UnknownToken { .. } => "P001",
            ParseErrorKind::EmptyExpression => "P002",
            ParseErrorKind::MissingClosingGroup { .. } => "P003",
            ParseErrorKind::ExpectedGroupOpen { .. } => "P004",
            ParseErrorKind::ExpectedDelimiter { .. } => "P005",
            ParseErrorKind::TernaryCloseExpected { .. } => "P006",
            ParseErrorKind::MethodExpected { .. } => "P007",
            ParseErrorKind::ConditionExpected { .. } => "P008",
            ParseErrorKind::UnknownCondition { .. } => "P009",
            ParseErrorKind::TrailingInput { .. } => "P010",
            ParseErrorKind::MaxDepthExceeded { .. } => "P011",
        }
    }

    fn help(&self) -> Vec<String> {
        match &self.kind {
            ParseErrorKind::UnknownToken { .. } => {
                vec!["No registered pattern matches here".to_string()]
            }
            ParseErrorKind::MissingClosingGroup { .. } => {
                vec!["Add the missing closing group".to_string()]
            }
            ParseErrorKind::MaxDepthExceeded { .. } => {
                vec!["Reduce nesting or simplify the expression".to_string()]
            }
            _ => vec![],
        }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            message: self.message(),
            span: self.span.clone(),
            help: self.help(),
            code: Some(self.code().to_string()),
        }
    }

    /// Column of the error start, counted in characters.
    pub fn column(&self) -> usize {
        self.source
            .get(..self.span.start())
            .map_or(0, |prefix| prefix.chars().count())
    }
}

/// Renders the message, the offending source line and a caret under the
/// error position.
impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.message(), self.code())?;
        writeln!(f, "{}", self.source)?;
        write!(f, "{:width$}^", "", width = self.column())
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_points_at_error() {
        let err = ParseError::new(
            ParseErrorKind::UnknownToken {
                found: "&".to_string(),
            },
            "1 & 2".to_string(),
            Span::new(2, 3),
        );
        assert_eq!(err.to_string(), "Unknown token '&' [P001]\n1 & 2\n  ^");
    }

    #[test]
    fn test_column_counts_characters() {
        let err = ParseError::new(
            ParseErrorKind::UnknownToken {
                found: "%".to_string(),
            },
            "é %".to_string(),
            Span::new(3, 4),
        );
        assert_eq!(err.column(), 2);
    }

    #[test]
    fn test_to_diagnostic() {
        let err = ParseError::new(
            ParseErrorKind::MaxDepthExceeded {
                depth: 4,
                max_depth: 3,
            },
            "((((1))))".to_string(),
            Span::new(3, 4),
        );
        let diagnostic = err.to_diagnostic();
        assert_eq!(diagnostic.code.as_deref(), Some("P011"));
        assert_eq!(diagnostic.span, Span::new(3, 4));
        assert_eq!(diagnostic.help.len(), 1);
        assert!(diagnostic.message.contains("maximum of 3"));
    }
}
