//! Helpers for literal token patterns and the prefix-free check.

use super::TokenKind;
use crate::api::ConfigError;

const META: &[char] = &[
    '\\', '.', '+', '*', '?', '(', ')', '|', '[', ']', '{', '}', '^', '$',
];

/// Builds a pattern matching `text` literally.
///
/// When the text ends in a word character a word boundary is appended, so a
/// sign like `and` does not swallow the start of `android`.
pub fn literal_pattern(text: &str) -> String {
    let escaped = regex::escape(text);
    match text.chars().last() {
        Some(c) if c.is_alphanumeric() || c == '_' => format!(r"{escaped}\b"),
        _ => escaped,
    }
}

/// Returns the text a pattern matches if it is a plain literal.
///
/// Escaped punctuation is unescaped; anything else with regex meaning makes
/// the pattern non-literal.
pub fn literal_text(pattern: &str) -> Option<String> {
    let mut text = String::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) if escaped.is_ascii_punctuation() => text.push(escaped),
                _ => return None,
            },
            c if META.contains(&c) => return None,
            c => text.push(c),
        }
    }
    if text.is_empty() { None } else { Some(text) }
}

fn in_chain(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::MethodReference | TokenKind::VariableMarker | TokenKind::Method
    )
}

/// Method patterns only compete with each other, everything else competes
/// in the independent pool.
fn compete(a: TokenKind, b: TokenKind) -> bool {
    (a == TokenKind::Method) == (b == TokenKind::Method)
}

/// Checks that literal patterns taking part in a requires-next chain form a
/// prefix-free set with the patterns they compete against.
pub(crate) fn check_prefix_free<'a>(
    rules: impl Iterator<Item = (&'a str, TokenKind)>,
) -> Result<(), ConfigError> {
    let literals: Vec<(&str, String, TokenKind)> = rules
        .filter_map(|(pattern, kind)| literal_text(pattern).map(|text| (pattern, text, kind)))
        .collect();

    for (i, (first, first_text, first_kind)) in literals.iter().enumerate() {
        for (second, second_text, second_kind) in &literals[i + 1..] {
            if !(in_chain(*first_kind) || in_chain(*second_kind)) {
                continue;
            }
            if !compete(*first_kind, *second_kind) {
                continue;
            }
            let clash = if first_text == second_text {
                first_kind != second_kind
            } else {
                first_text.starts_with(second_text.as_str())
                    || second_text.starts_with(first_text.as_str())
            };
            if clash {
                return Err(ConfigError::AmbiguousPatterns {
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }
    }
    Ok(())
}
