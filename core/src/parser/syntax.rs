// Source locations shared by tokens, parse errors and diagnostics.

use core::ops::Range;

/// Byte range into the source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }
    pub fn str_of<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.0.clone()).unwrap_or_default()
    }
    pub fn start(&self) -> usize {
        self.0.start
    }
    pub fn end(&self) -> usize {
        self.0.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_of() {
        let span = Span::new(4, 7);
        assert_eq!(span.str_of("1 + abc"), "abc");
        assert_eq!(Span::new(5, 50).str_of("short"), "");
    }
}
