//! Shared source-location types

use serde::{Deserialize, Serialize};

/// Byte range into the compiled source text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sub-range relative to this span's start
    pub fn slice(&self, start: usize, end: usize) -> Span {
        Span::new(self.start + start, self.start + end)
    }
}

/// One physical line of the source, with its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 0-based line index
    pub index: usize,
    pub text: &'a str,
    pub span: Span,
}

impl SourceLine<'_> {
    /// 1-based line number, as reported to users
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Split source text on `\n`, keeping the trailing empty line when the
/// text ends with a newline so that every input line gets an entry.
pub fn source_lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut offset = 0;
    source.split('\n').enumerate().map(move |(index, text)| {
        let span = Span::new(offset, offset + text.len());
        offset += text.len() + 1;
        SourceLine { index, text, span }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_lines_spans() {
        let lines: Vec<_> = source_lines("int a\nfor i 1 10\n").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].span, Span::new(0, 5));
        assert_eq!(lines[1].text, "for i 1 10");
        assert_eq!(lines[1].span, Span::new(6, 16));
        assert_eq!(lines[2].text, "");
        assert_eq!(lines[2].number(), 3);
        assert!(lines[2].span.is_empty());
        assert!(!lines[0].span.is_empty());
    }

    #[test]
    fn test_slice() {
        let span = Span::new(10, 20);
        assert_eq!(span.slice(2, 5), Span::new(12, 15));
    }
}
