//! Line lexer
//!
//! Turns one physical source line into an [`InstructionLine`]: the
//! instruction name followed by its parameter tokens. String literals
//! are kept whole, so `winit "My window" 640 480` has three parameters.

mod tokens;

pub use tokens::{PieceKind, Token};

use crate::common::{SourceLine, Span};
use crate::diagnostics::CompileError;
use logos::Logos;

/// Marker starting a whole-line comment
pub const COMMENT_MARKER: &str = "//";

/// A parsed source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionLine {
    /// Original line text
    pub raw: String,
    /// 0-based line index
    pub index: usize,
    /// Byte range of the line in the whole source
    pub span: Span,
    /// First token, indentation stripped
    pub name: String,
    /// Remaining tokens
    pub params: Vec<String>,
    /// Whole-line `//` comment; `params` then holds the comment text
    pub comment: bool,
}

impl InstructionLine {
    /// 1-based line number
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Line text without surrounding whitespace
    pub fn text(&self) -> &str {
        self.raw.trim()
    }

    /// Parameters joined back with single spaces
    pub fn joined(&self) -> String {
        self.params.join(" ")
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
    }
}

/// Unterminated string literal at this byte offset of the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnterminatedQuote {
    pub offset: usize,
}

/// Split a line into tokens.
///
/// Pieces with no whitespace between them are merged into one token,
/// so `print("a b")` stays a single token.
pub fn tokenize(text: &str) -> Result<Vec<Token>, UnterminatedQuote> {
    let mut lexer = PieceKind::lexer(text);
    let mut tokens: Vec<Token> = Vec::new();

    while let Some(piece) = lexer.next() {
        let span = lexer.span();
        let kind = piece.map_err(|_| UnterminatedQuote { offset: span.start })?;
        let quoted = kind == PieceKind::Quoted;
        let slice = lexer.slice();

        match tokens.last_mut() {
            Some(last) if last.end == span.start => {
                last.text.push_str(slice);
                last.end = span.end;
                last.quoted |= quoted;
            }
            _ => tokens.push(Token {
                text: slice.to_string(),
                start: span.start,
                end: span.end,
                quoted,
            }),
        }
    }

    Ok(tokens)
}

/// Lex one source line
pub fn lex_line(line: SourceLine<'_>) -> Result<InstructionLine, CompileError> {
    let trimmed = line.text.trim_start();

    if let Some(comment) = trimmed.strip_prefix(COMMENT_MARKER) {
        return Ok(InstructionLine {
            raw: line.text.to_string(),
            index: line.index,
            span: line.span,
            name: COMMENT_MARKER.to_string(),
            params: vec![comment.trim().to_string()],
            comment: true,
        });
    }

    let tokens = tokenize(line.text).map_err(|err| CompileError::UnterminatedString {
        line: line.number(),
        span: line.span.slice(err.offset, line.text.len()).into(),
    })?;

    let mut words = tokens.into_iter().map(|token| token.text);
    let name = words.next().unwrap_or_default();
    let params = words.collect();

    Ok(InstructionLine {
        raw: line.text.to_string(),
        index: line.index,
        span: line.span,
        name,
        params,
        comment: false,
    })
}
