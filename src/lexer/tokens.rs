//! Token definitions for the line lexer

use logos::Logos;

/// Pieces of a DSL line.
///
/// A line is a sequence of whitespace-separated words. Double quotes
/// delimit string literals that may contain spaces; a quote that is
/// never closed fails to match and surfaces as a lexing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos)]
#[logos(skip r"[ \t\r\f]+")]
pub enum PieceKind {
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Quoted,

    #[regex(r#"[^ \t\r\f\n"]+"#)]
    Bare,
}

/// A parameter token: one or more adjacent pieces, with its position in the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Byte offset of the token within its line
    pub start: usize,
    pub end: usize,
    /// Whether any piece of the token is a string literal
    pub quoted: bool,
}

impl Token {
    pub fn is_string_literal(&self) -> bool {
        self.quoted && self.text.starts_with('"') && self.text.ends_with('"')
    }
}
