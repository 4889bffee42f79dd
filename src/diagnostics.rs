//! Diagnostic reporting with source locations
//!
//! Every compiler error is tied to one source line. Errors carry the
//! 1-based line number shown to users and the byte span of the line so
//! miette can render an annotated snippet.

use crate::analyze::ParamRange;
use crate::common::Span;
use crate::scope::ScopeKind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Source file for error reporting
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: Arc<str>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Arc::from(content.into()),
        }
    }

    pub fn to_named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.content.to_string())
    }
}

/// Convert our Span to miette's SourceSpan
impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// Why a block-dependent statement is not allowed where it appears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Misplaced {
    OutsideSwitch,
    OutsideIf,
    OutsideFunction,
    InProcedure,
}

impl fmt::Display for Misplaced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Misplaced::OutsideSwitch => write!(f, "outside of a 'switch'"),
            Misplaced::OutsideIf => write!(f, "outside of an 'if'"),
            Misplaced::OutsideFunction => write!(f, "outside of a function"),
            Misplaced::InProcedure => write!(f, "in a procedure"),
        }
    }
}

/// Compiler diagnostic
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum CompileError {
    #[error("Error on line {line} : {instruction} requires {expected} params, got {got}")]
    #[diagnostic(code(analyze::param_count))]
    ParamCount {
        line: usize,
        instruction: String,
        expected: ParamRange,
        got: usize,
        #[label("wrong number of parameters")]
        span: SourceSpan,
    },

    #[error("Error on line {line} : '{instruction}' statement {reason}.")]
    #[diagnostic(code(analyze::scope))]
    ScopeViolation {
        line: usize,
        instruction: String,
        reason: Misplaced,
        #[label("not allowed here")]
        span: SourceSpan,
    },

    #[error("Error on line {line} : '{instruction}' statement {reason}")]
    #[diagnostic(
        code(analyze::arity),
        help("`arr <type> <name> <dimension1> [dimension2] ...`")
    )]
    Arity {
        line: usize,
        instruction: String,
        reason: String,
        #[label("incomplete statement")]
        span: SourceSpan,
    },

    #[error("Error on line {line} : unterminated string literal")]
    #[diagnostic(code(lex::unterminated_string))]
    UnterminatedString {
        line: usize,
        #[label("this quote is never closed")]
        span: SourceSpan,
    },

    #[error("Error on line {line} : unknown instruction `{token}`")]
    #[diagnostic(
        code(analyze::unknown_instruction),
        help("unknown lines are only passed through when compiling in loose mode")
    )]
    UnknownInstruction {
        line: usize,
        token: String,
        #[label("not an instruction")]
        span: SourceSpan,
    },

    #[error("Error on line {line} : 'end' statement does not close any block.")]
    #[diagnostic(code(analyze::unmatched_end))]
    UnmatchedEnd {
        line: usize,
        #[label("nothing to close")]
        span: SourceSpan,
    },

    #[error("Error on line {line} : '{block}' block is never closed.")]
    #[diagnostic(code(analyze::unclosed_block), help("add a matching `end` line"))]
    UnclosedBlock {
        line: usize,
        block: ScopeKind,
        #[label("opened here")]
        span: SourceSpan,
    },

    #[error("Error on line {line} : Called {instruction} method before winit.")]
    #[diagnostic(
        code(analyze::window_not_open),
        help("open the window with `winit \"<title>\" <width> <height>` first")
    )]
    WindowNotOpen {
        line: usize,
        instruction: String,
        #[label("no window yet")]
        span: SourceSpan,
    },
}

impl CompileError {
    /// 1-based line number of the offending line
    pub fn line(&self) -> usize {
        match self {
            CompileError::ParamCount { line, .. }
            | CompileError::ScopeViolation { line, .. }
            | CompileError::Arity { line, .. }
            | CompileError::UnterminatedString { line, .. }
            | CompileError::UnknownInstruction { line, .. }
            | CompileError::UnmatchedEnd { line, .. }
            | CompileError::UnclosedBlock { line, .. }
            | CompileError::WindowNotOpen { line, .. } => *line,
        }
    }

    pub fn span(&self) -> SourceSpan {
        match self {
            CompileError::ParamCount { span, .. }
            | CompileError::ScopeViolation { span, .. }
            | CompileError::Arity { span, .. }
            | CompileError::UnterminatedString { span, .. }
            | CompileError::UnknownInstruction { span, .. }
            | CompileError::UnmatchedEnd { span, .. }
            | CompileError::UnclosedBlock { span, .. }
            | CompileError::WindowNotOpen { span, .. } => *span,
        }
    }
}

/// Error reporter for one compilation.
///
/// Keeps every error in the order it was raised; only the first one is
/// surfaced by the compiler.
#[derive(Debug, Default)]
pub struct Reporter {
    errors: Vec<CompileError>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, error: CompileError) {
        tracing::debug!(line = error.line(), "{}", error);
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// The error that decides the outcome of the compilation
    pub fn first(&self) -> Option<&CompileError> {
        self.errors.first()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Get errors by reference
    pub fn errors(&self) -> &[CompileError] {
        &self.errors
    }
}
