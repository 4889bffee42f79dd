//! Block scope tracking
//!
//! The scope stack records which blocks are open at the current line.
//! Its depth drives indentation; membership checks decide whether
//! `case`, `default`, `return`, `elif` and `else` are allowed.

use serde::Serialize;
use std::fmt;

/// Kind of open block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    For,
    Foreach,
    While,
    If,
    Switch,
    Case,
    Default,
    /// Function returning a value (`fx <type> ...`)
    Function,
    /// Function returning nothing (`fx void ...`)
    Procedure,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::For => "for",
            ScopeKind::Foreach => "foreach",
            ScopeKind::While => "while",
            ScopeKind::If => "if",
            ScopeKind::Switch => "switch",
            ScopeKind::Case => "case",
            ScopeKind::Default => "default",
            ScopeKind::Function => "fx",
            ScopeKind::Procedure => "proc",
        }
    }

    /// Function or procedure body
    pub fn is_callable(&self) -> bool {
        matches!(self, ScopeKind::Function | ScopeKind::Procedure)
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An open block and the line that opened it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub kind: ScopeKind,
    /// 0-based index of the opening line
    pub line: usize,
    /// A statement has been seen since the block or its latest branch opened
    pub filled: bool,
}

/// Stack of open blocks
#[derive(Debug, Default, Clone)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a block
    pub fn push(&mut self, kind: ScopeKind, line: usize) {
        self.frames.push(Frame {
            kind,
            line,
            filled: false,
        });
    }

    /// Record a statement in the innermost block
    pub fn fill(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.filled = true;
        }
    }

    /// Start a new branch of the innermost block, returning whether the
    /// previous branch had a statement
    pub fn next_branch(&mut self) -> bool {
        match self.frames.last_mut() {
            Some(frame) => std::mem::replace(&mut frame.filled, false),
            None => true,
        }
    }

    /// Close the innermost block
    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Whether a block of this kind is open anywhere in the stack
    pub fn contains(&self, kind: ScopeKind) -> bool {
        self.frames.iter().any(|frame| frame.kind == kind)
    }

    /// Whether the current line sits inside a function or procedure
    pub fn in_callable(&self) -> bool {
        self.frames.iter().any(|frame| frame.kind.is_callable())
    }

    /// Index of the outermost function or procedure frame
    pub fn callable_base(&self) -> Option<usize> {
        self.frames.iter().position(|frame| frame.kind.is_callable())
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Open blocks, outermost first
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let mut stack = ScopeStack::new();
        stack.push(ScopeKind::Switch, 0);
        stack.push(ScopeKind::Case, 1);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top().map(|f| f.kind), Some(ScopeKind::Case));

        let frame = stack.pop().unwrap();
        assert_eq!(
            frame,
            Frame {
                kind: ScopeKind::Case,
                line: 1,
                filled: false
            }
        );
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_membership_is_not_top_only() {
        let mut stack = ScopeStack::new();
        stack.push(ScopeKind::Switch, 0);
        stack.push(ScopeKind::Case, 1);
        stack.push(ScopeKind::If, 2);
        assert!(stack.contains(ScopeKind::Switch));
        assert!(!stack.contains(ScopeKind::While));
    }

    #[test]
    fn test_in_callable() {
        let mut stack = ScopeStack::new();
        stack.push(ScopeKind::For, 0);
        assert!(!stack.in_callable());
        stack.push(ScopeKind::Procedure, 1);
        assert!(stack.in_callable());
        assert_eq!(stack.callable_base(), Some(1));
        stack.clear();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_fill_and_next_branch() {
        let mut stack = ScopeStack::new();
        stack.fill();
        stack.push(ScopeKind::If, 0);
        assert!(!stack.next_branch());
        stack.fill();
        assert!(stack.next_branch());
        assert!(!stack.top().unwrap().filled);
    }

    #[test]
    fn test_display_uses_dsl_tags() {
        assert_eq!(ScopeKind::Function.to_string(), "fx");
        assert_eq!(ScopeKind::Procedure.to_string(), "proc");
    }
}
