//! Scope and block placement tests

use algoline::diagnostics::Misplaced;
use algoline::scope::{ScopeKind, ScopeStack};
use algoline::{CompileError, Target, compile};

fn error(source: &str) -> CompileError {
    compile(source, Target::Python).expect_err("compilation should fail")
}

#[test]
fn test_case_outside_switch() {
    let err = error("case 5\n");
    assert_eq!(err.line(), 1);
    assert_eq!(
        err.to_string(),
        "Error on line 1 : 'case' statement outside of a 'switch'."
    );
}

#[test]
fn test_default_outside_switch() {
    let err = error("int x\ndefault\n");
    assert!(matches!(
        err,
        CompileError::ScopeViolation {
            line: 2,
            reason: Misplaced::OutsideSwitch,
            ..
        }
    ));
}

#[test]
fn test_case_inside_switch_is_accepted() {
    let source = "switch x\ncase 1\nprint 1\nend\nend\n";
    assert!(compile(source, Target::Python).is_ok());
}

#[test]
fn test_case_nested_deeper_than_switch() {
    let source = "switch x\ncase 1\nif y\ncase 2\nend\nend\nend\nend\n";
    assert!(compile(source, Target::Python).is_ok());
}

#[test]
fn test_return_outside_function() {
    let err = error("return 5\n");
    assert_eq!(
        err.to_string(),
        "Error on line 1 : 'return' statement outside of a function."
    );
}

#[test]
fn test_return_in_procedure() {
    let err = error("fx void greet\nreturn 5\nend\n");
    assert_eq!(
        err.to_string(),
        "Error on line 2 : 'return' statement in a procedure."
    );
}

#[test]
fn test_return_in_function() {
    assert!(compile("fx int five\nif 1\nreturn 5\nend\nend\n", Target::Python).is_ok());
}

#[test]
fn test_else_outside_if() {
    let err = error("for i 0 3\nelse\nend\n");
    assert!(matches!(
        err,
        CompileError::ScopeViolation {
            line: 2,
            reason: Misplaced::OutsideIf,
            ..
        }
    ));
}

#[test]
fn test_elif_must_follow_its_if() {
    let err = error("if a\nfor i 0 3\nelif b\nend\nend\n");
    assert_eq!(err.line(), 3);
}

#[test]
fn test_unmatched_end() {
    let err = error("int a\nend\n");
    assert!(matches!(err, CompileError::UnmatchedEnd { line: 2, .. }));
}

#[test]
fn test_unclosed_block_reported_at_innermost_opener() {
    let err = error("while a\nif b\nprint b\nend\n");
    assert_eq!(
        err.to_string(),
        "Error on line 1 : 'while' block is never closed."
    );

    let err = error("for i 0 3\nswitch i\n");
    assert!(matches!(
        err,
        CompileError::UnclosedBlock {
            line: 2,
            block: ScopeKind::Switch,
            ..
        }
    ));
}

#[test]
fn test_first_error_wins() {
    let err = error("int a\ncase 1\nend\nreturn 3\n");
    assert_eq!(err.line(), 2);
}

#[test]
fn test_later_errors_still_recorded() {
    let mut compiler = algoline::Compiler::new(Target::Python);
    assert!(compiler.compile("case 1\nend\nreturn 3\n").is_err());
    let lines: Vec<_> = compiler.errors().iter().map(CompileError::line).collect();
    assert_eq!(lines, [1, 2, 3]);
}

#[test]
fn test_failed_opener_does_not_push() {
    // `for` with too few params is rejected, so the `end` has nothing to close
    let mut compiler = algoline::Compiler::new(Target::Python);
    assert!(compiler.compile("for i 1\nend\n").is_err());
    assert!(matches!(
        compiler.errors()[1],
        CompileError::UnmatchedEnd { line: 2, .. }
    ));
}

#[test]
fn test_stack_membership() {
    let mut stack = ScopeStack::new();
    stack.push(ScopeKind::Function, 0);
    stack.push(ScopeKind::While, 1);
    assert!(stack.in_callable());
    assert!(stack.contains(ScopeKind::Function));
    assert!(!stack.contains(ScopeKind::Procedure));
    let kinds: Vec<_> = stack.iter().map(|frame| frame.kind).collect();
    assert_eq!(kinds, [ScopeKind::Function, ScopeKind::While]);
}

#[test]
fn test_unclosed_block_is_reported_last() {
    let mut compiler = algoline::Compiler::new(Target::Python);
    assert!(compiler.compile("for i 0 3\ncase 1\n").is_err());
    let lines: Vec<_> = compiler.errors().iter().map(CompileError::line).collect();
    assert_eq!(lines, [2, 1]);
    assert!(matches!(
        compiler.errors()[1],
        CompileError::UnclosedBlock { line: 1, block: ScopeKind::For, .. }
    ));
}
