//! Lexer tests

use algoline::common::source_lines;
use algoline::lexer::{InstructionLine, lex_line, tokenize};
use algoline::CompileError;

fn lex(text: &str) -> Result<InstructionLine, CompileError> {
    let line = source_lines(text).next().expect("at least one line");
    lex_line(line)
}

#[test]
fn test_lex_blank_line() {
    let line = lex("   \t ").unwrap();
    assert!(line.is_blank());
    assert!(line.params.is_empty());
}

#[test]
fn test_lex_for_header() {
    let line = lex("for i 1 10 2").unwrap();
    assert_eq!(line.name, "for");
    assert_eq!(line.params, ["i", "1", "10", "2"]);
    assert_eq!(line.number(), 1);
}

#[test]
fn test_lex_string_literal_is_one_param() {
    let line = lex(r#"winit "Ma fenêtre de jeu" 640 480"#).unwrap();
    assert_eq!(line.name, "winit");
    assert_eq!(line.params.len(), 3);
    assert_eq!(line.params[0], r#""Ma fenêtre de jeu""#);
}

#[test]
fn test_lex_print_with_separators() {
    let line = lex(r#"print "a & b" & x & (ENDL)"#).unwrap();
    assert_eq!(line.params, [r#""a & b""#, "&", "x", "&", "(ENDL)"]);
}

#[test]
fn test_lex_call_with_spaced_string() {
    let line = lex(r#"saluer("Jean Paul")"#).unwrap();
    assert_eq!(line.name, r#"saluer("Jean Paul")"#);
    assert!(line.params.is_empty());
}

#[test]
fn test_lex_keeps_raw_text() {
    let line = lex("    x = x + 1").unwrap();
    assert_eq!(line.raw, "    x = x + 1");
    assert_eq!(line.text(), "x = x + 1");
    assert_eq!(line.joined(), "= x + 1");
}

#[test]
fn test_lex_comment_is_not_tokenized() {
    let line = lex(r#"// un "commentaire"#).unwrap();
    assert!(line.comment);
    assert_eq!(line.params, [r#"un "commentaire"#]);
}

#[test]
fn test_lex_unterminated_string() {
    let err = lex(r#"print "bonjour"#).unwrap_err();
    assert!(matches!(err, CompileError::UnterminatedString { line: 1, .. }));
}

#[test]
fn test_unterminated_span_starts_at_quote() {
    let source = "int a\nprint \"oops";
    let line = source_lines(source).nth(1).unwrap();
    let err = lex_line(line).unwrap_err();
    assert_eq!(err.line(), 2);
    assert_eq!(err.span().offset(), 12);
}

#[test]
fn test_tokenize_offsets() {
    let tokens = tokenize("if a  ET b").unwrap();
    let starts: Vec<_> = tokens.iter().map(|t| t.start).collect();
    assert_eq!(starts, [0, 3, 6, 9]);
}

#[test]
fn test_source_lines_count_trailing_newline() {
    assert_eq!(source_lines("a\nb\n").count(), 3);
    assert_eq!(source_lines("").count(), 1);
}
