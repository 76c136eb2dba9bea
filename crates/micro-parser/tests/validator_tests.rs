//! Validator tests: accepted programs, block nesting, and the per-statement
//! checks for conditions, `write`, `capture` and assignments.

use micro_lexer::tokenize;
use micro_parser::{not_executed_notes, validate, ValidationResult};
use micro_types::{DiagnosticCode, Severity};

fn check(source: &str) -> ValidationResult {
    validate(&tokenize(source))
}

fn assert_valid(source: &str) {
    let result = check(source);
    assert!(
        result.success,
        "expected {source:?} to validate, got {:?}",
        result.messages()
    );
    assert!(result.diagnostics.is_empty());
}

fn first_error(source: &str) -> (DiagnosticCode, String) {
    let result = check(source);
    assert!(!result.success, "expected {source:?} to fail validation");
    let d = &result.diagnostics[0];
    (d.code, d.message.clone())
}

// ─────────────────────────────────────────────────────────────────────
// Valid programs
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_counting_loop_is_valid() {
    assert_valid("x = 0 :: while (x < 3) x = x + 1 :: end-while");
}

#[test]
fn test_write_forms_are_valid() {
    assert_valid("write(\"hi\") ::");
    assert_valid("write(\"total:\", x) ::");
    assert_valid("write(\"sum\", (a + b) * 2, c) ::");
}

#[test]
fn test_string_assignment_is_valid() {
    assert_valid("greeting = \"hello\" ::");
}

#[test]
fn test_nested_blocks_are_valid() {
    assert_valid(
        "i = 0 :: while (i < 3) if (i <> 1) then capture(i) :: end-if i = i + 1 :: end-while",
    );
}

#[test]
fn test_condition_rejects_assign_token() {
    let (code, message) = first_error("if (i = 1) then end-if");
    assert_eq!(code, DiagnosticCode::UNEXPECTED_TOKEN);
    assert_eq!(message, "unexpected token in if condition: =");
}

#[test]
fn test_empty_source_is_valid() {
    let result = check("");
    assert!(result.success);
    assert!(result.diagnostics.is_empty());
}

// ─────────────────────────────────────────────────────────────────────
// Block structure
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_end_while_without_while() {
    let result = check("end-while");
    assert!(!result.success);
    assert!(!result.diagnostics.is_empty());
    assert_eq!(result.messages(), vec!["end-while without matching while"]);
    assert_eq!(result.diagnostics[0].offset, Some(0));
}

#[test]
fn test_end_if_without_if() {
    assert_eq!(
        first_error("x = 1 :: end-if"),
        (DiagnosticCode::UNMATCHED_BLOCK_END, "end-if without matching if".to_string())
    );
}

#[test]
fn test_unclosed_while() {
    let result = check("while (x < 3) x = x + 1 ::");
    assert_eq!(result.messages(), vec!["block 'while' is never closed with end-while"]);
    assert_eq!(result.diagnostics[0].code, DiagnosticCode::UNCLOSED_BLOCK);
    assert_eq!(result.diagnostics[0].offset, None);
}

// ─────────────────────────────────────────────────────────────────────
// Conditions
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_condition_requires_paren() {
    let (code, message) = first_error("while x < 3 end-while");
    assert_eq!(code, DiagnosticCode::EXPECTED_TOKEN);
    assert_eq!(message, "syntax error near \"x\": expected '('");
}

#[test]
fn test_condition_rejects_arithmetic() {
    let (code, message) = first_error("while (x + 1 < 3) end-while");
    assert_eq!(code, DiagnosticCode::UNEXPECTED_TOKEN);
    assert_eq!(message, "unexpected token in while condition: +");
}

#[test]
fn test_condition_unbalanced_at_end_of_input() {
    let (code, message) = first_error("if (x > (1)");
    assert_eq!(code, DiagnosticCode::UNBALANCED_PARENS);
    assert_eq!(message, "malformed if condition: unbalanced parentheses");
}

#[test]
fn test_if_requires_then() {
    let (code, message) = first_error("if (x > 1) capture(x) :: end-if");
    assert_eq!(code, DiagnosticCode::EXPECTED_TOKEN);
    assert_eq!(message, "syntax error near \"capture\": expected 'then'");
}

// ─────────────────────────────────────────────────────────────────────
// write / capture
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_write_requires_string_first() {
    let (code, message) = first_error("write(x) ::");
    assert_eq!(code, DiagnosticCode::EXPECTED_TOKEN);
    assert_eq!(message, "syntax error near \"x\": expected STRING");
}

#[test]
fn test_write_missing_close_paren() {
    let (code, message) = first_error("write(\"a\" ::");
    assert_eq!(code, DiagnosticCode::MISSING_CLOSE_PAREN);
    assert_eq!(message, "missing ')' in write statement");
}

#[test]
fn test_write_missing_terminator() {
    let (code, message) = first_error("write(\"a\")");
    assert_eq!(code, DiagnosticCode::MISSING_TERMINATOR);
    assert_eq!(message, "write must end with '::'");
}

#[test]
fn test_write_rejects_relational_argument() {
    let (_, message) = first_error("write(\"a\", x < 1) ::");
    assert_eq!(message, "unexpected token in write: <");
}

#[test]
fn test_capture_missing_terminator() {
    let (code, message) = first_error("capture(x)");
    assert_eq!(code, DiagnosticCode::MISSING_TERMINATOR);
    assert_eq!(message, "capture must end with '::'");
}

#[test]
fn test_if_and_capture_validate_with_no_diagnostics() {
    let source = "x = 1 :: if (x > 0) then capture(x) :: end-if";
    let result = check(source);
    assert!(result.success);
    assert!(result.diagnostics.is_empty());

    let notes = not_executed_notes(&tokenize(source));
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| n.severity == Severity::Warning));
    assert!(notes.iter().all(|n| n.code == DiagnosticCode::NOT_EXECUTED));
    assert_eq!(notes[0].offset, Some(9));
}

#[test]
fn test_success_matches_empty_diagnostics() {
    for source in [
        "x = 1 ::",
        "if (x > 0) then end-if",
        "capture(y) ::",
        "end-if",
        "write(x) ::",
        "while (x < 1)",
    ] {
        let result = check(source);
        assert_eq!(result.success, result.diagnostics.is_empty(), "{source:?}");
    }
}

#[test]
fn test_diagnostics_are_in_source_order() {
    let result = check("end-if :: x = 1 :: end-while :: then");
    let offsets: Vec<_> = result.diagnostics.iter().map(|d| d.offset).collect();
    assert_eq!(offsets, vec![Some(0), Some(19), Some(32)]);
}

// ─────────────────────────────────────────────────────────────────────
// Assignments
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_assignment_missing_terminator() {
    let (code, message) = first_error("x = 1");
    assert_eq!(code, DiagnosticCode::MISSING_TERMINATOR);
    assert_eq!(message, "missing '::' at end of assignment");
}

#[test]
fn test_assignment_requires_equals() {
    let (_, message) = first_error("x 1 ::");
    assert_eq!(message, "syntax error near \"1\": expected ASSIGN");
}

#[test]
fn test_assignment_paren_balance() {
    assert_eq!(
        first_error("x = (1 + 2 ::").1,
        "missing closing ')' in assignment"
    );
    assert_eq!(
        first_error("x = 1 + 2) ::").1,
        "closing ')' without matching '('"
    );
}

#[test]
fn test_assignment_rejects_relational_operator() {
    let (code, message) = first_error("x = a < b ::");
    assert_eq!(code, DiagnosticCode::UNEXPECTED_TOKEN);
    assert_eq!(message, "unexpected token in assignment: <");
}

#[test]
fn test_stray_token() {
    assert_eq!(
        first_error("then ::"),
        (DiagnosticCode::UNEXPECTED_TOKEN, "unexpected token: then".to_string())
    );
}

#[test]
fn test_errors_are_collected_not_fatal() {
    let result = check("end-if :: x = 1 :: end-while :: then");
    assert_eq!(result.diagnostics.len(), 3);
}
