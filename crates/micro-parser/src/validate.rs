//! Syntax validation.
//!
//! Walks the token stream once, checking the local grammar of each
//! statement and the nesting of `if`/`while` blocks. Every problem becomes a
//! diagnostic and checking resumes after it; nothing here fails.

use micro_lexer::{Token, TokenKind};
use micro_types::{Diagnostic, DiagnosticCode};
use serde::{Deserialize, Serialize};

use crate::cursor::TokenCursor;

/// Result of validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `true` iff `diagnostics` is empty.
    pub success: bool,
    /// Syntax errors in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Error messages in source order.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.message.clone()).collect()
    }
}

/// Validate a token stream.
pub fn validate(tokens: &[Token]) -> ValidationResult {
    Validator::new(tokens).validate()
}

/// One W200 note per `if` or `capture` keyword: both are accepted by the
/// validator but never reach the instruction sequence.
pub fn not_executed_notes(tokens: &[Token]) -> Vec<Diagnostic> {
    tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Keyword && (t.lexeme == "if" || t.lexeme == "capture"))
        .map(|t| {
            Diagnostic::new(
                DiagnosticCode::NOT_EXECUTED,
                format!("'{}' statements are checked but not executed", t.lexeme),
                Some(t.offset()),
            )
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    If,
    While,
}

impl BlockKind {
    fn name(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::While => "while",
        }
    }
}

/// The syntax validator.
pub struct Validator<'t> {
    cursor: TokenCursor<'t>,
    diagnostics: Vec<Diagnostic>,
    /// Currently open blocks, innermost last.
    blocks: Vec<BlockKind>,
}

impl<'t> Validator<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            diagnostics: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Check the whole stream and collect diagnostics.
    pub fn validate(mut self) -> ValidationResult {
        while let Some(token) = self.cursor.advance() {
            if token.is_word("if") {
                self.check_if();
            } else if token.is_word("while") {
                self.check_while();
            } else if token.is_word("end-if") {
                self.close_block(BlockKind::If, token);
            } else if token.is_word("end-while") {
                self.close_block(BlockKind::While, token);
            } else if token.is_word("write") {
                self.check_write();
            } else if token.is_word("capture") {
                self.check_capture();
            } else if token.kind == TokenKind::Identifier {
                self.check_assignment();
            } else if token.kind == TokenKind::EndLine {
                // Empty statement.
            } else {
                self.error(
                    DiagnosticCode::UNEXPECTED_TOKEN,
                    format!("unexpected token: {}", token.lexeme),
                    Some(token.offset()),
                );
            }
        }

        if let Some(block) = self.blocks.last() {
            let name = block.name();
            self.error(
                DiagnosticCode::UNCLOSED_BLOCK,
                format!("block '{name}' is never closed with end-{name}"),
                None,
            );
        }

        ValidationResult {
            success: self.diagnostics.is_empty(),
            diagnostics: self.diagnostics,
        }
    }

    // ── Statements ────────────────────────────────────────────────────────────

    /// `if ( <condition> ) then`
    fn check_if(&mut self) {
        if self.check_condition("if") && self.expect(TokenKind::Keyword, Some("then")) {
            self.blocks.push(BlockKind::If);
        }
    }

    /// `while ( <condition> )`
    fn check_while(&mut self) {
        if self.check_condition("while") {
            self.blocks.push(BlockKind::While);
        }
    }

    /// `end-if` / `end-while`
    fn close_block(&mut self, kind: BlockKind, token: &Token) {
        if self.blocks.pop() != Some(kind) {
            let name = kind.name();
            self.error(
                DiagnosticCode::UNMATCHED_BLOCK_END,
                format!("end-{name} without matching {name}"),
                Some(token.offset()),
            );
        }
    }

    /// `write ( <string> [, <expr-tokens>] ) ::`
    fn check_write(&mut self) {
        if !self.expect(TokenKind::Paren, Some("(")) {
            return;
        }
        if !self.expect(TokenKind::String, None) {
            return;
        }
        if self.cursor.eat(TokenKind::Comma) {
            let mut depth = 0u32;
            while let Some(current) = self.cursor.peek() {
                if current.kind == TokenKind::EndLine || (depth == 0 && current.is_paren(")")) {
                    break;
                }
                self.cursor.advance();
                match current.kind {
                    TokenKind::Paren if current.lexeme == "(" => depth += 1,
                    TokenKind::Paren => depth -= 1,
                    TokenKind::Number
                    | TokenKind::Identifier
                    | TokenKind::Operator
                    | TokenKind::Comma => {}
                    _ => self.error(
                        DiagnosticCode::UNEXPECTED_TOKEN,
                        format!("unexpected token in write: {}", current.lexeme),
                        Some(current.offset()),
                    ),
                }
            }
        }
        if !self.cursor.eat_paren(")") {
            self.error(
                DiagnosticCode::MISSING_CLOSE_PAREN,
                "missing ')' in write statement",
                self.cursor.offset(),
            );
            return;
        }
        self.expect_terminator("write must end with '::'");
    }

    /// `capture ( <identifier> ) ::`
    fn check_capture(&mut self) {
        if !self.expect(TokenKind::Paren, Some("(")) {
            return;
        }
        if !self.expect(TokenKind::Identifier, None) {
            return;
        }
        if !self.expect(TokenKind::Paren, Some(")")) {
            return;
        }
        self.expect_terminator("capture must end with '::'");
    }

    /// `identifier = <expr-tokens> ::`
    fn check_assignment(&mut self) {
        if !self.expect(TokenKind::Assign, None) {
            return;
        }
        let mut depth = 0i32;
        while let Some(current) = self.cursor.peek() {
            if current.kind == TokenKind::EndLine {
                break;
            }
            self.cursor.advance();
            match current.kind {
                TokenKind::Paren => {
                    depth += if current.lexeme == "(" { 1 } else { -1 };
                    if depth < 0 {
                        self.error(
                            DiagnosticCode::UNBALANCED_PARENS,
                            "closing ')' without matching '('",
                            Some(current.offset()),
                        );
                        break;
                    }
                }
                TokenKind::Number
                | TokenKind::Identifier
                | TokenKind::Operator
                | TokenKind::String => {}
                _ => self.error(
                    DiagnosticCode::UNEXPECTED_TOKEN,
                    format!("unexpected token in assignment: {}", current.lexeme),
                    Some(current.offset()),
                ),
            }
        }
        if depth > 0 {
            self.error(
                DiagnosticCode::MISSING_CLOSE_PAREN,
                "missing closing ')' in assignment",
                self.cursor.offset(),
            );
        }
        self.expect_terminator("missing '::' at end of assignment");
    }

    /// `( <condition tokens> )` for `if` and `while`.
    ///
    /// Returns `false` when the statement must be abandoned.
    fn check_condition(&mut self, label: &str) -> bool {
        if !self.expect(TokenKind::Paren, Some("(")) {
            return false;
        }
        let mut open = 1u32;
        while open > 0 {
            let Some(current) = self.cursor.advance() else {
                break;
            };
            match current.kind {
                TokenKind::Paren if current.lexeme == "(" => open += 1,
                TokenKind::Paren => open -= 1,
                TokenKind::Number
                | TokenKind::Identifier
                | TokenKind::RelOperator
                | TokenKind::LogicOperator => {}
                _ => self.error(
                    DiagnosticCode::UNEXPECTED_TOKEN,
                    format!("unexpected token in {label} condition: {}", current.lexeme),
                    Some(current.offset()),
                ),
            }
        }
        if open != 0 {
            self.error(
                DiagnosticCode::UNBALANCED_PARENS,
                format!("malformed {label} condition: unbalanced parentheses"),
                None,
            );
            return false;
        }
        true
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Expect a token of `kind` (and `lexeme`, if given). Reports and returns
    /// `false` on mismatch without consuming anything.
    fn expect(&mut self, kind: TokenKind, lexeme: Option<&str>) -> bool {
        let matched = self
            .cursor
            .peek()
            .is_some_and(|t| t.kind == kind && lexeme.is_none_or(|l| t.lexeme == l));
        if matched {
            self.cursor.advance();
            return true;
        }
        let expected = match lexeme {
            Some(l) => format!("'{l}'"),
            None => kind.to_string(),
        };
        let found = self
            .cursor
            .peek()
            .map_or("end of input", |t| t.lexeme.as_str());
        self.error(
            DiagnosticCode::EXPECTED_TOKEN,
            format!("syntax error near \"{found}\": expected {expected}"),
            self.cursor.offset(),
        );
        false
    }

    fn expect_terminator(&mut self, message: &str) {
        if !self.cursor.eat(TokenKind::EndLine) {
            self.error(
                DiagnosticCode::MISSING_TERMINATOR,
                message,
                self.cursor.offset(),
            );
        }
    }

    fn error(&mut self, code: DiagnosticCode, message: impl Into<String>, offset: Option<usize>) {
        self.diagnostics.push(Diagnostic::new(code, message, offset));
    }
}
