//! Instruction builder entry point.

use micro_lexer::{Token, TokenKind};
use micro_types::ast::{Instruction, Stmt};

use crate::cursor::TokenCursor;
use crate::lower::lower;

/// Maximum nesting of parenthesised or negated operands.
pub(crate) const MAX_EXPR_DEPTH: u32 = 64;

/// Build the flat instruction sequence for a token stream.
///
/// Only `while`, assignment and `write` produce instructions; everything
/// else is skipped.
pub fn build(tokens: &[Token]) -> Vec<Instruction> {
    lower(Parser::new(tokens).parse())
}

/// The permissive statement parser.
///
/// Unlike the validator it never reports anything: constructs it does not
/// recognise are skipped one token at a time.
pub struct Parser<'t> {
    pub(crate) cursor: TokenCursor<'t>,
    /// Current operand nesting depth.
    pub(crate) expr_depth: u32,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            expr_depth: 0,
        }
    }

    /// Parse the token stream into nested statements.
    pub fn parse(mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        while !self.cursor.at_end() {
            if let Some(stmt) = self.parse_statement() {
                stmts.push(stmt);
            }
        }
        stmts
    }

    /// Returns `true` where an expression must stop: end of input, `::`,
    /// `,`, `)`, or a word that starts or ends a statement.
    pub(crate) fn at_expression_boundary(&self) -> bool {
        match self.cursor.peek() {
            None => true,
            Some(t) => {
                matches!(
                    t.kind,
                    TokenKind::EndLine | TokenKind::Comma | TokenKind::Keyword
                ) || t.is_paren(")")
                    || t.is_loop_word()
            }
        }
    }
}
