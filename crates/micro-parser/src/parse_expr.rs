//! Expression and condition parsing.
//!
//! Precedence (lowest → highest):
//! 3. `+`, `-`
//! 2. `*`, `/`
//! 1. operands: number, identifier, string, `( expr )`, unary `-`
//!
//! A token that cannot start an operand reads as the literal `0` and is
//! left for the caller.

use micro_lexer::TokenKind;
use micro_types::ast::{BinOp, Expr};

use crate::parser::{Parser, MAX_EXPR_DEPTH};

impl<'t> Parser<'t> {
    /// `Condition = Expr [ RelOp Expr ]`
    ///
    /// A condition without an operator is tested for truthiness. An operator
    /// with no binary meaning (`not`) makes the whole condition `0`.
    pub(crate) fn parse_condition(&mut self) -> Expr {
        let left = self.parse_expression();
        let Some(op_token) = self.cursor.peek().filter(|t| {
            matches!(
                t.kind,
                TokenKind::RelOperator | TokenKind::LogicOperator | TokenKind::Assign
            )
        }) else {
            return left;
        };
        self.cursor.advance();
        let right = self.parse_expression();
        match BinOp::from_lexeme(&op_token.lexeme) {
            Some(op) => Expr::binary(op, left, right),
            None => Expr::zero(),
        }
    }

    /// `Expr = Term { ("+" | "-") Term }`
    pub(crate) fn parse_expression(&mut self) -> Expr {
        let mut left = self.parse_term();
        while let Some(op) = self.match_operator(&[BinOp::Add, BinOp::Sub]) {
            self.cursor.advance();
            let right = self.parse_term();
            left = Expr::binary(op, left, right);
        }
        left
    }

    /// `Term = Operand { ("*" | "/") Operand }`
    fn parse_term(&mut self) -> Expr {
        let mut left = self.parse_operand();
        while let Some(op) = self.match_operator(&[BinOp::Mul, BinOp::Div]) {
            self.cursor.advance();
            let right = self.parse_operand();
            left = Expr::binary(op, left, right);
        }
        left
    }

    fn parse_operand(&mut self) -> Expr {
        let Some(token) = self.cursor.peek() else {
            return Expr::zero();
        };
        match token.kind {
            TokenKind::Number => {
                self.cursor.advance();
                Expr::number(token.lexeme.parse().unwrap_or(0.0))
            }
            TokenKind::Identifier if !token.is_loop_word() => {
                self.cursor.advance();
                Expr::ident(token.lexeme.clone())
            }
            TokenKind::String => {
                self.cursor.advance();
                Expr::string(strip_quotes(&token.lexeme))
            }
            TokenKind::Paren if token.lexeme == "(" => {
                self.cursor.advance();
                self.nested(|p| {
                    let inner = p.parse_expression();
                    p.cursor.eat_paren(")");
                    inner
                })
            }
            TokenKind::Operator if token.lexeme == "-" => {
                self.cursor.advance();
                self.nested(|p| Expr::binary(BinOp::Sub, Expr::zero(), p.parse_operand()))
            }
            _ => Expr::zero(),
        }
    }

    /// Run `f` one nesting level deeper; past the limit the operand reads
    /// as `0`.
    fn nested(&mut self, f: impl FnOnce(&mut Self) -> Expr) -> Expr {
        if self.expr_depth >= MAX_EXPR_DEPTH {
            return Expr::zero();
        }
        self.expr_depth += 1;
        let expr = f(self);
        self.expr_depth -= 1;
        expr
    }

    /// If the current token is one of the given arithmetic operators,
    /// return it without advancing.
    fn match_operator(&self, ops: &[BinOp]) -> Option<BinOp> {
        let token = self.cursor.peek()?;
        if token.kind != TokenKind::Operator {
            return None;
        }
        BinOp::from_lexeme(&token.lexeme).filter(|op| ops.contains(op))
    }
}

fn strip_quotes(lexeme: &str) -> &str {
    lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme)
}
