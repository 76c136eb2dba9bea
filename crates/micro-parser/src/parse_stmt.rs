//! Statement parsing.

use micro_lexer::TokenKind;
use micro_types::ast::Stmt;

use crate::parser::Parser;

impl<'t> Parser<'t> {
    /// Parse one statement, or skip a single token and return `None`.
    pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
        let token = self.cursor.peek()?;
        if token.is_word("while") {
            return Some(self.parse_while());
        }
        if token.kind == TokenKind::Identifier
            && !token.is_loop_word()
            && self
                .cursor
                .look_ahead(1)
                .is_some_and(|t| t.kind == TokenKind::Assign)
        {
            return Some(self.parse_assignment());
        }
        if token.is_word("write") {
            return Some(self.parse_write());
        }
        // `if`, `capture`, stray tokens and empty statements leave nothing.
        self.cursor.advance();
        None
    }

    /// `while ( condition ) body end-while`
    fn parse_while(&mut self) -> Stmt {
        self.cursor.advance(); // eat `while`
        let had_paren = self.cursor.eat_paren("(");
        let condition = self.parse_condition();
        if had_paren {
            self.skip_past_close_paren();
        }

        let mut body = Vec::new();
        while let Some(token) = self.cursor.peek() {
            if token.is_word("end-while") {
                self.cursor.advance();
                break;
            }
            if let Some(stmt) = self.parse_statement() {
                body.push(stmt);
            }
        }
        Stmt::While { condition, body }
    }

    /// `target = value ::`
    fn parse_assignment(&mut self) -> Stmt {
        let target = self
            .cursor
            .advance()
            .map(|t| t.lexeme.clone())
            .unwrap_or_default();
        self.cursor.advance(); // eat `=`
        let value = self.parse_expression();
        self.skip_statement_end();
        Stmt::Assign { target, value }
    }

    /// `write ( arg, arg, ... ) ::`
    fn parse_write(&mut self) -> Stmt {
        self.cursor.advance(); // eat `write`
        self.cursor.eat_paren("(");
        let mut args = Vec::new();
        loop {
            if self.cursor.eat_paren(")") {
                break;
            }
            if self.cursor.eat(TokenKind::Comma) {
                continue;
            }
            if self.at_expression_boundary() {
                break;
            }
            let before = self.cursor.position();
            args.push(self.parse_expression());
            if self.cursor.position() == before {
                self.cursor.advance();
            }
        }
        self.cursor.eat(TokenKind::EndLine);
        Stmt::Write { args }
    }

    /// Skip to just past the `)` closing a loop header, allowing for nested
    /// parentheses the condition did not consume.
    fn skip_past_close_paren(&mut self) {
        let mut depth = 1u32;
        while let Some(token) = self.cursor.peek() {
            if token.is_loop_word() || token.kind == TokenKind::EndLine {
                break;
            }
            self.cursor.advance();
            if token.is_paren("(") {
                depth += 1;
            } else if token.is_paren(")") {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
        }
    }

    /// Skip the remainder of a statement through its `::`. Stops early,
    /// without consuming, at a word that begins or ends another statement.
    fn skip_statement_end(&mut self) {
        while let Some(token) = self.cursor.peek() {
            if token.kind == TokenKind::EndLine {
                self.cursor.advance();
                return;
            }
            if token.kind == TokenKind::Keyword || token.is_loop_word() {
                return;
            }
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use micro_lexer::tokenize;
    use micro_types::ast::{BinOp, Expr, Stmt};

    fn parse(source: &str) -> Vec<Stmt> {
        let tokens = tokenize(source);
        Parser::new(&tokens).parse()
    }

    #[test]
    fn test_nested_while_keeps_body_order() {
        let stmts = parse("while (i < 2) a = 1 :: while (j < 2) b = 2 :: end-while c = 3 :: end-while");
        let Stmt::While { body, .. } = &stmts[0] else {
            panic!("expected while, got {stmts:?}");
        };
        assert_eq!(body.len(), 3);
        assert!(matches!(&body[1], Stmt::While { body, .. } if body.len() == 1));
        assert!(matches!(&body[2], Stmt::Assign { target, .. } if target == "c"));
    }

    #[test]
    fn test_missing_terminator_stops_at_next_statement() {
        let stmts = parse("while (x < 3) x = x + 1 end-while write(\"done\") ::");
        assert_eq!(stmts.len(), 2);
        let Stmt::While { body, .. } = &stmts[0] else {
            panic!("expected while");
        };
        assert_eq!(
            body,
            &vec![Stmt::Assign {
                target: "x".into(),
                value: Expr::binary(BinOp::Add, Expr::ident("x"), Expr::number(1.0)),
            }]
        );
    }

    #[test]
    fn test_if_and_capture_leave_nothing() {
        let stmts = parse("if (x > 1) then capture(y) :: end-if");
        assert!(stmts.is_empty());
    }

    #[test]
    fn test_write_without_parens_still_terminates() {
        let stmts = parse("write \"a\" ::");
        assert_eq!(stmts, vec![Stmt::Write { args: vec![Expr::string("a")] }]);
    }
}
