//! Token cursor shared by the validator and the builder.

use micro_lexer::{Token, TokenKind};

pub(crate) struct TokenCursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> TokenCursor<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Look ahead by `n` tokens from the current position.
    pub(crate) fn look_ahead(&self, n: usize) -> Option<&'t Token> {
        self.tokens.get(self.pos + n)
    }

    /// Advance by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` if the current token has the given kind.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn check_paren(&self, text: &str) -> bool {
        self.peek().is_some_and(|t| t.is_paren(text))
    }

    /// If the current token has the given kind, advance and return `true`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_paren(&mut self, text: &str) -> bool {
        if self.check_paren(text) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Offset of the current token, `None` at end of input.
    pub(crate) fn offset(&self) -> Option<usize> {
        self.peek().map(Token::offset)
    }
}
