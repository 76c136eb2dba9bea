//! Core Micro lexer: converts source text to a token stream.
//!
//! Patterns are tried in priority order at each position:
//! `::`, quoted strings, numbers, two-character relational operators,
//! `< > =`, arithmetic operators, words, then `( ) ,`.
//! Characters that start no pattern (whitespace, stray punctuation, an
//! unterminated quote) are skipped without producing a token or an error.

use micro_types::Span;

use crate::token::Token;

/// Tokenize a whole source text.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).lex()
}

/// The Micro lexer.
pub struct Lexer<'src> {
    /// The full source text.
    source: &'src str,
    /// Same text as bytes, for pattern matching.
    bytes: &'src [u8],
    /// Current byte offset into `source`.
    pos: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    /// Lex the entire source into a token stream.
    pub fn lex(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while !self.at_end() {
            match self.match_at(self.pos) {
                Some(end) => {
                    let span = Span::new(self.pos, end);
                    tokens.push(Token::new(&self.source[self.pos..end], span));
                    self.pos = end;
                }
                None => self.skip_char(),
            }
        }
        tokens
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn byte(&self, at: usize) -> Option<u8> {
        self.bytes.get(at).copied()
    }

    /// Skip one whole character (multi-byte UTF-8 included).
    fn skip_char(&mut self) {
        let width = self.source[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.pos += width;
    }

    // ─────────────────────────────────────────────────────────────
    // Pattern matching
    // ─────────────────────────────────────────────────────────────

    /// Return the end offset of the highest-priority pattern matching at
    /// `start`, or `None` if nothing matches.
    fn match_at(&self, start: usize) -> Option<usize> {
        let first = self.byte(start)?;
        let second = self.byte(start + 1);

        if first == b':' && second == Some(b':') {
            return Some(start + 2);
        }
        if first == b'"' {
            if let Some(end) = self.match_string(start) {
                return Some(end);
            }
        }
        if first.is_ascii_digit() {
            return Some(self.match_number(start));
        }
        match (first, second) {
            (b'<', Some(b'=' | b'>')) | (b'>', Some(b'=')) => return Some(start + 2),
            (b'<' | b'>' | b'=', _) => return Some(start + 1),
            (b'+' | b'-' | b'*' | b'/', _) => return Some(start + 1),
            _ => {}
        }
        if first.is_ascii_alphabetic() || first == b'_' {
            return Some(self.match_word(start));
        }
        if matches!(first, b'(' | b')' | b',') {
            return Some(start + 1);
        }
        None
    }

    /// `"` … `"` with no inner quote. Newlines are allowed inside.
    fn match_string(&self, start: usize) -> Option<usize> {
        let rest = &self.bytes[start + 1..];
        rest.iter().position(|&b| b == b'"').map(|i| start + i + 2)
    }

    /// `\d+(\.\d+)?`
    fn match_number(&self, start: usize) -> usize {
        let mut end = self.digits_from(start);
        if self.byte(end) == Some(b'.') && self.byte(end + 1).is_some_and(|b| b.is_ascii_digit()) {
            end = self.digits_from(end + 1);
        }
        end
    }

    fn digits_from(&self, mut at: usize) -> usize {
        while self.byte(at).is_some_and(|b| b.is_ascii_digit()) {
            at += 1;
        }
        at
    }

    /// `[A-Za-z_][A-Za-z0-9_]*`, extended so `end-if` and `end-while` stay
    /// one word.
    fn match_word(&self, start: usize) -> usize {
        let end = self.word_end(start);
        if &self.bytes[start..end] == b"end" && self.byte(end) == Some(b'-') {
            let tail_start = end + 1;
            if self.byte(tail_start).is_some_and(|b| b.is_ascii_alphabetic()) {
                let tail_end = self.word_end(tail_start);
                let tail = &self.bytes[tail_start..tail_end];
                if tail == b"if" || tail == b"while" {
                    return tail_end;
                }
            }
        }
        end
    }

    fn word_end(&self, start: usize) -> usize {
        let mut at = start + 1;
        while self
            .byte(at)
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            at += 1;
        }
        at
    }
}
