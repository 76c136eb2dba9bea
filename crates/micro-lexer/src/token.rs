//! Token types for the Micro lexer.
//!
//! Defines [`TokenKind`], the twelve lexical classes, and [`Token`], which
//! pairs a kind with its lexeme and source [`Span`].

use micro_types::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Words classified as [`TokenKind::Keyword`].
///
/// `while` and `end-while` are absent: they lex as
/// identifiers and the validator and builder recognise them by text.
pub const KEYWORDS: &[&str] = &["if", "then", "end-if", "write", "capture"];

/// Words classified as [`TokenKind::LogicOperator`].
pub const LOGIC_OPERATORS: &[&str] = &["and", "or", "not"];

/// Relational operators. `=` among them classifies as [`TokenKind::Assign`].
pub const REL_OPERATORS: &[&str] = &["<", ">", "<=", ">=", "<>", "="];

/// Arithmetic operators.
pub const ARITH_OPERATORS: &[&str] = &["+", "-", "*", "/"];

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    /// `+ - * /`
    Operator,
    /// `< > <= >= <>`
    RelOperator,
    /// `and or not`
    LogicOperator,
    /// `(` or `)`
    Paren,
    Comma,
    /// Quoted text, quotes included in the lexeme.
    String,
    /// The statement terminator `::`
    EndLine,
    /// `=`
    Assign,
    Unknown,
}

impl TokenKind {
    /// Classify a matched lexeme.
    pub fn classify(lexeme: &str) -> Self {
        if lexeme == "::" {
            Self::EndLine
        } else if is_string_lexeme(lexeme) {
            Self::String
        } else if is_number_lexeme(lexeme) {
            Self::Number
        } else if lexeme == "," {
            Self::Comma
        } else if lexeme == "(" || lexeme == ")" {
            Self::Paren
        } else if LOGIC_OPERATORS.contains(&lexeme) {
            Self::LogicOperator
        } else if REL_OPERATORS.contains(&lexeme) {
            if lexeme == "=" {
                Self::Assign
            } else {
                Self::RelOperator
            }
        } else if ARITH_OPERATORS.contains(&lexeme) {
            Self::Operator
        } else if KEYWORDS.contains(&lexeme) {
            Self::Keyword
        } else if is_word_lexeme(lexeme) {
            Self::Identifier
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Keyword => "KEYWORD",
            Self::Identifier => "IDENTIFIER",
            Self::Number => "NUMBER",
            Self::Operator => "OPERATOR",
            Self::RelOperator => "REL_OPERATOR",
            Self::LogicOperator => "LOGIC_OPERATOR",
            Self::Paren => "PAREN",
            Self::Comma => "COMMA",
            Self::String => "STRING",
            Self::EndLine => "END_LINE",
            Self::Assign => "ASSIGN",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

fn is_string_lexeme(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"') && !s[1..s.len() - 1].contains('"')
}

fn is_number_lexeme(s: &str) -> bool {
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    let digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    digits(int) && frac.is_none_or(digits)
}

/// Identifier shape: a letter or `_`, then letters, digits or `_`.
/// The two hyphenated block closers also count as words.
fn is_word_lexeme(s: &str) -> bool {
    if s == "end-if" || s == "end-while" {
        return true;
    }
    let mut bytes = s.bytes();
    matches!(bytes.next(), Some(b) if b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact matched source text.
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    /// Create a token, classifying the lexeme.
    pub fn new(lexeme: impl Into<String>, span: Span) -> Self {
        let lexeme = lexeme.into();
        Self {
            kind: TokenKind::classify(&lexeme),
            lexeme,
            span,
        }
    }

    /// Byte offset where the token starts.
    pub fn offset(&self) -> usize {
        self.span.start
    }

    /// Returns `true` if this is a keyword-position word with the given text.
    ///
    /// Matches both [`TokenKind::Keyword`] and [`TokenKind::Identifier`], so
    /// `while` and `end-while` are found even though they lex as identifiers.
    pub fn is_word(&self, text: &str) -> bool {
        matches!(self.kind, TokenKind::Keyword | TokenKind::Identifier) && self.lexeme == text
    }

    /// Returns `true` for `while` and `end-while`.
    pub fn is_loop_word(&self) -> bool {
        self.is_word("while") || self.is_word("end-while")
    }

    pub fn is_paren(&self, text: &str) -> bool {
        self.kind == TokenKind::Paren && self.lexeme == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] \"{}\" @{}", self.kind, self.lexeme, self.offset())
    }
}
