//! Micro lexer: converts source text into a token stream.

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind, KEYWORDS, LOGIC_OPERATORS, REL_OPERATORS, ARITH_OPERATORS};
