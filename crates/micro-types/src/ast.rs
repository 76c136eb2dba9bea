//! Expression, statement and instruction types for the Micro language.
//!
//! The parser produces nested [`Stmt`] trees; lowering flattens them into
//! the marker-based [`Instruction`] stream the executor walks.

use serde::{Deserialize, Serialize};
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Operators
// ══════════════════════════════════════════════════════════════════════════════

/// Binary operators usable in expressions and conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    And,
    Or,
}

impl BinOp {
    /// Resolve an operator lexeme.
    ///
    /// Both spellings of equality (`=`, `==`) and inequality (`<>`, `!=`) are
    /// accepted. `not` is unary and has no binary form.
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        let op = match lexeme {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "=" | "==" => Self::Eq,
            "<>" | "!=" => Self::NotEq,
            "<" => Self::Less,
            ">" => Self::Greater,
            "<=" => Self::LessEq,
            ">=" => Self::GreaterEq,
            "and" => Self::And,
            "or" => Self::Or,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEq => "<=",
            Self::GreaterEq => ">=",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression tree, evaluated against the current variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Number { value: f64 },
    /// String literal with its surrounding quotes stripped.
    Str { value: String },
    Identifier { name: String },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Self::Number { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Str {
            value: value.into(),
        }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// The fallback operand for tokens that cannot start an expression.
    pub fn zero() -> Self {
        Self::number(0.0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value } => f.write_str(&format_number(*value)),
            Self::Str { value } => write!(f, "\"{value}\""),
            Self::Identifier { name } => f.write_str(name),
            Self::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
        }
    }
}

/// Render a number the way the console shows it: integral values without a
/// fractional part, infinities spelled out.
pub fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    format!("{n}")
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements (nested form)
// ══════════════════════════════════════════════════════════════════════════════

/// A parsed statement. Loop bodies stay nested until lowering.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `while ( condition ) body end-while`
    While { condition: Expr, body: Vec<Stmt> },
    /// `target = value ::`
    Assign { target: String, value: Expr },
    /// `write ( args ) ::`
    Write { args: Vec<Expr> },
}

// ══════════════════════════════════════════════════════════════════════════════
// Instructions (flat form)
// ══════════════════════════════════════════════════════════════════════════════

/// One executable step of a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    /// Loop entry. `end` is the index of the matching [`Instruction::LoopEnd`].
    Loop { condition: Expr, end: usize },
    LoopEnd,
    Assign { target: String, value: Expr },
    Write { args: Vec<Expr> },
}

impl Instruction {
    /// Short name used in execution traces.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loop { .. } => "while",
            Self::LoopEnd => "end-while",
            Self::Assign { .. } => "assignment",
            Self::Write { .. } => "write",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loop { condition, end } => write!(f, "while {condition} -> {end}"),
            Self::LoopEnd => f.write_str("end-while"),
            Self::Assign { target, value } => write!(f, "{target} = {value}"),
            Self::Write { args } => {
                f.write_str("write(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
