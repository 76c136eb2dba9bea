use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity.
///
/// Only errors affect whether validation succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Numeric diagnostic code.
///
/// `E1xx` are syntax errors, `W2xx` are warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiagnosticCode(pub u16);

impl DiagnosticCode {
    // ── Syntax errors (E100–E199) ──
    pub const UNEXPECTED_TOKEN: Self = Self(100);
    pub const EXPECTED_TOKEN: Self = Self(101);
    pub const UNBALANCED_PARENS: Self = Self(102);
    pub const UNMATCHED_BLOCK_END: Self = Self(103);
    pub const UNCLOSED_BLOCK: Self = Self(104);
    pub const MISSING_CLOSE_PAREN: Self = Self(105);
    pub const MISSING_TERMINATOR: Self = Self(106);

    // ── Warnings (W200–W299) ──
    pub const NOT_EXECUTED: Self = Self(200);

    /// Default severity for this code.
    pub fn severity(self) -> Severity {
        match self.0 {
            200..=299 => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity() {
            Severity::Error => write!(f, "E{}", self.0),
            Severity::Warning => write!(f, "W{}", self.0),
        }
    }
}

/// A single validator finding.
///
/// The front end renders these; `message` alone is the human-readable line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    /// Byte offset of the offending token, `None` at end of input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>, offset: Option<usize>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: message.into(),
            offset,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{} @{}: {}", self.code, offset, self.message),
            None => write!(f, "{} @end: {}", self.code, self.message),
        }
    }
}
