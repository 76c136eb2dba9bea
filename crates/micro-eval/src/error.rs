//! Runtime error types for the Micro executor.

use thiserror::Error;

/// Errors raised while driving a program to completion.
///
/// Single steps never fail; only the run loop can give up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The program did not finish within the step budget.
    #[error("gas exhausted after {limit} steps")]
    GasExhausted { limit: u64 },
}

/// Result alias for executor operations.
pub type EvalResult<T> = Result<T, EvalError>;
