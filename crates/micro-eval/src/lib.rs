//! Micro stepwise executor.
//!
//! Walks a flat instruction sequence one instruction per call, threading an
//! [`ExecutionState`] value owned by the caller.

mod error;
mod executor;
mod state;
mod value;

pub use error::{EvalError, EvalResult};
pub use executor::{evaluate, run, step, StepResult, DEFAULT_GAS_LIMIT};
pub use state::ExecutionState;
pub use value::Value;
