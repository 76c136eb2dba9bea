//! Execution state threaded through successive steps.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of a running program.
///
/// Owned by the caller and handed to [`crate::step`] by value; a fresh state
/// is needed for every new instruction sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionState {
    /// Index of the next instruction.
    pub pc: usize,
    pub variables: BTreeMap<String, Value>,
    /// Everything `write` has emitted, one line per write.
    pub output: String,
    /// Loop addresses to return to when a loop end is reached.
    pub return_stack: Vec<usize>,
}

impl ExecutionState {
    /// The state every program starts from.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a variable; unassigned names read as `0`.
    pub fn get(&self, name: &str) -> Value {
        self.variables.get(name).cloned().unwrap_or_default()
    }

    /// Whether execution has run off the end of a program of `len`
    /// instructions.
    pub fn is_finished(&self, len: usize) -> bool {
        self.pc >= len
    }
}
