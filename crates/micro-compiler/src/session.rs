//! A validated program being stepped by a front end.
//!
//! Holds the instruction sequence, the current execution state and the trace
//! log, and enforces a step budget.

use micro_eval::{EvalError, ExecutionState, DEFAULT_GAS_LIMIT};
use micro_types::ast::Instruction;
use serde::Serialize;
use thiserror::Error;

use crate::pipeline::compile_to_result;

/// Errors from starting or driving a session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The source failed validation; carries the rendered report.
    #[error("program has {} syntax error(s)", .0.len())]
    Invalid(Vec<String>),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// What one session step did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub trace: String,
    pub finished: bool,
}

/// A program ready for step-by-step execution.
#[derive(Debug, Clone)]
pub struct Session {
    program: Vec<Instruction>,
    state: ExecutionState,
    /// Every trace line produced so far.
    log: Vec<String>,
    steps: u64,
    gas_limit: u64,
}

impl Session {
    /// Validate and build `source`, refusing programs with syntax errors.
    pub fn start(source: &str, filename: &str) -> Result<Self, SessionError> {
        let result = compile_to_result(source, filename);
        match result.instructions {
            Some(program) if result.success => Ok(Self::from_program(program)),
            _ => Err(SessionError::Invalid(result.report)),
        }
    }

    /// Wrap an already built program.
    pub fn from_program(program: Vec<Instruction>) -> Self {
        Self {
            program,
            state: ExecutionState::new(),
            log: Vec::new(),
            steps: 0,
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }

    /// Set the maximum number of steps this session may take.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Advance one instruction.
    ///
    /// Once finished, further calls are no-ops reporting `finished` and do
    /// not use up the budget.
    pub fn step(&mut self) -> Result<StepOutcome, SessionError> {
        if !self.is_finished() {
            if self.steps >= self.gas_limit {
                return Err(EvalError::GasExhausted {
                    limit: self.gas_limit,
                }
                .into());
            }
            self.steps += 1;
        }
        let result = micro_eval::step(std::mem::take(&mut self.state), &self.program);
        self.state = result.state;
        self.log.push(result.trace.clone());
        Ok(StepOutcome {
            trace: result.trace,
            finished: result.finished,
        })
    }

    /// Step until the program finishes or the budget runs out.
    pub fn run_to_end(&mut self) -> Result<(), SessionError> {
        while !self.is_finished() {
            self.step()?;
        }
        Ok(())
    }

    /// Start over from a fresh state, keeping the program.
    pub fn reset(&mut self) {
        self.state = ExecutionState::new();
        self.log.clear();
        self.steps = 0;
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished(self.program.len())
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    /// Text emitted by `write` so far.
    pub fn output(&self) -> &str {
        &self.state.output
    }

    /// Trace lines of every step taken.
    pub fn log_output(&self) -> &[String] {
        &self.log
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps
    }
}

/// Compile and run `source` to completion within `gas_limit` steps.
pub fn run_to_end(
    source: &str,
    filename: &str,
    gas_limit: u64,
) -> Result<ExecutionState, SessionError> {
    let mut session = Session::start(source, filename)?.with_gas_limit(gas_limit);
    session.run_to_end()?;
    Ok(session.state)
}
