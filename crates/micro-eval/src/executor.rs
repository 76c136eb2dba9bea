//! Single-step execution and expression evaluation.

use crate::error::{EvalError, EvalResult};
use crate::state::ExecutionState;
use crate::value::Value;
use micro_types::ast::{Expr, Instruction};
use serde::Serialize;
use std::collections::BTreeMap;

/// Step budget used by callers that do not pick one.
pub const DEFAULT_GAS_LIMIT: u64 = 100_000;

/// Outcome of one [`step`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub state: ExecutionState,
    /// Human-readable description of what this step did.
    pub trace: String,
    /// `true` once the program counter has left the program.
    pub finished: bool,
}

/// Execute exactly one instruction.
///
/// Stepping a state that is already past the end changes nothing and
/// reports `finished`.
pub fn step(mut state: ExecutionState, program: &[Instruction]) -> StepResult {
    let Some(instruction) = program.get(state.pc) else {
        return StepResult {
            state,
            trace: "execution finished".to_string(),
            finished: true,
        };
    };

    let at = state.pc;
    state.pc += 1;
    let mut trace = format!("step {}: {}", at + 1, instruction.name());

    match instruction {
        Instruction::Loop { condition, end } => {
            if evaluate(condition, &state.variables).is_truthy() {
                state.return_stack.push(at);
            } else {
                state.pc = (end + 1).min(program.len());
                trace.push_str("\nloop exited");
            }
        }
        Instruction::LoopEnd => {
            // An empty stack falls through.
            if let Some(address) = state.return_stack.pop() {
                state.pc = address;
            }
        }
        Instruction::Assign { target, value } => {
            let value = evaluate(value, &state.variables);
            trace.push_str(&format!("\nassigned: {target} = {value}"));
            state.variables.insert(target.clone(), value);
        }
        Instruction::Write { args } => {
            let text = args
                .iter()
                .map(|arg| evaluate(arg, &state.variables).to_string())
                .collect::<Vec<_>>()
                .join(" ");
            trace.push_str(&format!("\noutput: {text}"));
            state.output.push_str(&text);
            state.output.push('\n');
        }
    }

    let finished = state.is_finished(program.len());
    StepResult {
        state,
        trace,
        finished,
    }
}

/// Step until the program finishes, collecting every trace line.
///
/// Gives up with [`EvalError::GasExhausted`] after `gas_limit` steps.
pub fn run(
    mut state: ExecutionState,
    program: &[Instruction],
    gas_limit: u64,
) -> EvalResult<(ExecutionState, Vec<String>)> {
    let mut traces = Vec::new();
    let mut gas = 0u64;
    while !state.is_finished(program.len()) {
        if gas >= gas_limit {
            return Err(EvalError::GasExhausted { limit: gas_limit });
        }
        gas += 1;
        let result = step(state, program);
        traces.push(result.trace);
        state = result.state;
    }
    Ok((state, traces))
}

/// Evaluate an expression against the current variables.
pub fn evaluate(expr: &Expr, variables: &BTreeMap<String, Value>) -> Value {
    match expr {
        Expr::Number { value } => Value::Number(*value),
        Expr::Str { value } => Value::Text(value.clone()),
        Expr::Identifier { name } => variables.get(name).cloned().unwrap_or_default(),
        Expr::Binary { op, left, right } => {
            let left = evaluate(left, variables);
            let right = evaluate(right, variables);
            Value::apply(*op, &left, &right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use micro_types::ast::BinOp;

    #[test]
    fn test_loop_end_with_empty_stack_falls_through() {
        let program = vec![Instruction::LoopEnd];
        let result = step(ExecutionState::new(), &program);
        assert_eq!(result.state.pc, 1);
        assert!(result.finished);
    }

    #[test]
    fn test_false_loop_jumps_past_its_end() {
        let program = vec![
            Instruction::Loop {
                condition: Expr::zero(),
                end: 2,
            },
            Instruction::Write { args: vec![] },
            Instruction::LoopEnd,
            Instruction::Assign {
                target: "after".into(),
                value: Expr::number(1.0),
            },
        ];
        let result = step(ExecutionState::new(), &program);
        assert_eq!(result.state.pc, 3);
        assert!(result.state.return_stack.is_empty());
        assert!(result.trace.ends_with("loop exited"));
    }

    #[test]
    fn test_true_loop_pushes_its_address() {
        let program = vec![
            Instruction::Loop {
                condition: Expr::number(1.0),
                end: 1,
            },
            Instruction::LoopEnd,
        ];
        let result = step(ExecutionState::new(), &program);
        assert_eq!(result.state.return_stack, vec![0]);
        let result = step(result.state, &program);
        assert_eq!(result.state.pc, 0);
        assert!(!result.finished);
    }

    #[test]
    fn test_run_gives_up_on_infinite_loop() {
        let program = vec![
            Instruction::Loop {
                condition: Expr::number(1.0),
                end: 1,
            },
            Instruction::LoopEnd,
        ];
        let err = run(ExecutionState::new(), &program, 50).unwrap_err();
        assert_eq!(err, EvalError::GasExhausted { limit: 50 });
        assert_eq!(err.to_string(), "gas exhausted after 50 steps");
    }

    #[test]
    fn test_evaluate_binary() {
        let mut vars = BTreeMap::new();
        vars.insert("x".to_string(), Value::Number(4.0));
        let expr = Expr::binary(BinOp::Mul, Expr::ident("x"), Expr::ident("y"));
        assert_eq!(evaluate(&expr, &vars), Value::Number(0.0));
    }
}
