//! Micro compiler: orchestrates the full pipeline.
//!
//! ```text
//! Source → Lexer → Validator ─┐
//!               └→ Builder → Instructions → Executor (one step per call)
//! ```

mod pipeline;
mod session;

pub use pipeline::{
    build, compile_to_result, render_diagnostic, token_listing, tokenize, validate, CompileResult,
};
pub use session::{run_to_end, Session, SessionError, StepOutcome};

pub use micro_eval::{step, ExecutionState, StepResult, Value, DEFAULT_GAS_LIMIT};
pub use micro_lexer::{Token, TokenKind};
pub use micro_parser::ValidationResult;
pub use micro_types::ast::Instruction;
