//! Micro engine as a WASM module for browser front ends.
//!
//! The editor, console and toolbar live in JavaScript; this crate hands them
//! tokens, compile reports and one trace line per step.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { compile, StepSession } from 'micro-wasm';
//!
//! await init();
//!
//! const report = JSON.parse(compile("x = 1 ::", "program.txt"));
//! const session = new StepSession("x = 1 :: write(\"x is\", x) ::", "program.txt");
//! while (!session.finished()) {
//!   console.log(JSON.parse(session.step()).trace);
//! }
//! ```

use micro_compiler::{Session, SessionError, DEFAULT_GAS_LIMIT};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        format!(r#"{{"success":false,"report":["Serialization error: {e}"]}}"#)
    })
}

/// Tokenize source text.
///
/// Returns a JSON array of `{ kind, lexeme, span: { start, end } }`.
#[wasm_bindgen]
pub fn tokenize(source: &str) -> String {
    to_json(&micro_compiler::tokenize(source))
}

/// Human-readable token listing for the console.
#[wasm_bindgen]
pub fn token_listing(source: &str) -> String {
    micro_compiler::token_listing(source)
}

/// Validate and build a source file.
///
/// Returns a JSON `CompileResult`:
/// ```json
/// {
///   "success": false,
///   "diagnostics": [{ "code": 100, "severity": "error", "message": "...", "offset": 0 }],
///   "report": ["program.txt:1:1: E100 unexpected token: then"]
/// }
/// ```
/// On success `instructions` holds the built program. `notes`, when present,
/// lists `if`/`capture` statements that are checked but not executed.
#[wasm_bindgen]
pub fn compile(source: &str, filename: &str) -> String {
    to_json(&micro_compiler::compile_to_result(source, filename))
}

#[derive(Serialize)]
struct RunReport {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<micro_compiler::ExecutionState>,
    report: Vec<String>,
}

/// Run a program to completion within `gas_limit` steps (`0` picks the
/// default budget).
///
/// Returns `{ success, state?, report }` as JSON.
#[wasm_bindgen]
pub fn run(source: &str, filename: &str, gas_limit: u32) -> String {
    let gas_limit = if gas_limit == 0 {
        DEFAULT_GAS_LIMIT
    } else {
        u64::from(gas_limit)
    };
    let report = match micro_compiler::run_to_end(source, filename, gas_limit) {
        Ok(state) => RunReport {
            success: true,
            state: Some(state),
            report: Vec::new(),
        },
        Err(SessionError::Invalid(report)) => RunReport {
            success: false,
            state: None,
            report,
        },
        Err(e) => RunReport {
            success: false,
            state: None,
            report: vec![e.to_string()],
        },
    };
    to_json(&report)
}

/// Return the engine version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// A program being executed one step per call.
#[wasm_bindgen]
pub struct StepSession {
    inner: Session,
}

#[wasm_bindgen]
impl StepSession {
    /// Compile `source`; throws the JSON error report if it does not
    /// validate.
    #[wasm_bindgen(constructor)]
    pub fn new(source: &str, filename: &str) -> Result<StepSession, JsValue> {
        match Session::start(source, filename) {
            Ok(inner) => Ok(StepSession { inner }),
            Err(SessionError::Invalid(report)) => Err(JsValue::from_str(&to_json(&report))),
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    /// Advance one instruction; returns `{ trace, finished }` as JSON.
    pub fn step(&mut self) -> Result<String, JsValue> {
        self.inner
            .step()
            .map(|outcome| to_json(&outcome))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Current execution state as a JavaScript object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.state()).map_err(JsValue::from)
    }

    /// Accumulated `write` output.
    pub fn output(&self) -> String {
        self.inner.output().to_string()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}
