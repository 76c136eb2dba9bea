//! The four engine operations plus front-end reports built on them.

use micro_lexer::Token;
use micro_parser::ValidationResult;
use micro_types::ast::Instruction;
use micro_types::{Diagnostic, SourceFile};
use serde::{Deserialize, Serialize};

/// Source text → tokens.
pub fn tokenize(source: &str) -> Vec<Token> {
    micro_lexer::tokenize(source)
}

/// Tokens → pass/fail with diagnostics.
pub fn validate(tokens: &[Token]) -> ValidationResult {
    micro_parser::validate(tokens)
}

/// Tokens → flat instruction sequence.
pub fn build(tokens: &[Token]) -> Vec<Instruction> {
    micro_parser::build(tokens)
}

/// Token listing for the console: a count line, a blank line, then one
/// `[KIND] "lexeme" @offset` line per token.
pub fn token_listing(source: &str) -> String {
    let tokens = tokenize(source);
    let mut out = format!("tokens found: {}\n", tokens.len());
    for token in &tokens {
        out.push('\n');
        out.push_str(&token.to_string());
    }
    out
}

/// Result of compiling one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileResult {
    pub success: bool,
    /// Syntax errors in source order.
    pub diagnostics: Vec<Diagnostic>,
    /// `if`/`capture` statements that validate but never run.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Diagnostic>,
    /// Errors rendered as `file:line:col: CODE message`.
    pub report: Vec<String>,
    /// The runnable program, present only when validation succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<Instruction>>,
}

/// Validate `source` and, if it is well-formed, build its program.
pub fn compile_to_result(source: &str, filename: &str) -> CompileResult {
    let source_file = SourceFile::new(filename, source);
    let tokens = tokenize(source);
    let validation = validate(&tokens);
    let report = validation
        .diagnostics
        .iter()
        .map(|d| render_diagnostic(&source_file, d))
        .collect();
    let instructions = validation.success.then(|| build(&tokens));
    CompileResult {
        success: validation.success,
        diagnostics: validation.diagnostics,
        notes: micro_parser::not_executed_notes(&tokens),
        report,
        instructions,
    }
}

/// Render a diagnostic with its line and column.
pub fn render_diagnostic(source_file: &SourceFile, diagnostic: &Diagnostic) -> String {
    match diagnostic.offset {
        Some(offset) => {
            let (line, col) = source_file.location(offset);
            format!(
                "{}:{}:{}: {} {}",
                source_file.name, line, col, diagnostic.code, diagnostic.message
            )
        }
        None => format!(
            "{}: {} {}",
            source_file.name, diagnostic.code, diagnostic.message
        ),
    }
}
