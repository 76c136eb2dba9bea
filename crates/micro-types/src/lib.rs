//! Shared types for the Micro language engine.
//!
//! This crate defines the expression and instruction types, source spans,
//! and the diagnostic types used across the tokenizer, validator, builder
//! and executor.

mod error;
mod span;
pub mod ast;

pub use error::{DiagnosticCode, Diagnostic, Severity};
pub use span::{SourceFile, Span};
