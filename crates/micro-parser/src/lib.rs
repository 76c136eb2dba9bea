//! Micro parser: checks token streams and builds instruction sequences.
//!
//! Two independent consumers of the same token stream live here:
//! the [`Validator`], which reports every syntax problem it finds, and the
//! [`Parser`], which permissively builds the runnable program.

mod cursor;
mod lower;
mod parse_expr;
mod parse_stmt;
mod parser;
mod validate;

pub use lower::{find_loop_end, lower};
pub use parser::{build, Parser};
pub use validate::{not_executed_notes, validate, ValidationResult, Validator};
