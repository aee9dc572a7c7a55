//! Syntax diagnostics collected while lexing and parsing.

mod listener;

pub use listener::{ErrorListener, SyntaxDiagnostic};
