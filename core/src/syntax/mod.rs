//! Lexical helpers shared by the parser and by source rendering.

pub mod string_literal;

pub use string_literal::{UnescapeError, escape_string, unescape_string};
