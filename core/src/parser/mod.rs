mod parsed_expr;
pub mod parser;
mod syntax;
pub mod error;

// Re-export the parser and rule enum for external use
pub use parser::ExpressionParser;
pub use parser::Rule;
pub use parser::{PestError, parse, tokenize};

pub use error::convert_pest_error;
pub use parsed_expr::{Expr, Literal};
pub use syntax::{Arity, Function, Operator, Span, UnknownFunction};



#[cfg(test)]
mod precedence_test;
