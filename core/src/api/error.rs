//! Public error type for the engine API.
//!
//! Each pipeline stage has its own variant. Syntax errors carry the source
//! and the diagnostic spans so they can be rendered against the input;
//! prepass and evaluation errors carry the structured engine error.

use core::fmt;

use crate::diagnostics::SyntaxDiagnostic;
use crate::evaluator::{CheckError, EvalError};

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The input did not lex or parse. The prepass and evaluation never ran.
    Syntax {
        source: String,
        diagnostics: Vec<SyntaxDiagnostic>,
    },

    /// The prepass rejected the expression.
    Check(CheckError),

    /// Evaluation failed.
    Eval(EvalError),
}

impl Error {
    /// Syntax diagnostic messages joined with `"; "`. Empty for other errors.
    pub fn syntax_message(&self) -> String {
        match self {
            Error::Syntax { diagnostics, .. } => diagnostics
                .iter()
                .map(|d| d.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            _ => String::new(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Syntax { .. } => write!(f, "Syntax error: {}", self.syntax_message()),
            Error::Check(err) => write!(f, "Check failed: {}", err),
            Error::Eval(err) => write!(f, "Evaluation failed: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Syntax { .. } => None,
            Error::Check(err) | Error::Eval(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casting::{TypeError, ValueKind};
    use crate::parser::Span;
    use crate::values::Value;

    #[test]
    fn test_syntax_display_joins_messages() {
        let err = Error::Syntax {
            source: "1 * ".to_string(),
            diagnostics: vec![
                SyntaxDiagnostic::new(Span::new(4, 4), "first"),
                SyntaxDiagnostic::new(Span::new(4, 4), "second"),
            ],
        };
        assert_eq!(err.to_string(), "Syntax error: first; second");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_eval_display_and_source() {
        let err = Error::Eval(EvalError::Type(TypeError::new(
            ValueKind::Number,
            &Value::Boolean(true),
        )));
        assert_eq!(
            err.to_string(),
            "Evaluation failed: Type error: number expected, found true"
        );
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.syntax_message(), "");
    }
}
