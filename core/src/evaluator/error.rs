//! Evaluation errors.
//!
//! The prepass and the real pass share one walk, so they share one error
//! taxonomy. Every error aborts the whole expression.
//!
//! # Error Categories
//!
//! - **Type errors**: a cast failed. Carries the expected kind and the
//!   offending value's text.
//! - **Structural errors**: a function node has the wrong number of arguments.
//! - **Invalid operators**: a unary or binary node carries an operator that
//!   has no meaning for its shape. This is a tree/evaluator mismatch, never
//!   a user error.
//! - **Resource exceeded**: the walk went deeper than the configured limit.

use core::fmt;

use thiserror::Error;

use crate::casting::TypeError;
use crate::parser::{Arity, Function, Operator};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Type error: {0}")]
    Type(#[from] TypeError),

    #[error("Structural error: {0}")]
    Structural(#[from] StructuralError),

    #[error("Invalid operator '{op}' in {node} node")]
    InvalidOperator { op: Operator, node: NodeKind },

    #[error("Invalid argument to {function}: {message}")]
    InvalidArgument { function: Function, message: String },

    #[error("Evaluation stack overflow: depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },
}

/// The prepass reports the same errors as evaluation.
pub type CheckError = EvalError;

/// A function node's argument count does not match the function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{function} expects {expected} arguments, found {found}")]
pub struct StructuralError {
    pub function: Function,
    pub expected: Arity,
    pub found: usize,
}

/// Node shapes that carry an operator tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Unary,
    Binary,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Unary => write!(f, "unary"),
            NodeKind::Binary => write!(f, "binary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casting::ValueKind;

    #[test]
    fn test_messages() {
        let err = EvalError::from(TypeError {
            expected: ValueKind::Number,
            found: "true".to_string(),
        });
        assert_eq!(err.to_string(), "Type error: number expected, found true");

        let err = EvalError::from(StructuralError {
            function: Function::If,
            expected: Arity::Exactly(3),
            found: 2,
        });
        assert_eq!(err.to_string(), "Structural error: if expects 3 arguments, found 2");

        let err = EvalError::InvalidOperator {
            op: Operator::Not,
            node: NodeKind::Binary,
        };
        assert_eq!(err.to_string(), "Invalid operator '!' in binary node");
    }
}
