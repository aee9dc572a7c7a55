//! Numeric operator implementations.

use crate::parser::Operator;

/// Evaluate a numeric binary operator.
///
/// Follows IEEE 754 semantics (produces inf/nan rather than failing).
/// Returns `None` for operators that are not arithmetic.
pub(super) fn eval_arithmetic(op: Operator, left: f64, right: f64) -> Option<f64> {
    match op {
        Operator::Add => Some(left + right),
        Operator::Sub => Some(left - right),
        Operator::Mul => Some(left * right),
        Operator::Div => Some(left / right), // Division by zero produces inf
        Operator::Mod => Some(left % right), // Sign of the dividend
        Operator::Pow => Some(left.powf(right)),
        _ => None,
    }
}

/// Returns `None` for operators that are not ordering comparisons.
pub(super) fn eval_ordering(op: Operator, ordering: core::cmp::Ordering) -> Option<bool> {
    match op {
        Operator::Lt => Some(ordering.is_lt()),
        Operator::Le => Some(ordering.is_le()),
        Operator::Gt => Some(ordering.is_gt()),
        Operator::Ge => Some(ordering.is_ge()),
        _ => None,
    }
}
