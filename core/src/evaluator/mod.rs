//! Tree-walking evaluator for indicator expressions.
//!
//! The evaluator walks a parsed [`Expr`] and produces a runtime [`Value`].
//! The prepass in [`crate::checker`] uses the same walk in [`Mode::Check`]
//! with placeholder leaves; evaluation uses [`Mode::Evaluate`] with a real
//! [`Resolver`].
//!
//! ## Design Principles
//!
//! - **Never panic**: malformed trees are reported as errors
//! - **Stack-safe**: depth tracking bounds recursion on deeply nested expressions
//! - **Scope-balanced**: every pushed dimensional frame is popped, on error too
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use dimexpr_core::{evaluator, parser, values::Value};
//!
//! let expr = parser::parse("#{A} + #{B}").unwrap();
//! let values = HashMap::from([("#{A}".to_string(), 1.0), ("#{B}".to_string(), 2.0)]);
//! let result = evaluator::evaluate(&expr, &values, &HashMap::new()).unwrap();
//! assert_eq!(result, Value::Number(3.0));
//! ```

mod error;
mod eval;
mod operators;
mod resolver;


pub use error::{CheckError, EvalError, NodeKind, StructuralError};
pub use eval::{Mode, Walker};
pub use resolver::{Placeholders, Resolver, Snapshot};

use std::collections::HashMap;

use tracing::debug;

use crate::{dimensions::EvalContext, parser::Expr, values::Value};

/// Default limit on walk depth.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Evaluate an expression against value and constant maps, in the default
/// context and with the default depth limit.
///
/// Missing keys evaluate to `Null`.
pub fn evaluate(
    expr: &Expr,
    values: &HashMap<String, f64>,
    constants: &HashMap<String, f64>,
) -> Result<Value, EvalError> {
    evaluate_with(
        expr,
        &Snapshot::new(values, constants),
        &EvalContext::default(),
        DEFAULT_MAX_DEPTH,
    )
}

/// Evaluate an expression with a custom resolver, context and depth limit.
pub fn evaluate_with<R: Resolver + ?Sized>(
    expr: &Expr,
    resolver: &R,
    ctx: &EvalContext,
    max_depth: usize,
) -> Result<Value, EvalError> {
    debug!(period = %ctx.period, org_unit = %ctx.org_unit, "evaluating expression");
    let mut walker = Walker::new(Mode::Evaluate, resolver, max_depth);
    let result = walker.walk(expr, ctx);
    debug_assert_eq!(walker.scope_depth(), 0, "unbalanced scope stack");
    result
}
