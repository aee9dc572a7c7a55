//! dimexpr - indicator expressions over periods and org units
//!
//! # Overview
//!
//! dimexpr evaluates a small expression language (arithmetic, comparison,
//! logical and aggregation operators) over named data values, constants
//! and dimensional indicators. Every expression is type-checked by a
//! prepass before it is evaluated against real data, so a bad expression
//! fails fast instead of after an expensive multi-period evaluation.
//!
//! # Quick Start
//!
//! ```
//! use std::collections::HashMap;
//! use dimexpr::{Engine, EngineOptions, Value};
//!
//! let engine = Engine::new(EngineOptions::default());
//! let expr = engine.compile("sum(#{A}.period(-2, 0)) / 3").unwrap();
//!
//! let values = HashMap::from([("#{A}".to_string(), 6.0)]);
//! let result = expr.evaluate(&values, &HashMap::new()).unwrap();
//! assert_eq!(result, Value::Number(6.0));
//! ```
//!
//! # Dimensions
//!
//! `period(x, from[, to[, yearFrom[, yearTo]]])` shifts or iterates the
//! current period; `ouLevel`, `ouAncestor`, `ouDescendant`, `ouPeer` and
//! `ouGroup` iterate org units. Plug real data and hierarchies in through
//! the [`Resolver`] trait:
//!
//! ```
//! use dimexpr::{Engine, EvalContext, Resolver, Value};
//!
//! struct MonthNumber;
//!
//! impl Resolver for MonthNumber {
//!     fn item(&self, _item: &str, ctx: &EvalContext) -> Value {
//!         Value::Number(f64::from(ctx.period.month()))
//!     }
//!     fn constant(&self, _uid: &str) -> Value { Value::Null }
//!     fn org_unit_count(&self, _uid: &str, _ctx: &EvalContext) -> Value { Value::Null }
//!     fn reporting_rate(&self, _uid: &str, _ctx: &EvalContext) -> Value { Value::Null }
//!     fn days(&self, _ctx: &EvalContext) -> Value { Value::Null }
//! }
//!
//! let expr = Engine::default().compile("#{A}.period(-1)").unwrap();
//! let result = expr.evaluate_with(&MonthNumber, &EvalContext::default()).unwrap();
//! assert_eq!(result, Value::Number(7.0));
//! ```

mod error_renderer;

// Re-export public API from dimexpr_core
pub use dimexpr_core::api::{CompiledExpression, Engine, EngineOptions, Error};

// Re-export commonly used types and values
pub use dimexpr_core::dimensions::{EvalContext, OrgUnitDimension, Period};
pub use dimexpr_core::evaluator::{Placeholders, Resolver, Snapshot};
pub use dimexpr_core::scope_stack::{ItemScopes, Scope};
pub use dimexpr_core::values::{self, MultiPeriodValue, MultiValue, Value};

// Re-export errors
pub use dimexpr_core::casting::{TypeError, ValueKind};
pub use dimexpr_core::diagnostics::SyntaxDiagnostic;
pub use dimexpr_core::evaluator::{CheckError, EvalError, StructuralError};

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
