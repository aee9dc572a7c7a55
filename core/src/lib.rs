//! Two-pass engine for indicator expressions.
//!
//! An expression is parsed, type-checked by a prepass that runs the tree
//! with placeholder leaves, and then evaluated against a data snapshot.
//! Period and org unit functions shift or iterate the dimensional context
//! of their sub-expression, and aggregation functions reduce the collected
//! results.

pub mod api;
pub mod casting;
pub mod checker;
pub mod diagnostics;
pub mod dimensions;
pub mod evaluator;
pub mod parser;
pub mod range;
pub mod scope_stack;
pub mod stdlib;
pub mod syntax;
pub mod values;

pub use api::{CompiledExpression, Engine, EngineOptions, Error};
