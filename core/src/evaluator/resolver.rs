//! Leaf resolution.
//!
//! The walk is the same for the prepass and for evaluation; only the answers
//! for leaves differ. A [`Resolver`] supplies them.

use std::collections::HashMap;

use crate::dimensions::{EvalContext, OrgUnitDimension, placeholder_members};
use crate::scope_stack::Scope;
use crate::values::Value;

pub trait Resolver {
    /// A data item, keyed by its full source text (`#{UID}`).
    fn item(&self, item: &str, ctx: &EvalContext) -> Value;

    /// A constant, keyed by its bare UID.
    fn constant(&self, uid: &str) -> Value;

    /// Number of org units in an org unit group.
    fn org_unit_count(&self, uid: &str, ctx: &EvalContext) -> Value;

    /// A data set reporting rate (`UID.METRIC`).
    fn reporting_rate(&self, uid: &str, ctx: &EvalContext) -> Value;

    /// Days in the current period.
    fn days(&self, ctx: &EvalContext) -> Value;

    /// Org units an org unit function iterates over, given the frame it
    /// pushed.
    ///
    /// Defaults to fixed placeholder members until a real hierarchy is
    /// available.
    fn org_units(&self, dimension: OrgUnitDimension, scope: &Scope, ctx: &EvalContext) -> Vec<String> {
        let _ = (scope, ctx);
        placeholder_members(dimension)
            .iter()
            .map(|member| member.to_string())
            .collect()
    }
}

/// Prepass resolver: every leaf is `Number(1.0)`.
///
/// The value is a type witness, not an answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Placeholders;

impl Resolver for Placeholders {
    fn item(&self, _item: &str, _ctx: &EvalContext) -> Value {
        Value::Number(1.0)
    }

    fn constant(&self, _uid: &str) -> Value {
        Value::Number(1.0)
    }

    fn org_unit_count(&self, _uid: &str, _ctx: &EvalContext) -> Value {
        Value::Number(1.0)
    }

    fn reporting_rate(&self, _uid: &str, _ctx: &EvalContext) -> Value {
        Value::Number(1.0)
    }

    fn days(&self, _ctx: &EvalContext) -> Value {
        Value::Number(1.0)
    }
}

/// Placeholder answer for org unit counts and reporting rates until they are
/// backed by real data.
const PENDING: f64 = 2.0;

/// Resolver over value and constant maps.
///
/// Values are period-agnostic: the same map answers under every scope.
/// Missing keys resolve to `Null`.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    values: &'a HashMap<String, f64>,
    constants: &'a HashMap<String, f64>,
}

impl<'a> Snapshot<'a> {
    pub fn new(values: &'a HashMap<String, f64>, constants: &'a HashMap<String, f64>) -> Self {
        Snapshot { values, constants }
    }
}

impl Resolver for Snapshot<'_> {
    fn item(&self, item: &str, _ctx: &EvalContext) -> Value {
        self.values.get(item).copied().into()
    }

    fn constant(&self, uid: &str) -> Value {
        self.constants.get(uid).copied().into()
    }

    fn org_unit_count(&self, _uid: &str, _ctx: &EvalContext) -> Value {
        Value::Number(PENDING)
    }

    fn reporting_rate(&self, _uid: &str, _ctx: &EvalContext) -> Value {
        Value::Number(PENDING)
    }

    fn days(&self, ctx: &EvalContext) -> Value {
        ctx.period.days().map(f64::from).into()
    }
}
