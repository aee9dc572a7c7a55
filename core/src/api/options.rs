//! Configuration options for the engine.

use serde::{Deserialize, Serialize};

use crate::dimensions::{EvalContext, Period};
use crate::evaluator::DEFAULT_MAX_DEPTH;

/// Configuration options for the engine.
///
/// Every field has a default, so a partial configuration deserializes.
///
/// # Example
///
/// ```
/// use dimexpr_core::api::EngineOptions;
///
/// let options = EngineOptions {
///     org_unit: "ABC".to_string(),
///     max_depth: 500,
///     ..EngineOptions::default()
/// };
/// assert_eq!(options.period.to_string(), "201808");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Period expressions are evaluated in, before any shift.
    ///
    /// Default: 201808
    pub period: Period,

    /// Path of the org unit expressions are evaluated for.
    ///
    /// Default: "ABC.XYZ"
    pub org_unit: String,

    /// Hierarchy level of `org_unit`.
    ///
    /// Default: 3
    pub org_unit_level: i32,

    /// Maximum walk depth (for recursion protection).
    ///
    /// Default: 1000
    pub max_depth: usize,
}

impl EngineOptions {
    /// The context evaluation starts from.
    pub fn context(&self) -> EvalContext {
        EvalContext::new(self.period, self.org_unit.clone(), self.org_unit_level)
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        let ctx = EvalContext::default();
        Self {
            period: ctx.period,
            org_unit: ctx.org_unit,
            org_unit_level: ctx.org_unit_level,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
