use serde::{Deserialize, Serialize};

use crate::dimensions::Period;

/// Where in the dimensional space an expression is being evaluated.
///
/// Contexts are never mutated: shifting functions build a new one for their
/// sub-expression and the caller's context is untouched when they return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalContext {
    pub period: Period,
    pub org_unit: String,
    /// Hierarchy level of the reporting org unit. Relative org unit ranges
    /// (`ouAncestor`, `ouDescendant`) are resolved against it.
    pub org_unit_level: i32,
}

impl EvalContext {
    pub fn new(period: Period, org_unit: impl Into<String>, org_unit_level: i32) -> Self {
        EvalContext {
            period,
            org_unit: org_unit.into(),
            org_unit_level,
        }
    }

    pub fn with_period(&self, period: Period) -> Self {
        EvalContext {
            period,
            ..self.clone()
        }
    }

    pub fn with_org_unit(&self, org_unit: &str) -> Self {
        EvalContext {
            org_unit: org_unit.to_string(),
            ..self.clone()
        }
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        EvalContext::new(Period::DEFAULT, "ABC.XYZ", 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_period_leaves_original_untouched() {
        let ctx = EvalContext::default();
        let shifted = ctx.with_period(ctx.period.shift_months(-1).unwrap());
        assert_eq!(ctx.period.to_string(), "201808");
        assert_eq!(shifted.period.to_string(), "201807");
        assert_eq!(shifted.org_unit, ctx.org_unit);
    }

    #[test]
    fn test_with_org_unit() {
        let ctx = EvalContext::default().with_org_unit("ABC.DEF");
        assert_eq!(ctx.org_unit, "ABC.DEF");
        assert_eq!(ctx.org_unit_level, 3);
    }
}
