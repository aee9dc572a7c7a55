//! Compiled expressions.

use std::collections::HashMap;

use super::{EngineOptions, Error};
use crate::dimensions::EvalContext;
use crate::evaluator::{self, Resolver, Snapshot};
use crate::parser::Expr;
use crate::scope_stack::ItemScopes;
use crate::values::Value;

/// An expression that parsed and passed the prepass.
///
/// Owns its tree, so it can be evaluated any number of times, with
/// different data and in different contexts.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use dimexpr_core::api::Engine;
/// use dimexpr_core::values::Value;
///
/// let expr = Engine::default().compile("#{A}.period(-1) + 1").unwrap();
/// assert_eq!(expr.item_scopes().items().collect::<Vec<_>>(), vec!["#{A}"]);
///
/// let values = HashMap::from([("#{A}".to_string(), 1.0)]);
/// let result = expr.evaluate(&values, &HashMap::new()).unwrap();
/// assert_eq!(result, Value::Number(2.0));
/// ```
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    source: String,
    expr: Expr,
    item_scopes: ItemScopes,
    options: EngineOptions,
}

impl CompiledExpression {
    /// This is called internally by `Engine::compile()`.
    pub(crate) fn new(
        source: String,
        expr: Expr,
        item_scopes: ItemScopes,
        options: EngineOptions,
    ) -> Self {
        Self {
            source,
            expr,
            item_scopes,
            options,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The data items the expression references, each with the dimensional
    /// frames it is referenced under.
    pub fn item_scopes(&self) -> &ItemScopes {
        &self.item_scopes
    }

    /// Evaluate against value and constant maps, in the engine's context.
    pub fn evaluate(
        &self,
        values: &HashMap<String, f64>,
        constants: &HashMap<String, f64>,
    ) -> Result<Value, Error> {
        self.evaluate_in(&self.options.context(), values, constants)
    }

    /// Evaluate against value and constant maps, in `ctx`.
    pub fn evaluate_in(
        &self,
        ctx: &EvalContext,
        values: &HashMap<String, f64>,
        constants: &HashMap<String, f64>,
    ) -> Result<Value, Error> {
        self.evaluate_with(&Snapshot::new(values, constants), ctx)
    }

    /// Evaluate with a custom resolver, in `ctx`.
    pub fn evaluate_with<R: Resolver + ?Sized>(
        &self,
        resolver: &R,
        ctx: &EvalContext,
    ) -> Result<Value, Error> {
        evaluator::evaluate_with(&self.expr, resolver, ctx, self.options.max_depth)
            .map_err(Error::Eval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Engine;
    use crate::casting::ValueKind;
    use crate::evaluator::EvalError;
    use crate::range::Range;
    use crate::scope_stack::Scope;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_evaluate_many_times() {
        let expr = Engine::default().compile("#{A} + #{B}").unwrap();
        let constants = HashMap::new();
        for a in 0..3 {
            let values = HashMap::from([
                ("#{A}".to_string(), f64::from(a)),
                ("#{B}".to_string(), 10.0),
            ]);
            assert_eq!(
                expr.evaluate(&values, &constants),
                Ok(Value::Number(f64::from(a) + 10.0))
            );
        }
    }

    #[test]
    fn test_evaluate_in_context() {
        let expr = Engine::default().compile("[days]").unwrap();
        let none = HashMap::new();
        assert_eq!(expr.evaluate(&none, &none), Ok(Value::Number(31.0)));

        let february = EvalContext::new("202402".parse().unwrap(), "ABC", 2);
        assert_eq!(
            expr.evaluate_in(&february, &none, &none),
            Ok(Value::Number(29.0))
        );
    }

    #[test]
    fn test_missing_data_fails_at_evaluation() {
        let expr = Engine::default().compile("#{A} + 1").unwrap();
        let none = HashMap::new();
        let Err(Error::Eval(EvalError::Type(err))) = expr.evaluate(&none, &none) else {
            panic!("expected a type error");
        };
        assert_eq!(err.expected, ValueKind::Number);
        assert_eq!(err.found, "null");
    }

    #[test]
    fn test_item_scopes() {
        let expr = Engine::default()
            .compile("#{A} + #{A}.period(-2, 0).sum() + #{B}.ouLevel(3).count()")
            .unwrap();
        let scopes = expr.item_scopes();
        assert_eq!(scopes.items().collect::<Vec<_>>(), vec!["#{A}", "#{B}"]);

        let a = scopes.get("#{A}").unwrap();
        assert!(a.contains(&Scope::new()));
        assert!(a.contains(&Scope::new().with_periods(Range::new(-2, 0))));

        let b = scopes.get("#{B}").unwrap();
        assert!(b.contains(&Scope::new().with_org_unit_levels(Range::single(3))));
    }

    #[test]
    fn test_source_is_kept() {
        let expr = Engine::default().compile("1 + 2").unwrap();
        assert_eq!(expr.source(), "1 + 2");
        assert_eq!(expr.expr().to_string(), "(1 + 2)");
    }
}
