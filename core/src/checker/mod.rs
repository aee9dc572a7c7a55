//! Prepass over a parsed expression.
//!
//! The prepass walks every node once with placeholder leaves (every data
//! item, constant, count, rate and day count is `Number(1.0)`), visiting
//! both sides of logical operators and every branch of conditional
//! functions. It surfaces type and structural errors before a potentially
//! expensive evaluation over many periods and org units, and records which
//! data items are needed under which dimensional frames.

use tracing::debug;

use crate::{
    dimensions::EvalContext,
    evaluator::{CheckError, DEFAULT_MAX_DEPTH, Mode, Placeholders, Walker},
    parser::Expr,
    scope_stack::ItemScopes,
};

/// Type-check an expression.
pub fn check(expr: &Expr) -> Result<(), CheckError> {
    check_items(expr).map(|_| ())
}

/// Type-check an expression and collect the frames each data item is
/// referenced under.
pub fn check_items(expr: &Expr) -> Result<ItemScopes, CheckError> {
    check_with(expr, &EvalContext::default(), DEFAULT_MAX_DEPTH)
}

/// Type-check with a custom context and depth limit.
pub fn check_with(
    expr: &Expr,
    ctx: &EvalContext,
    max_depth: usize,
) -> Result<ItemScopes, CheckError> {
    let mut walker = Walker::new(Mode::Check, &Placeholders, max_depth);
    let witness = walker.walk(expr, ctx)?;
    debug!(kind = ?witness.kind(), "prepass succeeded");
    Ok(walker.into_item_scopes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casting::ValueKind;
    use crate::evaluator::EvalError;
    use crate::parser::{Arity, Function, parse};
    use crate::range::Range;
    use crate::scope_stack::Scope;

    fn check_source(source: &str) -> Result<(), CheckError> {
        check(&parse(source).unwrap())
    }

    #[test]
    fn test_valid_expressions_pass() {
        check_source("7-2").unwrap();
        check_source("\"abc\" + 123").unwrap();
        check_source("#{A} + C{K} * [days] / OUG{G} - R{DS.RATE}").unwrap();
        check_source("sum(#{A}.period(-2, 0))").unwrap();
        check_source("#{A}.ouLevel(3).percentile(90)").unwrap();
        check_source("#{A}.period(-11, 0).last(3).sum()").unwrap();
    }

    #[test]
    fn test_type_error_in_unreached_branch() {
        let err = check_source("true || (1 + true)").unwrap_err();
        assert!(matches!(
            err,
            EvalError::Type(ref e) if e.expected == ValueKind::Number && e.found == "true"
        ));

        assert!(check_source("if(true, 1, -\"x\")").is_err());
        assert!(check_source("coalesce(1, !2)").is_err());
        assert!(check_source("except(1 + true, false)").is_err());
    }

    #[test]
    fn test_aggregation_of_scalar_is_type_error() {
        let err = check_source("sum(#{A})").unwrap_err();
        assert!(matches!(
            err,
            EvalError::Type(ref e) if e.expected == ValueKind::MultiValue
        ));
        // A single period shift is a scalar.
        assert!(check_source("sum(#{A}.period(-1))").is_err());
    }

    #[test]
    fn test_structural_error() {
        let expr = Expr::call(Function::If, vec![Expr::boolean(true), Expr::number(1.0)]);
        assert_eq!(
            check(&expr),
            Err(EvalError::Structural(crate::evaluator::StructuralError {
                function: Function::If,
                expected: Arity::Exactly(3),
                found: 2,
            }))
        );
        assert!(matches!(check_source("isNull(1, 2)"), Err(EvalError::Structural(_))));
    }

    #[test]
    fn test_item_scopes() {
        let expr = parse("#{A} + sum(#{B}.period(-2, 0)) + #{A}.period(-1)").unwrap();
        let items = check_items(&expr).unwrap();

        assert_eq!(items.items().collect::<Vec<_>>(), vec!["#{A}", "#{B}"]);
        let a = items.get("#{A}").unwrap();
        assert!(a.contains(&Scope::new()));
        assert!(a.contains(&Scope::new().with_periods(Range::single(-1))));
        assert_eq!(
            items.get("#{B}").unwrap().iter().collect::<Vec<_>>(),
            vec![&Scope::new().with_periods(Range::new(-2, 0))]
        );
    }

    #[test]
    fn test_depth_limit() {
        let expr = parse("1 + (1 + (1 + 1))").unwrap();
        assert!(check_with(&expr, &EvalContext::default(), 10).is_ok());
        assert!(matches!(
            check_with(&expr, &EvalContext::default(), 3),
            Err(EvalError::StackOverflow { max_depth: 3, .. })
        ));
    }
}
