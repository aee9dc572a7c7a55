use crate::parser::Expr;

use super::parser::parse;

// Helper function to parse an expression and return the AST.
//
// We test precedence by comparing whether two expressions parenthesized in
// different ways yield the same AST.
fn ast(source: &str) -> Expr {
    parse(source).unwrap_or_else(|e| panic!("Expression parsing failed: {}\n{}", source, e))
}

#[test]
fn test_addition_vs_subtraction() {
    assert_eq!(ast("1 + 2 - 3"), ast("(1 + 2) - 3"));
    assert_eq!(ast("1 - 2 + 3"), ast("(1 - 2) + 3"));
    assert_eq!(ast("1 + 2 - 3 + 4 - 5 + 6"), ast("((((1 + 2) - 3) + 4) - 5) + 6"));
}

#[test]
fn test_multiplication_vs_division() {
    assert_eq!(ast("1 * 2 / 3"), ast("(1 * 2) / 3"));
    assert_eq!(ast("1 / 2 * 3"), ast("(1 / 2) * 3"));
    assert_eq!(ast("1 * 2 % 3 / 4"), ast("((1 * 2) % 3) / 4"));
}

#[test]
fn test_addition_vs_multiplication() {
    assert_eq!(ast("1 + 2 * 3"), ast("1 + (2 * 3)"));
    assert_eq!(ast("1 * 2 + 3"), ast("(1 * 2) + 3"));
    assert_eq!(ast("1 - 2 % 3"), ast("1 - (2 % 3)"));
}

#[test]
fn test_and_vs_or() {
    assert_eq!(
        ast("true && false || true"),
        ast("(true && false) || true")
    );
    assert_eq!(
        ast("true || false && true"),
        ast("true || (false && true)")
    );
}

#[test]
fn test_comparison_vs_logical() {
    assert_eq!(ast("1 < 5 && 1 > 5"), ast("(1 < 5) && (1 > 5)"));
    assert_eq!(ast("1 == 1 || 2 != 2"), ast("(1 == 1) || (2 != 2)"));
}

#[test]
fn test_relational_binds_tighter_than_equality() {
    assert_eq!(ast("1 < 2 == true"), ast("(1 < 2) == true"));
    assert_eq!(ast("true != 2 >= 1"), ast("true != (2 >= 1)"));
}

#[test]
fn test_arithmetic_binds_tighter_than_comparison() {
    assert_eq!(ast("1 + 2 < 3 * 4"), ast("(1 + 2) < (3 * 4)"));
}

#[test]
fn test_unary_vs_binary() {
    assert_eq!(ast("-1 + 2"), ast("(-1) + 2"));
    assert_eq!(ast("-1 * 2"), ast("(-1) * 2"));
    assert_eq!(ast("!true && false"), ast("(!true) && false"));
    assert_eq!(ast("1 - -2"), ast("1 - (-2)"));
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(ast("2 ^ 3 ^ 2"), ast("2 ^ (3 ^ 2)"));
}

#[test]
fn test_power_binds_tighter_than_unary() {
    assert_eq!(ast("-2 ^ 2"), ast("-(2 ^ 2)"));
    assert_eq!(ast("2 * 3 ^ 2"), ast("2 * (3 ^ 2)"));
}

#[test]
fn test_method_call_binds_tightest() {
    assert_eq!(
        ast("-#{A0000000001}.period(-1)"),
        ast("-(#{A0000000001}.period(-1))")
    );
    assert_eq!(
        ast("1 + #{A0000000001}.period(-1, -2).sum()"),
        ast("1 + sum(period(#{A0000000001}, -1, -2))")
    );
}
