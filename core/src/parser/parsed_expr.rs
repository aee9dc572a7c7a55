use core::fmt;

use crate::parser::{Function, Operator};
use crate::syntax::escape_string;

/// Expression tree produced by the parser.
///
/// The checker and evaluator only read this tree; both passes walk the same
/// value, so a tree can be checked once and evaluated many times.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    /// Data item reference, keyed by its full source text (e.g. `#{A0000000001}`).
    DimensionItem(String),
    /// Constant reference, keyed by its bare UID (`C{PI000000000}` -> `PI000000000`).
    Constant(String),
    /// Number of org units in an org unit group (`OUG{UID}`).
    OrgUnitCount(String),
    /// Reporting rate of a data set (`R{UID.METRIC}`).
    ReportingRate(String),
    /// Days in the current period (`[days]`).
    Days,
    Unary {
        op: Operator,
        expr: Box<Expr>,
    },
    Binary {
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Expr::Literal(Literal::Number(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::Text(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Expr::Literal(Literal::Bool(value))
    }

    pub fn item(text: impl Into<String>) -> Self {
        Expr::DimensionItem(text.into())
    }

    pub fn unary(op: Operator, expr: Expr) -> Self {
        Expr::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    pub fn binary(op: Operator, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(function: Function, args: Vec<Expr>) -> Self {
        Expr::Call { function, args }
    }
}

/// Renders the tree back to source form, fully parenthesized.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(Literal::Number(n)) => write!(f, "{}", n),
            Expr::Literal(Literal::Text(s)) => escape_string(f, s),
            Expr::Literal(Literal::Bool(b)) => write!(f, "{}", b),
            Expr::DimensionItem(text) => f.write_str(text),
            Expr::Constant(uid) => write!(f, "C{{{}}}", uid),
            Expr::OrgUnitCount(uid) => write!(f, "OUG{{{}}}", uid),
            Expr::ReportingRate(uid) => write!(f, "R{{{}}}", uid),
            Expr::Days => f.write_str("[days]"),
            Expr::Unary { op, expr } => write!(f, "{}({})", op, expr),
            Expr::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Expr::Call { function, args } => {
                write!(f, "{}(", function)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}
