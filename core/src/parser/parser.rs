use crate::parser::{Expr, Function, Literal, Operator};
use crate::syntax::unescape_string;
use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        // Logical operators.
        .op(Op::infix(Rule::or, Assoc::Left))            // `||`
        .op(Op::infix(Rule::and, Assoc::Left))           // `&&`

        // Comparison operators.
        .op(
            Op::infix(Rule::eq, Assoc::Left) |
            Op::infix(Rule::ne, Assoc::Left)
        )                                               // `==`, `!=`
        .op(
            Op::infix(Rule::lt, Assoc::Left) |
            Op::infix(Rule::le, Assoc::Left) |
            Op::infix(Rule::gt, Assoc::Left) |
            Op::infix(Rule::ge, Assoc::Left)
        )                                               // `<`, `<=`, `>`, `>=`

        // Arithmetic operators.
        .op(
            Op::infix(Rule::add, Assoc::Left) |
            Op::infix(Rule::sub, Assoc::Left)
        )                                               // `+`, `-`
        .op(
            Op::infix(Rule::mul, Assoc::Left) |
            Op::infix(Rule::div, Assoc::Left) |
            Op::infix(Rule::modulo, Assoc::Left)
        )                                               // `*`, `/`, `%`
        .op(
            Op::prefix(Rule::neg) |
            Op::prefix(Rule::plus) |
            Op::prefix(Rule::not)
        )                                               // `-`, `+`, `!`
        .op(Op::infix(Rule::pow, Assoc::Right))          // `^` (right-assoc)

        // Postfix operators.
        .op(Op::postfix(Rule::method_op))                // `.f(...)`
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "parser/expression.pest"]
pub struct ExpressionParser;

pub type PestError = pest::error::Error<Rule>;

fn custom_error(message: impl Into<String>, span: pest::Span<'_>) -> PestError {
    PestError::new_from_span(
        pest::error::ErrorVariant::CustomError {
            message: message.into(),
        },
        span,
    )
}

fn next_inner<'i>(pair: &Pair<'i, Rule>) -> Result<Pair<'i, Rule>, PestError> {
    pair.clone()
        .into_inner()
        .next()
        .ok_or_else(|| custom_error("missing expected pair in rule", pair.as_span()))
}

fn parse_function(ident: &Pair<Rule>) -> Result<Function, PestError> {
    ident
        .as_str()
        .parse::<Function>()
        .map_err(|err| custom_error(err.to_string(), ident.as_span()))
}

pub fn parse_expr(pair: Pair<Rule>) -> Result<Expr, PestError> {
    match pair.as_rule() {
        Rule::main => parse_expr(next_inner(&pair)?),

        Rule::expression => PRATT_PARSER
            .map_primary(parse_expr)
            .map_prefix(|op, rhs| {
                let op = match op.as_rule() {
                    Rule::neg => Operator::Sub,
                    Rule::plus => Operator::Add,
                    Rule::not => Operator::Not,
                    rule => unreachable!("Unknown prefix operator: {:?}", rule),
                };
                Ok(Expr::unary(op, rhs?))
            })
            .map_infix(|lhs, op, rhs| {
                let op = match op.as_rule() {
                    Rule::or => Operator::Or,
                    Rule::and => Operator::And,
                    Rule::eq => Operator::Eq,
                    Rule::ne => Operator::Ne,
                    Rule::lt => Operator::Lt,
                    Rule::le => Operator::Le,
                    Rule::gt => Operator::Gt,
                    Rule::ge => Operator::Ge,
                    Rule::add => Operator::Add,
                    Rule::sub => Operator::Sub,
                    Rule::mul => Operator::Mul,
                    Rule::div => Operator::Div,
                    Rule::modulo => Operator::Mod,
                    Rule::pow => Operator::Pow,
                    rule => unreachable!("Unknown binary operator: {:?}", rule),
                };
                Ok(Expr::binary(op, lhs?, rhs?))
            })
            .map_postfix(|lhs, op| match op.as_rule() {
                Rule::method_op => {
                    let mut pairs = op.clone().into_inner();
                    let ident = pairs
                        .next()
                        .ok_or_else(|| custom_error("missing method name", op.as_span()))?;
                    let function = parse_function(&ident)?;
                    let mut args = vec![lhs?];
                    for arg in pairs {
                        args.push(parse_expr(arg)?);
                    }
                    Ok(Expr::call(function, args))
                }
                rule => unreachable!("Unknown postfix operator: {:?}", rule),
            })
            .parse(pair.into_inner()),

        Rule::grouped => parse_expr(next_inner(&pair)?),

        Rule::call => {
            let mut pairs = pair.into_inner();
            let ident = match pairs.next() {
                Some(ident) => ident,
                None => unreachable!("call without function name"),
            };
            let function = parse_function(&ident)?;
            let args = pairs.map(parse_expr).collect::<Result<_, _>>()?;
            Ok(Expr::call(function, args))
        }

        Rule::number => {
            let value = pair
                .as_str()
                .parse::<f64>()
                .map_err(|_| custom_error("invalid number literal", pair.as_span()))?;
            Ok(Expr::number(value))
        }

        Rule::boolean => match pair.as_str() {
            "true" => Ok(Expr::boolean(true)),
            "false" => Ok(Expr::boolean(false)),
            _ => Err(custom_error("invalid boolean literal", pair.as_span())),
        },

        Rule::string => {
            let s = pair.as_str();
            let inner = &s[1..s.len() - 1];
            let text = unescape_string(inner)
                .map_err(|err| custom_error(err.to_string(), pair.as_span()))?;
            Ok(Expr::Literal(Literal::Text(text.into_owned())))
        }

        Rule::days => Ok(Expr::Days),

        Rule::dimension_item => Ok(Expr::item(pair.as_str())),

        Rule::constant => Ok(Expr::Constant(next_inner(&pair)?.as_str().to_string())),

        Rule::org_unit_count => Ok(Expr::OrgUnitCount(next_inner(&pair)?.as_str().to_string())),

        Rule::reporting_rate => Ok(Expr::ReportingRate(next_inner(&pair)?.as_str().to_string())),

        rule => unreachable!("Unexpected rule: {:?}", rule),
    }
}

/// Checks that `source` splits into valid tokens, without building a tree.
pub fn tokenize(source: &str) -> Result<(), PestError> {
    ExpressionParser::parse(Rule::tokens, source).map(|_| ())
}

/// Parses `source` into an expression tree.
pub fn parse(source: &str) -> Result<Expr, PestError> {
    let mut pairs = ExpressionParser::parse(Rule::main, source)?;
    match pairs.next() {
        Some(main) => parse_expr(main),
        None => unreachable!("`main` always yields one pair"),
    }
}
