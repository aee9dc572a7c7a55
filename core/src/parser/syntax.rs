// These are common syntax structures shared by the parser, the checker and the evaluator.

use core::fmt;
use core::ops::Range;
use core::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }
}

/// Operator tag carried by unary and binary nodes.
///
/// The tag set is shared between both node shapes, the same way the grammar
/// shares tokens (`-` is both subtraction and negation). A tag that has no
/// meaning for the node shape carrying it is reported as an invalid operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Not,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Pow => "^",
            Operator::Not => "!",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::And => "&&",
            Operator::Or => "||",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Built-in functions, callable as `name(args)` or `subject.name(args)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Function {
    // Logical
    If,
    Except,
    IsNull,
    Coalesce,

    // Aggregation
    Sum,
    Max,
    Min,
    Average,
    StdDev,
    Variance,
    Median,
    Count,
    Percentile,
    RankHigh,
    RankLow,
    PercentileHigh,
    PercentileLow,
    Last,

    // Dimensional scope
    Period,
    OuLevel,
    OuAncestor,
    OuDescendant,
    OuPeer,
    OuGroup,
}

impl Function {
    pub const ALL: [Function; 24] = [
        Function::If,
        Function::Except,
        Function::IsNull,
        Function::Coalesce,
        Function::Sum,
        Function::Max,
        Function::Min,
        Function::Average,
        Function::StdDev,
        Function::Variance,
        Function::Median,
        Function::Count,
        Function::Percentile,
        Function::RankHigh,
        Function::RankLow,
        Function::PercentileHigh,
        Function::PercentileLow,
        Function::Last,
        Function::Period,
        Function::OuLevel,
        Function::OuAncestor,
        Function::OuDescendant,
        Function::OuPeer,
        Function::OuGroup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::If => "if",
            Function::Except => "except",
            Function::IsNull => "isNull",
            Function::Coalesce => "coalesce",
            Function::Sum => "sum",
            Function::Max => "max",
            Function::Min => "min",
            Function::Average => "average",
            Function::StdDev => "stddev",
            Function::Variance => "variance",
            Function::Median => "median",
            Function::Count => "count",
            Function::Percentile => "percentile",
            Function::RankHigh => "rankHigh",
            Function::RankLow => "rankLow",
            Function::PercentileHigh => "percentileHigh",
            Function::PercentileLow => "percentileLow",
            Function::Last => "last",
            Function::Period => "period",
            Function::OuLevel => "ouLevel",
            Function::OuAncestor => "ouAncestor",
            Function::OuDescendant => "ouDescendant",
            Function::OuPeer => "ouPeer",
            Function::OuGroup => "ouGroup",
        }
    }

    /// Number of arguments accepted, counting the subject of a method call.
    pub fn arity(self) -> Arity {
        match self {
            Function::If => Arity::Exactly(3),
            Function::Except => Arity::Exactly(2),
            Function::IsNull => Arity::Exactly(1),
            Function::Coalesce => Arity::AtLeast(1),
            Function::Sum
            | Function::Max
            | Function::Min
            | Function::Average
            | Function::StdDev
            | Function::Variance
            | Function::Median
            | Function::Count => Arity::Exactly(1),
            Function::Percentile
            | Function::RankHigh
            | Function::RankLow
            | Function::PercentileHigh
            | Function::PercentileLow => Arity::Exactly(2),
            Function::Last => Arity::Between(1, 2),
            Function::Period => Arity::AtLeast(2),
            Function::OuLevel => Arity::Between(2, 3),
            Function::OuAncestor | Function::OuDescendant | Function::OuPeer => {
                Arity::Between(1, 3)
            }
            Function::OuGroup => Arity::AtLeast(2),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFunction(pub String);

impl fmt::Display for UnknownFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown function '{}'", self.0)
    }
}

impl FromStr for Function {
    type Err = UnknownFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Function::ALL
            .iter()
            .copied()
            .find(|function| function.name() == s)
            .ok_or_else(|| UnknownFunction(s.to_string()))
    }
}

/// Argument count shape of a function.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::Between(min, max) => (min..=max).contains(&count),
            Arity::AtLeast(min) => count >= min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::Between(min, max) => write!(f, "{} to {}", min, max),
            Arity::AtLeast(min) => write!(f, "at least {}", min),
        }
    }
}
