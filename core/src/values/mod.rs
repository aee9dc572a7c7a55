//! Runtime values produced by the checker and the evaluator.

mod multi;
mod value;

pub use multi::{MultiPeriodValue, MultiValue};
pub use value::Value;
