//! Dimensions an expression can be shifted or iterated along.

mod context;
mod org_unit;
mod period;

pub use context::EvalContext;
pub use org_unit::{OrgUnitDimension, placeholder_members};
pub use period::{Period, PeriodParseError};
