use core::fmt;

use serde::Serialize;

use crate::casting::ValueKind;
use crate::syntax::escape_string;
use crate::values::{MultiPeriodValue, MultiValue};

/// A runtime value.
///
/// Equality is structural: values of different kinds are never equal, and
/// `Number(NaN)` is not equal to itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Number(f64),
    Text(String),
    Boolean(bool),
    Multi(MultiValue),
    MultiPeriod(MultiPeriodValue),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Number(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Multi(_) => ValueKind::MultiValue,
            Value::MultiPeriod(_) => ValueKind::MultiPeriodValue,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Renders the value the way error messages quote it: text in double
    /// quotes, everything else as displayed.
    pub fn describe(&self) -> String {
        match self {
            Value::Text(s) => {
                let mut out = String::new();
                // Writing to a String cannot fail.
                escape_string(&mut out, s).ok();
                out
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Multi(multi) => write!(f, "{}", multi),
            Value::MultiPeriod(multi) => write!(f, "{}", multi),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// `None` becomes `Null`.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<MultiValue> for Value {
    fn from(multi: MultiValue) -> Self {
        Value::Multi(multi)
    }
}

impl From<MultiPeriodValue> for Value {
    fn from(multi: MultiPeriodValue) -> Self {
        Value::MultiPeriod(multi)
    }
}
