//! Value casting and comparison.
//!
//! Casts turn a runtime [`Value`] into the Rust type an operator needs, or
//! fail with a [`TypeError`] naming the expected kind and the offending value.
//! `as_number` is the only cast with coercion: numeric text is parsed. All
//! other casts are exact-kind checks.

use core::cmp::Ordering;
use core::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::values::{MultiPeriodValue, MultiValue, Value};

/// Kinds of value, as named in type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueKind {
    Null,
    Number,
    /// A number with no fractional part.
    Integer,
    Text,
    Boolean,
    /// Number, text or boolean: anything with an ordering.
    Comparable,
    MultiValue,
    MultiPeriodValue,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Number => "number",
            ValueKind::Integer => "integer",
            ValueKind::Text => "text",
            ValueKind::Boolean => "boolean",
            ValueKind::Comparable => "comparable value",
            ValueKind::MultiValue => "multi-value",
            ValueKind::MultiPeriodValue => "multi-period value",
        })
    }
}

/// A cast failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{expected} expected, found {found}")]
pub struct TypeError {
    pub expected: ValueKind,
    /// Textual form of the offending value.
    pub found: String,
}

impl TypeError {
    pub fn new(expected: ValueKind, found: &Value) -> Self {
        TypeError {
            expected,
            found: found.describe(),
        }
    }
}

pub fn as_number(value: &Value) -> Result<f64, TypeError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| TypeError::new(ValueKind::Number, value)),
        _ => Err(TypeError::new(ValueKind::Number, value)),
    }
}

/// A number with no fractional part that fits in an `i32`.
pub fn as_integer(value: &Value) -> Result<i32, TypeError> {
    let n = as_number(value).map_err(|_| TypeError::new(ValueKind::Integer, value))?;
    if n.fract() != 0.0 || n < f64::from(i32::MIN) || n > f64::from(i32::MAX) {
        return Err(TypeError::new(ValueKind::Integer, value));
    }
    Ok(n as i32)
}

pub fn as_boolean(value: &Value) -> Result<bool, TypeError> {
    match value {
        Value::Boolean(b) => Ok(*b),
        _ => Err(TypeError::new(ValueKind::Boolean, value)),
    }
}

pub fn as_text(value: &Value) -> Result<&str, TypeError> {
    match value {
        Value::Text(s) => Ok(s),
        _ => Err(TypeError::new(ValueKind::Text, value)),
    }
}

/// Renders a scalar as text for concatenation. Only `Null` and multi-values
/// have no text form.
pub fn to_text(value: &Value) -> Result<String, TypeError> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Number(_) | Value::Boolean(_) => Ok(value.to_string()),
        _ => Err(TypeError::new(ValueKind::Text, value)),
    }
}

/// Multi-period values are accepted, dropping their period tags.
pub fn as_multi_value(value: &Value) -> Result<MultiValue, TypeError> {
    match value {
        Value::Multi(multi) => Ok(multi.clone()),
        Value::MultiPeriod(multi) => Ok(MultiValue::from(multi.clone())),
        _ => Err(TypeError::new(ValueKind::MultiValue, value)),
    }
}

pub fn as_multi_period_value(value: &Value) -> Result<&MultiPeriodValue, TypeError> {
    match value {
        Value::MultiPeriod(multi) => Ok(multi),
        _ => Err(TypeError::new(ValueKind::MultiPeriodValue, value)),
    }
}

/// Orders two values. The left operand's kind decides how the right one is
/// cast: numbers compare numerically, text lexicographically, booleans with
/// `false < true`.
pub fn compare(left: &Value, right: &Value) -> Result<Ordering, TypeError> {
    match left {
        Value::Number(l) => {
            let r = as_number(right)?;
            Ok(l.partial_cmp(&r).unwrap_or_else(|| l.total_cmp(&r)))
        }
        Value::Text(l) => Ok(l.as_str().cmp(as_text(right)?)),
        Value::Boolean(l) => Ok(l.cmp(&as_boolean(right)?)),
        _ => Err(TypeError::new(ValueKind::Comparable, left)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_number_coerces_numeric_text() {
        assert_eq!(as_number(&Value::Number(2.5)), Ok(2.5));
        assert_eq!(as_number(&Value::from("42")), Ok(42.0));
        assert_eq!(as_number(&Value::from(" 1e2 ")), Ok(100.0));
    }

    #[test]
    fn test_as_number_errors_name_expected_and_found() {
        let err = as_number(&Value::from("abc")).unwrap_err();
        assert_eq!(err.expected, ValueKind::Number);
        assert_eq!(err.found, "\"abc\"");
        assert_eq!(err.to_string(), "number expected, found \"abc\"");

        let err = as_number(&Value::Boolean(true)).unwrap_err();
        assert_eq!(err.found, "true");
        assert!(as_number(&Value::Null).is_err());
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(as_integer(&Value::Number(-3.0)), Ok(-3));
        assert_eq!(as_integer(&Value::from("12")), Ok(12));
        assert_eq!(
            as_integer(&Value::Number(1.5)).unwrap_err().expected,
            ValueKind::Integer
        );
        assert!(as_integer(&Value::Number(1e12)).is_err());
        assert!(as_integer(&Value::Boolean(false)).is_err());
    }

    #[test]
    fn test_exact_kind_casts() {
        assert_eq!(as_boolean(&Value::Boolean(true)), Ok(true));
        assert!(as_boolean(&Value::Number(1.0)).is_err());
        assert!(as_boolean(&Value::from("true")).is_err());
        assert_eq!(as_text(&Value::from("x")), Ok("x"));
        assert!(as_text(&Value::Number(1.0)).is_err());
    }

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(&Value::Number(123.0)).unwrap(), "123");
        assert_eq!(to_text(&Value::Number(0.5)).unwrap(), "0.5");
        assert_eq!(to_text(&Value::Boolean(false)).unwrap(), "false");
        assert!(to_text(&Value::Null).is_err());
    }

    #[test]
    fn test_multi_casts() {
        let multi = MultiValue::from_iter([Value::Number(1.0)]);
        assert_eq!(as_multi_value(&Value::Multi(multi.clone())), Ok(multi));
        assert_eq!(
            as_multi_value(&Value::Number(1.0)).unwrap_err().expected,
            ValueKind::MultiValue
        );
        assert_eq!(
            as_multi_period_value(&Value::Multi(MultiValue::new()))
                .unwrap_err()
                .expected,
            ValueKind::MultiPeriodValue
        );
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare(&Value::Number(1.0), &Value::Number(5.0)), Ok(Ordering::Less));
        assert_eq!(compare(&Value::Number(10.0), &Value::from("9")), Ok(Ordering::Greater));
        assert_eq!(compare(&Value::from("b"), &Value::from("a")), Ok(Ordering::Greater));
        assert_eq!(
            compare(&Value::Boolean(false), &Value::Boolean(true)),
            Ok(Ordering::Less)
        );
    }

    #[test]
    fn test_compare_errors() {
        assert!(compare(&Value::Boolean(true), &Value::Number(1.0)).is_err());
        assert!(compare(&Value::from("a"), &Value::Number(1.0)).is_err());
        assert_eq!(
            compare(&Value::Null, &Value::Number(1.0)).unwrap_err().expected,
            ValueKind::Comparable
        );
    }
}
