use core::fmt;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::dimensions::Period;
use crate::values::Value;

/// An ordered, flat sequence of values collected by iteration.
///
/// Adding a multi-value splices its elements in. `Null` is never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MultiValue {
    values: Vec<Value>,
}

impl MultiValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_value(&mut self, value: Value) {
        match value {
            Value::Null => {}
            Value::Multi(multi) => self.values.extend(multi.values),
            Value::MultiPeriod(multi) => self.values.extend(multi.values),
            scalar => self.values.push(scalar),
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.values.iter()
    }
}

impl FromIterator<Value> for MultiValue {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut multi = MultiValue::new();
        for value in iter {
            multi.add_value(value);
        }
        multi
    }
}

impl From<MultiPeriodValue> for MultiValue {
    fn from(multi: MultiPeriodValue) -> Self {
        MultiValue {
            values: multi.values,
        }
    }
}

impl fmt::Display for MultiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value.describe())?;
        }
        f.write_str("]")
    }
}

/// A [`MultiValue`] whose elements are each tagged with the period that
/// produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MultiPeriodValue {
    // Index-aligned.
    values: Vec<Value>,
    periods: Vec<Period>,
}

impl MultiPeriodValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` as produced under `period`.
    ///
    /// A period-tagged value keeps its own tags; the elements of a plain
    /// multi-value are all tagged with `period`.
    pub fn add_period_value(&mut self, value: Value, period: Period) {
        match value {
            Value::Null => {}
            Value::MultiPeriod(multi) => self.append(multi),
            Value::Multi(multi) => {
                for value in multi.values {
                    self.values.push(value);
                    self.periods.push(period);
                }
            }
            scalar => {
                self.values.push(scalar);
                self.periods.push(period);
            }
        }
    }

    /// Moves every tagged element of `other` to the end of `self`.
    pub fn append(&mut self, other: MultiPeriodValue) {
        self.values.extend(other.values);
        self.periods.extend(other.periods);
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Period, &Value)> {
        self.periods.iter().copied().zip(self.values.iter())
    }

    /// The `limit` most recent values.
    ///
    /// Periods are visited newest first; within one period, elements keep
    /// their insertion order. The group that crosses `limit` is truncated.
    pub fn last(&self, limit: usize) -> MultiPeriodValue {
        let mut by_period: BTreeMap<Period, Vec<&Value>> = BTreeMap::new();
        for (period, value) in self.iter() {
            by_period.entry(period).or_default().push(value);
        }

        let mut last = MultiPeriodValue::new();
        let newest_first = by_period
            .into_iter()
            .rev()
            .flat_map(|(period, values)| values.into_iter().map(move |value| (period, value)));
        for (period, value) in newest_first.take(limit) {
            last.values.push(value.clone());
            last.periods.push(period);
        }
        last
    }

    /// The single most recent value, if any.
    pub fn most_recent(&self) -> Option<&Value> {
        let newest = self.periods.iter().max()?;
        self.iter()
            .find(|(period, _)| period == newest)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for MultiPeriodValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (period, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", period, value.describe())?;
        }
        f.write_str("]")
    }
}
