//! Inclusive integer intervals used for period, year and org unit offsets.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An inclusive interval with optional ends.
///
/// A range with only `from` set is the single value `from`. A range with
/// neither end set places no restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Range {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

impl Range {
    pub fn new(from: i32, to: i32) -> Self {
        Range {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn single(value: i32) -> Self {
        Range {
            from: Some(value),
            to: None,
        }
    }

    pub fn from_bounds(from: Option<i32>, to: Option<i32>) -> Self {
        Range { from, to }
    }

    /// True when the range names at most one value.
    pub fn is_single(&self) -> bool {
        self.to.is_none() || self.from == self.to
    }

    /// Fills in `from` when it is unset.
    pub fn with_default_from(self, default: i32) -> Self {
        Range {
            from: self.from.or(Some(default)),
            to: self.to,
        }
    }

    /// Maps offsets to absolute values: `base + polarity * offset` for each
    /// end. An unset `from` is taken as offset 1.
    pub fn relative_to(self, base: i32, polarity: i32) -> Self {
        let range = self.with_default_from(1);
        Range {
            from: range.from.map(|offset| base + polarity * offset),
            to: range.to.map(|offset| base + polarity * offset),
        }
    }

    /// Values covered, from `from` to `to` inclusive. Empty when `from` is
    /// unset or `to < from`.
    pub fn values(&self) -> core::ops::RangeInclusive<i32> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from..=to,
            (Some(from), None) => from..=from,
            // `1..=0` is empty.
            (None, _) => 1..=0,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from, self.to) {
            (Some(from), None) => write!(f, "{}", from),
            (Some(from), Some(to)) if from == to => write!(f, "{}", from),
            (Some(from), Some(to)) => write!(f, "{}..{}", from, to),
            (None, Some(to)) => write!(f, "..{}", to),
            (None, None) => f.write_str(".."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_bounded() {
        assert!(Range::single(3).is_single());
        assert!(Range::new(2, 2).is_single());
        assert!(!Range::new(1, 2).is_single());
        assert_eq!(Range::single(3).values().collect::<Vec<_>>(), vec![3]);
        assert_eq!(Range::new(-2, 0).values().collect::<Vec<_>>(), vec![-2, -1, 0]);
        assert_eq!(Range::new(2, 1).values().count(), 0);
        assert_eq!(Range::default().values().count(), 0);
    }

    #[test]
    fn test_relative_to() {
        // Ancestors of a level 3 unit.
        assert_eq!(Range::default().relative_to(3, -1), Range::single(2));
        assert_eq!(Range::new(1, 2).relative_to(3, -1), Range::new(2, 1));
        // Descendants.
        assert_eq!(Range::single(2).relative_to(3, 1), Range::single(5));
    }

    #[test]
    fn test_equality_is_by_value() {
        use std::collections::HashSet;
        let set: HashSet<Range> = [Range::new(1, 2), Range::new(1, 2), Range::single(1)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Range::single(-1).to_string(), "-1");
        assert_eq!(Range::new(-3, -1).to_string(), "-3..-1");
        assert_eq!(Range::new(4, 4).to_string(), "4");
        assert_eq!(Range::default().to_string(), "..");
    }
}
