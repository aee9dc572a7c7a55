use core::fmt;
use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A monthly period, written `YYYYMM`.
///
/// Ordering is chronological, which matches the lexicographic order of the
/// six-character labels for four-digit years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodParseError {
    #[error("period '{0}' is not six digits (YYYYMM)")]
    Malformed(String),
    #[error("period '{label}' has month {month}, expected 01 to 12")]
    MonthOutOfRange { label: String, month: u32 },
}

impl Period {
    /// Default reporting period, August 2018.
    pub const DEFAULT: Period = Period { year: 2018, month: 8 };

    /// Returns `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Period { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn month_count(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month - 1)
    }

    /// `None` when the year falls outside `i32`.
    fn from_month_count(count: i64) -> Option<Self> {
        let year = i32::try_from(count.div_euclid(12)).ok()?;
        let month = count.rem_euclid(12) as u32 + 1;
        Some(Period { year, month })
    }

    /// Shifts this period by `months` months, or `None` on year overflow.
    pub fn shift_months(&self, months: i32) -> Option<Self> {
        Self::from_month_count(self.month_count() + i64::from(months))
    }

    /// Shifts by `periods` months and `years` years, or `None` on year
    /// overflow.
    pub fn shift(&self, periods: i32, years: i32) -> Option<Self> {
        Self::from_month_count(self.month_count() + i64::from(periods) + 12 * i64::from(years))
    }

    /// Number of days in this period's month, or `None` for years the
    /// calendar cannot represent.
    pub fn days(&self) -> Option<u32> {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        let next = self.shift_months(1)?;
        let next_first = NaiveDate::from_ymd_opt(next.year, next.month, 1)?;
        let days = next_first.signed_duration_since(first).num_days();
        u32::try_from(days).ok()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PeriodParseError::Malformed(s.to_string()));
        }
        let malformed = |_| PeriodParseError::Malformed(s.to_string());
        let year: i32 = s[..4].parse().map_err(malformed)?;
        let month: u32 = s[4..].parse().map_err(malformed)?;
        Period::new(year, month).ok_or_else(|| PeriodParseError::MonthOutOfRange {
            label: s.to_string(),
            month,
        })
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn period(label: &str) -> Period {
        label.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(period("201808").to_string(), "201808");
        assert_eq!(period("201808").year(), 2018);
        assert_eq!(period("201808").month(), 8);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("2018".parse::<Period>(), Err(PeriodParseError::Malformed(_))));
        assert!(matches!("2018x8".parse::<Period>(), Err(PeriodParseError::Malformed(_))));
        assert!(matches!(
            "201813".parse::<Period>(),
            Err(PeriodParseError::MonthOutOfRange { month: 13, .. })
        ));
        assert!(matches!(
            "201800".parse::<Period>(),
            Err(PeriodParseError::MonthOutOfRange { month: 0, .. })
        ));
    }

    #[test]
    fn test_shift_across_year_boundaries() {
        assert_eq!(period("201808").shift_months(-1), Some(period("201807")));
        assert_eq!(period("201801").shift_months(-1), Some(period("201712")));
        assert_eq!(period("201812").shift_months(1), Some(period("201901")));
        assert_eq!(period("201808").shift_months(-20), Some(period("201612")));
        assert_eq!(period("201808").shift(-1, -1), Some(period("201707")));
        assert_eq!(period("201808").shift(2, 1), Some(period("201910")));
    }

    #[test]
    fn test_shift_year_overflow() {
        assert_eq!(period("201808").shift(0, i32::MAX), None);
        assert_eq!(period("201808").shift(0, i32::MIN), None);
        let last = Period::new(i32::MAX, 12).unwrap();
        assert_eq!(last.shift_months(1), None);
        assert_eq!(last.shift_months(-1), Period::new(i32::MAX, 11));
        assert_eq!(last.days(), None);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(period("201808").days(), Some(31));
        assert_eq!(period("201809").days(), Some(30));
        assert_eq!(period("201802").days(), Some(28));
        assert_eq!(period("202002").days(), Some(29));
        assert_eq!(period("201812").days(), Some(31));
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(period("201712") < period("201801"));
        assert!(period("201808") > period("201807"));
    }

    proptest! {
        #[test]
        fn shift_round_trips(year in 1000i32..=9999, month in 1u32..=12, k in -100_000i32..100_000) {
            let start = Period::new(year, month).unwrap();
            let there = start.shift_months(k).unwrap();
            prop_assert_eq!(there.shift_months(-k), Some(start));
        }

        #[test]
        fn label_round_trips(year in 0i32..=9999, month in 1u32..=12) {
            let start = Period::new(year, month).unwrap();
            prop_assert_eq!(start.to_string().parse::<Period>().unwrap(), start);
        }
    }
}
