//! Function library.
//!
//! - Aggregate: statistics over the numbers collected by dimension iteration
//!   (sum, min, max, average, stddev, variance, median, percentile, ranks)

pub mod aggregate;
