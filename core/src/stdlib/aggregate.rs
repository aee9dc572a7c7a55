//! Aggregate Package
//!
//! Numeric aggregations over the flattened elements of a multi-value.
//!
//! Functions: sum, min, max, average, stddev, variance, median, percentile,
//!            rank_high, rank_low, percentile_rank

use statrs::statistics::Statistics;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("percentile must be in (0, 100], found {0}")]
pub struct InvalidPercentile(pub f64);

// ============================================================================
// Basic Operations
// ============================================================================

/// Compensated sum. `0` for no values.
pub fn sum(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut c = 0.0;
    for &x in values {
        let y = x - c;
        let t = sum + y;
        c = (t - sum) - y;
        sum = t;
    }
    sum
}

/// `NaN` for no values.
pub fn min(values: &[f64]) -> f64 {
    Statistics::min(values.iter())
}

/// `NaN` for no values.
pub fn max(values: &[f64]) -> f64 {
    Statistics::max(values.iter())
}

/// Arithmetic mean. `NaN` for no values.
pub fn average(values: &[f64]) -> f64 {
    values.iter().mean()
}

// ============================================================================
// Dispersion
// ============================================================================

/// Sample variance: `0` for one value, `NaN` for none.
pub fn variance(values: &[f64]) -> f64 {
    match values.len() {
        0 => f64::NAN,
        1 => 0.0,
        _ => values.iter().variance(),
    }
}

/// Sample standard deviation: `0` for one value, `NaN` for none.
pub fn stddev(values: &[f64]) -> f64 {
    match values.len() {
        0 => f64::NAN,
        1 => 0.0,
        _ => values.iter().std_dev(),
    }
}

// ============================================================================
// Order Statistics
// ============================================================================

/// Estimates the `p`th percentile.
///
/// Uses position `p (n + 1) / 100` in the sorted values, interpolating
/// linearly between neighbours and clamping to the smallest and largest
/// value. `NaN` for no values.
pub fn percentile(values: &[f64], p: f64) -> Result<f64, InvalidPercentile> {
    if !(p > 0.0 && p <= 100.0) {
        return Err(InvalidPercentile(p));
    }
    let n = values.len();
    match n {
        0 => return Ok(f64::NAN),
        1 => return Ok(values[0]),
        _ => {}
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = p * (n as f64 + 1.0) / 100.0;
    if pos < 1.0 {
        return Ok(sorted[0]);
    }
    if pos >= n as f64 {
        return Ok(sorted[n - 1]);
    }
    let floor = pos.floor();
    let index = floor as usize;
    let lower = sorted[index - 1];
    let upper = sorted[index];
    Ok(lower + (pos - floor) * (upper - lower))
}

/// `percentile(values, 50)`.
pub fn median(values: &[f64]) -> f64 {
    // 50 is always a valid percentile.
    percentile(values, 50.0).unwrap_or(f64::NAN)
}

/// Number of values less than or equal to `x`.
pub fn rank_high(values: &[f64], x: f64) -> usize {
    values.iter().filter(|&&v| v <= x).count()
}

/// One more than the number of values greater than `x`.
pub fn rank_low(values: &[f64], x: f64) -> usize {
    values.iter().filter(|&&v| v > x).count() + 1
}

/// Converts a rank among `n` values to a whole percentage. `0` when `n` is 0.
pub fn percentile_rank(rank: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    (100.0 * rank as f64 / n as f64).round()
}
