//! Descriptive statistics over word counts.
//!
//! Every function here is pure. Functions that are undefined on an empty
//! sequence return `None` and leave the guard to the caller.

/// Arithmetic mean. Returns None for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of an ascending-sorted slice.
///
/// Even-length input averages the two middle elements.
#[must_use]
pub fn median(sorted: &[f64]) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(f64::midpoint(sorted[mid - 1], sorted[mid]))
    } else {
        Some(sorted[mid])
    }
}

/// Percentile of an ascending-sorted slice using linear interpolation.
///
/// `p` is a fraction in `[0, 1]` (values outside are clamped). The rank is
/// `p * (n - 1)`; a fractional rank interpolates between its floor and ceil
/// neighbours.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let index = p * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = index - lower as f64;
    Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

/// Population standard deviation around a precomputed mean.
///
/// Divides by `n`, not `n - 1`. Returns 0 for an empty slice.
#[must_use]
pub fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / values.len() as f64).sqrt()
}

/// Coefficient of variation. Zero when the mean is zero.
#[must_use]
pub fn cv(std_dev: f64, mean: f64) -> f64 {
    if mean == 0.0 {
        return 0.0;
    }
    std_dev / mean
}

/// Ascending copy of the input.
#[must_use]
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}
