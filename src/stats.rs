// Distribution statistics used to scale visual encodings.
use crate::types::{BunkerSavedStats, ParsedRow};
use std::cmp::Ordering;

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    v
}

/// Median of `values`; `0` for an empty slice.
pub fn compute_median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let v = sorted(values);
    let mid = v.len() / 2;
    if v.len() % 2 == 1 {
        v[mid]
    } else {
        (v[mid - 1] + v[mid]) / 2.0
    }
}

/// Percentile with linear interpolation between order statistics.
///
/// `p` is a fraction and is clamped into `[0, 1]`. Returns `0` for an empty
/// slice.
pub fn compute_percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
    let v = sorted(values);
    let rank = (v.len() - 1) as f64 * p;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    v[lower] + (v[upper] - v[lower]) * weight
}

pub fn bunker_saved_stats(rows: &[ParsedRow]) -> BunkerSavedStats {
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|r| r.bunker_saved_usd)
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();

    let median = compute_median(&values);
    let mut p90 = if values.len() > 1 {
        compute_percentile(&values, 0.9)
    } else {
        median
    };
    if p90 <= 0.0 {
        p90 = if median > 0.0 { median } else { 1.0 };
    }
    BunkerSavedStats { median, p90 }
}

impl BunkerSavedStats {
    /// Scale a bunker amount onto `[0, 1]` with `p90` as the top of the range.
    pub fn normalize(&self, value: f64) -> f64 {
        if !value.is_finite() || self.p90 <= 0.0 {
            return 0.0;
        }
        (value / self.p90).clamp(0.0, 1.0)
    }
}
