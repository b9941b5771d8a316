//! Percentile Computation
//!
//! Order-statistic percentiles over raw latency samples. Nothing is trimmed:
//! slow trials are part of the tail the report is meant to show.

use std::cmp::Ordering;

/// Compute a single percentile from samples
///
/// Uses linear interpolation between nearest ranks, `rank = p/100 * (n - 1)`.
///
/// # Examples
///
/// ```
/// # use sinebench_stats::compute_percentile;
/// let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&samples, 50.0), 3.0);
/// assert!((compute_percentile(&samples, 90.0) - 4.6).abs() < 1e-12);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let mut sorted = samples.to_vec();
    sort_samples(&mut sorted);
    percentile_of_sorted(&sorted, percentile)
}

/// Percentile of samples that are already sorted ascending
///
/// Callers computing several percentiles over one sample set sort once and
/// use this directly.
pub fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> f64 {
    match sorted.len() {
        0 => return 0.0,
        1 => return sorted[0],
        _ => {}
    }

    let n = sorted.len();
    let p = (percentile / 100.0).clamp(0.0, 1.0);

    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx])
}

pub(crate) fn sort_samples(samples: &mut [f64]) {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
}
