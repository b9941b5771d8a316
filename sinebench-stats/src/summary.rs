//! Summary Statistics
//!
//! Order statistics over the raw per-trial latencies. Every trial counts:
//! the minimum shows the best case, p90/p95 show the tail.

use crate::percentiles::{percentile_of_sorted, sort_samples};

/// Summary statistics of one timing sample set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    /// 50th percentile
    pub median: f64,
    /// Fastest sample
    pub min: f64,
    /// Slowest sample
    pub max: f64,
    /// 90th percentile
    pub p90: f64,
    /// 95th percentile
    pub p95: f64,
    /// Number of samples summarized
    pub sample_count: usize,
}

/// Compute summary statistics from raw samples
///
/// Returns all-zero statistics for an empty sample set.
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics {
            median: 0.0,
            min: 0.0,
            max: 0.0,
            p90: 0.0,
            p95: 0.0,
            sample_count: 0,
        };
    }

    let mut sorted = samples.to_vec();
    sort_samples(&mut sorted);

    SummaryStatistics {
        median: percentile_of_sorted(&sorted, 50.0),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        p90: percentile_of_sorted(&sorted, 90.0),
        p95: percentile_of_sorted(&sorted, 95.0),
        sample_count: sorted.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_summary() {
        let samples = vec![3.0, 1.0, 5.0, 2.0, 4.0];
        let summary = compute_summary(&samples);

        assert!((summary.median - 3.0).abs() < 1e-12);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert!((summary.p90 - 4.6).abs() < 1e-12);
        assert!((summary.p95 - 4.8).abs() < 1e-12);
        assert_eq!(summary.sample_count, 5);
    }

    #[test]
    fn test_ordering_holds() {
        let samples: Vec<f64> = (0..200)
            .map(|i| 0.5 + ((i * 7919) % 211) as f64 * 0.013)
            .collect();
        let s = compute_summary(&samples);

        assert!(s.min <= s.median);
        assert!(s.median <= s.p90);
        assert!(s.p90 <= s.p95);
        assert!(s.p95 <= s.max);
    }

    #[test]
    fn test_slow_trial_reaches_tail() {
        let mut samples = vec![1.0; 19];
        samples.push(50.0);
        let summary = compute_summary(&samples);

        assert_eq!(summary.median, 1.0);
        assert_eq!(summary.max, 50.0);
        assert!(summary.p90 == 1.0);
        assert!(summary.p95 > 1.0);
    }

    #[test]
    fn test_empty_samples() {
        let summary = compute_summary(&[]);

        assert_eq!(summary.sample_count, 0);
        assert_eq!(summary.median, 0.0);
    }
}
