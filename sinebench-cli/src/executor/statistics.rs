//! Statistics Computation
//!
//! Turns one [`TrialRun`] into the numbers the report prints: the accuracy
//! check on the warmup result, order statistics of the trial latencies and a
//! bootstrap interval for their median.

use sinebench_core::TrialRun;
use sinebench_stats::{
    BootstrapConfig, BootstrapError, BootstrapResult, SummaryStatistics, compute_bootstrap,
    compute_summary,
};

/// Report for one kernel at one input size
#[derive(Debug, Clone)]
pub struct SizeReport {
    /// Kernel name
    pub kernel: &'static str,
    /// Input length
    pub size: usize,
    /// Result of the warmup call
    pub warmup_result: f64,
    /// |warmup_result - reference|
    pub abs_error: f64,
    /// Latency order statistics (ms)
    pub summary: SummaryStatistics,
    /// Bootstrap interval of the median latency (ms)
    pub bootstrap: BootstrapResult,
}

/// Summarize a trial run
///
/// The warmup result only feeds the accuracy check; the statistics use the
/// timed trials alone.
pub fn summarize(
    run: &TrialRun,
    reference: f64,
    bootstrap: &BootstrapConfig,
) -> Result<SizeReport, BootstrapError> {
    let summary = compute_summary(&run.samples_ms);
    let bootstrap = compute_bootstrap(&run.samples_ms, bootstrap)?;

    Ok(SizeReport {
        kernel: run.kernel,
        size: run.input_len,
        warmup_result: run.warmup_result,
        abs_error: run.abs_error(reference),
        summary,
        bootstrap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn run_with(samples_ms: Vec<f64>) -> TrialRun {
        TrialRun {
            kernel: "iterative",
            input_len: 100,
            prepare_time: Duration::ZERO,
            warmup_result: 0.46,
            trial_results: vec![0.46; samples_ms.len()],
            samples_ms,
        }
    }

    #[test]
    fn test_summarize() {
        let samples: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let report = summarize(&run_with(samples), 0.45, &BootstrapConfig::default()).unwrap();

        assert_eq!(report.size, 100);
        assert!((report.abs_error - 0.01).abs() < 1e-12);
        assert!((report.summary.median - 5.5).abs() < 1e-12);
        assert_eq!(report.summary.min, 1.0);

        let ci = report.bootstrap.confidence_interval;
        assert!(ci.lower <= ci.upper);
        assert!(ci.lower >= 1.0 && ci.upper <= 10.0);
    }

    #[test]
    fn test_summarize_propagates_bootstrap_error() {
        let config = BootstrapConfig {
            confidence_level: 2.0,
            ..Default::default()
        };
        assert!(summarize(&run_with(vec![1.0, 2.0]), 0.0, &config).is_err());
    }
}
