#![warn(missing_docs)]
//! SineBench Statistical Engine
//!
//! Summarizes per-trial latency samples:
//! - Percentiles by linear interpolation between order statistics
//! - Summary statistics (median, min, max, p90, p95)
//! - Percentile bootstrap confidence interval for the median

mod bootstrap;
mod percentiles;
mod summary;

pub use bootstrap::{
    BootstrapConfig, BootstrapError, BootstrapResult, ConfidenceInterval, compute_bootstrap,
};
pub use percentiles::{compute_percentile, percentile_of_sorted};
pub use summary::{SummaryStatistics, compute_summary};

/// Default number of bootstrap resamples
pub const DEFAULT_BOOTSTRAP_ITERATIONS: usize = 1_000;

/// Default confidence level (95%)
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Default seed for the bootstrap resampler
pub const DEFAULT_BOOTSTRAP_SEED: u64 = 123;
