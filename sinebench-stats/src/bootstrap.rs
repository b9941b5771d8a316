//! Bootstrap Resampling
//!
//! Percentile bootstrap confidence interval for the median of a sample set.
//! Every resample draws `n` values with replacement from the `n` observed
//! samples.

use crate::percentiles::{percentile_of_sorted, sort_samples};
use crate::{DEFAULT_BOOTSTRAP_ITERATIONS, DEFAULT_BOOTSTRAP_SEED, DEFAULT_CONFIDENCE_LEVEL};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Bootstrap configuration
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Number of bootstrap resamples (default: 1,000)
    pub iterations: usize,
    /// Confidence level (default: 0.95 for 95% CI)
    pub confidence_level: f64,
    /// Resampler seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_BOOTSTRAP_ITERATIONS,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            seed: Some(DEFAULT_BOOTSTRAP_SEED),
        }
    }
}

/// Confidence interval bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
    /// Confidence level the bounds were computed for
    pub level: f64,
}

/// Result of bootstrap analysis
#[derive(Debug, Clone)]
pub struct BootstrapResult {
    /// Point estimate (sample median)
    pub point_estimate: f64,
    /// Confidence interval of the median
    pub confidence_interval: ConfidenceInterval,
    /// Standard deviation of the bootstrap medians
    pub standard_error: f64,
    /// Number of resamples drawn
    pub iterations: usize,
    /// Warning message if any
    pub warning: Option<String>,
}

/// Errors that can occur during bootstrap
#[derive(Debug, Error, PartialEq)]
pub enum BootstrapError {
    /// No samples to resample from
    #[error("Cannot bootstrap an empty sample set")]
    EmptySamples,

    /// Confidence level outside the open interval (0, 1)
    #[error("Invalid confidence level: {0} (must be between 0 and 1)")]
    InvalidConfidenceLevel(f64),

    /// Zero resamples requested
    #[error("Bootstrap needs at least one iteration")]
    NoIterations,
}

/// Compute a bootstrap confidence interval for the median
///
/// The bounds are the `(1 - level) / 2` and `1 - (1 - level) / 2` percentiles
/// of the resampled medians, interpolated the same way as
/// [`compute_percentile`](crate::compute_percentile).
pub fn compute_bootstrap(
    samples: &[f64],
    config: &BootstrapConfig,
) -> Result<BootstrapResult, BootstrapError> {
    if samples.is_empty() {
        return Err(BootstrapError::EmptySamples);
    }

    if !(config.confidence_level > 0.0 && config.confidence_level < 1.0) {
        return Err(BootstrapError::InvalidConfidenceLevel(
            config.confidence_level,
        ));
    }

    if config.iterations == 0 {
        return Err(BootstrapError::NoIterations);
    }

    let mut sorted = samples.to_vec();
    sort_samples(&mut sorted);
    let point_estimate = percentile_of_sorted(&sorted, 50.0);

    // Every resample of a constant set has the same median
    if sorted[0] == sorted[sorted.len() - 1] {
        return Ok(BootstrapResult {
            point_estimate,
            confidence_interval: ConfidenceInterval {
                lower: point_estimate,
                upper: point_estimate,
                level: config.confidence_level,
            },
            standard_error: 0.0,
            iterations: config.iterations,
            warning: Some("All samples have identical values".to_string()),
        });
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut medians = generate_bootstrap_medians(samples, config.iterations, &mut rng);
    sort_samples(&mut medians);

    let (lower, upper) = percentile_interval(&medians, config.confidence_level);

    let bootstrap_mean = medians.iter().sum::<f64>() / medians.len() as f64;
    let se = (medians
        .iter()
        .map(|x| (x - bootstrap_mean).powi(2))
        .sum::<f64>()
        / medians.len() as f64)
        .sqrt();

    let warning = if samples.len() < 10 {
        Some("Very small sample size may lead to unreliable estimates".to_string())
    } else {
        None
    };

    Ok(BootstrapResult {
        point_estimate,
        confidence_interval: ConfidenceInterval {
            lower,
            upper,
            level: config.confidence_level,
        },
        standard_error: se,
        iterations: config.iterations,
        warning,
    })
}

/// Draw `iterations` resamples and return the median of each
fn generate_bootstrap_medians<R: Rng>(
    samples: &[f64],
    iterations: usize,
    rng: &mut R,
) -> Vec<f64> {
    let n = samples.len();
    let mut resample = vec![0.0; n];

    (0..iterations)
        .map(|_| {
            for slot in resample.iter_mut() {
                *slot = samples[rng.gen_range(0..n)];
            }
            sort_samples(&mut resample);
            percentile_of_sorted(&resample, 50.0)
        })
        .collect()
}

/// Percentile interval over sorted bootstrap medians
fn percentile_interval(sorted_medians: &[f64], confidence: f64) -> (f64, f64) {
    let tail = (1.0 - confidence) / 2.0 * 100.0;
    let lower = percentile_of_sorted(sorted_medians, tail);
    let upper = percentile_of_sorted(sorted_medians, 100.0 - tail);
    (lower, upper)
}
