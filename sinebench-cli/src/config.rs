//! Configuration loading from sinebench.toml
//!
//! Every field has a default, and the defaults reproduce the fixed setup of
//! the measurement: sizes 1e5/1e6/1e7, 200 trials, seed 42, 1000 bootstrap
//! resamples at 95%. A `sinebench.toml` is discovered by walking up from the
//! current directory; CLI flags are layered on top by the caller.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sinebench_core::{
    DEFAULT_SEED, DEFAULT_SIZES, DEFAULT_TRIALS, KernelKind, REFERENCE_MEAN_SIN,
};
use sinebench_stats::{
    DEFAULT_BOOTSTRAP_ITERATIONS, DEFAULT_BOOTSTRAP_SEED, DEFAULT_CONFIDENCE_LEVEL,
};
use std::path::Path;

/// File name looked up by [`SineConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "sinebench.toml";

/// SineBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SineConfig {
    /// Input generation
    #[serde(default)]
    pub workload: WorkloadConfig,
    /// Trial execution
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Confidence interval estimation
    #[serde(default)]
    pub bootstrap: BootstrapSection,
}

/// Input generation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkloadConfig {
    /// Input sizes, measured in order
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,
    /// Generator seed, reused for every size
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Expected mean used for the accuracy check
    #[serde(default = "default_reference")]
    pub reference: f64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            seed: default_seed(),
            reference: default_reference(),
        }
    }
}

fn default_sizes() -> Vec<usize> {
    DEFAULT_SIZES.to_vec()
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}
fn default_reference() -> f64 {
    REFERENCE_MEAN_SIN
}

/// Trial execution settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunnerConfig {
    /// Timed trials per input size
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Kernels to run, in order: "iterative", "vectorized", "compiled"
    #[serde(default = "default_kernels")]
    pub kernels: Vec<String>,
    /// Pin the measuring thread to this CPU (Linux only)
    #[serde(default)]
    pub pin_cpu: Option<usize>,
    /// Show a progress bar on stderr while trials run
    #[serde(default)]
    pub progress: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            kernels: default_kernels(),
            pin_cpu: None,
            progress: false,
        }
    }
}

fn default_trials() -> usize {
    DEFAULT_TRIALS
}
fn default_kernels() -> Vec<String> {
    KernelKind::ALL.iter().map(|k| k.name().to_string()).collect()
}

/// Bootstrap settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BootstrapSection {
    /// Number of resamples
    #[serde(default = "default_bootstrap_iterations")]
    pub iterations: usize,
    /// Confidence level (e.g., 0.95 for 95%)
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    /// Resampler seed; `None` draws a fresh seed every run
    #[serde(default = "default_bootstrap_seed")]
    pub seed: Option<u64>,
}

impl Default for BootstrapSection {
    fn default() -> Self {
        Self {
            iterations: default_bootstrap_iterations(),
            confidence_level: default_confidence_level(),
            seed: default_bootstrap_seed(),
        }
    }
}

fn default_bootstrap_iterations() -> usize {
    DEFAULT_BOOTSTRAP_ITERATIONS
}
fn default_confidence_level() -> f64 {
    DEFAULT_CONFIDENCE_LEVEL
}
fn default_bootstrap_seed() -> Option<u64> {
    Some(DEFAULT_BOOTSTRAP_SEED)
}

impl SineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    ///
    /// A file that exists but fails to parse is an error, not a silent default.
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let mut dir = std::env::current_dir()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                tracing::debug!(path = %config_path.display(), "loading configuration");
                return Self::load(&config_path).map(Some);
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parsed kernel list
    pub fn kernel_kinds(&self) -> anyhow::Result<Vec<KernelKind>> {
        self.runner
            .kernels
            .iter()
            .map(|name| name.parse::<KernelKind>().map_err(anyhow::Error::msg))
            .collect()
    }

    /// Reject configurations that cannot produce a report
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workload.sizes.is_empty() {
            anyhow::bail!("At least one input size is required");
        }
        if self.workload.sizes.contains(&0) {
            anyhow::bail!("Input sizes must be non-zero");
        }
        if self.runner.trials == 0 {
            anyhow::bail!("Trial count must be at least 1");
        }
        if self.runner.kernels.is_empty() {
            anyhow::bail!("At least one kernel is required");
        }
        self.kernel_kinds()?;
        if self.bootstrap.iterations == 0 {
            anyhow::bail!("Bootstrap iterations must be at least 1");
        }
        let level = self.bootstrap.confidence_level;
        if !(level > 0.0 && level < 1.0) {
            anyhow::bail!("Confidence level must be between 0 and 1, got {}", level);
        }
        Ok(())
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# SineBench Configuration

[workload]
# Input sizes, measured in this order
sizes = [100000, 1000000, 10000000]
# Seed for the uniform [0, 1) input generator
seed = 42
# Expected mean of sin(x), 1 - cos(1)
reference = 0.45969769413186023

[runner]
# Timed trials per input size (one untimed warmup call precedes them)
trials = 200
# Kernels to run: iterative, vectorized, compiled
kernels = ["iterative", "vectorized", "compiled"]
# Pin the measuring thread to a CPU (uncomment to enable, Linux only)
# pin_cpu = 2
# Progress bar on stderr
progress = false

[bootstrap]
# Resamples for the median confidence interval
iterations = 1000
# Confidence level (0.0 to 1.0)
confidence_level = 0.95
# Resampler seed (--random-bootstrap-seed draws a fresh one)
seed = 123
"#
        .to_string()
    }

    /// Parse a comma-separated size list ("100000,1_000_000,1e7")
    pub fn parse_sizes(s: &str) -> anyhow::Result<Vec<usize>> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(parse_size)
            .collect()
    }
}

fn parse_size(s: &str) -> anyhow::Result<usize> {
    let cleaned = s.replace('_', "");
    if let Ok(n) = cleaned.parse::<usize>() {
        return Ok(n);
    }

    // Scientific notation such as "1e6"
    let value: f64 = cleaned
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid input size: {}", s))?;
    if value < 0.0 || value.fract() != 0.0 || value > usize::MAX as f64 {
        anyhow::bail!("Invalid input size: {}", s);
    }
    Ok(value as usize)
}
