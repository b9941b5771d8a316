#![warn(missing_docs)]
//! # SineBench
//!
//! Latency benchmark of one reduction, `mean(sin(x))` over a seeded uniform
//! array, computed three ways:
//! - **Iterative**: a scalar loop
//! - **Vectorized**: whole-array `ndarray` primitives
//! - **Compiled**: the scalar loop code-generated for the host CPU, bound in an
//!   explicit `prepare` step before anything is timed
//!
//! Each kernel gets one untimed warmup call and a fixed number of timed trials
//! per input size. The report shows median, min, p90 and p95 latency plus a
//! bootstrap confidence interval for the median.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sinebench::{BootstrapConfig, Harness, KernelKind, compute_bootstrap, generate_input};
//!
//! let input = generate_input(100_000, 42);
//! let mut kernel = KernelKind::Compiled.build();
//!
//! let run = Harness::new(200)?.run(kernel.as_mut(), &input)?;
//! let ci = compute_bootstrap(&run.samples_ms, &BootstrapConfig::default())?;
//! println!("median CI: [{:.3}, {:.3}] ms", ci.confidence_interval.lower, ci.confidence_interval.upper);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export core types
pub use sinebench_core::{
    CodegenTarget, CompiledKernel, DEFAULT_SEED, DEFAULT_SIZES, DEFAULT_TRIALS, Harness,
    HarnessError, IterativeKernel, Kernel, KernelError, KernelKind, Measurement,
    REFERENCE_MEAN_SIN, TrialRun, VectorizedKernel, Workload, generate_input, measure,
};

// Re-export stats
pub use sinebench_stats::{
    BootstrapConfig, BootstrapError, BootstrapResult, ConfidenceInterval, SummaryStatistics,
    compute_bootstrap, compute_percentile, compute_summary,
};

// Re-export the runner
pub use sinebench_cli::{ExecutionConfig, Executor, SineConfig, SizeReport};

/// Run the SineBench CLI harness.
///
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     sinebench::run()
/// }
/// ```
pub use sinebench_cli::run;
