//! Benchmark Execution
//!
//! Drives the harness over every configured kernel and input size.
//!
//! ## Data Flow
//!
//! ```text
//! ExecutionConfig
//!        │
//!        ▼
//! for kernel, for size:
//!   generate input → Harness (prepare → warmup → trials) → TrialRun
//!        │
//!        ▼
//!   summarize (statistics) → format → write → drop input
//! ```
//!
//! Only one input array is alive at a time; it is dropped as soon as the
//! report for its size has been written.

use super::formatting::{format_kernel_header, format_size_report};
use super::statistics::{SizeReport, summarize};
use crate::config::SineConfig;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use sinebench_core::{Harness, KernelKind, Workload, pin_to_cpu};
use sinebench_stats::BootstrapConfig;
use std::io::Write;
use std::time::Instant;

/// Configuration for benchmark execution
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Input sizes, in order
    pub sizes: Vec<usize>,
    /// Input generator seed
    pub seed: u64,
    /// Expected mean used for the accuracy check
    pub reference: f64,
    /// Timed trials per size
    pub trials: usize,
    /// Kernels, in order
    pub kernels: Vec<KernelKind>,
    /// CPU to pin the measuring thread to
    pub pin_cpu: Option<usize>,
    /// Show a progress bar on stderr
    pub progress: bool,
    /// Bootstrap settings
    pub bootstrap: BootstrapConfig,
}

impl ExecutionConfig {
    /// Build from a [`SineConfig`] that already passed
    /// [`SineConfig::validate`]
    ///
    /// Only kernel names are re-parsed here; range checks are left to
    /// `validate`.
    pub fn from_config(config: &SineConfig) -> anyhow::Result<Self> {
        Ok(Self {
            sizes: config.workload.sizes.clone(),
            seed: config.workload.seed,
            reference: config.workload.reference,
            trials: config.runner.trials,
            kernels: config.kernel_kinds()?,
            pin_cpu: config.runner.pin_cpu,
            progress: config.runner.progress,
            bootstrap: BootstrapConfig {
                iterations: config.bootstrap.iterations,
                confidence_level: config.bootstrap.confidence_level,
                seed: config.bootstrap.seed,
            },
        })
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            sizes: sinebench_core::DEFAULT_SIZES.to_vec(),
            seed: sinebench_core::DEFAULT_SEED,
            reference: sinebench_core::REFERENCE_MEAN_SIN,
            trials: sinebench_core::DEFAULT_TRIALS,
            kernels: KernelKind::ALL.to_vec(),
            pin_cpu: None,
            progress: false,
            bootstrap: BootstrapConfig::default(),
        }
    }
}

/// Runs every (kernel, size) pair and streams reports to a writer
pub struct Executor {
    config: ExecutionConfig,
}

impl Executor {
    /// Create an executor
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    /// Execute all kernels over all sizes, writing each report as soon as it
    /// is ready
    ///
    /// Returns the reports in execution order. The first failure aborts the
    /// run.
    pub fn execute<W: Write>(&self, out: &mut W) -> anyhow::Result<Vec<SizeReport>> {
        if let Some(cpu) = self.config.pin_cpu {
            pin_to_cpu(cpu).with_context(|| format!("Failed to pin to CPU {}", cpu))?;
            tracing::info!(cpu, "pinned measuring thread");
        }

        let harness = Harness::new(self.config.trials)?;
        let mut reports = Vec::with_capacity(self.config.kernels.len() * self.config.sizes.len());
        let start = Instant::now();

        for &kind in &self.config.kernels {
            out.write_all(format_kernel_header(kind).as_bytes())?;

            // One kernel instance per kind: preparation is paid once
            let mut kernel = kind.build();

            for &size in &self.config.sizes {
                let report = self.execute_single(&harness, kernel.as_mut(), size)?;
                out.write_all(format_size_report(&report).as_bytes())?;
                out.flush()?;
                reports.push(report);
            }
        }

        tracing::info!(
            runs = reports.len(),
            elapsed_s = start.elapsed().as_secs_f64(),
            "benchmark complete"
        );
        Ok(reports)
    }

    /// Measure one kernel on one input size
    fn execute_single(
        &self,
        harness: &Harness,
        kernel: &mut dyn sinebench_core::Kernel,
        size: usize,
    ) -> anyhow::Result<SizeReport> {
        let name = kernel.name();
        let input = Workload::new(size).with_seed(self.config.seed).generate();
        tracing::debug!(kernel = name, size, "input generated");

        let pb = self.progress_bar(name, size);
        let run = harness
            .run_with_observer(kernel, &input, |_, _| pb.inc(1))
            .with_context(|| format!("Kernel '{}' failed at N = {}", name, size))?;
        pb.finish_and_clear();
        drop(input);

        if !run.prepare_time.is_zero() {
            tracing::debug!(
                kernel = run.kernel,
                prepare_ms = run.prepare_time.as_secs_f64() * 1_000.0,
                "kernel prepared"
            );
        }
        if !run.is_consistent() {
            tracing::warn!(
                kernel = run.kernel,
                size,
                "trial results differ from the warmup result"
            );
        }

        let report = summarize(&run, self.config.reference, &self.config.bootstrap)?;
        if let Some(warning) = &report.bootstrap.warning {
            tracing::warn!(kernel = run.kernel, size, "{}", warning);
        }
        Ok(report)
    }

    fn progress_bar(&self, kernel: &str, size: usize) -> ProgressBar {
        if !self.config.progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(self.config.trials as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(format!("{} N = {}", kernel, size));
        pb
    }
}
