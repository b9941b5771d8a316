#![warn(missing_docs)]
//! SineBench CLI Library
//!
//! Command-line front end: loads `sinebench.toml`, applies flag overrides and
//! runs the executor, printing one report per kernel and input size.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     sinebench_cli::run()
//! }
//! ```

mod config;
mod executor;

pub use config::*;
pub use executor::{
    ExecutionConfig, Executor, SizeReport, format_kernel_header, format_size_report, summarize,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use sinebench_core::{CodegenTarget, KernelKind};
use std::io::Write;
use std::path::PathBuf;

/// SineBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "sinebench")]
#[command(
    author,
    version,
    about = "SineBench - latency of iterative, vectorized and compiled mean-of-sine kernels"
)]
pub struct Cli {
    /// Optional subcommand (Run, List, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Kernel to run (repeatable): iterative, vectorized, compiled
    #[arg(long = "kernel", short = 'k')]
    pub kernels: Vec<String>,

    /// Comma-separated input sizes, e.g. "100000,1e6"
    #[arg(long)]
    pub sizes: Option<String>,

    /// Timed trials per input size
    #[arg(long, short = 'n')]
    pub trials: Option<usize>,

    /// Input generator seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Bootstrap resamples
    #[arg(long)]
    pub bootstrap_iterations: Option<usize>,

    /// Confidence level for the median interval (0.0 to 1.0)
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Bootstrap resampler seed
    #[arg(long, conflicts_with = "random_bootstrap_seed")]
    pub bootstrap_seed: Option<u64>,

    /// Draw a fresh bootstrap seed for this run
    #[arg(long)]
    pub random_bootstrap_seed: bool,

    /// Pin the measuring thread to this CPU (Linux only)
    #[arg(long)]
    pub pin_cpu: Option<usize>,

    /// Show a progress bar on stderr
    #[arg(long)]
    pub progress: bool,

    /// Configuration file (default: discover sinebench.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the benchmark (default)
    Run,
    /// Show the kernels and sizes that would run
    List,
    /// Print a default sinebench.toml
    Init,
}

/// Run the SineBench CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or the first error that aborted the run.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the SineBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Init) => {
            print!("{}", SineConfig::default_toml());
            Ok(())
        }
        Some(Commands::List) => {
            let config = resolve_config(&cli)?;
            list_plan(&config, &mut std::io::stdout().lock())
        }
        Some(Commands::Run) | None => {
            let config = resolve_config(&cli)?;
            let executor = Executor::new(ExecutionConfig::from_config(&config)?);
            let mut stdout = std::io::stdout().lock();
            executor.execute(&mut stdout)?;
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "sinebench=debug"
    } else {
        "sinebench=info"
    };

    // Logs go to stderr so stdout carries only the report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build the effective configuration: defaults → sinebench.toml → CLI flags.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<SineConfig> {
    let base = match &cli.config {
        Some(path) => SineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SineConfig::discover()?.unwrap_or_default(),
    };

    let config = apply_overrides(base, cli)?;
    config.validate()?;
    Ok(config)
}

/// Layer CLI flags over a loaded configuration
fn apply_overrides(mut config: SineConfig, cli: &Cli) -> anyhow::Result<SineConfig> {
    if !cli.kernels.is_empty() {
        config.runner.kernels = cli.kernels.clone();
    }
    if let Some(sizes) = &cli.sizes {
        config.workload.sizes = SineConfig::parse_sizes(sizes)?;
    }
    if let Some(trials) = cli.trials {
        config.runner.trials = trials;
    }
    if let Some(seed) = cli.seed {
        config.workload.seed = seed;
    }
    if let Some(iterations) = cli.bootstrap_iterations {
        config.bootstrap.iterations = iterations;
    }
    if let Some(level) = cli.confidence {
        config.bootstrap.confidence_level = level;
    }
    if let Some(seed) = cli.bootstrap_seed {
        config.bootstrap.seed = Some(seed);
    }
    if cli.random_bootstrap_seed {
        config.bootstrap.seed = None;
    }
    if cli.pin_cpu.is_some() {
        config.runner.pin_cpu = cli.pin_cpu;
    }
    if cli.progress {
        config.runner.progress = true;
    }
    Ok(config)
}

/// Print the execution plan without measuring anything
fn list_plan<W: Write>(config: &SineConfig, out: &mut W) -> anyhow::Result<()> {
    let kernels = config.kernel_kinds()?;

    writeln!(out, "SineBench Plan:")?;
    for kind in &kernels {
        let detail = match kind {
            KernelKind::Compiled => format!(" (codegen: {})", CodegenTarget::detect().name()),
            _ => String::new(),
        };
        writeln!(out, "├── kernel: {}{}", kind, detail)?;
        for size in &config.workload.sizes {
            writeln!(out, "│   ├── N = {}", size)?;
        }
    }
    writeln!(
        out,
        "{} runs, {} trials each, seed {}, {} bootstrap resamples at {}%.",
        kernels.len() * config.workload.sizes.len(),
        config.runner.trials,
        config.workload.seed,
        config.bootstrap.iterations,
        config.bootstrap.confidence_level * 100.0
    )?;

    Ok(())
}
