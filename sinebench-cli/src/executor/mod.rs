//! Benchmark Executor
//!
//! Runs the configured kernels and prints one report per input size.
//!
//! ## Pipeline Overview
//!
//! ```text
//! ExecutionConfig
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Generate input, warm up, run timed trials
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ statistics  │  Summary stats + bootstrap CI of the median
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Console report
//! └─────────────┘
//! ```

mod execution;
mod formatting;
mod statistics;

pub use execution::{ExecutionConfig, Executor};
pub use formatting::{format_kernel_header, format_size_report};
pub use statistics::{SizeReport, summarize};
