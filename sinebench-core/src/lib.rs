#![warn(missing_docs)]
//! SineBench Core - Workload and Trial Runtime
//!
//! This crate provides everything that runs while a benchmark is measured:
//! - Seeded input generation (`generate_input`)
//! - The three mean-of-sine kernels behind the `Kernel` trait
//! - Wall-clock timing and optional CPU pinning
//! - `Harness`: warmup call, then a fixed number of timed trials

mod harness;
pub mod kernels;
mod measure;
mod workload;

pub use harness::{Harness, HarnessError, Measurement, TrialRun, measure};
pub use kernels::{
    CodegenTarget, CompiledKernel, IterativeKernel, Kernel, KernelError, KernelKind,
    VectorizedKernel,
};
pub use measure::{Timer, duration_ms, pin_to_cpu};
pub use workload::{
    DEFAULT_SEED, DEFAULT_SIZES, DEFAULT_TRIALS, REFERENCE_MEAN_SIN, Workload, generate_input,
};
