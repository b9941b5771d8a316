//! Host-specialized kernel
//!
//! The loop body is the same as [`IterativeKernel`](super::IterativeKernel);
//! what changes is the code generation. `prepare` checks the CPU once and
//! binds an entry point built for the best available instruction set, so timed
//! calls never pay for feature detection.

use super::{Kernel, KernelError, KernelKind, finish_mean};

type MeanSinFn = fn(&[f64]) -> Result<f64, KernelError>;

/// Instruction set a compiled entry point targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodegenTarget {
    /// x86_64 with AVX2 and FMA
    Avx2Fma,
    /// Baseline instruction set of the build target
    Portable,
}

impl CodegenTarget {
    /// Best target supported by the running CPU
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
                return CodegenTarget::Avx2Fma;
            }
        }
        CodegenTarget::Portable
    }

    /// Short label for logs and reports
    pub fn name(self) -> &'static str {
        match self {
            CodegenTarget::Avx2Fma => "avx2+fma",
            CodegenTarget::Portable => "portable",
        }
    }

    fn entry_point(self) -> MeanSinFn {
        match self {
            #[cfg(target_arch = "x86_64")]
            CodegenTarget::Avx2Fma => mean_sin_avx2_fma,
            _ => mean_sin_portable,
        }
    }
}

/// Scalar loop compiled for the host; requires [`Kernel::prepare`]
#[derive(Debug, Clone, Default)]
pub struct CompiledKernel {
    entry: Option<(CodegenTarget, MeanSinFn)>,
}

impl CompiledKernel {
    /// Unprepared kernel
    pub fn new() -> Self {
        Self { entry: None }
    }
}

impl Kernel for CompiledKernel {
    fn kind(&self) -> KernelKind {
        KernelKind::Compiled
    }

    fn prepare(&mut self) -> Result<(), KernelError> {
        if self.entry.is_none() {
            let target = CodegenTarget::detect();
            tracing::debug!(codegen = target.name(), "compiled kernel bound");
            self.entry = Some((target, target.entry_point()));
        }
        Ok(())
    }

    fn is_prepared(&self) -> bool {
        self.entry.is_some()
    }

    fn run(&self, input: &[f64]) -> Result<f64, KernelError> {
        match self.entry {
            Some((_, entry)) => entry(input),
            None => Err(KernelError::NotPrepared {
                kernel: self.name(),
            }),
        }
    }
}

#[inline(always)]
fn sum_sin(input: &[f64]) -> f64 {
    let mut sum = 0.0;
    for &x in input {
        sum += x.sin();
    }
    sum
}

fn mean_sin_portable(input: &[f64]) -> Result<f64, KernelError> {
    finish_mean(sum_sin(input), input.len())
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
unsafe fn mean_sin_avx2_fma_impl(input: &[f64]) -> Result<f64, KernelError> {
    finish_mean(sum_sin(input), input.len())
}

#[cfg(target_arch = "x86_64")]
fn mean_sin_avx2_fma(input: &[f64]) -> Result<f64, KernelError> {
    // SAFETY: only bound for `CodegenTarget::Avx2Fma`, which is only selected
    // after both features were confirmed at runtime.
    unsafe { mean_sin_avx2_fma_impl(input) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::IterativeKernel;
    use crate::workload::generate_input;

    #[test]
    fn test_run_before_prepare_fails() {
        let kernel = CompiledKernel::new();
        assert!(!kernel.is_prepared());
        assert_eq!(
            kernel.run(&[0.5]),
            Err(KernelError::NotPrepared {
                kernel: "compiled"
            })
        );
    }

    #[test]
    fn test_prepare_binds_target() {
        let mut kernel = CompiledKernel::new();
        kernel.prepare().unwrap();
        assert!(kernel.is_prepared());
        assert_eq!(kernel.entry.map(|(target, _)| target), Some(CodegenTarget::detect()));

        // Preparing twice keeps the first binding
        kernel.prepare().unwrap();
        assert_eq!(kernel.entry.map(|(target, _)| target), Some(CodegenTarget::detect()));
    }

    #[test]
    fn test_bit_identical_to_iterative() {
        let input = generate_input(10_000, 42);
        let mut kernel = CompiledKernel::new();
        kernel.prepare().unwrap();

        let compiled = kernel.run(&input).unwrap();
        let iterative = IterativeKernel.run(&input).unwrap();
        assert_eq!(compiled.to_bits(), iterative.to_bits());
    }

    #[test]
    fn test_portable_entry_point() {
        let input = generate_input(1_000, 1);
        let entry = CodegenTarget::Portable.entry_point();
        assert_eq!(entry(&input), IterativeKernel.run(&input));
    }
}
