//! Mean-of-Sine Kernels
//!
//! Three execution strategies for `mean(sin(x) for x in input)`:
//!
//! - [`IterativeKernel`]: plain scalar loop
//! - [`VectorizedKernel`]: whole-array `ndarray` primitives
//! - [`CompiledKernel`]: the scalar loop, code-generated for the host CPU and
//!   selected once in [`Kernel::prepare`]
//!
//! Kernels are pure: calling `run` twice on the same input returns the same
//! value.

mod compiled;
mod iterative;
mod vectorized;

pub use compiled::{CodegenTarget, CompiledKernel};
pub use iterative::IterativeKernel;
pub use vectorized::VectorizedKernel;

use thiserror::Error;

/// Errors a kernel can report
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// The mean of zero elements is undefined
    #[error("Input array is empty")]
    EmptyInput,

    /// `run` was called before `prepare`
    #[error("Kernel '{kernel}' must be prepared before it is run")]
    NotPrepared {
        /// Kernel name
        kernel: &'static str,
    },
}

/// A mean-of-sine implementation under test
pub trait Kernel {
    /// Which strategy this kernel implements
    fn kind(&self) -> KernelKind;

    /// Display name
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// One-time setup, run outside of any timed region
    fn prepare(&mut self) -> Result<(), KernelError> {
        Ok(())
    }

    /// Whether `run` may be called
    fn is_prepared(&self) -> bool {
        true
    }

    /// Reduce `input` to the mean of its sines
    fn run(&self, input: &[f64]) -> Result<f64, KernelError>;
}

/// Kernel selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KernelKind {
    /// Scalar loop
    Iterative,
    /// Array primitives
    Vectorized,
    /// Host-specialized scalar loop
    Compiled,
}

impl KernelKind {
    /// All kernels, in report order
    pub const ALL: [KernelKind; 3] = [
        KernelKind::Iterative,
        KernelKind::Vectorized,
        KernelKind::Compiled,
    ];

    /// Stable lowercase name
    pub fn name(self) -> &'static str {
        match self {
            KernelKind::Iterative => "iterative",
            KernelKind::Vectorized => "vectorized",
            KernelKind::Compiled => "compiled",
        }
    }

    /// Construct an unprepared kernel of this kind
    pub fn build(self) -> Box<dyn Kernel> {
        match self {
            KernelKind::Iterative => Box::new(IterativeKernel),
            KernelKind::Vectorized => Box::new(VectorizedKernel),
            KernelKind::Compiled => Box::new(CompiledKernel::new()),
        }
    }
}

impl std::fmt::Display for KernelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for KernelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iterative" | "loop" | "for-loop" => Ok(KernelKind::Iterative),
            "vectorized" | "ndarray" => Ok(KernelKind::Vectorized),
            "compiled" | "jit" => Ok(KernelKind::Compiled),
            other => Err(format!("Unknown kernel: {}", other)),
        }
    }
}

/// Divide an accumulated sum by the element count
#[inline(always)]
pub(crate) fn finish_mean(sum: f64, len: usize) -> Result<f64, KernelError> {
    if len == 0 {
        return Err(KernelError::EmptyInput);
    }
    Ok(sum / len as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::{REFERENCE_MEAN_SIN, generate_input};

    #[test]
    fn test_kind_round_trips_through_name() {
        for kind in KernelKind::ALL {
            assert_eq!(kind.name().parse::<KernelKind>().unwrap(), kind);
            assert_eq!(kind.build().kind(), kind);
        }
    }

    #[test]
    fn test_kind_aliases() {
        assert_eq!("JIT".parse::<KernelKind>().unwrap(), KernelKind::Compiled);
        assert_eq!(
            "ndarray".parse::<KernelKind>().unwrap(),
            KernelKind::Vectorized
        );
        assert!("simd".parse::<KernelKind>().is_err());
    }

    #[test]
    fn test_all_kernels_agree() {
        let input = generate_input(100_000, 42);
        let mut results = Vec::new();

        for kind in KernelKind::ALL {
            let mut kernel = kind.build();
            kernel.prepare().unwrap();
            results.push(kernel.run(&input).unwrap());
        }

        let (iterative, vectorized, compiled) = (results[0], results[1], results[2]);
        assert!((iterative - compiled).abs() < 1e-9);
        assert!((iterative - vectorized).abs() < 1e-6);
        // Sampling error of the mean at N = 100_000 is about 8e-4
        assert!((iterative - REFERENCE_MEAN_SIN).abs() < 5e-3);
    }

    #[test]
    fn test_all_kernels_reject_empty_input() {
        for kind in KernelKind::ALL {
            let mut kernel = kind.build();
            kernel.prepare().unwrap();
            assert_eq!(kernel.run(&[]), Err(KernelError::EmptyInput));
        }
    }

    #[test]
    fn test_finish_mean() {
        assert_eq!(finish_mean(6.0, 3), Ok(2.0));
        assert_eq!(finish_mean(0.0, 0), Err(KernelError::EmptyInput));
    }
}
