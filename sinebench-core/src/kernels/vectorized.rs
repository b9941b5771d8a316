use super::{Kernel, KernelError, KernelKind};
use ndarray::aview1;

/// Array-at-a-time evaluation: elementwise `sin` into a temporary array,
/// then an `ndarray` mean reduction
///
/// `ndarray` sums with several partial accumulators, so the result can differ
/// from the scalar loop in the last few bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorizedKernel;

impl Kernel for VectorizedKernel {
    fn kind(&self) -> KernelKind {
        KernelKind::Vectorized
    }

    fn run(&self, input: &[f64]) -> Result<f64, KernelError> {
        aview1(input)
            .mapv(f64::sin)
            .mean()
            .ok_or(KernelError::EmptyInput)
    }
}
