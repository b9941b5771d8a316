use super::{Kernel, KernelError, KernelKind, finish_mean};

/// Scalar loop: one `sin` and one add per element, front to back
#[derive(Debug, Clone, Copy, Default)]
pub struct IterativeKernel;

impl Kernel for IterativeKernel {
    fn kind(&self) -> KernelKind {
        KernelKind::Iterative
    }

    fn run(&self, input: &[f64]) -> Result<f64, KernelError> {
        let mut sum = 0.0;
        for &x in input {
            sum += x.sin();
        }
        finish_mean(sum, input.len())
    }
}
