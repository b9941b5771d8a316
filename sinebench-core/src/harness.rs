//! Trial Harness
//!
//! Runs one (kernel, input) measurement the same way every time:
//!
//! 1. `prepare` the kernel if it is not ready yet (untimed)
//! 2. one warmup call; its duration is dropped, its result kept for the
//!    accuracy check
//! 3. exactly `trials` timed calls, strictly in sequence
//!
//! The harness never retries and never times out: a slow trial is simply a
//! large sample.

use crate::kernels::{Kernel, KernelError};
use crate::measure::{Timer, duration_ms};
use std::time::Duration;
use thiserror::Error;

/// Result and wall-clock time of one kernel call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Value returned by the kernel
    pub value: f64,
    /// Time spent inside the call
    pub elapsed: Duration,
}

impl Measurement {
    /// Elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        duration_ms(self.elapsed)
    }
}

/// Time a single kernel call
///
/// Input and output pass through `black_box` so the call cannot be hoisted
/// out of or folded across the timed region.
#[inline]
pub fn measure<K: Kernel + ?Sized>(
    kernel: &K,
    input: &[f64],
) -> Result<Measurement, KernelError> {
    let timer = Timer::start();
    let value = std::hint::black_box(kernel.run(std::hint::black_box(input)));
    let elapsed = timer.stop();

    Ok(Measurement {
        value: value?,
        elapsed,
    })
}

/// Everything recorded for one kernel on one input
#[derive(Debug, Clone)]
pub struct TrialRun {
    /// Kernel name
    pub kernel: &'static str,
    /// Input length
    pub input_len: usize,
    /// Time spent in `prepare` (zero if the kernel was already prepared)
    pub prepare_time: Duration,
    /// Result of the warmup call
    pub warmup_result: f64,
    /// Result of every timed trial, in order
    pub trial_results: Vec<f64>,
    /// Duration of every timed trial in milliseconds, in order
    pub samples_ms: Vec<f64>,
}

impl TrialRun {
    /// Absolute deviation of the warmup result from `reference`
    pub fn abs_error(&self, reference: f64) -> f64 {
        (self.warmup_result - reference).abs()
    }

    /// Whether every trial returned exactly the warmup result
    pub fn is_consistent(&self) -> bool {
        self.trial_results
            .iter()
            .all(|r| r.to_bits() == self.warmup_result.to_bits())
    }
}

/// Errors from a harness run
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HarnessError {
    /// Trial count of zero
    #[error("Trial count must be at least 1")]
    NoTrials,

    /// The kernel failed during prepare, warmup or a trial
    #[error(transparent)]
    Kernel(#[from] KernelError),
}

/// Fixed-count trial runner
#[derive(Debug, Clone, Copy)]
pub struct Harness {
    trials: usize,
}

impl Harness {
    /// Harness recording `trials` timed calls per run
    pub fn new(trials: usize) -> Result<Self, HarnessError> {
        if trials == 0 {
            return Err(HarnessError::NoTrials);
        }
        Ok(Self { trials })
    }

    /// Configured trial count
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Prepare, warm up and measure `kernel` on `input`
    pub fn run<K: Kernel + ?Sized>(
        &self,
        kernel: &mut K,
        input: &[f64],
    ) -> Result<TrialRun, HarnessError> {
        self.run_with_observer(kernel, input, |_, _| {})
    }

    /// Like [`run`](Self::run), calling `observer(trial_index, measurement)`
    /// after every timed trial
    pub fn run_with_observer<K, F>(
        &self,
        kernel: &mut K,
        input: &[f64],
        mut observer: F,
    ) -> Result<TrialRun, HarnessError>
    where
        K: Kernel + ?Sized,
        F: FnMut(usize, &Measurement),
    {
        let prepare_time = if kernel.is_prepared() {
            Duration::ZERO
        } else {
            let timer = Timer::start();
            kernel.prepare()?;
            timer.stop()
        };

        let warmup = measure(&*kernel, input)?;
        tracing::debug!(
            kernel = kernel.name(),
            len = input.len(),
            warmup_ms = warmup.elapsed_ms(),
            "warmup done"
        );

        let mut trial_results = Vec::with_capacity(self.trials);
        let mut samples_ms = Vec::with_capacity(self.trials);

        for index in 0..self.trials {
            let m = measure(&*kernel, input)?;
            trial_results.push(m.value);
            samples_ms.push(m.elapsed_ms());
            observer(index, &m);
        }

        Ok(TrialRun {
            kernel: kernel.name(),
            input_len: input.len(),
            prepare_time,
            warmup_result: warmup.value,
            trial_results,
            samples_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::{CompiledKernel, IterativeKernel, KernelKind};
    use crate::workload::generate_input;
    use std::cell::Cell;

    /// Counts calls so tests can check the warmup/trial split
    struct CountingKernel {
        calls: Cell<usize>,
        prepared: bool,
    }

    impl Kernel for CountingKernel {
        fn kind(&self) -> KernelKind {
            KernelKind::Iterative
        }

        fn prepare(&mut self) -> Result<(), KernelError> {
            self.prepared = true;
            Ok(())
        }

        fn is_prepared(&self) -> bool {
            self.prepared
        }

        fn run(&self, input: &[f64]) -> Result<f64, KernelError> {
            assert!(self.prepared, "run before prepare");
            self.calls.set(self.calls.get() + 1);
            IterativeKernel.run(input)
        }
    }

    #[test]
    fn test_zero_trials_rejected() {
        assert_eq!(Harness::new(0).unwrap_err(), HarnessError::NoTrials);
    }

    #[test]
    fn test_sample_count_equals_trials() {
        let input = generate_input(1_000, 42);
        for trials in [1, 10, 37] {
            let run = Harness::new(trials)
                .unwrap()
                .run(&mut IterativeKernel, &input)
                .unwrap();
            assert_eq!(run.samples_ms.len(), trials);
            assert_eq!(run.trial_results.len(), trials);
            assert!(run.samples_ms.iter().all(|&t| t >= 0.0));
        }
    }

    #[test]
    fn test_one_warmup_then_trials() {
        let mut kernel = CountingKernel {
            calls: Cell::new(0),
            prepared: false,
        };
        let input = generate_input(100, 42);

        let run = Harness::new(10).unwrap().run(&mut kernel, &input).unwrap();

        assert!(kernel.prepared);
        assert_eq!(kernel.calls.get(), 11);
        assert_eq!(run.samples_ms.len(), 10);
    }

    #[test]
    fn test_warmup_matches_first_trial() {
        let input = generate_input(100, 42);
        let run = Harness::new(10)
            .unwrap()
            .run(&mut IterativeKernel, &input)
            .unwrap();

        assert_eq!(run.warmup_result, run.trial_results[0]);
        assert!(run.is_consistent());
        assert_eq!(run.kernel, "iterative");
        assert_eq!(run.input_len, 100);
    }

    #[test]
    fn test_harness_prepares_compiled_kernel() {
        let mut kernel = CompiledKernel::new();
        let input = generate_input(100, 42);

        let run = Harness::new(3).unwrap().run(&mut kernel, &input).unwrap();

        assert!(kernel.is_prepared());
        assert!(run.is_consistent());
    }

    #[test]
    fn test_observer_sees_every_trial() {
        let input = generate_input(100, 42);
        let mut seen = Vec::new();

        Harness::new(5)
            .unwrap()
            .run_with_observer(&mut IterativeKernel, &input, |i, m| seen.push((i, m.value)))
            .unwrap();

        let indices: Vec<usize> = seen.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_kernel_error_propagates() {
        let err = Harness::new(3)
            .unwrap()
            .run(&mut IterativeKernel, &[])
            .unwrap_err();
        assert_eq!(err, HarnessError::Kernel(KernelError::EmptyInput));
    }

    #[test]
    fn test_abs_error() {
        let run = TrialRun {
            kernel: "iterative",
            input_len: 1,
            prepare_time: Duration::ZERO,
            warmup_result: 0.5,
            trial_results: vec![0.5],
            samples_ms: vec![1.0],
        };
        assert!((run.abs_error(0.25) - 0.25).abs() < f64::EPSILON);
    }
}
