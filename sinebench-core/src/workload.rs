//! Input Generation
//!
//! Uniform [0, 1) inputs from a seeded generator. A given (seed, len) pair
//! always yields the same bits, so every kernel sees identical data.

use rand::SeedableRng;
use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;

/// Seed used for every input array
pub const DEFAULT_SEED: u64 = 42;

/// Input sizes measured by default
pub const DEFAULT_SIZES: [usize; 3] = [100_000, 1_000_000, 10_000_000];

/// Timed trials per input size by default
pub const DEFAULT_TRIALS: usize = 200;

/// Expected value of `sin(U)` for `U ~ Uniform[0, 1)`, i.e. `1 - cos(1)`
pub const REFERENCE_MEAN_SIN: f64 = 0.45969769413186023;

/// A sized, seeded input description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workload {
    /// Number of elements
    pub len: usize,
    /// Generator seed
    pub seed: u64,
}

impl Workload {
    /// Workload of `len` elements with the default seed
    pub fn new(len: usize) -> Self {
        Self {
            len,
            seed: DEFAULT_SEED,
        }
    }

    /// Override the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Materialize the input array
    pub fn generate(&self) -> Vec<f64> {
        generate_input(self.len, self.seed)
    }
}

/// Generate `len` values uniformly distributed over [0, 1)
///
/// Each value consumes one 64-bit draw, so a longer array with the same seed
/// starts with the shorter one.
pub fn generate_input(len: usize, seed: u64) -> Vec<f64> {
    let rng = StdRng::seed_from_u64(seed);
    Standard.sample_iter(rng).take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_is_one_minus_cos_one() {
        assert!((REFERENCE_MEAN_SIN - (1.0 - 1.0f64.cos())).abs() < 1e-15);
    }

    #[test]
    fn test_same_seed_same_bits() {
        let a = generate_input(1_000, 42);
        let b = generate_input(1_000, 42);
        let a_bits: Vec<u64> = a.iter().map(|x| x.to_bits()).collect();
        let b_bits: Vec<u64> = b.iter().map(|x| x.to_bits()).collect();
        assert_eq!(a_bits, b_bits);
    }

    #[test]
    fn test_different_seed_differs() {
        assert_ne!(generate_input(16, 42), generate_input(16, 43));
    }

    #[test]
    fn test_values_in_unit_interval() {
        let xs = generate_input(10_000, DEFAULT_SEED);
        assert_eq!(xs.len(), 10_000);
        assert!(xs.iter().all(|&x| (0.0..1.0).contains(&x)));
    }

    #[test]
    fn test_longer_input_extends_shorter() {
        let short = generate_input(100, 7);
        let long = generate_input(1_000, 7);
        assert_eq!(&long[..100], &short[..]);
    }

    #[test]
    fn test_workload_generate() {
        let w = Workload::new(64).with_seed(9);
        assert_eq!(w.generate(), generate_input(64, 9));
        assert_eq!(Workload::new(1).seed, DEFAULT_SEED);
    }

    #[test]
    fn test_zero_length() {
        assert!(generate_input(0, DEFAULT_SEED).is_empty());
    }
}
