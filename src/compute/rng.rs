//! Random number source for the search operators.

use rand::prelude::*;
use rand_distr::Uniform;

/// Seeded random stream owned by a single trial.
pub struct SearchRng {
    rng: StdRng,
}

impl SearchRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Next raw 64-bit value, used to derive child seeds.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform value in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Bernoulli trial with success probability `p`.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform value in `[low, high]`.
    #[inline]
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.sample(Uniform::new_inclusive(low, high))
    }

    /// Uniform index in `0..len`.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Uniform index in `0..len` other than `excluded`.
    ///
    /// Falls back to `excluded` when it is the only index available.
    pub fn index_excluding(&mut self, len: usize, excluded: Option<usize>) -> usize {
        match excluded {
            Some(skip) if skip < len => {
                if len == 1 {
                    return skip;
                }
                let pick = self.rng.gen_range(0..len - 1);
                if pick >= skip { pick + 1 } else { pick }
            }
            _ => self.index(len),
        }
    }
}
