//! Deterministic random number generation.
//!
//! RULE: Nothing in the generators may call a platform RNG. All
//! randomness flows through an `AtlasRng` seeded explicitly from a
//! `u64`, so the same seed always reproduces the same population.
//! Concurrent callers each hold their own instance.

use rand::SeedableRng;
use rand_distr::{Distribution, Gamma, Normal};
use rand_pcg::Pcg64Mcg;

/// The single random-generation capability used across the crate.
pub struct AtlasRng {
    inner: Pcg64Mcg,
}

impl AtlasRng {
    /// Create a reproducible generator from a master seed.
    pub fn seed_from(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Create a generator with an arbitrary seed (the default path,
    /// which carries no reproducibility contract).
    pub fn from_entropy() -> Self {
        Self::seed_from(rand::random())
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Uniform integer in [lo, hi], both ends inclusive.
    pub fn int_between(&mut self, lo: i64, hi: i64) -> i64 {
        debug_assert!(lo <= hi, "int_between bounds inverted");
        lo + self.next_u64_below((hi - lo + 1) as u64) as i64
    }

    /// Gaussian draw. Degenerate parameters fall back to the mean.
    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(dist) => dist.sample(&mut self.inner),
            Err(_) => mean,
        }
    }

    /// Gamma(shape, 1) draw; 0.0 for a non-positive shape.
    pub fn gamma(&mut self, shape: f64) -> f64 {
        match Gamma::new(shape, 1.0) {
            Ok(dist) => dist.sample(&mut self.inner),
            Err(_) => 0.0,
        }
    }
}
