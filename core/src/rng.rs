//! Deterministic random number generation for synthetic sample batches.
//!
//! Nothing in the crate calls a platform RNG. A batch synthesized from a
//! given seed is identical on every run and every machine.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct SampleRng {
    inner: Pcg64Mcg,
}

impl SampleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a float in [low, high).
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Round to cents, the precision sample volumes are quoted in.
    pub fn uniform_cents(&mut self, low: f64, high: f64) -> f64 {
        (self.uniform(low, high) * 100.0).round() / 100.0
    }
}
