//! Seeded weighted sampling without replacement.
//!
//! The algorithm is A-ES (Efraimidis & Spirakis exponential clocks): every
//! member with weight `w > 0` draws `u` uniformly from `(0, 1]` and gets the
//! key `ln(u) / w`. Sorting keys in descending order yields the same
//! distribution as drawing one member at a time and renormalizing after each
//! draw, so the first `k` members are the sample, in draw order.
//!
//! Uniforms come from a `fastrand::Rng` seeded per call, one per member in
//! population order, including zero-weight members. The same seed, population
//! and weights therefore always produce the same sample.

use crate::error::{PpsError, Result};

/// Seed used when a request does not name one.
pub const DEFAULT_SEED: u64 = 42;

/// Draws fixed-size weighted samples.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    seed: u64,
}

impl Sampler {
    /// Create a sampler with [`DEFAULT_SEED`].
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Pick `sample_size` distinct positions of `weights`, in draw order.
    ///
    /// Members with a zero (or non-finite) weight are never drawn, so the
    /// size must not exceed the number of positive weights.
    pub fn sample(&self, weights: &[f64], sample_size: usize) -> Result<Vec<usize>> {
        let available = weights.iter().filter(|w| is_drawable(**w)).count();
        if sample_size == 0 || sample_size > available {
            return Err(PpsError::InvalidSampleSize {
                requested: sample_size,
                available,
            });
        }

        let mut rng = fastrand::Rng::with_seed(self.seed);
        let mut keyed: Vec<(f64, usize)> = Vec::with_capacity(available);
        for (pos, &w) in weights.iter().enumerate() {
            let u = 1.0 - rng.f64();
            if is_drawable(w) {
                keyed.push((u.ln() / w, pos));
            }
        }

        // Largest key first; equal keys fall back to population order.
        keyed.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        Ok(keyed
            .into_iter()
            .take(sample_size)
            .map(|(_, pos)| pos)
            .collect())
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_drawable(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0
}
