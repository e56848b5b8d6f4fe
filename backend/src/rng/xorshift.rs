//! xorshift64* random number generator
//!
//! Fast, seedable PRNG with 64-bit state. It is the only source of randomness
//! in the crate, and the workload generator draws every sample through it.
//!
//! # Determinism
//!
//! Same seed → same sequence of samples, on every platform. Reproducible
//! experiments depend on this.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use ratatouille_core_rs::RngManager;
///
/// let mut rng = RngManager::new(123);
/// let gap = rng.exponential(1.5);
/// let cook = rng.uniform(0.5, 4.0);
/// assert!(gap >= 0.0);
/// assert!((0.5..4.0).contains(&cook));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    pub fn new(seed: u64) -> Self {
        // xorshift state must never be zero
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Next raw 64-bit value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Current internal state (for replaying from a known point)
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Uniform f64 in [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Top 53 bits fill the mantissa exactly.
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform index in [0, upper)
    ///
    /// # Panics
    /// Panics if `upper` is zero.
    pub fn index(&mut self, upper: usize) -> usize {
        assert!(upper > 0, "upper bound must be positive");
        (self.next() % upper as u64) as usize
    }

    /// Uniform f64 in [low, high)
    ///
    /// # Panics
    /// Panics if `low > high`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        assert!(low <= high, "low must not exceed high");
        low + (high - low) * self.next_f64()
    }

    /// Exponential sample with the given mean (`scale = 1 / rate`)
    pub fn exponential(&mut self, scale: f64) -> f64 {
        // 1 - u lies in (0, 1], so the log is finite.
        let u = self.next_f64();
        -scale * (1.0 - u).ln()
    }

    /// Fisher-Yates shuffle in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}
