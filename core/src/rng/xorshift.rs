//! xorshift64* random number generator
//!
//! A fast, high-quality PRNG suitable for simulation: 64-bit state, 64-bit
//! output, passes BigCrush. Same seed, same sequence: the patient generator
//! relies on this to reproduce an identical arrival stream per seed.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*.
///
/// # Example
/// ```
/// use er_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let ticks = rng.range(2, 10); // duration in [2, 10)
/// let urgent = rng.chance(0.1); // 10% probability
/// # let _ = (ticks, urgent);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit, never zero)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with the given seed.
    ///
    /// A zero seed is mapped to 1 (xorshift state must be nonzero).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate the next random u64, advancing the internal state.
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate a random value in `[min, max)`.
    ///
    /// # Panics
    /// Panics if `min >= max`.
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Generate a random f64 in `[0.0, 1.0)`.
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // 53 significant bits, divided by 2^53
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Bernoulli trial: true with the given probability.
    ///
    /// Probabilities at or below 0.0 never fire; at or above 1.0 always fire.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}
