//! Seedable pseudo-random stream shared by every generation stage.
//!
//! One `DungeonRng` is created per pass and threaded `&mut` through the
//! pipeline in a fixed call order, so a seed fully determines the output.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Clone, Debug)]
pub struct DungeonRng {
    inner: ChaCha8Rng,
}

impl DungeonRng {
    pub fn new(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform value in `0..bound`; `bound` must be non-zero.
    pub fn below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        self.next_u64() % bound
    }

    /// Inclusive integer range.
    pub fn range_i32(&mut self, min_value: i32, max_value: i32) -> i32 {
        debug_assert!(min_value <= max_value);
        let span = (i64::from(max_value) - i64::from(min_value) + 1) as u64;
        (i64::from(min_value) + self.below(span) as i64) as i32
    }

    /// Inclusive integer range. A span covering every `u64` takes the raw draw.
    pub fn range_usize(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        let offset = match ((max_value - min_value) as u64).checked_add(1) {
            Some(span) => self.below(span),
            None => self.next_u64(),
        };
        min_value + offset as usize
    }

    pub fn index(&mut self, len: usize) -> usize {
        self.below(len as u64) as usize
    }

    /// Uniform float in `[0, 1)` built from the top 53 bits.
    pub fn unit_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    /// `true` with probability `probability`; always true at 1.0, never at 0.0.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit_f64() < probability
    }
}
