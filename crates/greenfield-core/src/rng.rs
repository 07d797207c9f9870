//! Randomness port.
//!
//! Every probabilistic system draws through [`RandomSource`] so tests can
//! swap the production generator for a seeded one or for scripted rolls.

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Uniform value in [0, 1).
    fn unit(&mut self) -> f64;

    /// `true` with probability `p`. `p >= 1` always fires, `p <= 0` never.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform integer in `lo..=hi`.
    fn range_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        lo + ((self.unit() * span) as i64).min(hi - lo)
    }

    /// Uniform index into a slice of length `len` (0 when empty).
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.unit() * len as f64) as usize).min(len - 1)
    }
}

impl RandomSource for ChaCha8Rng {
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl RandomSource for rand::rngs::StdRng {
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Scripted rolls: returns queued values in order, then `fallback` forever.
#[derive(Debug, Clone)]
pub struct FixedRolls {
    queue: VecDeque<f64>,
    fallback: f64,
}

impl FixedRolls {
    /// Always roll `value`. `always(0.999)` suppresses every random event
    /// with probability below 0.999; `always(0.0)` fires every one.
    pub fn always(value: f64) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: value.clamp(0.0, 0.999_999_999),
        }
    }

    pub fn sequence(values: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            queue: values.into_iter().collect(),
            fallback: fallback.clamp(0.0, 0.999_999_999),
        }
    }
}

impl RandomSource for FixedRolls {
    fn unit(&mut self) -> f64 {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}
