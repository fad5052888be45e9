//! Seed management and the seedable random source
//!
//! Randomness is always an explicit value threaded through the code that
//! needs it, never global state, so determinism can be tested directly.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::params::SimulationParams;

/// Uniform random source that can be reseeded
pub trait RandomSource {
    /// Uniform value in `[min, max)`; returns `min` for an empty range
    fn random(&mut self, min: f32, max: f32) -> f32;
    /// Restart the stream from `seed`
    fn random_seed(&mut self, seed: u64);
}

/// PCG-backed random source
#[derive(Debug, Clone)]
pub struct SimRng {
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SimRng {
    fn random(&mut self, min: f32, max: f32) -> f32 {
        if !(max > min) {
            return min;
        }
        self.rng.random_range(min..max)
    }

    fn random_seed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }
}

/// Hands out seeds for body layout, retaining the last one
#[derive(Debug, Clone, Default)]
pub struct RngSeeder {
    retained: u64,
    draws: u64,
}

impl RngSeeder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed for the next layout.
    ///
    /// Deterministic mode returns the configured seed (or the retained one
    /// when it is unset); otherwise a fresh seed is drawn on every call.
    pub fn seed(&mut self, params: &SimulationParams) -> u64 {
        let seed = if params.deterministic {
            if params.random_seed != 0 {
                params.random_seed
            } else {
                self.retained
            }
        } else {
            self.fresh()
        };
        self.retained = seed;
        seed
    }

    /// Record a seed chosen by the caller
    pub fn retain(&mut self, seed: u64) {
        self.retained = seed;
    }

    pub fn retained(&self) -> u64 {
        self.retained
    }

    fn fresh(&mut self) -> u64 {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        self.draws = self.draws.wrapping_add(1);
        // splitmix64 finalizer over clock + draw counter
        let mut z = nanos ^ self.draws.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}
