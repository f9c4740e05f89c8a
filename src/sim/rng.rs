//! Random sources for the spawner
//!
//! Runs are reproducible: the default source is a PCG32 stream seeded from
//! the run seed.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Lane, ObstacleKind};

/// Uniform randomness consumed by the simulation
pub trait RandomSource {
    /// Uniform value in [0, 1)
    fn unit(&mut self) -> f64;
    /// Uniform integer in [lo, hi]
    fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32;
}

/// Seeded PCG32 source
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if lo >= hi {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }
}

/// Replays pre-recorded draws; falls back to the low end once exhausted
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    units: VecDeque<f64>,
    ints: VecDeque<u32>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_unit(mut self, value: f64) -> Self {
        self.units.push_back(value);
        self
    }

    pub fn push_int(mut self, value: u32) -> Self {
        self.ints.push_back(value);
        self
    }

    /// Queue the draws that make the spawner (with default weights) produce
    /// this obstacle
    pub fn spawn(self, kind: ObstacleKind, lane: Lane, coin_amount: u32) -> Self {
        let r = match kind {
            ObstacleKind::Cane => 0.1,
            ObstacleKind::Skateboard => 0.5,
            ObstacleKind::Coin => 0.9,
        };
        let scripted = self.push_unit(r).push_int(lane.index() as u32);
        if kind == ObstacleKind::Coin {
            scripted.push_int(coin_amount)
        } else {
            scripted
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.units.is_empty() && self.ints.is_empty()
    }
}

impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.0)
    }

    fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        self.ints.pop_front().unwrap_or(lo).clamp(lo, hi)
    }
}
