//! Deterministic per-agent and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! This means:
//!
//! - Agents never share RNG state, so the order in which they decide does
//!   not change what any one of them decides.
//! - Agents born mid-run do not disturb the streams of existing agents.
//!
//! World-level randomness (birth positions, names) draws from `SimRng`.

use std::ops::Range;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Vec3};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Stored in a `Vec<AgentRng>` parallel to the agent arena; see
/// `blob_agent::AgentRngs`.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform sample from a half-open range.  Returns `range.start` when the
    /// range is empty instead of panicking.
    #[inline]
    pub fn uniform(&mut self, range: Range<f64>) -> f64 {
        if range.start >= range.end {
            return range.start;
        }
        self.0.gen_range(range)
    }

    /// A random unit heading in the XY plane.
    #[inline]
    pub fn heading(&mut self) -> Vec3 {
        Vec3::from_heading(self.0.gen_range(0.0..std::f64::consts::TAU))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for world operations (births, initial placement).
///
/// Only used from the simulation thread.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform sample from a half-open range; empty ranges yield the start.
    #[inline]
    pub fn uniform(&mut self, range: Range<f64>) -> f64 {
        if range.start >= range.end {
            return range.start;
        }
        self.0.gen_range(range)
    }

    /// Choose a random element from a non-empty slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
