//! Read-only world facts passed to every decision.

use blob_core::{DayPhase, SimTime, Vec3};

/// What a [`DecisionModel`][crate::DecisionModel] may look at besides the
/// agent itself.
///
/// Built by `blob-sim` once per decision.  Everything is `Copy`, so models
/// cannot hold on to world memory.
#[derive(Clone, Copy, Debug)]
pub struct DecisionContext {
    /// Current simulation time; a proposal starts at this instant.
    pub now:       SimTime,
    pub day_phase: DayPhase,
    /// Where the deciding agent stands.
    pub position:  Vec3,
    /// World extent `(length, width, height)`.
    pub extent:    Vec3,
}

impl DecisionContext {
    #[inline]
    pub fn new(now: SimTime, day_phase: DayPhase, position: Vec3, extent: Vec3) -> Self {
        Self { now, day_phase, position, extent }
    }
}
