//! Proposals — what an idle agent wants to do next.

use blob_core::Vec3;

/// One decision produced by a [`DecisionModel`][crate::DecisionModel].
///
/// Each variant maps onto exactly one start action in `blob-schedule`.
/// Durations are in sim hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Proposal {
    /// Walk in `direction` at `speed` until something stops the agent
    /// (a world boundary or death).
    Walk {
        direction: Vec3,
        speed:     f64,
    },

    /// Walk in `direction` at `speed` for `duration` hours, then go idle.
    TimedWalk {
        direction: Vec3,
        speed:     f64,
        duration:  f64,
    },

    /// Rest for `duration` hours, then go idle.
    Rest {
        duration: f64,
    },
}

impl Proposal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Proposal::Walk { .. } => "walk",
            Proposal::TimedWalk { .. } => "timed_walk",
            Proposal::Rest { .. } => "rest",
        }
    }
}
