//! A no-op decision model — agents never act.

use blob_agent::Agent;
use blob_core::AgentRng;

use crate::{DecisionContext, DecisionModel, Proposal};

/// A [`DecisionModel`] that never proposes anything.
///
/// Agents stay idle and stationary.  Useful in tests that need fixed
/// positions (interaction detection, snapshots).
pub struct NoopDecision;

impl DecisionModel for NoopDecision {
    fn propose(
        &self,
        _agent: &Agent,
        _ctx:   &DecisionContext,
        _rng:   &mut AgentRng,
    ) -> Option<Proposal> {
        None
    }
}
