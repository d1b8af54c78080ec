//! The `DecisionModel` trait — the main extension point for agent behavior.

use blob_agent::Agent;
use blob_core::AgentRng;

use crate::{DecisionContext, Proposal};

/// Pluggable agent decision-making.
///
/// Called once per tick for every living agent in the undecided set.  The
/// per-agent [`AgentRng`] keeps decisions deterministic for a given seed no
/// matter how many other agents decide in the same tick.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysRest;
///
/// impl DecisionModel for AlwaysRest {
///     fn propose(&self, _agent: &Agent, _ctx: &DecisionContext, _rng: &mut AgentRng) -> Option<Proposal> {
///         Some(Proposal::Rest { duration: 1.0 })
///     }
/// }
/// ```
pub trait DecisionModel: Send + Sync + 'static {
    /// Return the agent's next action, or `None` to stay idle and be asked
    /// again next tick.
    fn propose(
        &self,
        agent: &Agent,
        ctx:   &DecisionContext,
        rng:   &mut AgentRng,
    ) -> Option<Proposal>;
}

impl<M: DecisionModel + ?Sized> DecisionModel for Box<M> {
    fn propose(
        &self,
        agent: &Agent,
        ctx:   &DecisionContext,
        rng:   &mut AgentRng,
    ) -> Option<Proposal> {
        (**self).propose(agent, ctx, rng)
    }
}
