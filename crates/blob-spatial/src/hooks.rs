//! Extension points called once per processed interaction.

use blob_agent::{Agent, WorldObject};
use blob_core::SimTime;
use tracing::trace;

use crate::{Interaction, InteractionResult};

/// Reactions to detected interactions.
///
/// The detector has already applied the built-in state change (the mutual
/// lock) before a hook runs.  One-sided and agent–object interactions have no
/// built-in effect; these hooks are where behavior such as following or
/// eating would go.  An `Err` is logged and counted, never propagated.
///
/// All methods default to doing nothing.
pub trait InteractionHooks: Send + Sync + 'static {
    fn on_mutual(
        &self,
        _interaction: &Interaction,
        _a:           &Agent,
        _b:           &Agent,
        _end_time:    SimTime,
    ) -> InteractionResult<()> {
        Ok(())
    }

    fn on_one_sided(
        &self,
        _interaction: &Interaction,
        _observer:    &Agent,
        _target:      &Agent,
    ) -> InteractionResult<()> {
        Ok(())
    }

    fn on_agent_object(
        &self,
        _interaction: &Interaction,
        _agent:       &Agent,
        _object:      &WorldObject,
    ) -> InteractionResult<()> {
        Ok(())
    }
}

/// Hooks that only emit `trace` events.
pub struct LoggingHooks;

impl InteractionHooks for LoggingHooks {
    fn on_mutual(&self, i: &Interaction, a: &Agent, b: &Agent, end_time: SimTime) -> InteractionResult<()> {
        trace!(interaction = %i.id, a = %a.name, b = %b.name, until = end_time.0, "mutual interaction");
        Ok(())
    }

    fn on_one_sided(&self, i: &Interaction, observer: &Agent, target: &Agent) -> InteractionResult<()> {
        trace!(interaction = %i.id, observer = %observer.name, target = %target.name, "one-sided interaction");
        Ok(())
    }

    fn on_agent_object(&self, i: &Interaction, agent: &Agent, object: &WorldObject) -> InteractionResult<()> {
        trace!(interaction = %i.id, agent = %agent.name, object = %object.name, "agent-object interaction");
        Ok(())
    }
}
