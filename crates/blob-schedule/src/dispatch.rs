//! Running due events against the agent store.

use blob_agent::{AgentStore, UndecidedSet};
use blob_core::SimTime;
use tracing::warn;

use crate::{ActionContext, ActionOutcome, EventScheduler};

/// Counts of what happened to the events of one [`dispatch_until`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchTally {
    pub applied: usize,
    pub stale:   usize,
    pub ignored: usize,
    pub failed:  usize,
}

impl DispatchTally {
    pub fn total(&self) -> usize {
        self.applied + self.stale + self.ignored + self.failed
    }

    pub fn merge(&mut self, other: DispatchTally) {
        self.applied += other.applied;
        self.stale += other.stale;
        self.ignored += other.ignored;
        self.failed += other.failed;
    }
}

/// Execute every event due at or before `until`.
///
/// A failing action is logged at `warn` and dropped; the remaining events
/// still run.
pub fn dispatch_until(
    scheduler: &mut EventScheduler,
    until: SimTime,
    agents: &mut AgentStore,
    undecided: &mut UndecidedSet,
) -> DispatchTally {
    let mut tally = DispatchTally::default();

    scheduler.process_until(until, |event, scheduler| {
        let kind = event.action.kind();
        let mut ctx = ActionContext { agents: &mut *agents, undecided: &mut *undecided, scheduler, now: event.time };

        match event.action.execute(event.agent, &mut ctx) {
            Ok(ActionOutcome::Applied) => tally.applied += 1,
            Ok(ActionOutcome::Stale) => tally.stale += 1,
            Ok(ActionOutcome::Ignored) => tally.ignored += 1,
            Err(e) => {
                warn!(agent = %event.agent, t = event.time.0, kind = kind.as_str(), error = %e, "action failed; event discarded");
                tally.failed += 1;
            }
        }
    });

    tally
}
