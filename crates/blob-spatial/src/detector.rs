//! `InteractionDetector` — per-tick detection and processing.

use blob_agent::{AgentStore, ObjectStore};
use blob_core::{AgentId, InteractionId, ObjectId, SimTime};
use blob_schedule::{Action, EventScheduler};
use tracing::{debug, warn};

use crate::{
    DistanceMatrix, Interaction, InteractionError, InteractionHooks, InteractionKind,
    InteractionResult, Participants,
};

/// Counts for one detection pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionTally {
    /// Locks released because their end time had passed.
    pub released:     usize,
    pub mutual:       usize,
    pub one_sided:    usize,
    pub agent_object: usize,
    /// Interactions whose processing returned an error.
    pub failed:       usize,
}

impl InteractionTally {
    pub fn total(&self) -> usize {
        self.mutual + self.one_sided + self.agent_object
    }
}

/// Detects and processes interactions once per tick.
///
/// Owns the world-wide interaction id counter, so ids never repeat for the
/// lifetime of the detector.
pub struct InteractionDetector {
    next_id:         u64,
    mutual_duration: f64,
}

impl InteractionDetector {
    /// `mutual_duration` is how many sim hours a mutual interaction keeps
    /// both participants occupied.
    pub fn new(mutual_duration: f64) -> Self {
        Self { next_id: 0, mutual_duration }
    }

    fn next_id(&mut self) -> InteractionId {
        let id = InteractionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Run one full pass at time `now` over the post-move positions.
    ///
    /// 1. Release every lock whose end time has passed.
    /// 2. Build the agent×agent and agent×object distance matrices.
    /// 3. Classify pairs into interactions.
    /// 4. Process each interaction once, in detection order.
    pub fn run<H: InteractionHooks>(
        &mut self,
        agents: &mut AgentStore,
        objects: &ObjectStore,
        scheduler: &mut EventScheduler,
        hooks: &H,
        now: SimTime,
    ) -> InteractionTally {
        let mut tally = InteractionTally { released: release_expired(agents, now), ..Default::default() };

        let mut interactions = self.detect(agents, objects);

        for interaction in &mut interactions {
            let kind = interaction.kind;
            match self.process(interaction, agents, objects, scheduler, hooks, now) {
                Ok(()) => match kind {
                    InteractionKind::Mutual => tally.mutual += 1,
                    InteractionKind::OneSided => tally.one_sided += 1,
                    InteractionKind::AgentObject => tally.agent_object += 1,
                },
                Err(e) => {
                    warn!(interaction = %interaction.id, kind = kind.as_str(), error = %e, "interaction processing failed");
                    tally.failed += 1;
                }
            }
        }

        if tally.total() > 0 || tally.failed > 0 {
            debug!(
                t = now.0,
                mutual = tally.mutual,
                one_sided = tally.one_sided,
                agent_object = tally.agent_object,
                failed = tally.failed,
                "processed interactions"
            );
        }
        tally
    }

    /// Classify every eligible pair.  No state is changed except the id
    /// counter.
    pub fn detect(&mut self, agents: &AgentStore, objects: &ObjectStore) -> Vec<Interaction> {
        let mut found = Vec::new();
        let population = agents.agents();

        let d = DistanceMatrix::pairwise(agents.positions());
        for (i, a) in population.iter().enumerate() {
            if !a.alive {
                continue;
            }
            for (j, b) in population.iter().enumerate().skip(i + 1) {
                if !b.alive || (a.interaction.is_occupied() && b.interaction.is_occupied()) {
                    continue;
                }
                let dist = d.get(i, j);
                let a_sees_b = dist <= a.visual_range;
                let b_sees_a = dist <= b.visual_range;

                let (kind, participants) = match (a_sees_b, b_sees_a) {
                    (true, true) => (InteractionKind::Mutual, Participants::Agents(a.id, b.id)),
                    (true, false) => (InteractionKind::OneSided, Participants::Agents(a.id, b.id)),
                    (false, true) => (InteractionKind::OneSided, Participants::Agents(b.id, a.id)),
                    (false, false) => continue,
                };
                found.push(Interaction::new(self.next_id(), kind, participants, dist));
            }
        }

        if !objects.is_empty() {
            let d = DistanceMatrix::cross(agents.positions(), objects.positions());
            for (i, a) in population.iter().enumerate() {
                if !a.alive {
                    continue;
                }
                for (j, &dist) in d.row(i).iter().enumerate() {
                    if dist <= a.visual_range {
                        let participants = Participants::AgentObject(a.id, ObjectId(j as u32));
                        found.push(Interaction::new(self.next_id(), InteractionKind::AgentObject, participants, dist));
                    }
                }
            }
        }
        found
    }

    /// Apply one interaction.  A second call on the same record is a no-op.
    pub fn process<H: InteractionHooks>(
        &self,
        interaction: &mut Interaction,
        agents: &mut AgentStore,
        objects: &ObjectStore,
        scheduler: &mut EventScheduler,
        hooks: &H,
        now: SimTime,
    ) -> InteractionResult<()> {
        if interaction.processed {
            return Ok(());
        }
        interaction.processed = true;

        let id = interaction.id;
        let missing = |agent: AgentId| InteractionError::AgentNotFound { interaction: id, agent };

        match (interaction.kind, interaction.participants) {
            (InteractionKind::Mutual, Participants::Agents(a, b)) => {
                let end_time = now.after(self.mutual_duration);
                for p in [a, b] {
                    let agent = agents.get_mut(p).ok_or_else(|| missing(p))?;
                    if let Some(old) = agent.interaction.occupy(id, end_time) {
                        debug!(agent = %agent.name, interaction = %id, replaced = %old, "lock overridden; old release is stale");
                    }
                }
                scheduler.schedule(end_time, a, Action::EndInteraction { interaction: id, participants: vec![a, b] });

                let agent_a = agents.get(a).ok_or_else(|| missing(a))?;
                let agent_b = agents.get(b).ok_or_else(|| missing(b))?;
                debug!(interaction = %id, a = %agent_a.name, b = %agent_b.name, until = end_time.0, "mutual interaction started");
                hooks.on_mutual(interaction, agent_a, agent_b, end_time)
            }
            (InteractionKind::OneSided, Participants::Agents(observer, target)) => {
                let observer = agents.get(observer).ok_or_else(|| missing(observer))?;
                let target = agents.get(target).ok_or_else(|| missing(target))?;
                hooks.on_one_sided(interaction, observer, target)
            }
            (InteractionKind::AgentObject, Participants::AgentObject(agent, object)) => {
                let agent = agents.get(agent).ok_or_else(|| missing(agent))?;
                let object = objects
                    .get(object)
                    .ok_or(InteractionError::ObjectNotFound { interaction: id, object })?;
                hooks.on_agent_object(interaction, agent, object)
            }
            (kind, participants) => Err(InteractionError::Hook {
                interaction: id,
                reason: format!("{} interaction with mismatched participants {participants:?}", kind.as_str()),
            }),
        }
    }
}

/// Free every occupied agent whose lock has expired.  Returns the count.
fn release_expired(agents: &mut AgentStore, now: SimTime) -> usize {
    let (population, _) = agents.parts_mut();
    let mut released = 0;
    for agent in population.iter_mut() {
        if agent.interaction.release_if_due(now) {
            debug!(agent = %agent.id, t = now.0, "interaction lock expired");
            released += 1;
        }
    }
    released
}
