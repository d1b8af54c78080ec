//! The `World` struct and its tick.

use blob_agent::{AgentStore, ObjectStore, Spawner, UndecidedSet};
use blob_behavior::{DecisionContext, DecisionModel, Proposal};
use blob_core::{AgentId, SimClock, SimConfig, SimRng, SimTime};
use blob_mobility::{MobilityEngine, PhysicsReport};
use blob_schedule::{Action, DispatchTally, EventScheduler, dispatch_until};
use blob_spatial::{InteractionDetector, InteractionHooks, InteractionTally};
use tracing::{debug, warn};

use crate::{BlobData, SimData, Snapshot, ThingData, WorldData};

// ── TickReport ────────────────────────────────────────────────────────────────

/// What one [`World::update`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Sim time after the tick.
    pub now:          SimTime,
    /// Sim hours the tick advanced.
    pub delta:        f64,
    /// Events run in both scheduler passes.
    pub events:       DispatchTally,
    /// Agents that left the undecided set this tick.
    pub decided:      usize,
    pub physics:      PhysicsReport,
    pub interactions: InteractionTally,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// All simulation state and the five-phase tick.
///
/// 1. **Clock**: advance by the tick's sim delta.
/// 2. **Events**: run every action due at the new time.
/// 3. **Decisions**: every living undecided agent is asked for a
///    [`Proposal`]; each is scheduled as a start action at `now`, then the
///    scheduler runs again so the new actions apply this tick.
/// 4. **Physics**: ageing, motion, boundary clamp.
/// 5. **Interactions**: detection on the post-move positions.
///
/// `World` is single-threaded and owned by the engine loop.  Create via
/// [`WorldBuilder`][crate::WorldBuilder].
pub struct World<D: DecisionModel, H: InteractionHooks> {
    pub config:    SimConfig,
    pub clock:     SimClock,

    /// Agent arena; `AgentId(i)` indexes agents, positions and RNGs.
    pub agents:    AgentStore,
    pub objects:   ObjectStore,
    /// Agents waiting to be asked for their next action.
    pub undecided: UndecidedSet,
    pub scheduler: EventScheduler,

    pub detector:  InteractionDetector,
    pub mobility:  MobilityEngine,
    pub model:     D,
    pub hooks:     H,

    /// World-level stream for births.  Decisions use the per-agent RNGs.
    pub rng:       SimRng,
    pub spawner:   Spawner,
}

impl<D: DecisionModel, H: InteractionHooks> World<D, H> {
    // ── Public API ────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Advance the world by `delta_hours` of sim time.
    pub fn update(&mut self, delta_hours: f64) -> TickReport {
        // ── Phase 1: clock ────────────────────────────────────────────────
        self.clock.advance(delta_hours);
        let now = self.clock.now();

        // ── Phase 2: due events ───────────────────────────────────────────
        let mut events = dispatch_until(&mut self.scheduler, now, &mut self.agents, &mut self.undecided);

        // ── Phase 3: decisions, then run what they scheduled ──────────────
        let decided = self.decide(now);
        if decided > 0 {
            events.merge(dispatch_until(&mut self.scheduler, now, &mut self.agents, &mut self.undecided));
        }

        // ── Phase 4: physics ──────────────────────────────────────────────
        let physics = self.mobility.step(&mut self.agents, &mut self.undecided, delta_hours, now);

        // ── Phase 5: interactions ─────────────────────────────────────────
        let interactions =
            self.detector.run(&mut self.agents, &self.objects, &mut self.scheduler, &self.hooks, now);

        debug!(
            t = now.0,
            delta = delta_hours,
            events = events.total(),
            decided,
            moved = physics.moved,
            clamped = physics.clamped.len(),
            died = physics.died.len(),
            interactions = interactions.total(),
            "tick"
        );

        TickReport { now, delta: delta_hours, events, decided, physics, interactions }
    }

    /// Birth one agent at a random ground position and mark it undecided.
    pub fn birth(&mut self) -> AgentId {
        let now = self.clock.now();
        self.spawner.spawn(&mut self.agents, &mut self.undecided, &mut self.rng, now)
    }

    /// Build a snapshot of the current state, stamped with `sim_data`.
    pub fn snapshot(&self, sim_data: SimData) -> Snapshot {
        let blobs_data = self
            .agents
            .agents()
            .iter()
            .zip(self.agents.positions())
            .map(|(agent, position)| BlobData {
                id:        agent.id.0,
                name:      agent.name.clone(),
                location:  position.to_array(),
                color:     agent.color.clone(),
                state:     agent.activity.as_str().to_string(),
                alive:     agent.alive,
                direction: agent.direction.to_array(),
                radius:    agent.radius,
            })
            .collect();

        let things_data = self
            .objects
            .iter()
            .map(|(object, position)| ThingData { name: object.name.clone(), location: position.to_array() })
            .collect();

        Snapshot { sim_data, world_data: self.world_data(), blobs_data, things_data }
    }

    pub fn world_data(&self) -> WorldData {
        WorldData {
            name:             self.config.world.name.clone(),
            dimensions:       self.config.world.dimensions().to_array(),
            day_phase:        self.clock.day_phase().as_str().to_string(),
            day:              self.clock.day(),
            hour:             self.clock.hour(),
            day_hour:         self.clock.day_hour(),
            current_sim_time: self.clock.now().0,
        }
    }

    // ── Decisions ─────────────────────────────────────────────────────────

    /// Ask every undecided agent for a proposal.  Returns how many decided.
    ///
    /// Agents are visited in ascending id order.  Dead agents are dropped
    /// from the set; an agent whose model returns `None` stays undecided and
    /// is asked again next tick.
    fn decide(&mut self, now: SimTime) -> usize {
        let day_phase = self.clock.day_phase();
        let extent = self.config.world.dimensions();
        let mut decided = 0;

        for id in self.undecided.to_vec() {
            let Some((agent, position, rng)) = self.agents.decision_view(id) else {
                warn!(agent = %id, "undecided agent not in store; dropped");
                self.undecided.remove(id);
                continue;
            };
            if !agent.alive {
                self.undecided.remove(id);
                continue;
            }

            let ctx = DecisionContext::new(now, day_phase, position, extent);
            let Some(proposal) = self.model.propose(agent, &ctx, rng) else {
                continue;
            };

            debug!(agent = %id, t = now.0, proposal = proposal.as_str(), "decided");
            self.scheduler.schedule(now, id, start_action(proposal, now));
            self.undecided.remove(id);
            decided += 1;
        }
        decided
    }
}

/// The start action that carries out `proposal` from `now`.
fn start_action(proposal: Proposal, now: SimTime) -> Action {
    match proposal {
        Proposal::Walk { direction, speed } => Action::StartWalk { direction, speed },
        Proposal::TimedWalk { direction, speed, duration } => {
            Action::StartWalkTimed { direction, speed, duration, start_time: now }
        }
        Proposal::Rest { duration } => Action::StartRest { duration, start_time: now },
    }
}
