//! Agent actions and their executors.
//!
//! | Kind             | Precondition                         | Effect                                         |
//! |------------------|--------------------------------------|------------------------------------------------|
//! | `StartWalk`      | alive                                | `walking`, moving, direction and speed set     |
//! | `StartWalkTimed` | alive                                | `walking_timed`, moving, schedules `EndWalkTimed` |
//! | `EndWalkTimed`   | still in that timed walk             | idle + undecided                               |
//! | `StartRest`      | alive                                | `resting`, energy +10, schedules `EndRest`     |
//! | `EndRest`        | still in that rest                   | idle + undecided                               |
//! | `EndInteraction` | —                                    | frees each participant whose lock id matches   |
//!
//! Only `EndInteraction` touches agents other than the event's own.

use blob_agent::{ActivityState, Agent, AgentStore, UndecidedSet};
use blob_core::{AgentId, InteractionId, SimTime, Vec3};
use tracing::{debug, warn};

use crate::{ActionError, ActionResult, EventScheduler};

/// Energy regained by starting a rest.
pub const REST_ENERGY_GAIN: f64 = 10.0;

// ── Action ────────────────────────────────────────────────────────────────────

/// Every state transition an event can carry.  Each variant holds exactly
/// the payload its executor needs.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    StartWalk {
        direction: Vec3,
        speed:     f64,
    },
    StartWalkTimed {
        direction:  Vec3,
        speed:      f64,
        duration:   f64,
        start_time: SimTime,
    },
    EndWalkTimed,
    StartRest {
        duration:   f64,
        start_time: SimTime,
    },
    EndRest,
    EndInteraction {
        interaction:  InteractionId,
        participants: Vec<AgentId>,
    },
}

/// Payload-free tag of an [`Action`], for logging and counting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    StartWalk,
    StartWalkTimed,
    EndWalkTimed,
    StartRest,
    EndRest,
    EndInteraction,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::StartWalk => "start_walk",
            ActionKind::StartWalkTimed => "start_walk_timed",
            ActionKind::EndWalkTimed => "end_walk_timed",
            ActionKind::StartRest => "start_rest",
            ActionKind::EndRest => "end_rest",
            ActionKind::EndInteraction => "end_interaction",
        }
    }
}

/// What executing an action did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// An end event whose activity or interaction is already over.
    Stale,
    /// The agent is dead.
    Ignored,
}

/// Mutable world state an action may touch.
pub struct ActionContext<'a> {
    pub agents:    &'a mut AgentStore,
    pub undecided: &'a mut UndecidedSet,
    pub scheduler: &'a mut EventScheduler,
    /// Time of the event being executed.
    pub now:       SimTime,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::StartWalk { .. } => ActionKind::StartWalk,
            Action::StartWalkTimed { .. } => ActionKind::StartWalkTimed,
            Action::EndWalkTimed => ActionKind::EndWalkTimed,
            Action::StartRest { .. } => ActionKind::StartRest,
            Action::EndRest => ActionKind::EndRest,
            Action::EndInteraction { .. } => ActionKind::EndInteraction,
        }
    }

    /// Apply this action to `agent`.
    pub fn execute(self, agent: AgentId, ctx: &mut ActionContext<'_>) -> ActionResult<ActionOutcome> {
        let now = ctx.now;
        let kind = self.kind();

        if let Action::EndInteraction { interaction, participants } = self {
            return Ok(end_interaction(interaction, &participants, ctx));
        }

        let a = ctx.agents.get_mut(agent).ok_or(ActionError::AgentNotFound(agent))?;
        if !a.alive {
            debug!(agent = %agent, t = now.0, kind = kind.as_str(), "ignored: agent is dead");
            return Ok(ActionOutcome::Ignored);
        }

        let outcome = match self {
            Action::StartWalk { direction, speed } => {
                start_moving(a, ActivityState::Walking, direction, speed, None);
                debug!(agent = %agent, t = now.0, %direction, speed, "starts walking");
                ActionOutcome::Applied
            }
            Action::StartWalkTimed { direction, speed, duration, start_time } => {
                let end = start_time.after(duration);
                start_moving(a, ActivityState::WalkingTimed, direction, speed, Some(end));
                ctx.scheduler.schedule(end, agent, Action::EndWalkTimed);
                debug!(agent = %agent, t = now.0, %direction, speed, duration, "starts timed walk");
                ActionOutcome::Applied
            }
            Action::StartRest { duration, start_time } => {
                let end = start_time.after(duration);
                a.activity = ActivityState::Resting;
                a.moving = false;
                a.direction = Vec3::ZERO;
                a.energy += REST_ENERGY_GAIN;
                a.action_end_time = Some(end);
                ctx.scheduler.schedule(end, agent, Action::EndRest);
                debug!(agent = %agent, t = now.0, duration, energy = a.energy, "starts resting");
                ActionOutcome::Applied
            }
            Action::EndWalkTimed => end_timed(a, ActivityState::WalkingTimed, ctx.undecided, now),
            Action::EndRest => end_timed(a, ActivityState::Resting, ctx.undecided, now),
            // Handled before the agent lookup.
            Action::EndInteraction { .. } => ActionOutcome::Stale,
        };
        Ok(outcome)
    }
}

// ── Executors ─────────────────────────────────────────────────────────────────

fn start_moving(
    agent: &mut Agent,
    activity: ActivityState,
    direction: Vec3,
    speed: f64,
    end: Option<SimTime>,
) {
    agent.activity = activity;
    agent.moving = true;
    agent.direction = direction;
    agent.walking_speed = speed;
    agent.action_end_time = end;
}

fn end_timed(
    agent: &mut Agent,
    activity: ActivityState,
    undecided: &mut UndecidedSet,
    now: SimTime,
) -> ActionOutcome {
    if !agent.is_in_timed(activity, now) {
        debug!(
            agent = %agent.id,
            t = now.0,
            expected = activity.as_str(),
            actual = agent.activity.as_str(),
            "stale end event"
        );
        return ActionOutcome::Stale;
    }
    agent.go_idle(undecided);
    debug!(agent = %agent.id, t = now.0, ended = activity.as_str(), "goes idle");
    ActionOutcome::Applied
}

fn end_interaction(
    interaction: InteractionId,
    participants: &[AgentId],
    ctx: &mut ActionContext<'_>,
) -> ActionOutcome {
    let mut released = 0;
    for &p in participants {
        match ctx.agents.get_mut(p) {
            Some(agent) => {
                if agent.interaction.release_matching(interaction) {
                    released += 1;
                    debug!(agent = %p, t = ctx.now.0, %interaction, "freed from interaction");
                }
            }
            None => warn!(agent = %p, %interaction, "interaction participant does not exist"),
        }
    }
    if released == 0 { ActionOutcome::Stale } else { ActionOutcome::Applied }
}
