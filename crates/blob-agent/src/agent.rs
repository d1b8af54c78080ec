//! Per-agent state: identity, physical attributes, lifecycle, the primary
//! activity state machine, and the interaction lock.
//!
//! # Activity state machine
//!
//! | From            | Trigger                     | To              |
//! |-----------------|-----------------------------|-----------------|
//! | `idle`          | `StartWalk`                 | `walking`       |
//! | `idle`          | `StartWalkTimed`            | `walking_timed` |
//! | `idle`          | `StartRest`                 | `resting`       |
//! | `walking*`      | boundary hit                | `idle`          |
//! | `walking_timed` | `EndWalkTimed`              | `idle`          |
//! | `resting`       | `EndRest`                   | `idle`          |
//! | any             | `age > lifespan`            | `dead` (final)  |
//!
//! Position is not stored here; it lives in `AgentStore::positions` under
//! the same index.

use blob_core::{AgentDefaults, AgentId, InteractionId, SimTime, Vec3};

use crate::{Gender, UndecidedSet};

// ── ActivityState ─────────────────────────────────────────────────────────────

/// The primary activity an agent is engaged in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActivityState {
    #[default]
    Idle,
    Walking,
    WalkingTimed,
    Resting,
    Dead,
}

impl ActivityState {
    /// The wire name used in snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityState::Idle => "idle",
            ActivityState::Walking => "walking",
            ActivityState::WalkingTimed => "walking_timed",
            ActivityState::Resting => "resting",
            ActivityState::Dead => "dead",
        }
    }
}

// ── InteractionLock ───────────────────────────────────────────────────────────

/// Interaction sub-state, orthogonal to [`ActivityState`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionState {
    #[default]
    Free,
    Occupied,
    /// Reported but never entered by the current rules.
    Cooldown,
}

impl InteractionState {
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionState::Free => "free",
            InteractionState::Occupied => "occupied",
            InteractionState::Cooldown => "cooldown",
        }
    }
}

/// The lock a mutual interaction holds on an agent.
///
/// `id` is `Some` exactly when `state` is `Occupied`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct InteractionLock {
    pub state:    InteractionState,
    pub id:       Option<InteractionId>,
    pub end_time: SimTime,
}

impl InteractionLock {
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.state == InteractionState::Occupied
    }

    /// Take the lock for interaction `id` until `end_time`.  Returns the id
    /// of the lock this one replaced, if any; its release no longer matches.
    pub fn occupy(&mut self, id: InteractionId, end_time: SimTime) -> Option<InteractionId> {
        let replaced = self.id.filter(|_| self.is_occupied());
        self.state = InteractionState::Occupied;
        self.id = Some(id);
        self.end_time = end_time;
        replaced
    }

    /// Return to `Free` unconditionally.
    pub fn release(&mut self) {
        *self = InteractionLock::default();
    }

    /// Release if held by interaction `id`.  Returns `true` if released.
    pub fn release_matching(&mut self, id: InteractionId) -> bool {
        if self.id == Some(id) {
            self.release();
            true
        } else {
            false
        }
    }

    /// Release if occupied and `now >= end_time`.  Returns `true` if released.
    pub fn release_if_due(&mut self, now: SimTime) -> bool {
        if self.is_occupied() && now >= self.end_time {
            self.release();
            true
        } else {
            false
        }
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One autonomous agent ("blob").
#[derive(Clone, Debug)]
pub struct Agent {
    // ── Identity ──────────────────────────────────────────────────────────
    pub id:         AgentId,
    pub name:       String,
    pub gender:     Gender,
    pub birth_time: SimTime,

    // ── Physical attributes ───────────────────────────────────────────────
    pub radius:        f64,
    pub visual_range:  f64,
    /// World units per sim hour.  Overwritten by the speed of a walk action.
    pub walking_speed: f64,
    pub color:         String,

    // ── Lifecycle ─────────────────────────────────────────────────────────
    pub energy:   f64,
    /// Sim hours lived.
    pub age:      f64,
    pub lifespan: f64,
    pub alive:    bool,

    // ── Activity ──────────────────────────────────────────────────────────
    pub activity:        ActivityState,
    /// Unit heading while moving, zero otherwise.
    pub direction:       Vec3,
    pub moving:          bool,
    /// When the current timed activity ends; `None` for idle and untimed walks.
    pub action_end_time: Option<SimTime>,

    pub interaction: InteractionLock,
}

impl Agent {
    /// A newborn agent with attributes taken from `defaults`.
    pub fn newborn(
        id: AgentId,
        name: String,
        gender: Gender,
        defaults: &AgentDefaults,
        birth_time: SimTime,
    ) -> Self {
        Self {
            id,
            name,
            gender,
            birth_time,
            radius:          defaults.radius,
            visual_range:    defaults.visual_range,
            walking_speed:   defaults.walking_speed,
            color:           defaults.color.clone(),
            energy:          defaults.energy,
            age:             0.0,
            lifespan:        defaults.lifespan,
            alive:           true,
            activity:        ActivityState::Idle,
            direction:       Vec3::ZERO,
            moving:          false,
            action_end_time: None,
            interaction:     InteractionLock::default(),
        }
    }

    /// Stop whatever the agent is doing and queue it for a new decision.
    ///
    /// This is the only way back into the undecided set.  No-op for dead
    /// agents.
    pub fn go_idle(&mut self, undecided: &mut UndecidedSet) {
        if !self.alive {
            return;
        }
        self.activity = ActivityState::Idle;
        self.moving = false;
        self.direction = Vec3::ZERO;
        self.action_end_time = None;
        undecided.insert(self.id);
    }

    /// Add `delta_hours` to the agent's age.
    ///
    /// Returns `true` on the call that kills the agent (`age > lifespan`).
    pub fn age_by(&mut self, delta_hours: f64) -> bool {
        if !self.alive {
            return false;
        }
        self.age += delta_hours;
        if self.age > self.lifespan {
            self.die();
            return true;
        }
        false
    }

    fn die(&mut self) {
        self.alive = false;
        self.activity = ActivityState::Dead;
        self.moving = false;
        self.direction = Vec3::ZERO;
        self.action_end_time = None;
    }

    /// `true` if the agent is alive and its current timed activity is
    /// `activity` ending at exactly `end_time`.
    ///
    /// End actions use this to tell a live end event from a stale one.
    pub fn is_in_timed(&self, activity: ActivityState, end_time: SimTime) -> bool {
        self.alive && self.activity == activity && self.action_end_time == Some(end_time)
    }
}
