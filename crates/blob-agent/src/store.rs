//! Core agent storage: `AgentStore` (agents, positions, RNGs) and `AgentRngs`.
//!
//! # Why are positions and RNGs separate arrays?
//!
//! The interaction detector wants all positions as one contiguous slice, and
//! the decision phase needs `&mut AgentRng` and `&Agent` for the same agent at
//! once.  Keeping the three as parallel `Vec`s and handing out disjoint field
//! borrows gives both without `RefCell` or cloning:
//!
//! ```ignore
//! let (agent, position, rng) = store.decision_view(id)?;
//! let proposal = model.propose(agent, &ctx, rng);
//! ```

use blob_core::{AgentId, AgentRng, Vec3};

use crate::Agent;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, parallel to the agent arena.
pub struct AgentRngs {
    seed:  u64,
    inner: Vec<AgentRng>,
}

impl AgentRngs {
    pub(crate) fn new(global_seed: u64) -> Self {
        Self { seed: global_seed, inner: Vec::new() }
    }

    fn push(&mut self, agent: AgentId) {
        self.inner.push(AgentRng::new(self.seed, agent));
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut AgentRng> {
        self.inner.get_mut(agent.index())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Index-stable arena of all agents ever born.
///
/// `agents`, `positions` and `rngs` always have the same length.  None of the
/// arrays is exposed as a `Vec`, so no caller can grow one without the others.
pub struct AgentStore {
    agents:    Vec<Agent>,
    positions: Vec<Vec3>,
    rngs:      AgentRngs,
}

impl AgentStore {
    /// An empty store whose per-agent RNGs derive from `global_seed`.
    pub fn new(global_seed: u64) -> Self {
        Self {
            agents:    Vec::new(),
            positions: Vec::new(),
            rngs:      AgentRngs::new(global_seed),
        }
    }

    /// Add one agent at `position`.
    ///
    /// `make` receives the id the agent will have.  This is the only way to
    /// insert into the store.
    pub fn birth(&mut self, position: Vec3, make: impl FnOnce(AgentId) -> Agent) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        let mut agent = make(id);
        debug_assert_eq!(agent.id, id, "birth closure must use the id it was given");
        agent.id = id;

        self.agents.push(agent);
        self.positions.push(position);
        self.rngs.push(id);
        id
    }

    /// Number of agents ever born (dead ones included).
    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Number of agents still alive.
    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.alive).count()
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len() as u32).map(AgentId)
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    #[inline]
    pub fn position(&self, id: AgentId) -> Option<Vec3> {
        self.positions.get(id.index()).copied()
    }

    /// Overwrite one agent's position.  Returns `false` for an unknown id.
    pub fn set_position(&mut self, id: AgentId, position: Vec3) -> bool {
        match self.positions.get_mut(id.index()) {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    /// All agents, indexed by `AgentId::index()`.
    #[inline]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// All positions, indexed by `AgentId::index()`.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Mutable agent and position slices for whole-population passes
    /// (physics).  Slices cannot change length, so the arena stays aligned.
    #[inline]
    pub fn parts_mut(&mut self) -> (&mut [Agent], &mut [Vec3]) {
        (&mut self.agents, &mut self.positions)
    }

    /// Everything a decision model needs for one agent, borrowed disjointly.
    pub fn decision_view(&mut self, id: AgentId) -> Option<(&Agent, Vec3, &mut AgentRng)> {
        let agent = self.agents.get(id.index())?;
        let position = *self.positions.get(id.index())?;
        let rng = self.rngs.get_mut(id)?;
        Some((agent, position, rng))
    }

    pub fn rngs(&self) -> &AgentRngs {
        &self.rngs
    }
}
