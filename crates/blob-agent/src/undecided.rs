//! The set of agents with no current action.
//!
//! Backed by a `BTreeSet` so the decision phase visits agents in ascending id
//! order every tick, which keeps runs with the same seed reproducible.

use std::collections::BTreeSet;

use blob_core::AgentId;

#[derive(Clone, Debug, Default)]
pub struct UndecidedSet {
    inner: BTreeSet<AgentId>,
}

impl UndecidedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the agent was already undecided.
    #[inline]
    pub fn insert(&mut self, agent: AgentId) -> bool {
        self.inner.insert(agent)
    }

    #[inline]
    pub fn remove(&mut self, agent: AgentId) -> bool {
        self.inner.remove(&agent)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        self.inner.contains(&agent)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Copy of the current members in ascending order.  The decision phase
    /// iterates this copy while removing decided agents from the set.
    pub fn to_vec(&self) -> Vec<AgentId> {
        self.inner.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.inner.iter().copied()
    }
}
