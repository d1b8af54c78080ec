//! The per-tick physics step.

use blob_agent::{AgentStore, UndecidedSet};
use blob_core::{AgentId, SimTime};
use tracing::debug;

use crate::Bounds;

/// What one [`MobilityEngine::step`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhysicsReport {
    /// Agents that moved freely.
    pub moved:   usize,
    /// Agents stopped at the boundary this tick.
    pub clamped: Vec<AgentId>,
    /// Agents that died this tick.
    pub died:    Vec<AgentId>,
}

/// Applies ageing and straight-line motion to every agent.
#[derive(Clone, Debug)]
pub struct MobilityEngine {
    pub bounds: Bounds,
}

impl MobilityEngine {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }

    /// Advance every living agent by `delta_hours`.
    ///
    /// `now` is only used for logging.
    pub fn step(
        &self,
        agents: &mut AgentStore,
        undecided: &mut UndecidedSet,
        delta_hours: f64,
        now: SimTime,
    ) -> PhysicsReport {
        let mut report = PhysicsReport::default();
        if delta_hours <= 0.0 {
            return report;
        }

        let (agents, positions) = agents.parts_mut();
        for (agent, position) in agents.iter_mut().zip(positions.iter_mut()) {
            if !agent.alive {
                continue;
            }
            if agent.age_by(delta_hours) {
                debug!(agent = %agent.id, t = now.0, age = agent.age, lifespan = agent.lifespan, "agent died");
                report.died.push(agent.id);
                continue;
            }
            if !agent.moving {
                continue;
            }

            let target = *position + agent.direction * (agent.walking_speed * delta_hours);
            if self.bounds.contains(target) {
                *position = target;
                report.moved += 1;
            } else {
                *position = self.bounds.clamp(target);
                agent.go_idle(undecided);
                debug!(agent = %agent.id, t = now.0, %target, stopped_at = %position, "hit world boundary");
                report.clamped.push(agent.id);
            }
        }
        report
    }
}
