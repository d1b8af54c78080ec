//! The default decision model: a weighted coin between a timed walk and a rest.

use std::ops::Range;

use blob_agent::Agent;
use blob_core::{AgentRng, PolicyConfig};
use rand::distributions::{Distribution, WeightedIndex};
use tracing::debug;

use crate::{BehaviorError, BehaviorResult, DecisionContext, DecisionModel, Proposal};

const WALK: usize = 0;

/// Chooses between a timed walk in a random XY direction and a rest.
///
/// | Choice      | Weight           | Duration (hours)                   |
/// |-------------|------------------|------------------------------------|
/// | timed walk  | `walk_weight`    | uniform in `walk_hours_min..max`   |
/// | rest        | `rest_weight`    | uniform in `rest_hours_min..max`   |
///
/// Walks use the agent's own `walking_speed`.
pub struct WeightedRandomPolicy {
    choice:     WeightedIndex<f64>,
    walk_hours: Range<f64>,
    rest_hours: Range<f64>,
}

impl WeightedRandomPolicy {
    pub fn new(config: &PolicyConfig) -> BehaviorResult<Self> {
        let choice = WeightedIndex::new([config.walk_weight, config.rest_weight])
            .map_err(|e| BehaviorError::InvalidPolicy(format!("walk/rest weights: {e}")))?;

        let walk_hours = checked_range("walk", config.walk_hours_min, config.walk_hours_max)?;
        let rest_hours = checked_range("rest", config.rest_hours_min, config.rest_hours_max)?;

        debug!(
            walk_weight = config.walk_weight,
            rest_weight = config.rest_weight,
            ?walk_hours,
            ?rest_hours,
            "weighted random policy ready"
        );
        Ok(Self { choice, walk_hours, rest_hours })
    }
}

fn checked_range(what: &str, min: f64, max: f64) -> BehaviorResult<Range<f64>> {
    if min.is_finite() && max.is_finite() && 0.0 < max && 0.0 <= min && min < max {
        Ok(min..max)
    } else {
        Err(BehaviorError::InvalidPolicy(format!(
            "{what} duration range [{min}, {max}) is empty or negative"
        )))
    }
}

impl DecisionModel for WeightedRandomPolicy {
    fn propose(
        &self,
        agent: &Agent,
        _ctx:  &DecisionContext,
        rng:   &mut AgentRng,
    ) -> Option<Proposal> {
        if self.choice.sample(rng.inner()) == WALK {
            let direction = rng.heading();
            let duration = rng.uniform(self.walk_hours.clone());
            Some(Proposal::TimedWalk { direction, speed: agent.walking_speed, duration })
        } else {
            let duration = rng.uniform(self.rest_hours.clone());
            Some(Proposal::Rest { duration })
        }
    }
}
