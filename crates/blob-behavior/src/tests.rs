//! Unit tests for blob-behavior.

use blob_agent::{Agent, Gender};
use blob_core::{AgentDefaults, AgentId, AgentRng, DayPhase, PolicyConfig, SimTime, Vec3};

use crate::{DecisionContext, DecisionModel, NoopDecision, Proposal, WeightedRandomPolicy};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn make_agent() -> Agent {
    Agent::newborn(AgentId(0), "Xorblob".into(), Gender::Unisex, &AgentDefaults::default(), SimTime::ZERO)
}

fn make_context() -> DecisionContext {
    DecisionContext::new(
        SimTime(1.0),
        DayPhase::Day,
        Vec3::new(50.0, 50.0, 0.0),
        Vec3::new(100.0, 100.0, 5.0),
    )
}

// ── NoopDecision ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod noop_tests {
    use super::*;

    #[test]
    fn never_proposes() {
        let mut rng = AgentRng::new(0, AgentId(0));
        assert_eq!(NoopDecision.propose(&make_agent(), &make_context(), &mut rng), None);
    }
}

// ── WeightedRandomPolicy ──────────────────────────────────────────────────────

#[cfg(test)]
mod policy_tests {
    use super::*;

    #[test]
    fn proposals_respect_duration_ranges() {
        let policy = WeightedRandomPolicy::new(&PolicyConfig::default()).unwrap();
        let agent = make_agent();
        let ctx = make_context();
        let mut rng = AgentRng::new(7, AgentId(0));

        let (mut walks, mut rests) = (0, 0);
        for _ in 0..500 {
            match policy.propose(&agent, &ctx, &mut rng) {
                Some(Proposal::TimedWalk { direction, speed, duration }) => {
                    walks += 1;
                    assert!((2.0..6.0).contains(&duration), "{duration}");
                    assert!((direction.length() - 1.0).abs() < 1e-9);
                    assert_eq!(direction.z, 0.0);
                    assert_eq!(speed, agent.walking_speed);
                }
                Some(Proposal::Rest { duration }) => {
                    rests += 1;
                    assert!((0.1..1.0).contains(&duration), "{duration}");
                }
                other => panic!("unexpected proposal {other:?}"),
            }
        }
        // 1:1 weights: both branches are taken.
        assert!(walks > 150 && rests > 150, "walks={walks} rests={rests}");
    }

    #[test]
    fn zero_rest_weight_only_walks() {
        let cfg = PolicyConfig { rest_weight: 0.0, ..PolicyConfig::default() };
        let policy = WeightedRandomPolicy::new(&cfg).unwrap();
        let mut rng = AgentRng::new(1, AgentId(0));
        for _ in 0..50 {
            let p = policy.propose(&make_agent(), &make_context(), &mut rng).unwrap();
            assert_eq!(p.as_str(), "timed_walk");
        }
    }

    #[test]
    fn all_zero_weights_rejected() {
        let cfg = PolicyConfig { walk_weight: 0.0, rest_weight: 0.0, ..PolicyConfig::default() };
        assert!(WeightedRandomPolicy::new(&cfg).is_err());
    }

    #[test]
    fn inverted_range_rejected() {
        let cfg = PolicyConfig { walk_hours_min: 6.0, walk_hours_max: 2.0, ..PolicyConfig::default() };
        let err = WeightedRandomPolicy::new(&cfg).err().unwrap().to_string();
        assert!(err.contains("walk"), "{err}");
    }

    #[test]
    fn same_agent_seed_same_decisions() {
        let policy = WeightedRandomPolicy::new(&PolicyConfig::default()).unwrap();
        let mut a = AgentRng::new(99, AgentId(3));
        let mut b = AgentRng::new(99, AgentId(3));
        for _ in 0..20 {
            assert_eq!(
                policy.propose(&make_agent(), &make_context(), &mut a),
                policy.propose(&make_agent(), &make_context(), &mut b),
            );
        }
    }
}

// ── Custom DecisionModel ──────────────────────────────────────────────────────

#[cfg(test)]
mod custom_model_tests {
    use super::*;

    /// Always walks east at the agent's speed.
    struct AlwaysEast;

    impl DecisionModel for AlwaysEast {
        fn propose(&self, agent: &Agent, _ctx: &DecisionContext, _rng: &mut AgentRng) -> Option<Proposal> {
            Some(Proposal::Walk { direction: Vec3::new(1.0, 0.0, 0.0), speed: agent.walking_speed })
        }
    }

    #[test]
    fn model_is_object_safe_via_box() {
        let model: Box<dyn DecisionModel> = Box::new(AlwaysEast);
        let mut rng = AgentRng::new(0, AgentId(0));
        let p = model.propose(&make_agent(), &make_context(), &mut rng);
        assert!(matches!(p, Some(Proposal::Walk { speed, .. }) if speed == 5.0));
    }
}
