//! Unit tests for blob-mobility.

use blob_agent::{ActivityState, Agent, AgentStore, Gender, UndecidedSet};
use blob_core::{AgentDefaults, AgentId, SimTime, Vec3};

use crate::{Bounds, MobilityEngine};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn engine() -> MobilityEngine {
    MobilityEngine::new(Bounds::new(100.0, 100.0, 5.0))
}

/// One agent at `at`, walking `direction` at 5 units/hour.
fn walker(at: Vec3, direction: Vec3) -> AgentStore {
    let mut store = AgentStore::new(0);
    let id = store.birth(at, |id| {
        Agent::newborn(id, "Zorgon".into(), Gender::Male, &AgentDefaults::default(), SimTime::ZERO)
    });
    let a = store.get_mut(id).unwrap();
    a.activity = ActivityState::WalkingTimed;
    a.moving = true;
    a.direction = direction;
    a.action_end_time = Some(SimTime(10.0));
    store
}

#[cfg(test)]
mod bounds {
    use super::*;

    #[test]
    fn closed_box() {
        let b = Bounds::new(100.0, 100.0, 5.0);
        assert!(b.contains(Vec3::ZERO));
        assert!(b.contains(Vec3::new(100.0, 100.0, 5.0)));
        assert!(!b.contains(Vec3::new(100.01, 0.0, 0.0)));
        assert!(!b.contains(Vec3::new(0.0, -0.01, 0.0)));
        assert_eq!(b.clamp(Vec3::new(-4.0, 50.0, 9.0)), Vec3::new(0.0, 50.0, 5.0));
    }
}

#[cfg(test)]
mod physics {
    use super::*;

    #[test]
    fn moving_agent_advances() {
        let mut store = walker(Vec3::new(10.0, 10.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let mut undecided = UndecidedSet::new();

        let report = engine().step(&mut store, &mut undecided, 0.5, SimTime(0.5));

        assert_eq!(report.moved, 1);
        assert_eq!(store.position(AgentId(0)), Some(Vec3::new(12.5, 10.0, 0.0)));
        assert!(undecided.is_empty());
    }

    #[test]
    fn boundary_crossing_clamps_and_stops() {
        let mut store = walker(Vec3::new(99.0, 50.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let mut undecided = UndecidedSet::new();

        let report = engine().step(&mut store, &mut undecided, 0.5, SimTime(0.5));

        assert_eq!(report.clamped, vec![AgentId(0)]);
        assert_eq!(store.position(AgentId(0)), Some(Vec3::new(100.0, 50.0, 0.0)));
        let a = store.get(AgentId(0)).unwrap();
        assert_eq!(a.activity, ActivityState::Idle);
        assert!(!a.moving);
        assert!(a.direction.is_zero());
        assert_eq!(a.action_end_time, None);
        assert!(undecided.contains(AgentId(0)));
    }

    #[test]
    fn clamped_agent_stays_put_next_tick() {
        let mut store = walker(Vec3::new(1.0, 50.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        let mut undecided = UndecidedSet::new();
        let e = engine();

        e.step(&mut store, &mut undecided, 1.0, SimTime(1.0));
        let report = e.step(&mut store, &mut undecided, 1.0, SimTime(2.0));

        assert_eq!(report.moved, 0);
        assert!(report.clamped.is_empty());
        assert_eq!(store.position(AgentId(0)), Some(Vec3::new(0.0, 50.0, 0.0)));
    }

    #[test]
    fn agent_dies_past_lifespan_and_does_not_move() {
        let mut store = walker(Vec3::new(10.0, 10.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        store.get_mut(AgentId(0)).unwrap().lifespan = 1.0;
        let mut undecided = UndecidedSet::new();
        let e = engine();

        let first = e.step(&mut store, &mut undecided, 1.0, SimTime(1.0));
        assert!(first.died.is_empty());
        let second = e.step(&mut store, &mut undecided, 0.1, SimTime(1.1));

        assert_eq!(second.died, vec![AgentId(0)]);
        let a = store.get(AgentId(0)).unwrap();
        assert!(!a.alive);
        assert!(a.age > a.lifespan);
        assert_eq!(a.activity, ActivityState::Dead);
        assert_eq!(store.position(AgentId(0)), Some(Vec3::new(15.0, 10.0, 0.0)));
        assert!(undecided.is_empty());
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        let mut store = walker(Vec3::new(10.0, 10.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let mut undecided = UndecidedSet::new();
        let report = engine().step(&mut store, &mut undecided, 0.0, SimTime::ZERO);
        assert_eq!(report.moved, 0);
        assert_eq!(store.get(AgentId(0)).unwrap().age, 0.0);
    }
}
