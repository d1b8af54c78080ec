//! Unit tests for blob-spatial.

use std::sync::Mutex;

use blob_agent::{Agent, AgentStore, Gender, ObjectStore, WorldObject};
use blob_core::{AgentDefaults, AgentId, SimTime, Vec3};

use crate::{Interaction, InteractionError, InteractionHooks, InteractionResult};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Agents at the given XY positions, each with the given visual range.
fn make_store(agents: &[((f64, f64), f64)]) -> AgentStore {
    let mut store = AgentStore::new(0);
    for &((x, y), range) in agents {
        let defaults = AgentDefaults { visual_range: range, ..AgentDefaults::default() };
        store.birth(Vec3::new(x, y, 0.0), |id| {
            Agent::newborn(id, format!("agent{}", id.0), Gender::Unisex, &defaults, SimTime::ZERO)
        });
    }
    store
}

/// Records which hooks ran.
#[derive(Default)]
struct RecordingHooks {
    calls: Mutex<Vec<String>>,
}

impl RecordingHooks {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl InteractionHooks for RecordingHooks {
    fn on_mutual(&self, _: &Interaction, a: &Agent, b: &Agent, _: SimTime) -> InteractionResult<()> {
        self.calls.lock().unwrap().push(format!("mutual {} {}", a.id.0, b.id.0));
        Ok(())
    }
    fn on_one_sided(&self, _: &Interaction, o: &Agent, t: &Agent) -> InteractionResult<()> {
        self.calls.lock().unwrap().push(format!("one_sided {} {}", o.id.0, t.id.0));
        Ok(())
    }
    fn on_agent_object(&self, _: &Interaction, a: &Agent, o: &WorldObject) -> InteractionResult<()> {
        self.calls.lock().unwrap().push(format!("object {} {}", a.id.0, o.name));
        Ok(())
    }
}

/// One-sided hook always fails.
struct FailingHooks;

impl InteractionHooks for FailingHooks {
    fn on_one_sided(&self, i: &Interaction, _: &Agent, _: &Agent) -> InteractionResult<()> {
        Err(InteractionError::Hook { interaction: i.id, reason: "boom".into() })
    }
}

#[cfg(test)]
mod distance {
    use super::*;
    use crate::DistanceMatrix;

    #[test]
    fn pairwise_is_symmetric_with_zero_diagonal() {
        let pts = [Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0), Vec3::new(0.0, 0.0, 2.0)];
        let d = DistanceMatrix::pairwise(&pts);
        assert_eq!((d.rows(), d.cols()), (3, 3));
        for i in 0..3 {
            assert_eq!(d.get(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(d.get(i, j), d.get(j, i));
            }
        }
        assert!((d.get(0, 1) - 5.0).abs() < 1e-12);
        assert!((d.get(0, 2) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn cross_shape_and_rows() {
        let agents = [Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)];
        let things = [Vec3::new(1.0, 0.0, 0.0)];
        let d = DistanceMatrix::cross(&agents, &things);
        assert_eq!((d.rows(), d.cols()), (2, 1));
        assert_eq!(d.row(1), &[9.0]);
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(DistanceMatrix::pairwise(&[]).rows(), 0);
        assert_eq!(DistanceMatrix::cross(&[Vec3::ZERO], &[]).cols(), 0);
    }
}

#[cfg(test)]
mod detection {
    use super::*;
    use crate::{InteractionDetector, InteractionKind, Participants};

    #[test]
    fn classifies_mutual_one_sided_and_none() {
        // 0 and 1 are 2 apart: both see each other (range 3).
        // 2 is 5 from 1 and 7 from 0; only 2 (range 6) sees 1.
        let store = make_store(&[((0.0, 0.0), 3.0), ((2.0, 0.0), 3.0), ((7.0, 0.0), 6.0)]);
        let mut det = InteractionDetector::new(2.0);

        let found = det.detect(&store, &ObjectStore::new());

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, InteractionKind::Mutual);
        assert_eq!(found[0].participants, Participants::Agents(AgentId(0), AgentId(1)));
        assert_eq!(found[1].kind, InteractionKind::OneSided);
        // Observer first.
        assert_eq!(found[1].participants, Participants::Agents(AgentId(2), AgentId(1)));
    }

    #[test]
    fn range_is_inclusive() {
        let store = make_store(&[((0.0, 0.0), 3.0), ((3.0, 0.0), 3.0)]);
        let found = InteractionDetector::new(2.0).detect(&store, &ObjectStore::new());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, InteractionKind::Mutual);
    }

    #[test]
    fn skips_dead_and_doubly_occupied_pairs() {
        let mut store = make_store(&[((0.0, 0.0), 3.0), ((1.0, 0.0), 3.0), ((0.0, 1.0), 3.0)]);
        store.get_mut(AgentId(2)).unwrap().age_by(1e9);
        for a in [AgentId(0), AgentId(1)] {
            store.get_mut(a).unwrap().interaction.occupy(blob_core::InteractionId(99), SimTime(5.0));
        }
        let found = InteractionDetector::new(2.0).detect(&store, &ObjectStore::new());
        assert!(found.is_empty());
    }

    #[test]
    fn one_occupied_agent_can_still_interact() {
        let mut store = make_store(&[((0.0, 0.0), 3.0), ((1.0, 0.0), 3.0)]);
        store.get_mut(AgentId(0)).unwrap().interaction.occupy(blob_core::InteractionId(99), SimTime(5.0));
        let found = InteractionDetector::new(2.0).detect(&store, &ObjectStore::new());
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn objects_use_agent_range_and_ignore_locks() {
        let mut store = make_store(&[((0.0, 0.0), 3.0), ((50.0, 50.0), 3.0)]);
        store.get_mut(AgentId(0)).unwrap().interaction.occupy(blob_core::InteractionId(1), SimTime(5.0));
        let mut objects = ObjectStore::new();
        objects.add("Rock", Vec3::new(2.0, 2.0, 0.0));

        let found = InteractionDetector::new(2.0).detect(&store, &objects);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, InteractionKind::AgentObject);
        assert_eq!(found[0].participants, Participants::AgentObject(AgentId(0), blob_core::ObjectId(0)));
    }

    #[test]
    fn ids_increase_across_passes() {
        let store = make_store(&[((0.0, 0.0), 3.0), ((1.0, 0.0), 3.0)]);
        let mut det = InteractionDetector::new(2.0);
        let first = det.detect(&store, &ObjectStore::new());
        let second = det.detect(&store, &ObjectStore::new());
        assert!(second[0].id > first[0].id);
    }
}

#[cfg(test)]
mod processing {
    use blob_agent::InteractionState;
    use blob_schedule::{Action, EventScheduler};

    use super::*;
    use crate::InteractionDetector;

    #[test]
    fn mutual_occupies_both_and_schedules_release() {
        let mut store = make_store(&[((0.0, 0.0), 3.0), ((1.0, 0.0), 3.0)]);
        let mut sched = EventScheduler::new();
        let hooks = RecordingHooks::default();
        let mut det = InteractionDetector::new(2.0);

        let tally = det.run(&mut store, &ObjectStore::new(), &mut sched, &hooks, SimTime(1.0));

        assert_eq!(tally.mutual, 1);
        for a in [AgentId(0), AgentId(1)] {
            let lock = store.get(a).unwrap().interaction;
            assert_eq!(lock.state, InteractionState::Occupied);
            assert_eq!(lock.end_time, SimTime(3.0));
        }
        assert_eq!(sched.len(), 1);
        assert_eq!(sched.peek_time(), Some(SimTime(3.0)));
        let mut events = Vec::new();
        sched.process_until(SimTime(3.0), |e, _| events.push(e));
        assert!(matches!(
            &events[0].action,
            Action::EndInteraction { participants, .. } if participants == &vec![AgentId(0), AgentId(1)]
        ));
        assert_eq!(hooks.calls(), vec!["mutual 0 1".to_string()]);
    }

    #[test]
    fn locked_pair_is_not_redetected_until_expiry() {
        let mut store = make_store(&[((0.0, 0.0), 3.0), ((1.0, 0.0), 3.0)]);
        let mut sched = EventScheduler::new();
        let mut det = InteractionDetector::new(2.0);
        let objects = ObjectStore::new();

        det.run(&mut store, &objects, &mut sched, &crate::LoggingHooks, SimTime(0.0));
        let during = det.run(&mut store, &objects, &mut sched, &crate::LoggingHooks, SimTime(1.0));
        assert_eq!(during.total(), 0);

        let after = det.run(&mut store, &objects, &mut sched, &crate::LoggingHooks, SimTime(2.0));
        assert_eq!(after.released, 2);
        assert_eq!(after.mutual, 1);
    }

    #[test]
    fn one_sided_and_object_fire_hooks_without_state_change() {
        let mut store = make_store(&[((0.0, 0.0), 6.0), ((5.0, 0.0), 1.0)]);
        let mut objects = ObjectStore::new();
        objects.add("Tree", Vec3::new(0.0, 1.0, 0.0));
        let mut sched = EventScheduler::new();
        let hooks = RecordingHooks::default();

        let tally = InteractionDetector::new(2.0).run(&mut store, &objects, &mut sched, &hooks, SimTime(0.0));

        assert_eq!((tally.one_sided, tally.agent_object), (1, 1));
        assert_eq!(hooks.calls(), vec!["one_sided 0 1".to_string(), "object 0 Tree".to_string()]);
        assert!(sched.is_empty());
        assert!(!store.get(AgentId(0)).unwrap().interaction.is_occupied());
    }

    #[test]
    fn processing_twice_is_a_no_op() {
        let mut store = make_store(&[((0.0, 0.0), 3.0), ((1.0, 0.0), 3.0)]);
        let objects = ObjectStore::new();
        let mut sched = EventScheduler::new();
        let hooks = RecordingHooks::default();
        let mut det = InteractionDetector::new(2.0);

        let mut found = det.detect(&store, &objects);
        let i = &mut found[0];
        det.process(i, &mut store, &objects, &mut sched, &hooks, SimTime(0.0)).unwrap();
        det.process(i, &mut store, &objects, &mut sched, &hooks, SimTime(0.0)).unwrap();

        assert!(i.processed);
        assert_eq!(sched.len(), 1);
        assert_eq!(hooks.calls().len(), 1);
    }

    #[test]
    fn mutual_overrides_a_held_lock_and_strands_its_release() {
        let mut store = make_store(&[((0.0, 0.0), 3.0), ((1.0, 0.0), 3.0)]);
        let old = blob_core::InteractionId(99);
        store.get_mut(AgentId(0)).unwrap().interaction.occupy(old, SimTime(5.0));
        let mut sched = EventScheduler::new();

        let tally = InteractionDetector::new(2.0).run(&mut store, &ObjectStore::new(), &mut sched, &crate::LoggingHooks, SimTime(1.0));

        assert_eq!(tally.mutual, 1);
        let lock = store.get(AgentId(0)).unwrap().interaction;
        assert_ne!(lock.id, Some(old));
        assert_eq!(lock.end_time, SimTime(3.0));
        assert_eq!(lock.id, store.get(AgentId(1)).unwrap().interaction.id);
        // The release for the replaced lock can no longer free the agent.
        assert!(!store.get_mut(AgentId(0)).unwrap().interaction.release_matching(old));
    }

    #[test]
    fn hook_failure_is_counted_not_fatal() {
        let mut store = make_store(&[((0.0, 0.0), 6.0), ((5.0, 0.0), 1.0), ((0.0, 1.0), 3.0)]);
        let mut sched = EventScheduler::new();

        let tally = InteractionDetector::new(2.0).run(&mut store, &ObjectStore::new(), &mut sched, &FailingHooks, SimTime(0.0));

        // 0→1 one-sided fails, 2→1 is out of range; 0↔2 mutual still succeeds.
        assert_eq!(tally.failed, 1);
        assert_eq!(tally.mutual, 1);
    }
}
