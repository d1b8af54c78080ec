//! Unit tests for blob-agent.

#[cfg(test)]
mod agent_state {
    use blob_core::{AgentDefaults, AgentId, InteractionId, SimTime, Vec3};

    use crate::{ActivityState, Agent, Gender, InteractionState, UndecidedSet};

    fn newborn() -> Agent {
        let defaults = AgentDefaults { lifespan: 10.0, ..AgentDefaults::default() };
        Agent::newborn(AgentId(0), "Zorgon".into(), Gender::Male, &defaults, SimTime::ZERO)
    }

    #[test]
    fn newborn_is_idle_and_free() {
        let a = newborn();
        assert!(a.alive);
        assert_eq!(a.activity, ActivityState::Idle);
        assert_eq!(a.interaction.state, InteractionState::Free);
        assert!(a.direction.is_zero());
        assert_eq!(a.color, "blue");
    }

    #[test]
    fn dies_only_past_lifespan() {
        let mut a = newborn();
        assert!(!a.age_by(10.0)); // age == lifespan: still alive
        assert!(a.alive);
        assert!(a.age_by(0.01));
        assert!(!a.alive);
        assert_eq!(a.activity, ActivityState::Dead);
        // Death is reported once.
        assert!(!a.age_by(5.0));
    }

    #[test]
    fn go_idle_resets_motion_and_marks_undecided() {
        let mut a = newborn();
        let mut undecided = UndecidedSet::new();
        a.activity = ActivityState::WalkingTimed;
        a.moving = true;
        a.direction = Vec3::new(1.0, 0.0, 0.0);
        a.action_end_time = Some(SimTime(3.0));

        a.go_idle(&mut undecided);

        assert_eq!(a.activity, ActivityState::Idle);
        assert!(!a.moving);
        assert!(a.direction.is_zero());
        assert_eq!(a.action_end_time, None);
        assert!(undecided.contains(AgentId(0)));
    }

    #[test]
    fn dead_agents_never_go_idle() {
        let mut a = newborn();
        let mut undecided = UndecidedSet::new();
        a.age_by(11.0);
        a.go_idle(&mut undecided);
        assert_eq!(a.activity, ActivityState::Dead);
        assert!(undecided.is_empty());
    }

    #[test]
    fn lock_release_rules() {
        let mut a = newborn();
        a.interaction.occupy(InteractionId(4), SimTime(2.0));
        assert!(a.interaction.is_occupied());

        assert!(!a.interaction.release_if_due(SimTime(1.9)));
        assert!(!a.interaction.release_matching(InteractionId(3)));
        assert!(a.interaction.release_if_due(SimTime(2.0)));
        assert_eq!(a.interaction.id, None);
        assert_eq!(a.interaction.state.as_str(), "free");
    }

    #[test]
    fn occupy_reports_the_replaced_lock() {
        let mut a = newborn();
        assert_eq!(a.interaction.occupy(InteractionId(1), SimTime(2.0)), None);
        assert_eq!(a.interaction.occupy(InteractionId(2), SimTime(3.0)), Some(InteractionId(1)));
        assert!(!a.interaction.release_matching(InteractionId(1)));
        assert_eq!(a.interaction.end_time, SimTime(3.0));
    }

    #[test]
    fn timed_activity_match() {
        let mut a = newborn();
        a.activity = ActivityState::Resting;
        a.action_end_time = Some(SimTime(1.5));
        assert!(a.is_in_timed(ActivityState::Resting, SimTime(1.5)));
        assert!(!a.is_in_timed(ActivityState::Resting, SimTime(1.0)));
        assert!(!a.is_in_timed(ActivityState::WalkingTimed, SimTime(1.5)));
    }
}

#[cfg(test)]
mod names {
    use blob_core::SimRng;

    use crate::{Gender, generate_name};

    #[test]
    fn names_come_from_the_gender_tables() {
        let mut rng = SimRng::new(1);
        for _ in 0..50 {
            let name = generate_name(Gender::Female, &mut rng);
            assert!(
                ["Glo", "Fla", "Bli", "Tra", "Ila", "Vra", "Sha", "Nia"]
                    .iter()
                    .any(|p| name.starts_with(p)),
                "{name}"
            );
        }
    }

    #[test]
    fn same_seed_same_names() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        for _ in 0..10 {
            assert_eq!(generate_name(Gender::Unisex, &mut a), generate_name(Gender::Unisex, &mut b));
        }
    }
}

#[cfg(test)]
mod store {
    use blob_core::{AgentDefaults, AgentId, SimTime, Vec3};

    use crate::{Agent, AgentStore, Gender, ObjectStore};

    fn birth(store: &mut AgentStore, at: Vec3) -> AgentId {
        let defaults = AgentDefaults::default();
        store.birth(at, |id| {
            Agent::newborn(id, format!("a{}", id.0), Gender::Unisex, &defaults, SimTime::ZERO)
        })
    }

    #[test]
    fn birth_keeps_arrays_aligned() {
        let mut store = AgentStore::new(42);
        let a = birth(&mut store, Vec3::new(1.0, 2.0, 0.0));
        let b = birth(&mut store, Vec3::new(3.0, 4.0, 0.0));

        assert_eq!((a, b), (AgentId(0), AgentId(1)));
        assert_eq!(store.len(), 2);
        assert_eq!(store.positions().len(), 2);
        assert_eq!(store.rngs().len(), 2);
        assert_eq!(store.get(b).unwrap().name, "a1");
        assert_eq!(store.position(b), Some(Vec3::new(3.0, 4.0, 0.0)));
    }

    #[test]
    fn dead_agents_stay_in_the_arena() {
        let mut store = AgentStore::new(42);
        let a = birth(&mut store, Vec3::ZERO);
        birth(&mut store, Vec3::ZERO);
        store.get_mut(a).unwrap().age_by(1e9);

        assert_eq!(store.len(), 2);
        assert_eq!(store.alive_count(), 1);
        assert!(!store.get(a).unwrap().alive);
    }

    #[test]
    fn unknown_ids_are_none() {
        let mut store = AgentStore::new(42);
        assert!(store.get(AgentId(0)).is_none());
        assert!(store.decision_view(AgentId(0)).is_none());
        assert!(!store.set_position(AgentId(3), Vec3::ZERO));
    }

    #[test]
    fn decision_view_borrows_disjointly() {
        let mut store = AgentStore::new(42);
        let a = birth(&mut store, Vec3::new(5.0, 5.0, 0.0));
        let (agent, position, rng) = store.decision_view(a).unwrap();
        let h = rng.heading();
        assert_eq!(agent.id, a);
        assert_eq!(position, Vec3::new(5.0, 5.0, 0.0));
        assert!((h.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn objects_are_index_stable() {
        let mut objects = ObjectStore::new();
        let rock = objects.add("Rock", Vec3::new(10.0, 10.0, 0.0));
        let tree = objects.add("Tree", Vec3::new(20.0, 5.0, 0.0));
        assert_eq!(objects.get(tree).unwrap().name, "Tree");
        assert_eq!(objects.position(rock), Some(Vec3::new(10.0, 10.0, 0.0)));
        assert_eq!(objects.iter().count(), 2);
    }
}

#[cfg(test)]
mod builder {
    use blob_core::{SimConfig, SimRng, SimTime, Vec3};

    use crate::PopulationBuilder;

    #[test]
    fn builds_undecided_population_inside_the_world() {
        let cfg = SimConfig::default();
        let mut rng = SimRng::new(3);
        let pop = PopulationBuilder::new(&cfg)
            .count(20)
            .object("Rock", Vec3::new(1.0, 1.0, 0.0))
            .build(&mut rng, SimTime::ZERO);

        assert_eq!(pop.agents.len(), 20);
        assert_eq!(pop.undecided.len(), 20);
        assert_eq!(pop.objects.len(), 1);
        for p in pop.agents.positions() {
            assert!((0.0..cfg.world.length).contains(&p.x));
            assert!((0.0..cfg.world.width).contains(&p.y));
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn spawner_extends_an_existing_population() {
        let cfg = SimConfig::default();
        let mut rng = SimRng::new(3);
        let mut pop = PopulationBuilder::new(&cfg).build(&mut rng, SimTime::ZERO);
        let before = pop.agents.len();

        let id = pop.spawner.spawn(&mut pop.agents, &mut pop.undecided, &mut rng, SimTime(5.0));

        assert_eq!(id.index(), before);
        assert!(pop.undecided.contains(id));
        assert_eq!(pop.agents.get(id).unwrap().birth_time, SimTime(5.0));
    }
}
