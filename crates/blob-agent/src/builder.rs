//! Agent creation: `Spawner` (one agent at a time) and `PopulationBuilder`
//! (initial population plus configured objects in one step).
//!
//! # Usage
//!
//! ```rust
//! use blob_agent::PopulationBuilder;
//! use blob_core::{SimConfig, SimRng, SimTime};
//!
//! let cfg = SimConfig::default();
//! let mut rng = SimRng::new(cfg.seed);
//!
//! let population = PopulationBuilder::new(&cfg).build(&mut rng, SimTime::ZERO);
//!
//! assert_eq!(population.agents.len(), cfg.world.initial_population);
//! assert_eq!(population.undecided.len(), cfg.world.initial_population);
//! ```

use blob_core::{AgentDefaults, AgentId, ObjectSpec, SimConfig, SimRng, SimTime, Vec3};
use tracing::info;

use crate::{Agent, AgentStore, Gender, ObjectStore, UndecidedSet, generate_name};

// ── Spawner ───────────────────────────────────────────────────────────────────

/// Creates agents with configured defaults at random positions.
#[derive(Clone, Debug)]
pub struct Spawner {
    defaults: AgentDefaults,
    /// World extent; births land uniformly in `[0, x) × [0, y)` at `z = 0`.
    extent:   Vec3,
}

impl Spawner {
    pub fn new(defaults: AgentDefaults, extent: Vec3) -> Self {
        Self { defaults, extent }
    }

    /// Birth one agent and mark it undecided.
    pub fn spawn(
        &self,
        store: &mut AgentStore,
        undecided: &mut UndecidedSet,
        rng: &mut SimRng,
        now: SimTime,
    ) -> AgentId {
        let position = Vec3::new(
            rng.uniform(0.0..self.extent.x),
            rng.uniform(0.0..self.extent.y),
            0.0,
        );
        let gender = Gender::random(rng);
        let name = generate_name(gender, rng);

        let id = store.birth(position, |id| {
            Agent::newborn(id, name, gender, &self.defaults, now)
        });
        undecided.insert(id);

        if let Some(agent) = store.get(id) {
            info!(
                agent = %id,
                name = %agent.name,
                lifespan = agent.lifespan,
                energy = agent.energy,
                position = %position,
                "agent born"
            );
        }
        id
    }
}

// ── PopulationBuilder ─────────────────────────────────────────────────────────

/// The initial contents of a world.
pub struct Population {
    pub agents:    AgentStore,
    pub objects:   ObjectStore,
    pub undecided: UndecidedSet,
    pub spawner:   Spawner,
}

/// Fluent builder for the initial [`Population`].
pub struct PopulationBuilder {
    count:   usize,
    seed:    u64,
    objects: Vec<ObjectSpec>,
    spawner: Spawner,
}

impl PopulationBuilder {
    /// Start from the population size, seed, agent defaults and objects in
    /// `config`.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            count:   config.world.initial_population,
            seed:    config.seed,
            objects: config.world.objects.clone(),
            spawner: Spawner::new(config.agent.clone(), config.world.dimensions()),
        }
    }

    /// Override the initial agent count.
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Add one object on top of the configured ones.
    pub fn object(mut self, name: impl Into<String>, location: Vec3) -> Self {
        self.objects.push(ObjectSpec { name: name.into(), location });
        self
    }

    /// Birth every agent and place every object.
    ///
    /// Every newborn starts idle and undecided.
    pub fn build(self, rng: &mut SimRng, now: SimTime) -> Population {
        let mut agents = AgentStore::new(self.seed);
        let mut undecided = UndecidedSet::new();
        for _ in 0..self.count {
            self.spawner.spawn(&mut agents, &mut undecided, rng, now);
        }

        let mut objects = ObjectStore::new();
        for spec in self.objects {
            objects.add(spec.name, spec.location);
        }

        Population { agents, objects, undecided, spawner: self.spawner }
    }
}
