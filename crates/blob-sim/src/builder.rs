//! Fluent builder for constructing a [`World`].

use blob_agent::PopulationBuilder;
use blob_behavior::DecisionModel;
use blob_core::{AgentId, SimClock, SimConfig, SimRng, SimTime, Vec3};
use blob_mobility::{Bounds, MobilityEngine};
use blob_schedule::EventScheduler;
use blob_spatial::{InteractionDetector, InteractionHooks};
use tracing::info;

use crate::{SimError, SimResult, World};

/// Fluent builder for [`World<D, H>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — world size, population, seed, agent defaults, …
/// - `D: DecisionModel` — how idle agents pick their next action
/// - `H: InteractionHooks` — reactions to detected interactions
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                  |
/// |--------------------------|------------------------------------------|
/// | `.population(n)`         | `config.world.initial_population`        |
/// | `.object(name, loc)`     | only `config.world.objects`              |
/// | `.initial_positions(v)`  | uniform random XY at `z = 0`             |
///
/// # Example
///
/// ```rust,ignore
/// let mut world = WorldBuilder::new(config, NoopDecision, LoggingHooks)
///     .population(2)
///     .initial_positions(vec![Vec3::new(10.0, 10.0, 0.0), Vec3::new(11.0, 10.0, 0.0)])
///     .build()?;
/// world.update(0.5);
/// ```
pub struct WorldBuilder<D: DecisionModel, H: InteractionHooks> {
    config:     SimConfig,
    model:      D,
    hooks:      H,
    population: Option<usize>,
    objects:    Vec<(String, Vec3)>,
    positions:  Option<Vec<Vec3>>,
}

impl<D: DecisionModel, H: InteractionHooks> WorldBuilder<D, H> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, model: D, hooks: H) -> Self {
        Self { config, model, hooks, population: None, objects: Vec::new(), positions: None }
    }

    /// Override the initial agent count.
    pub fn population(mut self, count: usize) -> Self {
        self.population = Some(count);
        self
    }

    /// Place one extra object on top of the configured ones.
    pub fn object(mut self, name: impl Into<String>, location: Vec3) -> Self {
        self.objects.push((name.into(), location));
        self
    }

    /// Supply the starting position of every initial agent (must be length
    /// of the initial population, and inside the world).
    pub fn initial_positions(mut self, positions: Vec<Vec3>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Validate inputs, birth the initial population and return a
    /// ready-to-run [`World`].
    pub fn build(self) -> SimResult<World<D, H>> {
        self.config.validate()?;
        let bounds = Bounds::from(self.config.world.dimensions());

        // ── Population ────────────────────────────────────────────────────
        let mut rng = SimRng::new(self.config.seed);
        let mut builder = PopulationBuilder::new(&self.config);
        if let Some(n) = self.population {
            builder = builder.count(n);
        }
        for (name, location) in self.objects {
            builder = builder.object(name, location);
        }
        let mut population = builder.build(&mut rng, SimTime::ZERO);

        // ── Optional fixed positions ──────────────────────────────────────
        if let Some(positions) = self.positions {
            let expected = population.agents.len();
            if positions.len() != expected {
                return Err(SimError::AgentCountMismatch {
                    expected,
                    got:  positions.len(),
                    what: "initial positions",
                });
            }
            for (i, position) in positions.into_iter().enumerate() {
                if !bounds.contains(position) {
                    return Err(SimError::Config(format!(
                        "initial position {position} of agent {i} lies outside the world"
                    )));
                }
                let id = AgentId::try_from(i).map_err(|e| SimError::Config(e.to_string()))?;
                population.agents.set_position(id, position);
            }
        }

        let world = &self.config.world;
        info!(
            name = %world.name,
            length = world.length,
            width = world.width,
            height = world.height,
            agents = population.agents.len(),
            objects = population.objects.len(),
            "world created"
        );

        Ok(World {
            clock:     SimClock::new(world.hours_per_day, world.night_fraction),
            detector:  InteractionDetector::new(self.config.interaction.mutual_duration_hours),
            mobility:  MobilityEngine::new(bounds),
            agents:    population.agents,
            objects:   population.objects,
            undecided: population.undecided,
            scheduler: EventScheduler::new(),
            model:     self.model,
            hooks:     self.hooks,
            rng,
            spawner:   population.spawner,
            config:    self.config,
        })
    }
}
