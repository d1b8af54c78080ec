//! Top-level simulation configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and passed to `blob_sim::WorldBuilder`.  Every field has a
//! default, so a partial file overrides only what it names.  The core never
//! mutates a `SimConfig` after construction; the only runtime switch is the
//! engine's pause flag.

use std::time::Duration;

use crate::{CoreError, CoreResult, TimeScaler, Vec3};

// ── RendererMode ──────────────────────────────────────────────────────────────

/// Where snapshots go.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RendererMode {
    /// No visualization process; snapshots are built but only logged.
    #[default]
    Headless,
    /// Stream length-prefixed JSON frames to a listening viewer over TCP.
    Socket,
}

// ── NetworkConfig ─────────────────────────────────────────────────────────────

/// Connection settings for the snapshot sender.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NetworkConfig {
    /// Viewer host to dial.
    pub host: String,
    /// Viewer port to dial.
    pub port: u16,
    /// Capacity of the outbound snapshot queue.  Oldest frames are dropped
    /// when it is full.
    pub queue_capacity: usize,
    /// How long the sender blocks on an empty queue before re-checking its
    /// shutdown flag.
    pub poll_interval_ms: u64,
    /// Timeout for one connection attempt.
    pub connect_timeout_ms: u64,
    /// Timeout for writing one frame.
    pub write_timeout_ms: u64,
    /// First reconnect delay; doubles per failure up to `retry_max_ms`.
    pub retry_initial_ms: u64,
    pub retry_max_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host:               "localhost".to_owned(),
            port:               5000,
            queue_capacity:     10,
            poll_interval_ms:   100,
            connect_timeout_ms: 1_000,
            write_timeout_ms:   1_000,
            retry_initial_ms:   250,
            retry_max_ms:       5_000,
        }
    }
}

// ── WorldConfig ───────────────────────────────────────────────────────────────

/// A static object placed at world creation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectSpec {
    pub name:     String,
    pub location: Vec3,
}

/// World geometry, calendar, and initial contents.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    pub name:               String,
    /// Extent along X.
    pub length:             f64,
    /// Extent along Y.
    pub width:              f64,
    /// Extent along Z.
    pub height:             f64,
    pub hours_per_day:      u32,
    /// Trailing fraction of each day reported as night.
    pub night_fraction:     f64,
    pub initial_population: usize,
    pub objects:            Vec<ObjectSpec>,
}

impl WorldConfig {
    /// `(length, width, height)` as a vector.
    #[inline]
    pub fn dimensions(&self) -> Vec3 {
        Vec3::new(self.length, self.width, self.height)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name:               "Blobbington".to_owned(),
            length:             100.0,
            width:              100.0,
            height:             5.0,
            hours_per_day:      10,
            night_fraction:     0.3,
            initial_population: 4,
            objects:            Vec::new(),
        }
    }
}

// ── AgentDefaults ─────────────────────────────────────────────────────────────

/// Attributes every newborn agent starts with.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentDefaults {
    /// Age (sim hours) beyond which the agent dies.
    pub lifespan:      f64,
    pub energy:        f64,
    /// World units per sim hour.
    pub walking_speed: f64,
    pub radius:        f64,
    /// Distance at which the agent notices other agents and objects.
    pub visual_range:  f64,
    pub color:         String,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            lifespan:      100_000.0,
            energy:        100.0,
            walking_speed: 5.0,
            radius:        5.0,
            visual_range:  3.0,
            color:         "blue".to_owned(),
        }
    }
}

// ── PolicyConfig ──────────────────────────────────────────────────────────────

/// Weights and duration ranges for the default weighted-random decision policy.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PolicyConfig {
    pub walk_weight:    f64,
    pub rest_weight:    f64,
    /// Timed walk duration range in sim hours, `[min, max)`.
    pub walk_hours_min: f64,
    pub walk_hours_max: f64,
    /// Rest duration range in sim hours, `[min, max)`.
    pub rest_hours_min: f64,
    pub rest_hours_max: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            walk_weight:    1.0,
            rest_weight:    1.0,
            walk_hours_min: 2.0,
            walk_hours_max: 6.0,
            rest_hours_min: 0.1,
            rest_hours_max: 1.0,
        }
    }
}

// ── InteractionConfig ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InteractionConfig {
    /// How long a mutual interaction keeps both participants occupied.
    pub mutual_duration_hours: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self { mutual_duration_hours: 2.0 }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Everything the core needs to build and run a world.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    pub renderer:               RendererMode,
    pub network:                NetworkConfig,

    /// The engine stops once simulation time reaches this many hours.
    pub max_sim_hours:          f64,
    /// Simulated hours per real second.
    pub time_multiplier:        f64,
    /// Cap on the real delta fed into one tick.
    pub max_real_delta_secs:    f64,
    /// Real seconds between two snapshots.
    pub snapshot_interval_secs: f64,
    /// Sleep between ticks so the loop does not spin a core.
    pub tick_sleep_ms:          u64,
    /// Sleep between pause-flag checks while paused.
    pub pause_poll_ms:          u64,
    pub start_paused:           bool,

    /// Master RNG seed.  The same seed and tick deltas reproduce a run.
    pub seed:                   u64,

    pub world:                  WorldConfig,
    pub agent:                  AgentDefaults,
    pub policy:                 PolicyConfig,
    pub interaction:            InteractionConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            renderer:               RendererMode::Headless,
            network:                NetworkConfig::default(),
            max_sim_hours:          10_000.0,
            time_multiplier:        5.0,
            max_real_delta_secs:    0.1,
            snapshot_interval_secs: 0.1,
            tick_sleep_ms:          1,
            pause_poll_ms:          100,
            start_paused:           false,
            seed:                   42,
            world:                  WorldConfig::default(),
            agent:                  AgentDefaults::default(),
            policy:                 PolicyConfig::default(),
            interaction:            InteractionConfig::default(),
        }
    }
}

impl SimConfig {
    /// Build the wall-clock → sim-time converter for this run.
    pub fn time_scaler(&self) -> TimeScaler {
        TimeScaler::new(
            self.time_multiplier,
            Duration::from_secs_f64(self.max_real_delta_secs.max(0.0)),
        )
    }

    /// Real time between snapshots.
    pub fn snapshot_interval(&self) -> Duration {
        Duration::from_secs_f64(self.snapshot_interval_secs.max(0.0))
    }

    /// Reject values the core cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        fn positive(name: &str, v: f64) -> CoreResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CoreError::Config(format!("{name} must be positive, got {v}")))
            }
        }
        fn range(name: &str, min: f64, max: f64) -> CoreResult<()> {
            if min.is_finite() && max.is_finite() && 0.0 <= min && min < max {
                Ok(())
            } else {
                Err(CoreError::Config(format!("{name} range [{min}, {max}) is empty or negative")))
            }
        }

        positive("world.length", self.world.length)?;
        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;
        positive("time_multiplier", self.time_multiplier)?;
        positive("max_real_delta_secs", self.max_real_delta_secs)?;
        positive("max_sim_hours", self.max_sim_hours)?;
        positive("agent.walking_speed", self.agent.walking_speed)?;
        positive("interaction.mutual_duration_hours", self.interaction.mutual_duration_hours)?;

        if self.world.hours_per_day == 0 {
            return Err(CoreError::Config("world.hours_per_day must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.world.night_fraction) {
            return Err(CoreError::Config(format!(
                "world.night_fraction must be in [0, 1], got {}",
                self.world.night_fraction
            )));
        }
        if self.agent.visual_range < 0.0 || self.agent.lifespan < 0.0 {
            return Err(CoreError::Config(
                "agent.visual_range and agent.lifespan must not be negative".into(),
            ));
        }
        if self.network.queue_capacity == 0 {
            return Err(CoreError::Config("network.queue_capacity must be at least 1".into()));
        }

        range("policy.walk_hours", self.policy.walk_hours_min, self.policy.walk_hours_max)?;
        range("policy.rest_hours", self.policy.rest_hours_min, self.policy.rest_hours_max)?;

        let bounds = self.world.dimensions();
        for obj in &self.world.objects {
            if obj.location.clamp(Vec3::ZERO, bounds) != obj.location {
                return Err(CoreError::Config(format!(
                    "object '{}' at {} lies outside the world",
                    obj.name, obj.location
                )));
            }
        }
        Ok(())
    }
}
