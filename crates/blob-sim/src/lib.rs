//! `blob-sim` — the world tick and the real-time engine loop.
//!
//! # One tick
//!
//! ```text
//! World::update(delta):
//!   ① Clock      — advance sim time by delta.
//!   ② Events     — run every scheduled action due at the new time.
//!   ③ Decisions  — each living undecided agent proposes; the proposal is
//!                  scheduled as a start action at `now`, and the scheduler
//!                  runs again so it takes effect this tick.
//!   ④ Physics    — age every living agent, move the moving ones, clamp
//!                  boundary crossings and send them back to undecided.
//!   ⑤ Interact   — detect and process interactions on post-move positions.
//! ```
//!
//! # Engine loop
//!
//! ```text
//! while sim_time < max_sim_hours and running:
//!   paused?  → sleep pause_poll, touch nothing
//!   real     = wall time since last tick
//!   delta    = min(real, max_real_delta) * multiplier
//!   World::update(delta)
//!   every snapshot_interval of real time → Snapshot → observer
//!   sleep tick_sleep
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Forwards to `blob-spatial/parallel`.                     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use blob_behavior::WeightedRandomPolicy;
//! use blob_core::SimConfig;
//! use blob_sim::{Engine, NoopObserver, WorldBuilder};
//! use blob_spatial::LoggingHooks;
//!
//! let config = SimConfig::default();
//! let policy = WeightedRandomPolicy::new(&config.policy)?;
//! let world = WorldBuilder::new(config, policy, LoggingHooks).build()?;
//! let summary = Engine::new(world).run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod snapshot;
pub mod world;


pub use builder::WorldBuilder;
pub use engine::{Engine, EngineControl, RunSummary, StopReason};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use snapshot::{BlobData, SimData, Snapshot, ThingData, WorldData};
pub use world::{TickReport, World};
