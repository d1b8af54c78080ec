//! `blob-core` — foundational types for the blobworld simulation.
//!
//! This crate is a dependency of every other `blob-*` crate.  It intentionally
//! has no `blob-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ObjectId`, `InteractionId`                    |
//! | [`vec3`]        | `Vec3` — positions, directions, world dimensions          |
//! | [`time`]        | `SimTime`, `SimClock`, `DayPhase`, `TimeScaler`           |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)                 |
//! | [`config`]      | `SimConfig` and its sections                              |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load `SimConfig` from a JSON file.             |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vec3;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    AgentDefaults, InteractionConfig, NetworkConfig, ObjectSpec, PolicyConfig, RendererMode,
    SimConfig, WorldConfig,
};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, InteractionId, ObjectId};
pub use rng::{AgentRng, SimRng};
pub use time::{DayPhase, SimClock, SimTime, TimeScaler};
pub use vec3::Vec3;
