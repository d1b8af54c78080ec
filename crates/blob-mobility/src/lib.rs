//! `blob-mobility` — ageing and continuous movement inside a bounded box.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`bounds`]  | `Bounds` — the closed box `[0, L] × [0, W] × [0, H]`               |
//! | [`engine`]  | `MobilityEngine` — per-tick physics step, `PhysicsReport`         |
//!
//! # Movement model (straight-line, clamp-and-stop)
//!
//! 1. Every living agent ages by the tick's sim delta; one that passes its
//!    lifespan dies and does not move this tick.
//! 2. A moving agent advances `direction * walking_speed * delta`.
//! 3. If the target lies outside the box, the agent is placed on the
//!    nearest boundary point, its motion is cancelled, and it goes idle and
//!    undecided.  Any pending end event for the interrupted walk is then
//!    stale and ignored by `blob-schedule`.

pub mod bounds;
pub mod engine;

#[cfg(test)]
mod tests;

pub use bounds::Bounds;
pub use engine::{MobilityEngine, PhysicsReport};
