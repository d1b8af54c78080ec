//! `blob-spatial` — who can see whom, and what happens when they do.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`distance`]    | `DistanceMatrix` (agent×agent, agent×object)              |
//! | [`interaction`] | `Interaction`, `InteractionKind`, `Participants`          |
//! | [`hooks`]       | `InteractionHooks` trait, `LoggingHooks`                  |
//! | [`detector`]    | `InteractionDetector`, `InteractionTally`                 |
//! | [`error`]       | `InteractionError`, `InteractionResult<T>`                |
//!
//! # Classification
//!
//! For every pair `a < b` of living agents at distance `d`, skipping pairs
//! where both are already occupied:
//!
//! | `d <= a.range` | `d <= b.range` | Result                        |
//! |----------------|----------------|-------------------------------|
//! | yes            | yes            | mutual                        |
//! | yes            | no             | one-sided, `a` observes `b`   |
//! | no             | yes            | one-sided, `b` observes `a`   |
//! | no             | no             | nothing                       |
//!
//! Agent–object pairs use the agent's range only and ignore its lock.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Distance-matrix rows are computed with Rayon.            |

pub mod detector;
pub mod distance;
pub mod error;
pub mod hooks;
pub mod interaction;

#[cfg(test)]
mod tests;

pub use detector::{InteractionDetector, InteractionTally};
pub use distance::DistanceMatrix;
pub use error::{InteractionError, InteractionResult};
pub use hooks::{InteractionHooks, LoggingHooks};
pub use interaction::{Interaction, InteractionKind, Participants};
