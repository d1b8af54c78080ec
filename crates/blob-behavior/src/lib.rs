//! `blob-behavior` — how an idle agent chooses what to do next.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`proposal`] | `Proposal` enum (`Walk`, `TimedWalk`, `Rest`)                  |
//! | [`context`]  | `DecisionContext` — read-only world facts for one decision     |
//! | [`model`]    | `DecisionModel` trait                                          |
//! | [`policy`]   | `WeightedRandomPolicy` — the default model                     |
//! | [`noop`]     | `NoopDecision` — never proposes; agents stay idle              |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                           |
//!
//! # Design notes
//!
//! A model only proposes.  `blob-sim` turns each `Proposal` into a start
//! action scheduled at the current time, and the action executors in
//! `blob-schedule` do the state change.  A model never mutates an agent, so
//! `DecisionModel` only needs `&self`.

pub mod context;
pub mod error;
pub mod model;
pub mod noop;
pub mod policy;
pub mod proposal;

#[cfg(test)]
mod tests;

pub use context::DecisionContext;
pub use error::{BehaviorError, BehaviorResult};
pub use model::DecisionModel;
pub use noop::NoopDecision;
pub use policy::WeightedRandomPolicy;
pub use proposal::Proposal;
