//! `blob-agent` — agent state and index-stable storage for blobworld.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`agent`]       | `Agent`, `ActivityState`, `InteractionLock`               |
//! | [`names`]       | `Gender`, syllable-based name generation                  |
//! | [`store`]       | `AgentStore` (agents + positions + RNGs), `AgentRngs`     |
//! | [`object`]      | `WorldObject`, `ObjectStore`                              |
//! | [`undecided`]   | `UndecidedSet`: agents waiting for a decision             |
//! | [`builder`]     | `Spawner`, `PopulationBuilder`                            |
//!
//! # Arena invariant
//!
//! `AgentId(i)` indexes `agents[i]`, `positions[i]` and `rngs[i]`.  The
//! arrays only grow, and only through [`AgentStore::birth`], which pushes to
//! all three at once.  Death is a flag; nothing is ever removed, so an id is
//! valid for the lifetime of the store.

pub mod agent;
pub mod builder;
pub mod names;
pub mod object;
pub mod store;
pub mod undecided;

#[cfg(test)]
mod tests;

pub use agent::{ActivityState, Agent, InteractionLock, InteractionState};
pub use builder::{Population, PopulationBuilder, Spawner};
pub use names::{Gender, generate_name};
pub use object::{ObjectStore, WorldObject};
pub use store::{AgentRngs, AgentStore};
pub use undecided::UndecidedSet;
