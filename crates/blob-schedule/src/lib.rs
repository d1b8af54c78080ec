//! `blob-schedule` — timed agent actions and the event scheduler.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`action`]     | `Action` closed enum, `ActionKind`, executors              |
//! | [`scheduler`]  | `Event`, `EventScheduler` (`BinaryHeap` min-ordered)       |
//! | [`dispatch`]   | `dispatch_until`: run due events against the agent store   |
//! | [`error`]      | `ActionError`, `ActionResult<T>`                           |
//!
//! # Event model (summary)
//!
//! An event is `(time, agent, action)`.  Events are processed in ascending
//! time order, ties in insertion order, each exactly once.  A start action
//! schedules its own end event, so one decision becomes two events:
//!
//! ```text
//! t0        StartRest { duration: 0.5, start_time: t0 }
//!             └─ schedules ─▶ t0 + 0.5   EndRest
//! ```
//!
//! An end event only applies if the agent is still in the activity that
//! scheduled it; otherwise it is stale and ignored.

pub mod action;
pub mod dispatch;
pub mod error;
pub mod scheduler;


pub use action::{Action, ActionContext, ActionKind, ActionOutcome};
pub use dispatch::{DispatchTally, dispatch_until};
pub use error::{ActionError, ActionResult};
pub use scheduler::{Event, EventScheduler};
