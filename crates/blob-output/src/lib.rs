//! `blob-output` — streaming snapshots to out-of-process viewers.
//!
//! ```text
//!  sim thread                sender thread              viewer process
//! ┌────────────────────┐   ┌───────────────────┐      ┌────────────────────┐
//! │ SnapshotPublisher  │──▶│ SnapshotSender    │─TCP─▶│ FrameReceiver      │──▶ DropOldestQueue ──▶ UI
//! │ (JSON encode)      │ Q │ (frame + write)   │      │ (read + decode)    │
//! └────────────────────┘   └───────────────────┘      └────────────────────┘
//! ```
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`frame`]     | 4-byte big-endian length prefix codec, `FrameReader`       |
//! | [`queue`]     | `DropOldestQueue` on a `crossbeam-channel` bounded channel |
//! | [`sender`]    | `SnapshotSender` thread, dial backoff                      |
//! | [`receiver`]  | `FrameReceiver` thread, one client at a time               |
//! | [`publisher`] | `SnapshotPublisher`, the `SimObserver` feeding the sender  |
//! | [`error`]     | `TransportError`, `TransportResult<T>`                     |
//!
//! The queues are the only link between threads.  A full queue discards its
//! oldest item; no producer ever blocks.
//!
//! # Usage
//!
//! ```rust,ignore
//! use blob_output::{DropOldestQueue, SenderConfig, SnapshotPublisher, SnapshotSender};
//!
//! let queue = DropOldestQueue::new(config.network.queue_capacity);
//! let sender = SnapshotSender::spawn(SenderConfig::from(&config.network), queue.clone())?;
//! let mut publisher = SnapshotPublisher::new(queue);
//! engine.run(&mut publisher);
//! sender.shutdown(Duration::from_secs(2));
//! ```

pub mod error;
pub mod frame;
pub mod publisher;
pub mod queue;
pub mod receiver;
pub mod sender;


pub use error::{TransportError, TransportResult};
pub use frame::{DEFAULT_MAX_FRAME_LEN, FrameRead, FrameReader, HEADER_LEN, encode_frame, write_frame};
pub use publisher::SnapshotPublisher;
pub use queue::{DEFAULT_RECEIVER_CAPACITY, DEFAULT_SENDER_CAPACITY, DropOldestQueue, PushOutcome};
pub use receiver::{FrameReceiver, ReceiverConfig, ReceiverStats};
pub use sender::{Backoff, SenderConfig, SenderStats, SnapshotSender};
