//! `SnapshotPublisher` — bridges `SimObserver` snapshots to the sender queue.

use blob_sim::{RunSummary, SimObserver, Snapshot};
use tracing::{debug, trace};

use crate::{DropOldestQueue, PushOutcome, TransportError};

/// A [`SimObserver`] that serializes every snapshot to JSON and pushes it
/// onto a [`DropOldestQueue`] for the [`SnapshotSender`][crate::SnapshotSender].
///
/// Encoding runs on the simulation thread; socket I/O does not.  Errors are
/// stored internally because `SimObserver` methods have no return value;
/// check with [`take_error`][Self::take_error] after the run.
pub struct SnapshotPublisher {
    queue:      DropOldestQueue<Vec<u8>>,
    published:  u64,
    last_error: Option<TransportError>,
}

impl SnapshotPublisher {
    pub fn new(queue: DropOldestQueue<Vec<u8>>) -> Self {
        Self { queue, published: 0, last_error: None }
    }

    /// Snapshots handed to the queue so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn queue(&self) -> &DropOldestQueue<Vec<u8>> {
        &self.queue
    }

    /// Take the stored encoding error (if any).  Only the first is kept.
    pub fn take_error(&mut self) -> Option<TransportError> {
        self.last_error.take()
    }

    /// Encode and enqueue one snapshot.
    pub fn publish(&mut self, snapshot: &Snapshot) -> Result<PushOutcome, TransportError> {
        let bytes = serde_json::to_vec(snapshot)?;
        let outcome = self.queue.push(bytes);
        self.published += 1;
        if outcome != PushOutcome::Queued {
            trace!(outcome = ?outcome, dropped = self.queue.dropped(), "snapshot queue full");
        }
        Ok(outcome)
    }
}

impl SimObserver for SnapshotPublisher {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        if let Err(e) = self.publish(snapshot) {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn on_sim_end(&mut self, summary: &RunSummary) {
        debug!(
            published = self.published,
            dropped = self.queue.dropped(),
            renderer_ticks = summary.renderer_ticks,
            "publisher finished"
        );
    }
}
