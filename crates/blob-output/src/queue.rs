//! `DropOldestQueue` — a bounded hand-off that never blocks the producer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};

/// Default capacity of the engine → sender queue.
pub const DEFAULT_SENDER_CAPACITY: usize = 10;
/// Default capacity of the receiver → consumer queue.
pub const DEFAULT_RECEIVER_CAPACITY: usize = 5;

/// Attempts to make room before giving up on an item.  Only reachable when
/// another producer refills the queue between our pop and our push.
const PUSH_ATTEMPTS: usize = 4;

/// What [`DropOldestQueue::push`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PushOutcome {
    /// There was room.
    Queued,
    /// The oldest buffered item was discarded to make room.
    ReplacedOldest,
    /// The new item was discarded.
    Dropped,
}

/// Bounded multi-producer multi-consumer queue with drop-oldest
/// backpressure, built on a `crossbeam-channel` bounded channel.
///
/// Clones share the same buffer.  Both ends are held by every clone, so the
/// channel never disconnects while a queue handle is alive.
#[derive(Clone, Debug)]
pub struct DropOldestQueue<T> {
    tx:       Sender<T>,
    rx:       Receiver<T>,
    capacity: usize,
    dropped:  Arc<AtomicU64>,
}

impl<T> DropOldestQueue<T> {
    /// A queue holding at most `capacity` items (at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        Self { tx, rx, capacity, dropped: Arc::new(AtomicU64::new(0)) }
    }

    /// Insert `item`, discarding the oldest buffered item if full.  Never
    /// blocks.
    pub fn push(&self, item: T) -> PushOutcome {
        let mut item = item;
        let mut replaced = false;
        for _ in 0..PUSH_ATTEMPTS {
            match self.tx.try_send(item) {
                Ok(()) => {
                    return if replaced { PushOutcome::ReplacedOldest } else { PushOutcome::Queued };
                }
                Err(TrySendError::Full(back)) => {
                    item = back;
                    if self.rx.try_recv().is_ok() {
                        self.dropped.fetch_add(1, Ordering::Relaxed);
                        replaced = true;
                    }
                }
                Err(TrySendError::Disconnected(_)) => break,
            }
        }
        self.dropped.fetch_add(1, Ordering::Relaxed);
        PushOutcome::Dropped
    }

    /// Oldest item, waiting up to `timeout` for one to arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<T> {
        match self.rx.recv_timeout(timeout) {
            Ok(item) => Some(item),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn try_recv(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Remove and return everything buffered, oldest first.
    pub fn drain(&self) -> Vec<T> {
        self.rx.try_iter().collect()
    }

    /// Discard everything buffered.  Returns how many items were removed.
    pub fn clear(&self) -> usize {
        self.rx.try_iter().count()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Items discarded by backpressure since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
