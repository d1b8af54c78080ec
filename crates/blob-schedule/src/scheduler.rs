//! `EventScheduler` — the discrete-event priority queue.
//!
//! # Ordering
//!
//! `BinaryHeap` is a max-heap; entries are wrapped in `Reverse` and ordered by
//! `(time, seq)` so the earliest event pops first and events at the same
//! instant pop in the order they were scheduled.  `seq` is a per-scheduler
//! counter that never repeats, so the order is total even for equal times.
//!
//! # Reentrancy
//!
//! [`EventScheduler::process_until`] hands each popped event to a handler
//! together with `&mut EventScheduler`.  Events the handler schedules for a
//! time `<= until` are processed in the same call, after everything already
//! queued for earlier or equal `(time, seq)`.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use blob_core::{AgentId, SimTime};
use tracing::warn;

use crate::Action;

// ── Event ─────────────────────────────────────────────────────────────────────

/// One timed state transition for one agent.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub time:   SimTime,
    pub agent:  AgentId,
    pub action: Action,
}

/// Heap entry: an event plus its insertion sequence number.
struct Entry {
    seq:   u64,
    event: Event,
}

impl Entry {
    #[inline]
    fn key(&self) -> (SimTime, u64) {
        (self.event.time, self.seq)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

// ── EventScheduler ────────────────────────────────────────────────────────────

/// Min-priority queue of future [`Event`]s.
#[derive(Default)]
pub struct EventScheduler {
    heap:     BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` for `agent` at `time`.  O(log n).
    ///
    /// Non-finite times are rejected with a warning; such an event could
    /// never become due.
    pub fn schedule(&mut self, time: SimTime, agent: AgentId, action: Action) {
        if !time.0.is_finite() {
            warn!(agent = %agent, kind = action.kind().as_str(), t = time.0, "dropping event with non-finite time");
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { seq, event: Event { time, agent, action } }));
    }

    /// Pop and hand to `handler`, in `(time, seq)` order, every event with
    /// `time <= until`.
    ///
    /// Stops as soon as the earliest remaining event is later than `until`.
    /// Returns the number of events processed.
    pub fn process_until<F>(&mut self, until: SimTime, mut handler: F) -> usize
    where
        F: FnMut(Event, &mut EventScheduler),
    {
        let mut processed = 0;
        while let Some(event) = self.pop_due(until) {
            handler(event, self);
            processed += 1;
        }
        processed
    }

    fn pop_due(&mut self, until: SimTime) -> Option<Event> {
        if self.peek_time()? > until {
            return None;
        }
        self.heap.pop().map(|Reverse(entry)| entry.event)
    }

    /// Time of the earliest queued event.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|Reverse(entry)| entry.event.time)
    }

    /// Drop every queued event.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
