//! Engine observer trait for progress reporting and snapshot delivery.

use crate::{RunSummary, Snapshot, TickReport};

/// Callbacks invoked by [`Engine`][crate::Engine] at key points in the loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Callbacks run on the simulation
/// thread; an observer that does I/O should hand the work to another thread.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { every: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: u64, report: &TickReport) {
///         if tick % self.every == 0 {
///             println!("tick {tick}: t = {:.2}h", report.now.0);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before each tick's world update.  `tick` is 1-based.
    fn on_tick_start(&mut self, _tick: u64) {}

    /// Called after each tick's world update.
    fn on_tick_end(&mut self, _tick: u64, _report: &TickReport) {}

    /// Called every `snapshot_interval_secs` of real time.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called once when the loop exits.
    fn on_sim_end(&mut self, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
