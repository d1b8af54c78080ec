//! The real-time engine loop: wall clock → sim time, pause, snapshots.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use blob_behavior::DecisionModel;
use blob_core::{SimTime, TimeScaler};
use blob_spatial::InteractionHooks;
use tracing::{debug, info};

use crate::{SimData, SimObserver, Snapshot, TickReport, World};

// ── EngineControl ─────────────────────────────────────────────────────────────

/// Cloneable pause / stop switch shared between the engine and its
/// controllers (a signal handler, a UI thread, a test).
#[derive(Clone, Debug)]
pub struct EngineControl {
    paused:  Arc<AtomicBool>,
    running: Arc<AtomicBool>,
}

impl EngineControl {
    pub fn new(start_paused: bool) -> Self {
        Self {
            paused:  Arc::new(AtomicBool::new(start_paused)),
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Flip the pause flag; returns the new state.
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Ask the loop to exit after the current tick.  Also ends a pause.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

// ── RunSummary ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Sim time reached `max_sim_hours`.
    MaxSimHours,
    /// [`EngineControl::stop`] was called.
    Stopped,
}

/// How a [`Engine::run`] ended.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub reason:         StopReason,
    pub sim_time:       SimTime,
    pub sim_ticks:      u64,
    pub renderer_ticks: u64,
    pub alive:          usize,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Drives a [`World`] in real time.
///
/// Each tick converts the elapsed wall time to a sim delta (capped at
/// `max_real_delta_secs`, then scaled by `time_multiplier`), updates the
/// world, and every `snapshot_interval_secs` of real time hands a
/// [`Snapshot`] to the observer.  The loop never blocks on I/O.
pub struct Engine<D: DecisionModel, H: InteractionHooks> {
    pub world: World<D, H>,

    scaler:            TimeScaler,
    control:           EngineControl,
    max_sim_hours:     f64,
    snapshot_interval: Duration,
    tick_sleep:        Duration,
    pause_poll:        Duration,

    sim_ticks:         u64,
    renderer_ticks:    u64,
    starting_realtime: f64,
    current_realtime:  f64,
    /// Real time since the last snapshot.
    since_snapshot:    Duration,
}

impl<D: DecisionModel, H: InteractionHooks> Engine<D, H> {
    /// Wrap `world`, taking timing parameters from `world.config`.
    pub fn new(world: World<D, H>) -> Self {
        let config = &world.config;
        let snapshot_interval = config.snapshot_interval();
        let started = unix_now();
        Self {
            scaler: config.time_scaler(),
            control: EngineControl::new(config.start_paused),
            max_sim_hours: config.max_sim_hours,
            snapshot_interval,
            tick_sleep: Duration::from_millis(config.tick_sleep_ms),
            pause_poll: Duration::from_millis(config.pause_poll_ms.max(1)),
            sim_ticks: 0,
            renderer_ticks: 0,
            starting_realtime: started,
            current_realtime: started,
            // The first tick always produces a snapshot.
            since_snapshot: snapshot_interval,
            world,
        }
    }

    /// A handle that pauses, resumes or stops this engine from elsewhere.
    pub fn control(&self) -> EngineControl {
        self.control.clone()
    }

    #[inline]
    pub fn sim_ticks(&self) -> u64 {
        self.sim_ticks
    }

    #[inline]
    pub fn renderer_ticks(&self) -> u64 {
        self.renderer_ticks
    }

    /// Whether sim time has reached `max_sim_hours`.
    pub fn is_finished(&self) -> bool {
        self.world.now().0 >= self.max_sim_hours
    }

    // ── Loop ──────────────────────────────────────────────────────────────

    /// Run until `max_sim_hours` is reached or the engine is stopped.
    ///
    /// While paused nothing in the world changes; on resume the wall clock
    /// is re-based so the paused span is not fed into the next tick.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> RunSummary {
        info!(
            max_sim_hours = self.max_sim_hours,
            multiplier = self.scaler.multiplier,
            max_sim_delta = self.scaler.max_sim_delta(),
            agents = self.world.agents.len(),
            paused = self.control.is_paused(),
            "engine started"
        );

        let mut last = Instant::now();
        let reason = loop {
            if self.is_finished() {
                break StopReason::MaxSimHours;
            }
            if !self.control.is_running() {
                break StopReason::Stopped;
            }
            if self.control.is_paused() {
                self.wait_while_paused();
                last = Instant::now();
                continue;
            }

            let now = Instant::now();
            let real_delta = now.duration_since(last);
            last = now;
            self.step(real_delta, observer);

            if !self.tick_sleep.is_zero() {
                thread::sleep(self.tick_sleep);
            }
        };

        let summary = self.summary(reason);
        info!(
            reason = ?summary.reason,
            sim_time = summary.sim_time.0,
            sim_ticks = summary.sim_ticks,
            renderer_ticks = summary.renderer_ticks,
            alive = summary.alive,
            "engine stopped"
        );
        observer.on_sim_end(&summary);
        summary
    }

    /// One tick fed with `real_delta` of wall time.
    pub fn step<O: SimObserver>(&mut self, real_delta: Duration, observer: &mut O) -> TickReport {
        self.sim_ticks += 1;
        self.current_realtime = unix_now();
        observer.on_tick_start(self.sim_ticks);

        let delta = self.scaler.sim_delta(real_delta);
        let report = self.world.update(delta);
        observer.on_tick_end(self.sim_ticks, &report);

        self.since_snapshot += real_delta;
        if self.since_snapshot >= self.snapshot_interval {
            self.since_snapshot = Duration::ZERO;
            self.renderer_ticks += 1;
            let snapshot = self.snapshot();
            observer.on_snapshot(&snapshot);
        }
        report
    }

    /// Snapshot of the world stamped with the engine counters.
    pub fn snapshot(&self) -> Snapshot {
        self.world.snapshot(SimData {
            starting_realtime: self.starting_realtime,
            current_realtime:  self.current_realtime,
            sim_ticks:         self.sim_ticks,
            renderer_ticks:    self.renderer_ticks,
        })
    }

    fn wait_while_paused(&self) {
        info!(t = self.world.now().0, "engine paused");
        while self.control.is_paused() && self.control.is_running() {
            thread::sleep(self.pause_poll);
        }
        if self.control.is_running() {
            info!(t = self.world.now().0, "engine resumed");
        } else {
            debug!("stopped while paused");
        }
    }

    fn summary(&self, reason: StopReason) -> RunSummary {
        RunSummary {
            reason,
            sim_time:       self.world.now(),
            sim_ticks:      self.sim_ticks,
            renderer_ticks: self.renderer_ticks,
            alive:          self.world.agents.alive_count(),
        }
    }
}

/// Seconds since the Unix epoch; `0.0` if the system clock is before it.
fn unix_now() -> f64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs_f64()).unwrap_or(0.0)
}
