//! blobworld — run the blob simulation in real time.
//!
//! With `--renderer socket` snapshots are streamed to a viewer listening on
//! `--host`/`--port` (see `blobworld-viewer`).  Type `p` + Enter to toggle
//! pause, `q` + Enter to stop.

use std::io::{self, BufRead};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use blob_behavior::WeightedRandomPolicy;
use blob_core::RendererMode;
use blob_output::{DropOldestQueue, SenderConfig, SnapshotPublisher, SnapshotSender};
use blob_sim::{Engine, EngineControl, RunSummary, SimObserver, Snapshot, TickReport, WorldBuilder};
use blob_spatial::LoggingHooks;
use blobworld::config::{Args, load_config};

const SENDER_JOIN_DEADLINE: Duration = Duration::from_secs(2);

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs one line per simulated day and forwards snapshots to the publisher
/// when streaming.
struct ProgressObserver {
    hours_per_day: f64,
    last_day:      u64,
    publisher:     Option<SnapshotPublisher>,
}

impl ProgressObserver {
    fn new(hours_per_day: u32, publisher: Option<SnapshotPublisher>) -> Self {
        Self { hours_per_day: hours_per_day.max(1) as f64, last_day: 1, publisher }
    }
}

impl SimObserver for ProgressObserver {
    fn on_tick_end(&mut self, tick: u64, report: &TickReport) {
        let day = (report.now.0 / self.hours_per_day).floor() as u64 + 1;
        if day > self.last_day {
            self.last_day = day;
            info!(day, tick, t = report.now.0, died = report.physics.died.len(), "new day");
        }
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        if let Some(publisher) = self.publisher.as_mut() {
            publisher.on_snapshot(snapshot);
        }
    }

    fn on_sim_end(&mut self, summary: &RunSummary) {
        if let Some(publisher) = self.publisher.as_mut() {
            publisher.on_sim_end(summary);
            if let Some(e) = publisher.take_error() {
                warn!(error = %e, "snapshot encoding failed during the run");
            }
        }
    }
}

// ── Console control ───────────────────────────────────────────────────────────

/// Read pause/quit commands from stdin on a detached thread.
fn spawn_console_control(control: EngineControl) -> Result<()> {
    thread::Builder::new()
        .name("console-control".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match line.trim() {
                    "p" | "pause" => {
                        let paused = control.toggle_pause();
                        info!(paused, "pause toggled from console");
                    }
                    "q" | "quit" => {
                        control.stop();
                        break;
                    }
                    "" => {}
                    other => warn!(command = other, "unknown console command (p = pause, q = quit)"),
                }
            }
        })
        .context("failed to start console thread")?;
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    blobworld::init_tracing();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(
        world = %config.world.name,
        population = config.world.initial_population,
        renderer = ?config.renderer,
        max_sim_hours = config.max_sim_hours,
        multiplier = config.time_multiplier,
        seed = config.seed,
        "configuration loaded"
    );

    let policy = WeightedRandomPolicy::new(&config.policy).context("invalid decision policy")?;
    let renderer = config.renderer;
    let network = config.network.clone();
    let hours_per_day = config.world.hours_per_day;

    let world = WorldBuilder::new(config, policy, LoggingHooks)
        .build()
        .context("failed to build world")?;
    let mut engine = Engine::new(world);
    spawn_console_control(engine.control())?;

    let summary = match renderer {
        RendererMode::Headless => engine.run(&mut ProgressObserver::new(hours_per_day, None)),
        RendererMode::Socket => {
            let queue = DropOldestQueue::new(network.queue_capacity);
            let sender = SnapshotSender::spawn(SenderConfig::from(&network), queue.clone())
                .context("failed to start snapshot sender")?;
            let mut observer = ProgressObserver::new(hours_per_day, Some(SnapshotPublisher::new(queue)));

            let summary = engine.run(&mut observer);

            match sender.shutdown(SENDER_JOIN_DEADLINE) {
                Some(stats) => info!(sent = stats.sent, connects = stats.connects, "sender joined"),
                None => warn!("sender did not stop cleanly"),
            }
            summary
        }
    };

    info!(
        reason = ?summary.reason,
        sim_hours = summary.sim_time.0,
        ticks = summary.sim_ticks,
        snapshots = summary.renderer_ticks,
        alive = summary.alive,
        "simulation finished"
    );
    Ok(())
}
