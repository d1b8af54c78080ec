//! blobworld-viewer — headless receiving end of the snapshot stream.
//!
//! Listens for the engine, decodes every frame into a `Snapshot` and logs a
//! summary line every `--summary-every` snapshots.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use blob_output::{DEFAULT_RECEIVER_CAPACITY, DropOldestQueue, FrameReceiver, ReceiverConfig};
use blob_sim::Snapshot;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless viewer for the blobworld snapshot stream")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: String,

    /// Read timeout on the engine connection
    #[arg(long, default_value_t = 1000)]
    socket_timeout_ms: u64,

    /// Log a summary every N snapshots
    #[arg(long, default_value_t = 10)]
    summary_every: u64,

    /// Snapshots buffered between the socket thread and this loop
    #[arg(long, default_value_t = DEFAULT_RECEIVER_CAPACITY)]
    queue_capacity: usize,

    /// Exit after this many snapshots
    #[arg(long)]
    max_snapshots: Option<u64>,
}

fn summarize(snapshot: &Snapshot) {
    let mut states: BTreeMap<&str, usize> = BTreeMap::new();
    for blob in &snapshot.blobs_data {
        *states.entry(blob.state.as_str()).or_default() += 1;
    }
    let w = &snapshot.world_data;
    info!(
        sim_ticks = snapshot.sim_data.sim_ticks,
        renderer_ticks = snapshot.sim_data.renderer_ticks,
        t = w.current_sim_time,
        day = w.day,
        day_hour = w.day_hour,
        phase = %w.day_phase,
        alive = snapshot.alive_count(),
        things = snapshot.things_data.len(),
        states = ?states,
        "snapshot"
    );
}

fn main() -> Result<()> {
    blobworld::init_tracing();
    let args = Args::parse();

    let config = ReceiverConfig {
        socket_timeout: Duration::from_millis(args.socket_timeout_ms.max(1)),
        ..ReceiverConfig::new(args.bind.clone())
    };
    let queue: DropOldestQueue<Snapshot> = DropOldestQueue::new(args.queue_capacity);
    let receiver = FrameReceiver::bind(config, queue.clone())
        .with_context(|| format!("failed to listen on {}", args.bind))?;
    info!(addr = %receiver.local_addr(), "waiting for the engine");

    let every = args.summary_every.max(1);
    let mut seen = 0u64;
    while args.max_snapshots.is_none_or(|max| seen < max) {
        let Some(snapshot) = queue.recv_timeout(Duration::from_millis(100)) else {
            continue;
        };
        seen += 1;
        if seen == 1 {
            info!(world = %snapshot.world_data.name, dimensions = ?snapshot.world_data.dimensions, "first snapshot");
        }
        if seen % every == 0 {
            summarize(&snapshot);
        }
    }

    let stats = receiver.shutdown(Duration::from_secs(2));
    info!(seen, dropped = queue.dropped(), ?stats, "viewer finished");
    Ok(())
}
