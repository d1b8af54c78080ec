//! `SnapshotSender` — the thread that ships encoded snapshots to a viewer.
//!
//! The engine dials out; the viewer listens.  The sender pulls payloads
//! from a [`DropOldestQueue`], frames them and writes them to the current
//! connection.  A failed dial backs off exponentially; a failed write drops
//! the connection and the next payload triggers a redial.  While no
//! connection is possible the queue keeps only the newest payloads.

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use blob_core::NetworkConfig;
use tracing::{debug, info, warn};

use crate::{DropOldestQueue, TransportResult, write_frame};

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct SenderConfig {
    /// `host:port` of the viewer.
    pub addr:            String,
    /// How long one queue poll waits before re-checking shutdown.
    pub poll_interval:   Duration,
    /// Socket timeouts; must be non-zero.
    pub connect_timeout: Duration,
    pub write_timeout:   Duration,
    /// First redial delay; doubles on each failure up to `retry_max`.
    pub retry_initial:   Duration,
    pub retry_max:       Duration,
}

impl From<&NetworkConfig> for SenderConfig {
    fn from(net: &NetworkConfig) -> Self {
        Self {
            addr:            format!("{}:{}", net.host, net.port),
            poll_interval:   Duration::from_millis(net.poll_interval_ms),
            connect_timeout: Duration::from_millis(net.connect_timeout_ms.max(1)),
            write_timeout:   Duration::from_millis(net.write_timeout_ms.max(1)),
            retry_initial:   Duration::from_millis(net.retry_initial_ms),
            retry_max:       Duration::from_millis(net.retry_max_ms),
        }
    }
}

// ── Backoff ───────────────────────────────────────────────────────────────────

/// Doubling delay with a ceiling.
#[derive(Clone, Debug)]
pub struct Backoff {
    initial: Duration,
    max:     Duration,
    current: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        let max = max.max(initial);
        Self { initial, max, current: initial }
    }

    /// The delay to wait now; the following one is doubled.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

// ── SnapshotSender ────────────────────────────────────────────────────────────

/// Counters returned when the sender thread exits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SenderStats {
    pub sent:        u64,
    pub write_fails: u64,
    pub connects:    u64,
    pub dial_fails:  u64,
}

/// Handle to the running sender thread.
pub struct SnapshotSender {
    shutdown: Arc<AtomicBool>,
    handle:   Option<JoinHandle<SenderStats>>,
}

impl SnapshotSender {
    /// Start the sender thread.  Returns once the thread is running; the
    /// first dial happens when the first payload arrives.
    pub fn spawn(config: SenderConfig, queue: DropOldestQueue<Vec<u8>>) -> TransportResult<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let handle = thread::Builder::new()
            .name("snapshot-sender".into())
            .spawn(move || run(config, queue, flag))?;
        Ok(Self { shutdown, handle: Some(handle) })
    }

    /// Signal the thread and wait up to `deadline` for it to exit.
    ///
    /// Returns `None` if the thread did not finish in time (it is detached)
    /// or panicked.
    pub fn shutdown(mut self, deadline: Duration) -> Option<SenderStats> {
        self.shutdown.store(true, Ordering::SeqCst);
        let handle = self.handle.take()?;
        join_within(handle, deadline, "snapshot-sender")
    }
}

impl Drop for SnapshotSender {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

/// Join `handle` if it finishes before `deadline`.
pub(crate) fn join_within<T>(handle: JoinHandle<T>, deadline: Duration, name: &str) -> Option<T> {
    let until = Instant::now() + deadline;
    while !handle.is_finished() {
        if Instant::now() >= until {
            warn!(thread = name, ?deadline, "thread did not stop in time; detaching");
            return None;
        }
        thread::sleep(Duration::from_millis(10));
    }
    match handle.join() {
        Ok(stats) => Some(stats),
        Err(_) => {
            warn!(thread = name, "thread panicked");
            None
        }
    }
}

// ── Thread body ───────────────────────────────────────────────────────────────

fn run(config: SenderConfig, queue: DropOldestQueue<Vec<u8>>, shutdown: Arc<AtomicBool>) -> SenderStats {
    info!(addr = %config.addr, "snapshot sender started");
    let mut stats = SenderStats::default();
    let mut backoff = Backoff::new(config.retry_initial, config.retry_max);
    let mut conn: Option<TcpStream> = None;
    let mut next_dial = Instant::now();

    while !shutdown.load(Ordering::SeqCst) {
        // Leave payloads queued while waiting to redial.
        if conn.is_none() {
            let now = Instant::now();
            if now < next_dial {
                thread::sleep((next_dial - now).min(config.poll_interval));
                continue;
            }
        }

        let Some(payload) = queue.recv_timeout(config.poll_interval) else {
            continue;
        };

        if conn.is_none() {
            match connect(&config) {
                Ok(stream) => {
                    info!(addr = %config.addr, "connected to viewer");
                    stats.connects += 1;
                    backoff.reset();
                    conn = Some(stream);
                }
                Err(e) => {
                    let delay = backoff.next_delay();
                    warn!(addr = %config.addr, error = %e, retry_in = ?delay, "viewer dial failed");
                    stats.dial_fails += 1;
                    next_dial = Instant::now() + delay;
                    continue;
                }
            }
        }

        if let Some(stream) = conn.as_mut() {
            match write_frame(stream, &payload) {
                Ok(()) => stats.sent += 1,
                Err(e) => {
                    warn!(addr = %config.addr, error = %e, "write failed; dropping connection");
                    stats.write_fails += 1;
                    conn = None;
                }
            }
        }
    }

    debug!(remaining = queue.len(), "sender shutting down");
    info!(sent = stats.sent, connects = stats.connects, dropped = queue.dropped(), "snapshot sender stopped");
    stats
}

fn connect(config: &SenderConfig) -> io::Result<TcpStream> {
    let mut last_err = io::Error::new(io::ErrorKind::NotFound, format!("{} resolved to no address", config.addr));
    for addr in config.addr.to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, config.connect_timeout) {
            Ok(stream) => {
                stream.set_write_timeout(Some(config.write_timeout))?;
                stream.set_nodelay(true)?;
                return Ok(stream);
            }
            Err(e) => last_err = e,
        }
    }
    Err(last_err)
}
