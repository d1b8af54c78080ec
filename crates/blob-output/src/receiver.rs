//! `FrameReceiver` — the listening end used by viewers.
//!
//! Accepts one client at a time, decodes each frame's JSON payload into `T`
//! and pushes it onto a [`DropOldestQueue`] for the consumer.  Reads use a
//! socket timeout so shutdown is noticed within one interval.  A payload
//! that fails to decode is logged and skipped; a framing error closes the
//! connection.  When a client disconnects the queue is flushed so the
//! consumer never shows state from a finished session.

use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::frame::is_timeout;
use crate::sender::join_within;
use crate::{DEFAULT_MAX_FRAME_LEN, DropOldestQueue, FrameRead, FrameReader, TransportResult};

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct ReceiverConfig {
    /// `host:port` to listen on.  Port 0 picks a free port; see
    /// [`FrameReceiver::local_addr`].
    pub bind:           String,
    /// Read timeout on the client socket.  Must be non-zero.
    pub socket_timeout: Duration,
    /// Sleep between accept polls while no client is connected.
    pub accept_poll:    Duration,
    /// Wait before rebinding after the listener fails.
    pub rebind_delay:   Duration,
    pub max_frame_len:  usize,
}

impl ReceiverConfig {
    pub fn new(bind: impl Into<String>) -> Self {
        Self {
            bind:           bind.into(),
            socket_timeout: Duration::from_secs(1),
            accept_poll:    Duration::from_millis(50),
            rebind_delay:   Duration::from_secs(1),
            max_frame_len:  DEFAULT_MAX_FRAME_LEN,
        }
    }
}

// ── FrameReceiver ─────────────────────────────────────────────────────────────

/// Counters returned when the receiver thread exits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReceiverStats {
    pub clients:        u64,
    pub frames:         u64,
    /// Frames whose payload was not valid JSON for `T`.
    pub malformed:      u64,
    /// Connections closed because of a framing or socket error.
    pub framing_errors: u64,
    pub rebinds:        u64,
}

/// Handle to the running receiver thread.
pub struct FrameReceiver {
    local_addr: SocketAddr,
    shutdown:   Arc<AtomicBool>,
    handle:     Option<JoinHandle<ReceiverStats>>,
}

impl FrameReceiver {
    /// Bind the listener, then start the receiver thread.
    ///
    /// Binding happens on the caller's thread so a bad address is reported
    /// here rather than logged later.
    pub fn bind<T>(config: ReceiverConfig, queue: DropOldestQueue<T>) -> TransportResult<Self>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let slot = ListenerSlot::bind(config.bind.as_str())?;
        let local_addr = slot.addr();
        info!(addr = %local_addr, "receiver listening");

        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let handle = thread::Builder::new()
            .name("frame-receiver".into())
            .spawn(move || run(slot, config, queue, flag))?;
        Ok(Self { local_addr, shutdown, handle: Some(handle) })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Signal the thread and wait up to `deadline` for it to exit.
    pub fn shutdown(mut self, deadline: Duration) -> Option<ReceiverStats> {
        self.shutdown.store(true, Ordering::SeqCst);
        let handle = self.handle.take()?;
        join_within(handle, deadline, "frame-receiver")
    }
}

impl Drop for FrameReceiver {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

// ── Listener slot ─────────────────────────────────────────────────────────────

/// The listening socket and the concrete address it is rebound to after a
/// failure.  The old socket is closed before the new bind, so the port is
/// free again.
pub(crate) struct ListenerSlot {
    addr:   SocketAddr,
    socket: Option<TcpListener>,
}

impl ListenerSlot {
    pub(crate) fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let socket = open_listener(addr)?;
        Ok(Self { addr: socket.local_addr()?, socket: Some(socket) })
    }

    pub(crate) fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub(crate) fn is_bound(&self) -> bool {
        self.socket.is_some()
    }

    /// Close the socket.  The next [`listener`](Self::listener) call binds a
    /// fresh one on the same address.
    pub(crate) fn release(&mut self) {
        self.socket = None;
    }

    /// The bound listener, rebinding first if it was released.
    pub(crate) fn listener(&mut self) -> io::Result<&TcpListener> {
        let socket = match self.socket.take() {
            Some(socket) => socket,
            None => open_listener(self.addr)?,
        };
        Ok(self.socket.insert(socket))
    }
}

fn open_listener(addr: impl ToSocketAddrs) -> io::Result<TcpListener> {
    let listener = TcpListener::bind(addr)?;
    listener.set_nonblocking(true)?;
    Ok(listener)
}

// ── Thread body ───────────────────────────────────────────────────────────────

fn run<T: DeserializeOwned>(
    mut slot: ListenerSlot,
    config:   ReceiverConfig,
    queue:    DropOldestQueue<T>,
    shutdown: Arc<AtomicBool>,
) -> ReceiverStats {
    let addr = slot.addr();
    let mut stats = ReceiverStats::default();

    while !shutdown.load(Ordering::SeqCst) {
        let rebinding = !slot.is_bound();
        let listener = match slot.listener() {
            Ok(listener) => listener,
            Err(e) => {
                warn!(%addr, error = %e, retry_in = ?config.rebind_delay, "rebind failed");
                thread::sleep(config.rebind_delay);
                continue;
            }
        };
        if rebinding {
            stats.rebinds += 1;
            info!(%addr, "receiver listening again");
        }

        match listener.accept() {
            Ok((stream, peer)) => {
                info!(%peer, "viewer client connected");
                stats.clients += 1;
                if let Err(e) = serve(stream, &config, &queue, &shutdown, &mut stats) {
                    warn!(%peer, error = %e, "client connection failed");
                    stats.framing_errors += 1;
                }
                let flushed = queue.clear();
                info!(%peer, flushed, "viewer client disconnected");
            }
            Err(e) if is_timeout(&e) => thread::sleep(config.accept_poll),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => {
                warn!(%addr, error = %e, retry_in = ?config.rebind_delay, "accept failed; rebinding");
                slot.release();
                thread::sleep(config.rebind_delay);
            }
        }
    }

    info!(frames = stats.frames, malformed = stats.malformed, "receiver stopped");
    stats
}

/// Read frames from one client until it disconnects or shutdown is set.
fn serve<T: DeserializeOwned>(
    stream:   TcpStream,
    config:   &ReceiverConfig,
    queue:    &DropOldestQueue<T>,
    shutdown: &AtomicBool,
    stats:    &mut ReceiverStats,
) -> TransportResult<()> {
    stream.set_nonblocking(false)?;
    stream.set_read_timeout(Some(config.socket_timeout.max(Duration::from_millis(1))))?;
    let mut reader = FrameReader::new(stream, config.max_frame_len);

    while !shutdown.load(Ordering::SeqCst) {
        match reader.read_frame()? {
            FrameRead::Frame(bytes) => match serde_json::from_slice::<T>(&bytes) {
                Ok(item) => {
                    stats.frames += 1;
                    queue.push(item);
                }
                Err(e) => {
                    stats.malformed += 1;
                    warn!(len = bytes.len(), error = %e, "malformed payload; frame skipped");
                }
            },
            FrameRead::Idle => {}
            FrameRead::Closed => return Ok(()),
        }
    }
    debug!("stopping mid-connection");
    Ok(())
}
