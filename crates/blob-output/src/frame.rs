//! Length-prefixed framing.
//!
//! ```text
//! ┌──────────────────────┬──────────────────────────────┐
//! │ len: u32 big-endian  │ len bytes of UTF-8 JSON      │
//! └──────────────────────┴──────────────────────────────┘
//! ```
//!
//! [`FrameReader`] keeps partial progress across calls, so a read timeout
//! in the middle of a frame loses nothing: the next call resumes where the
//! last one stopped.

use std::io::{self, Read, Write};

use crate::{TransportError, TransportResult};

pub const HEADER_LEN: usize = 4;

/// Largest payload a reader accepts unless told otherwise: 64 MiB.
pub const DEFAULT_MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

/// Header followed by `payload`, as one buffer.
pub fn encode_frame(payload: &[u8]) -> TransportResult<Vec<u8>> {
    let len = u32::try_from(payload.len())
        .map_err(|_| TransportError::FrameTooLarge { len: payload.len(), max: u32::MAX as usize })?;
    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(payload);
    Ok(buf)
}

/// Write one frame and flush.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> TransportResult<()> {
    writer.write_all(&encode_frame(payload)?)?;
    writer.flush()?;
    Ok(())
}

/// Result of one [`FrameReader::read_frame`] call.
#[derive(Debug, PartialEq, Eq)]
pub enum FrameRead {
    /// A complete payload.
    Frame(Vec<u8>),
    /// The read timed out; call again.
    Idle,
    /// The peer closed the connection.  A partial frame is discarded.
    Closed,
}

/// Incremental frame decoder over any `Read`.
pub struct FrameReader<R> {
    inner:          R,
    max_len:        usize,
    header:         [u8; HEADER_LEN],
    header_filled:  usize,
    in_payload:     bool,
    payload:        Vec<u8>,
    payload_filled: usize,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R, max_len: usize) -> Self {
        Self {
            inner,
            max_len,
            header: [0; HEADER_LEN],
            header_filled: 0,
            in_payload: false,
            payload: Vec::new(),
            payload_filled: 0,
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read until a frame completes, the source times out, or it ends.
    ///
    /// `Err(FrameTooLarge)` leaves the reader unusable.
    pub fn read_frame(&mut self) -> TransportResult<FrameRead> {
        if !self.in_payload {
            match fill(&mut self.inner, &mut self.header, &mut self.header_filled)? {
                Fill::Full => {}
                Fill::Idle => return Ok(FrameRead::Idle),
                Fill::Eof => return Ok(FrameRead::Closed),
            }
            let len = u32::from_be_bytes(self.header) as usize;
            if len > self.max_len {
                return Err(TransportError::FrameTooLarge { len, max: self.max_len });
            }
            self.payload = vec![0; len];
            self.payload_filled = 0;
            self.in_payload = true;
        }

        match fill(&mut self.inner, &mut self.payload, &mut self.payload_filled)? {
            Fill::Full => {}
            Fill::Idle => return Ok(FrameRead::Idle),
            Fill::Eof => return Ok(FrameRead::Closed),
        }
        self.header_filled = 0;
        self.in_payload = false;
        Ok(FrameRead::Frame(std::mem::take(&mut self.payload)))
    }
}

enum Fill {
    Full,
    Idle,
    Eof,
}

fn fill<R: Read>(reader: &mut R, buf: &mut [u8], filled: &mut usize) -> io::Result<Fill> {
    while *filled < buf.len() {
        match reader.read(&mut buf[*filled..]) {
            Ok(0) => return Ok(Fill::Eof),
            Ok(n) => *filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) if is_timeout(&e) => return Ok(Fill::Idle),
            Err(e) => return Err(e),
        }
    }
    Ok(Fill::Full)
}

/// Read timeouts surface as `WouldBlock` on Unix and `TimedOut` on Windows.
pub(crate) fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}
