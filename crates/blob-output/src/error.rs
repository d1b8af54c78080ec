//! Error types for blob-output.

use thiserror::Error;

/// Errors raised by framing, encoding and the socket threads.
///
/// None of these reach the simulation loop: the sender and receiver log
/// them and retry, and the publisher stores the first one for
/// [`take_error`][crate::SnapshotPublisher::take_error].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The length header announces more bytes than allowed.  The stream
    /// cannot be resynchronised, so the connection must be closed.
    #[error("frame of {len} bytes exceeds the {max}-byte limit")]
    FrameTooLarge { len: usize, max: usize },
}

/// Alias for `Result<T, TransportError>`.
pub type TransportResult<T> = Result<T, TransportError>;
