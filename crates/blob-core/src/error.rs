//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! into one of their variants or wrap it; prefer whichever keeps error sites
//! clean.

use thiserror::Error;

use crate::{AgentId, ObjectId};

/// The top-level error type for `blob-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `blob-core`.
pub type CoreResult<T> = Result<T, CoreError>;
