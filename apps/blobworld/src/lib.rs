//! Shared setup for the `blobworld` and `blobworld-viewer` binaries.

pub mod config;

#[cfg(test)]
mod tests;

use tracing_subscriber::EnvFilter;

/// Install the `fmt` subscriber.  `RUST_LOG` overrides the default `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();
}
