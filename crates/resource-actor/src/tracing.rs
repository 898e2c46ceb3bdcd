//! # Observability
//!
//! Actors log their lifecycle (`Actor started`, `Created`, `Action ok`, `Evicted idle
//! records`, `Shutdown`) with the entity type as a structured field, and clients add
//! `#[instrument]` spans. [`setup_tracing`] installs a compact subscriber for all of it.
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle events
//! RUST_LOG=debug cargo run     # full request payloads
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Falls back to `info` when `RUST_LOG` is unset.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
