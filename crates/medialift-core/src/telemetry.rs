//! Tracing initialization
//!
//! Basic structured logging setup. Applications embedding the pipeline can
//! install their own subscriber instead; the pipeline itself only emits
//! `tracing` events and never assumes a subscriber is present.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with an env-filter (RUST_LOG) and a fmt layer.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "medialift=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}
