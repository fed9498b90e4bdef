//! Structured logging setup.
//!
//! Installs a [`tracing_subscriber`] registry with an [`EnvFilter`] so the
//! log level can be tuned via `RUST_LOG` without recompiling.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialises the global subscriber.
///
/// `default_level` applies when `RUST_LOG` is unset; it accepts any valid
/// [`EnvFilter`] directive string (e.g. `"info"`, `"walletconn=debug"`).
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}
