//! Unified error types for the wallet connection core.

use thiserror::Error;

/// Top-level error type for the application.
///
/// Connection failures reported by the wallet collaborator are not errors
/// at this level; they travel the session event channel and surface only
/// in the rendered control state.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed, or validated.
    #[error("config: {0}")]
    Config(String),

    /// Endpoint routing could not be resolved for a network.
    #[error("provider: {0}")]
    Provider(String),
}

impl Error {
    /// Creates a [`Error::Config`] from a message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a [`Error::Config`] from a message and an underlying cause.
    pub fn config_with(msg: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::Config(format!("{}: {source}", msg.into()))
    }

    /// Creates a [`Error::Provider`] from a message.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }
}
