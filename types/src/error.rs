//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for the Warden bot.
#[derive(Debug, Error)]
pub enum WardenError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("gateway error: {0}")]
    Gateway(String),

    #[error("{0}")]
    Other(String),
}
