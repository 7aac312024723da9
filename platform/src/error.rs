use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("missing permission: {0}")]
    Forbidden(String),

    #[error("cannot send direct messages to {0}")]
    DmClosed(String),

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("gateway request failed: {0}")]
    Http(String),
}
