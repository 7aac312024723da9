use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("remote query failed: HTTP {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("invalid explorer URL: {0}")]
    Url(String),
}
