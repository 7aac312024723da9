use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("client setup failed: {0}")]
    Setup(String),

    #[error("gateway connection ended: {0}")]
    Connection(String),
}
