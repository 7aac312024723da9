use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("store error: {0}")]
    Store(#[from] warden_store::StoreError),

    #[error("platform error: {0}")]
    Platform(#[from] warden_platform::PlatformError),

    #[error("explorer error: {0}")]
    Explorer(#[from] warden_explorer::ExplorerError),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("/{command}: missing option `{option}`")]
    MissingOption {
        command: &'static str,
        option: &'static str,
    },

    #[error("/{command}: invalid option `{option}`: {reason}")]
    InvalidOption {
        command: &'static str,
        option: &'static str,
        reason: String,
    },

    #[error("config error: {0}")]
    Config(String),
}
