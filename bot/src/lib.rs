//! Warden core.
//!
//! Everything the bot does in response to an event lives here:
//! - Moderation: ban, warn, warning counts
//! - Blacklist registry and its standing observers
//! - Wallet lookups (self-registered and key-gated)
//! - The access-key issuance wizard
//! - Join verification (terms prompt, keyword form, role grant or kick)
//!
//! Handlers receive the gateway as an explicit `&dyn Platform` and, for
//! interactions, a `&dyn Responder`. State lives in the [`JsonStore`] and in
//! the in-memory [`PendingVerifications`] set.

pub mod access;
pub mod blacklist;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod moderation;
mod notify;
pub mod verification;
pub mod wallet;

pub use access::{generate_key, WizardOutcome, WizardStep};
pub use commands::{BlacklistAction, Command, CommandData, CommandSpec, OptionKind, OptionSpec, OptionValue};
pub use config::BotConfig;
pub use context::{InboundMessage, Invocation};
pub use error::BotError;
pub use verification::{InteractionId, PendingVerifications, KEYWORD_INPUT_ID};

use std::sync::Arc;
use std::time::Duration;

use warden_explorer::BalanceSource;
use warden_store::JsonStore;

/// The bot: configuration, persistent documents, the explorer, and the
/// transient verification markers.
pub struct Bot {
    config: BotConfig,
    store: JsonStore,
    explorer: Arc<dyn BalanceSource>,
    pending: PendingVerifications,
}

impl Bot {
    pub fn new(config: BotConfig, store: JsonStore, explorer: Arc<dyn BalanceSource>) -> Self {
        Self {
            config,
            store,
            explorer,
            pending: PendingVerifications::new(),
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    pub fn pending(&self) -> &PendingVerifications {
        &self.pending
    }

    fn wizard_timeout(&self) -> Duration {
        Duration::from_secs(self.config.wizard_timeout_secs)
    }
}
