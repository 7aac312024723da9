//! Discord adapter for the Warden bot.
//!
//! Connects through serenity, registers the command table on ready, turns
//! gateway events into calls on [`warden_bot::Bot`], and implements the
//! [`warden_platform::Platform`] and [`warden_platform::Responder`]
//! capabilities the handlers use.

pub mod error;
pub mod handler;
pub mod options;
pub mod platform;
pub mod render;
pub mod responder;

pub use error::GatewayError;
pub use handler::Handler;
pub use platform::SerenityPlatform;
pub use responder::InteractionResponder;

use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};
use tracing::info;
use warden_bot::Bot;

/// Events the bot needs: guild and member lifecycle, guild and DM messages
/// (with content, for wizard replies and blacklist monitoring).
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::DIRECT_MESSAGES
}

/// Log in with `token` and serve events until the connection ends.
pub async fn run(token: &str, bot: Arc<Bot>) -> Result<(), GatewayError> {
    let mut client = Client::builder(token, intents())
        .event_handler(Handler::new(bot))
        .await
        .map_err(|e| GatewayError::Setup(e.to_string()))?;

    info!("connecting to the gateway");
    client
        .start()
        .await
        .map_err(|e| GatewayError::Connection(e.to_string()))
}
