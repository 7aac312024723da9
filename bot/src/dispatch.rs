//! Routes inbound interactions to their handlers.

use tracing::{debug, warn};
use warden_platform::{Message, Platform, Responder};
use warden_types::UserId;

use crate::{Bot, BotError, Command, CommandData, InteractionId, Invocation};

impl Bot {
    /// A slash command. Unknown names are logged and ignored.
    pub async fn handle_command(
        &self,
        platform: &dyn Platform,
        responder: &dyn Responder,
        inv: &Invocation,
        data: &CommandData,
    ) -> Result<(), BotError> {
        let command = match Command::parse(data) {
            Ok(command) => command,
            Err(BotError::UnknownCommand(name)) => {
                warn!(%name, "ignoring unknown command");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        debug!(command = command.name(), user = %inv.user, guild = ?inv.guild, "dispatching command");

        let guild = match (&inv.guild, command.guild_only()) {
            (Some(guild), _) => Some(guild.clone()),
            (None, false) => None,
            (None, true) => {
                responder
                    .reply(Message::text("This command can only be used in a server."), false)
                    .await?;
                return Ok(());
            }
        };

        match (&command, guild) {
            (Command::Ban { member, reason }, Some(guild)) => {
                self.ban(platform, responder, inv, &guild, member, reason.as_deref())
                    .await
            }
            (Command::Warn { member, reason }, Some(guild)) => {
                self.warn(responder, inv, &guild, member, reason).await
            }
            (Command::Warnings { member }, Some(guild)) => {
                self.warnings(responder, inv, &guild, member).await
            }
            (Command::Blacklist(action), _) => {
                self.handle_blacklist(platform, responder, inv, action).await
            }
            (Command::SetWallet { address }, _) => self.set_wallet(responder, inv, address).await,
            (Command::MyWallet, _) => self.my_wallet(responder, inv).await,
            (Command::Wallet { key }, _) => self.wallet_by_key(responder, inv, key).await,
            (Command::GrantAccess, _) => self
                .handle_grant_access(platform, responder, inv)
                .await
                .map(|_| ()),
            // Guild-only commands always carry a guild past the check above.
            (Command::Ban { .. } | Command::Warn { .. } | Command::Warnings { .. }, None) => Ok(()),
        }
    }

    /// A button press. Ids this bot did not mint are ignored.
    pub async fn handle_component(
        &self,
        platform: &dyn Platform,
        responder: &dyn Responder,
        user: &UserId,
        custom_id: &str,
    ) -> Result<(), BotError> {
        debug!(%user, custom_id, "dispatching component");
        match InteractionId::parse(custom_id) {
            Some(InteractionId::Accept(guild)) => self.accept_terms(responder, &guild).await,
            Some(InteractionId::Reject(guild)) => {
                self.reject_terms(platform, responder, user, &guild).await
            }
            Some(InteractionId::AcceptForm(_)) | None => {
                warn!(custom_id, "ignoring unknown component");
                Ok(())
            }
        }
    }

    /// A form submission carrying the keyword input.
    pub async fn handle_form(
        &self,
        platform: &dyn Platform,
        responder: &dyn Responder,
        user: &UserId,
        custom_id: &str,
        value: &str,
    ) -> Result<(), BotError> {
        debug!(%user, custom_id, "dispatching form");
        match InteractionId::parse(custom_id) {
            Some(InteractionId::AcceptForm(guild)) => {
                self.submit_keyword(platform, responder, user, &guild, value)
                    .await
            }
            _ => {
                warn!(custom_id, "ignoring unknown form");
                Ok(())
            }
        }
    }
}
