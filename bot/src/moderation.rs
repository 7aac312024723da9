//! Ban, warn, and warning counts.

use tracing::{error, info};
use warden_platform::{color, Embed, Message, Platform, Responder};
use warden_store::WarningLedger;
use warden_types::{GuildId, UserId};

use crate::{Bot, BotError, Invocation};

const NO_PERMISSION: &str = "You don't have permission to use this command.";

fn moderation_embed(title: &str, description: String, moderator: &str) -> Embed {
    Embed::new(color::BLURPLE)
        .title(title)
        .description(description)
        .footer(format!("Requested by {moderator}"))
}

impl Bot {
    /// `/ban member reason?`
    pub async fn ban(
        &self,
        platform: &dyn Platform,
        responder: &dyn Responder,
        inv: &Invocation,
        guild: &GuildId,
        member: &UserId,
        reason: Option<&str>,
    ) -> Result<(), BotError> {
        if !inv.can_ban {
            responder.reply(Message::text(NO_PERMISSION), true).await?;
            return Ok(());
        }
        if member == &inv.user {
            responder
                .reply(Message::text("You can't ban yourself."), true)
                .await?;
            return Ok(());
        }

        if let Err(e) = platform.ban(guild, member, reason).await {
            error!(%guild, %member, error = %e, "ban failed");
            responder
                .reply(
                    Message::text("I can't ban that user, or something went wrong."),
                    true,
                )
                .await?;
            return Ok(());
        }
        info!(%guild, %member, moderator = %inv.user, "member banned");

        let mut description = format!("{} has been banned.", member.mention());
        if let Some(reason) = reason {
            description.push_str(&format!("\nReason: {reason}"));
        }
        let embed = moderation_embed("🚫 User banned", description, &inv.user_name);
        responder.reply(Message::embed(embed), false).await?;
        Ok(())
    }

    /// `/warn member reason`
    pub async fn warn(
        &self,
        responder: &dyn Responder,
        inv: &Invocation,
        guild: &GuildId,
        member: &UserId,
        reason: &str,
    ) -> Result<(), BotError> {
        if !inv.can_ban {
            responder.reply(Message::text(NO_PERMISSION), true).await?;
            return Ok(());
        }

        let count = self
            .store
            .update(|ledger: &mut WarningLedger| ledger.increment(guild, member))?;
        info!(%guild, %member, count, "warning recorded");

        let embed = moderation_embed(
            "⚠️ Warning recorded",
            format!(
                "{} now has **{count}** warning(s).\nReason: {reason}",
                member.mention()
            ),
            &inv.user_name,
        );
        responder.reply(Message::embed(embed), false).await?;
        Ok(())
    }

    /// Number of warnings `member` has in `guild`.
    pub fn warning_count(&self, guild: &GuildId, member: &UserId) -> Result<u64, BotError> {
        let ledger: WarningLedger = self.store.load()?;
        Ok(ledger.count(guild, member))
    }

    /// `/warnings member`
    pub async fn warnings(
        &self,
        responder: &dyn Responder,
        inv: &Invocation,
        guild: &GuildId,
        member: &UserId,
    ) -> Result<(), BotError> {
        let count = self.warning_count(guild, member)?;
        let embed = Embed::new(color::ORANGE)
            .title("📋 Warning history")
            .description(format!("{} has **{count}** warning(s).", member.mention()))
            .footer(format!("Requested by {}", inv.user_name));
        responder.reply(Message::embed(embed), inv.private()).await?;
        Ok(())
    }
}
