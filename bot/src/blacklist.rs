//! Blacklist registry (owner-gated add/remove/list) and the observers that
//! report blacklisted members and communities to the owner.

use tracing::info;
use warden_platform::{color, Embed, GuildInfo, MemberInfo, Message, Platform, Responder};
use warden_store::{Blacklist, BlacklistKind};

use crate::{BlacklistAction, Bot, BotError, InboundMessage, Invocation};

/// Result of a registry mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Applied,
    AlreadyPresent,
    NotPresent,
}

fn render_entries(entries: &[String], empty: &str) -> String {
    if entries.is_empty() {
        empty.to_string()
    } else {
        entries
            .iter()
            .map(|id| format!("- {id}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Bot {
    pub fn is_owner(&self, user: &warden_types::UserId) -> bool {
        user == &self.config.owner_id
    }

    /// Add `id` to the `kind` set and persist.
    pub fn blacklist_add(&self, kind: BlacklistKind, id: &str) -> Result<Change, BotError> {
        let inserted = self
            .store
            .update(|blacklist: &mut Blacklist| blacklist.insert(kind, id))?;
        Ok(if inserted {
            Change::Applied
        } else {
            Change::AlreadyPresent
        })
    }

    /// Remove `id` from the `kind` set and persist.
    pub fn blacklist_remove(&self, kind: BlacklistKind, id: &str) -> Result<Change, BotError> {
        let removed = self
            .store
            .update(|blacklist: &mut Blacklist| blacklist.remove(kind, id))?;
        Ok(if removed {
            Change::Applied
        } else {
            Change::NotPresent
        })
    }

    pub fn blacklist(&self) -> Result<Blacklist, BotError> {
        Ok(self.store.load()?)
    }

    /// `/blacklist add|remove|list`
    pub async fn handle_blacklist(
        &self,
        platform: &dyn Platform,
        responder: &dyn Responder,
        inv: &Invocation,
        action: &BlacklistAction,
    ) -> Result<(), BotError> {
        let private = inv.private();
        if !self.is_owner(&inv.user) {
            responder
                .reply(
                    Message::text("Only the authorized owner can use this command."),
                    private,
                )
                .await?;
            return Ok(());
        }

        match action {
            BlacklistAction::List => {
                let blacklist = self.blacklist()?;
                let embed = Embed::new(color::DARK)
                    .title("Current blacklist")
                    .field(
                        "Members",
                        render_entries(blacklist.entries(BlacklistKind::Member), "none"),
                        false,
                    )
                    .field(
                        "Communities",
                        render_entries(blacklist.entries(BlacklistKind::Community), "none"),
                        false,
                    );
                responder.reply(Message::embed(embed), private).await?;
            }
            BlacklistAction::Add { kind, id, reason } => {
                if self.blacklist_add(*kind, id)? == Change::AlreadyPresent {
                    responder
                        .reply(Message::text("Already on the blacklist."), private)
                        .await?;
                    return Ok(());
                }
                info!(%kind, %id, "blacklist entry added");
                responder
                    .reply(Message::text(format!("ID {id} added to the blacklist.")), private)
                    .await?;

                let reason = reason.as_deref().unwrap_or("no reason given");
                self.notify_owner(
                    platform,
                    format!("🔒 Added {kind} {id} to the blacklist. Reason: {reason}"),
                )
                .await;
                self.report_existing_presence(platform, *kind, id).await;
            }
            BlacklistAction::Remove { kind, id } => {
                if self.blacklist_remove(*kind, id)? == Change::NotPresent {
                    responder
                        .reply(Message::text("That ID is not on the blacklist."), private)
                        .await?;
                    return Ok(());
                }
                info!(%kind, %id, "blacklist entry removed");
                responder
                    .reply(
                        Message::text(format!("ID {id} removed from the blacklist.")),
                        private,
                    )
                    .await?;
            }
        }
        Ok(())
    }

    /// After a new entry, tell the owner where the bot already sees it.
    async fn report_existing_presence(&self, platform: &dyn Platform, kind: BlacklistKind, id: &str) {
        match kind {
            BlacklistKind::Member => {
                let user = warden_types::UserId::new(id);
                for guild in platform.guilds().await {
                    if let Some(member) = platform.member(&guild.id, &user).await {
                        self.notify_owner(
                            platform,
                            format!("⚠️ {} is already in {}.", member.tag, guild.name),
                        )
                        .await;
                    }
                }
            }
            BlacklistKind::Community => {
                let guild_id = warden_types::GuildId::new(id);
                if let Some(guild) = platform.guild(&guild_id).await {
                    self.notify_owner(
                        platform,
                        format!("⚠️ The bot is already in the blacklisted server: {}", guild.name),
                    )
                    .await;
                }
            }
        }
    }

    // ── Observers ────────────────────────────────────────────────────────

    /// A blacklisted member joined `guild`.
    pub(crate) async fn observe_join(
        &self,
        platform: &dyn Platform,
        guild: &GuildInfo,
        member: &MemberInfo,
    ) -> Result<(), BotError> {
        if self.blacklist()?.is_user_blacklisted(&member.id) {
            self.notify_owner(
                platform,
                format!(
                    "⚠️ Blacklisted user {} ({}) joined the server {}.",
                    member.tag, member.id, guild.name
                ),
            )
            .await;
        }
        Ok(())
    }

    /// Any message in a community: report it if the author is blacklisted.
    pub async fn on_message(
        &self,
        platform: &dyn Platform,
        message: &InboundMessage,
    ) -> Result<(), BotError> {
        let Some(guild) = &message.guild else {
            return Ok(());
        };
        if message.author.bot {
            return Ok(());
        }
        if self.blacklist()?.is_user_blacklisted(&message.author.id) {
            self.notify_owner(
                platform,
                format!(
                    "📨 Message from {} ({}) in {}: {}",
                    message.author.tag, message.author.id, guild.name, message.link
                ),
            )
            .await;
        }
        Ok(())
    }

    /// The bot was added to `guild`.
    pub async fn on_guild_join(
        &self,
        platform: &dyn Platform,
        guild: &GuildInfo,
    ) -> Result<(), BotError> {
        if self.blacklist()?.is_guild_blacklisted(&guild.id) {
            self.notify_owner(
                platform,
                format!(
                    "⚠️ The bot was added to a blacklisted server: {} ({}).",
                    guild.name, guild.id
                ),
            )
            .await;
        }
        Ok(())
    }

    /// Startup summary for the owner when the blacklist is not empty.
    pub async fn on_ready(&self, platform: &dyn Platform) -> Result<(), BotError> {
        let blacklist = self.blacklist()?;
        let users = blacklist.entries(BlacklistKind::Member).len();
        let guilds = blacklist.entries(BlacklistKind::Community).len();
        info!(users, guilds, "bot ready");
        if users > 0 || guilds > 0 {
            self.notify_owner(
                platform,
                format!(
                    "The bot started with {users} user(s) and {guilds} server(s) on the blacklist."
                ),
            )
            .await;
        }
        Ok(())
    }
}
