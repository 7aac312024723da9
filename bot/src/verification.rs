//! Join verification: terms prompt in DM, keyword form, role grant or kick.

use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

use tracing::{error, info, warn};
use warden_platform::{
    color, Button, ButtonStyle, Embed, Form, GuildInfo, MemberInfo, Message, Platform,
    PlatformError, Responder,
};
use warden_types::{GuildId, RoleId, UserId};

use crate::{Bot, BotError};

/// `custom_id` of the keyword input inside the accept form.
pub const KEYWORD_INPUT_ID: &str = "tos_keyword";

const ACCEPT_PREFIX: &str = "tos_accept";
const REJECT_PREFIX: &str = "tos_reject";
const ACCEPT_FORM_PREFIX: &str = "tos_accept_modal";

/// Case-insensitive comparison of a typed answer against the keyword,
/// ignoring surrounding whitespace on both sides.
fn keyword_matches(typed: &str, keyword: &str) -> bool {
    typed.trim().to_uppercase() == keyword.trim().to_uppercase()
}

const KICK_REASON: &str = "Rejected the terms during verification.";
const ROLE_REASON: &str = "Accepted the server terms.";

/// Members who were prompted and have not answered yet.
#[derive(Debug, Default)]
pub struct PendingVerifications(Mutex<HashSet<(GuildId, UserId)>>);

impl PendingVerifications {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self) -> std::sync::MutexGuard<'_, HashSet<(GuildId, UserId)>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns `false` if the pair was already pending.
    pub fn mark(&self, guild: &GuildId, user: &UserId) -> bool {
        self.set().insert((guild.clone(), user.clone()))
    }

    /// Returns `false` if the pair was not pending.
    pub fn clear(&self, guild: &GuildId, user: &UserId) -> bool {
        self.set().remove(&(guild.clone(), user.clone()))
    }

    pub fn contains(&self, guild: &GuildId, user: &UserId) -> bool {
        self.set().contains(&(guild.clone(), user.clone()))
    }

    pub fn len(&self) -> usize {
        self.set().len()
    }

    pub fn is_empty(&self) -> bool {
        self.set().is_empty()
    }
}

/// Interaction ids carried by the prompt buttons and the accept form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionId {
    Accept(GuildId),
    Reject(GuildId),
    AcceptForm(GuildId),
}

impl InteractionId {
    pub fn parse(raw: &str) -> Option<Self> {
        let (prefix, guild) = raw.split_once(':')?;
        if guild.is_empty() {
            return None;
        }
        let guild = GuildId::new(guild);
        match prefix {
            ACCEPT_PREFIX => Some(Self::Accept(guild)),
            REJECT_PREFIX => Some(Self::Reject(guild)),
            ACCEPT_FORM_PREFIX => Some(Self::AcceptForm(guild)),
            _ => None,
        }
    }

    pub fn guild(&self) -> &GuildId {
        match self {
            Self::Accept(g) | Self::Reject(g) | Self::AcceptForm(g) => g,
        }
    }
}

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept(g) => write!(f, "{ACCEPT_PREFIX}:{g}"),
            Self::Reject(g) => write!(f, "{REJECT_PREFIX}:{g}"),
            Self::AcceptForm(g) => write!(f, "{ACCEPT_FORM_PREFIX}:{g}"),
        }
    }
}

impl Bot {
    fn terms_prompt(&self, guild: &GuildInfo) -> Message {
        let rules = self
            .config
            .terms
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("{}. {rule}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");
        let embed = Embed::new(color::ORANGE)
            .title(format!("🛂 Verification required in {}", guild.name))
            .description(format!(
                "Before you can take part you have to accept the server terms:\n\n{rules}"
            ))
            .footer(format!(
                "Press Accept and type {} to confirm.",
                self.config.accept_keyword.trim()
            ));
        Message::embed(embed)
            .button(Button {
                custom_id: InteractionId::Accept(guild.id.clone()).to_string(),
                label: "Accept".into(),
                style: ButtonStyle::Success,
            })
            .button(Button {
                custom_id: InteractionId::Reject(guild.id.clone()).to_string(),
                label: "Reject".into(),
                style: ButtonStyle::Danger,
            })
    }

    /// A member joined `guild`: prompt once, then run the blacklist check.
    pub async fn on_member_join(
        &self,
        platform: &dyn Platform,
        guild: &GuildInfo,
        member: &MemberInfo,
    ) -> Result<(), BotError> {
        if member.bot {
            return Ok(());
        }
        if !self.pending.mark(&guild.id, &member.id) {
            return Ok(());
        }

        match platform.send_dm(&member.id, self.terms_prompt(guild)).await {
            Ok(()) => info!(guild = %guild.id, member = %member.id, "verification prompt sent"),
            Err(e) => {
                warn!(guild = %guild.id, member = %member.id, error = %e, "could not deliver the verification prompt")
            }
        }

        self.observe_join(platform, guild, member).await
    }

    /// The accept button opens the keyword form.
    pub(crate) async fn accept_terms(
        &self,
        responder: &dyn Responder,
        guild: &GuildId,
    ) -> Result<(), BotError> {
        let keyword = self.config.accept_keyword.trim();
        let form = Form {
            custom_id: InteractionId::AcceptForm(guild.clone()).to_string(),
            title: "Accept the terms".into(),
            input_id: KEYWORD_INPUT_ID.into(),
            label: format!("Type {keyword} to confirm"),
            min_length: u16::try_from(keyword.chars().count()).unwrap_or(u16::MAX),
        };
        responder.show_form(form).await?;
        Ok(())
    }

    /// The keyword form was submitted.
    pub(crate) async fn submit_keyword(
        &self,
        platform: &dyn Platform,
        responder: &dyn Responder,
        user: &UserId,
        guild_id: &GuildId,
        value: &str,
    ) -> Result<(), BotError> {
        if !keyword_matches(value, &self.config.accept_keyword) {
            responder
                .reply(Message::text("That keyword isn't correct. Try again."), true)
                .await?;
            return Ok(());
        }

        let Some(guild) = platform.guild(guild_id).await else {
            responder
                .reply(Message::text("I couldn't find that server anymore."), true)
                .await?;
            return Ok(());
        };
        if platform.member(&guild.id, user).await.is_none() {
            responder
                .reply(Message::text("You are no longer a member of the server."), true)
                .await?;
            return Ok(());
        }

        let granted = match self.ensure_verified_role(platform, &guild.id).await {
            Ok(role) => platform.add_role(&guild.id, user, &role, ROLE_REASON).await,
            Err(e) => Err(e),
        };
        if let Err(e) = granted {
            error!(guild = %guild.id, member = %user, error = %e, "could not grant the verified role");
            responder
                .reply(
                    Message::text("I couldn't grant you access. Contact a moderator."),
                    true,
                )
                .await?;
            return Ok(());
        }

        self.pending.clear(&guild.id, user);
        info!(guild = %guild.id, member = %user, "member verified");
        responder
            .reply(
                Message::text(format!("✅ Access granted. Welcome to {}!", guild.name)),
                true,
            )
            .await?;
        Ok(())
    }

    async fn ensure_verified_role(
        &self,
        platform: &dyn Platform,
        guild: &GuildId,
    ) -> Result<RoleId, PlatformError> {
        let name = &self.config.verified_role;
        if let Some(role) = platform.find_role(guild, name).await? {
            return Ok(role);
        }
        info!(%guild, role = %name, "creating the verified role");
        platform
            .create_role(guild, name, "Role for members who accepted the terms")
            .await
    }

    /// The reject button: clear the marker and remove the member.
    pub(crate) async fn reject_terms(
        &self,
        platform: &dyn Platform,
        responder: &dyn Responder,
        user: &UserId,
        guild_id: &GuildId,
    ) -> Result<(), BotError> {
        let Some(guild) = platform.guild(guild_id).await else {
            responder
                .reply(Message::text("I couldn't find that server anymore."), false)
                .await?;
            return Ok(());
        };
        self.pending.clear(&guild.id, user);

        if platform.member(&guild.id, user).await.is_none() {
            responder
                .reply(Message::text("You are no longer a member of the server."), false)
                .await?;
            return Ok(());
        }

        responder
            .reply(
                Message::text(format!(
                    "You rejected the terms, so you will be removed from {}.",
                    guild.name
                )),
                false,
            )
            .await?;
        match platform.kick(&guild.id, user, KICK_REASON).await {
            Ok(()) => info!(guild = %guild.id, member = %user, "member removed after rejecting the terms"),
            Err(e) => error!(guild = %guild.id, member = %user, error = %e, "kick failed"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_ids_round_trip() {
        for id in [
            InteractionId::Accept(GuildId::new("42")),
            InteractionId::Reject(GuildId::new("42")),
            InteractionId::AcceptForm(GuildId::new("42")),
        ] {
            assert_eq!(InteractionId::parse(&id.to_string()), Some(id));
        }
    }

    #[test]
    fn prefixes_must_match_exactly() {
        assert_eq!(InteractionId::parse("tos_accept_x:1"), None);
        assert_eq!(InteractionId::parse("tos_accept"), None);
        assert_eq!(InteractionId::parse("tos_reject:"), None);
        assert_eq!(
            InteractionId::parse("tos_accept_modal:7"),
            Some(InteractionId::AcceptForm(GuildId::new("7")))
        );
    }

    #[test]
    fn keyword_folds_case_beyond_ascii() {
        assert!(keyword_matches(" aceptó ", "ACEPTÓ"));
        assert!(keyword_matches("ACCEPT", " ACCEPT "));
        assert!(keyword_matches("straße", "STRASSE"));
        assert!(!keyword_matches("accepted", "ACCEPT"));
    }

    #[test]
    fn pending_marks_once() {
        let pending = PendingVerifications::new();
        let (g, u) = (GuildId::new("1"), UserId::new("2"));
        assert!(pending.mark(&g, &u));
        assert!(!pending.mark(&g, &u));
        assert!(pending.contains(&g, &u));
        assert!(pending.clear(&g, &u));
        assert!(!pending.clear(&g, &u));
        assert!(pending.is_empty());
    }
}
