//! Narrow interfaces between the Warden core and the chat gateway.
//!
//! The core never talks to the gateway directly. Every handler receives a
//! `&dyn Platform` (the long-lived client capability) and, for interactions,
//! a `&dyn Responder` (the reply channel of one interaction). The gateway
//! crate implements both; `warden-nullables` provides recording doubles.

pub mod error;
pub mod message;

pub use error::PlatformError;
pub use message::{color, Button, ButtonStyle, Embed, EmbedField, Form, Message};

use std::time::Duration;

use async_trait::async_trait;
use warden_types::{GuildId, RoleId, UserId};

/// A community the bot is in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuildInfo {
    pub id: GuildId,
    pub name: String,
}

/// A user as seen inside one community.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberInfo {
    pub id: UserId,
    /// Display tag, e.g. `name` or `name#1234`.
    pub tag: String,
    pub bot: bool,
}

/// Client-level operations the core needs from the gateway.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Check that a private channel with `user` can be opened.
    async fn open_dm(&self, user: &UserId) -> Result<(), PlatformError>;

    async fn send_dm(&self, user: &UserId, message: Message) -> Result<(), PlatformError>;

    /// Next non-bot message `user` sends in their private channel, waiting at
    /// most `timeout`. `None` on timeout.
    async fn await_dm_reply(&self, user: &UserId, timeout: Duration) -> Option<String>;

    async fn ban(
        &self,
        guild: &GuildId,
        user: &UserId,
        reason: Option<&str>,
    ) -> Result<(), PlatformError>;

    async fn kick(&self, guild: &GuildId, user: &UserId, reason: &str) -> Result<(), PlatformError>;

    /// Every community the bot currently participates in.
    async fn guilds(&self) -> Vec<GuildInfo>;

    async fn guild(&self, guild: &GuildId) -> Option<GuildInfo>;

    /// `None` if the user is not (or no longer) a member, or the lookup failed.
    async fn member(&self, guild: &GuildId, user: &UserId) -> Option<MemberInfo>;

    async fn find_role(&self, guild: &GuildId, name: &str) -> Result<Option<RoleId>, PlatformError>;

    async fn create_role(
        &self,
        guild: &GuildId,
        name: &str,
        reason: &str,
    ) -> Result<RoleId, PlatformError>;

    async fn add_role(
        &self,
        guild: &GuildId,
        user: &UserId,
        role: &RoleId,
        reason: &str,
    ) -> Result<(), PlatformError>;
}

/// The reply channel of a single interaction.
///
/// A `reply` after `defer` edits the deferred response.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn defer(&self, ephemeral: bool) -> Result<(), PlatformError>;

    async fn reply(&self, message: Message, ephemeral: bool) -> Result<(), PlatformError>;

    async fn show_form(&self, form: Form) -> Result<(), PlatformError>;
}
