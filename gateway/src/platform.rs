//! Platform capabilities over a serenity context.

use std::time::Duration;

use async_trait::async_trait;
use serenity::all::{
    Context, EditRole, GuildId as SGuildId, RoleId as SRoleId, UserId as SUserId,
};
use tracing::debug;
use warden_platform::{GuildInfo, MemberInfo, Message, Platform, PlatformError};
use warden_types::{GuildId, RoleId, UserId};

use crate::render;

/// Only non-zero numeric ids map to snowflakes.
fn user_id(id: &UserId) -> Result<SUserId, PlatformError> {
    id.as_u64()
        .map(SUserId::new)
        .ok_or_else(|| PlatformError::InvalidId(id.to_string()))
}

fn guild_id(id: &GuildId) -> Result<SGuildId, PlatformError> {
    id.as_u64()
        .map(SGuildId::new)
        .ok_or_else(|| PlatformError::InvalidId(id.to_string()))
}

fn role_id(id: &RoleId) -> Result<SRoleId, PlatformError> {
    id.as_u64()
        .map(SRoleId::new)
        .ok_or_else(|| PlatformError::InvalidId(id.to_string()))
}

fn http_error(e: serenity::Error) -> PlatformError {
    PlatformError::Http(e.to_string())
}

pub struct SerenityPlatform {
    ctx: Context,
}

impl SerenityPlatform {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    fn guild_name(&self, guild: SGuildId) -> Option<String> {
        guild.name(&self.ctx.cache)
    }
}

#[async_trait]
impl Platform for SerenityPlatform {
    async fn open_dm(&self, user: &UserId) -> Result<(), PlatformError> {
        user_id(user)?
            .create_dm_channel(&self.ctx)
            .await
            .map_err(|e| PlatformError::DmClosed(e.to_string()))?;
        Ok(())
    }

    async fn send_dm(&self, user: &UserId, message: Message) -> Result<(), PlatformError> {
        let channel = user_id(user)?
            .create_dm_channel(&self.ctx)
            .await
            .map_err(|e| PlatformError::DmClosed(e.to_string()))?;
        channel
            .send_message(&self.ctx.http, render::create_message(&message))
            .await
            .map_err(|e| PlatformError::DmClosed(e.to_string()))?;
        Ok(())
    }

    async fn await_dm_reply(&self, user: &UserId, timeout: Duration) -> Option<String> {
        let author = user_id(user).ok()?;
        let channel = author.create_dm_channel(&self.ctx).await.ok()?;
        let reply = channel
            .id
            .await_reply(&self.ctx.shard)
            .author_id(author)
            .timeout(timeout)
            .await;
        if reply.is_none() {
            debug!(%user, "no DM reply before the timeout");
        }
        reply.map(|message| message.content)
    }

    async fn ban(
        &self,
        guild: &GuildId,
        user: &UserId,
        reason: Option<&str>,
    ) -> Result<(), PlatformError> {
        let (guild, user) = (guild_id(guild)?, user_id(user)?);
        let result = match reason {
            Some(reason) => guild.ban_with_reason(&self.ctx.http, user, 0, reason).await,
            None => guild.ban(&self.ctx.http, user, 0).await,
        };
        result.map_err(|e| PlatformError::Forbidden(e.to_string()))
    }

    async fn kick(&self, guild: &GuildId, user: &UserId, reason: &str) -> Result<(), PlatformError> {
        guild_id(guild)?
            .kick_with_reason(&self.ctx.http, user_id(user)?, reason)
            .await
            .map_err(|e| PlatformError::Forbidden(e.to_string()))
    }

    async fn guilds(&self) -> Vec<GuildInfo> {
        self.ctx
            .cache
            .guilds()
            .into_iter()
            .filter_map(|id| {
                self.guild_name(id).map(|name| GuildInfo {
                    id: GuildId::from(id.get()),
                    name,
                })
            })
            .collect()
    }

    async fn guild(&self, guild: &GuildId) -> Option<GuildInfo> {
        let id = guild_id(guild).ok()?;
        self.guild_name(id).map(|name| GuildInfo {
            id: guild.clone(),
            name,
        })
    }

    async fn member(&self, guild: &GuildId, user: &UserId) -> Option<MemberInfo> {
        let (guild, uid) = (guild_id(guild).ok()?, user_id(user).ok()?);
        let member = guild.member(&self.ctx, uid).await.ok()?;
        Some(MemberInfo {
            id: user.clone(),
            tag: member.user.tag(),
            bot: member.user.bot,
        })
    }

    async fn find_role(&self, guild: &GuildId, name: &str) -> Result<Option<RoleId>, PlatformError> {
        let roles = guild_id(guild)?
            .roles(&self.ctx.http)
            .await
            .map_err(http_error)?;
        Ok(roles
            .values()
            .find(|role| role.name == name)
            .map(|role| RoleId::from(role.id.get())))
    }

    async fn create_role(
        &self,
        guild: &GuildId,
        name: &str,
        reason: &str,
    ) -> Result<RoleId, PlatformError> {
        let role = guild_id(guild)?
            .create_role(&self.ctx, EditRole::new().name(name).audit_log_reason(reason))
            .await
            .map_err(|e| PlatformError::Forbidden(e.to_string()))?;
        Ok(RoleId::from(role.id.get()))
    }

    async fn add_role(
        &self,
        guild: &GuildId,
        user: &UserId,
        role: &RoleId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.ctx
            .http
            .add_member_role(guild_id(guild)?, user_id(user)?, role_id(role)?, Some(reason))
            .await
            .map_err(|e| PlatformError::Forbidden(e.to_string()))
    }
}
