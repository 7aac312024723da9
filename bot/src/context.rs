//! Who triggered an event, and from where.

use warden_platform::{GuildInfo, MemberInfo};
use warden_types::{GuildId, UserId};

/// The caller of a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub user: UserId,
    /// Display name used in embed footers.
    pub user_name: String,
    /// `None` when invoked from a direct message.
    pub guild: Option<GuildId>,
    /// Whether the caller's membership carries the ban-members permission.
    pub can_ban: bool,
}

impl Invocation {
    pub fn in_guild(&self) -> bool {
        self.guild.is_some()
    }

    /// Replies meant for the caller alone are ephemeral only inside a
    /// community; in direct messages they are ordinary messages.
    pub fn private(&self) -> bool {
        self.in_guild()
    }
}

/// A message posted somewhere the bot can see.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundMessage {
    pub author: MemberInfo,
    /// `None` for direct messages.
    pub guild: Option<GuildInfo>,
    pub link: String,
}
