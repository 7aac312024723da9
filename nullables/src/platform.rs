//! Nullable gateway: an in-memory set of communities that records every
//! side effect instead of performing it.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use warden_platform::{GuildInfo, MemberInfo, Message, Platform, PlatformError};
use warden_types::{GuildId, RoleId, UserId};

#[derive(Default)]
struct State {
    guilds: Vec<GuildInfo>,
    members: HashMap<(GuildId, UserId), MemberInfo>,
    roles: HashMap<(GuildId, String), RoleId>,
    created_roles: Vec<(GuildId, String)>,
    member_roles: Vec<(GuildId, UserId, RoleId)>,
    dms: Vec<(UserId, Message)>,
    dm_replies: HashMap<UserId, VecDeque<Option<String>>>,
    reply_waits: Vec<Duration>,
    closed_dms: HashSet<UserId>,
    bans: Vec<(GuildId, UserId, Option<String>)>,
    kicks: Vec<(GuildId, UserId, String)>,
    refuse_bans: bool,
    refuse_roles: bool,
    next_role: u64,
}

/// A gateway double.
///
/// Configure communities and members up front, queue DM answers, then
/// inspect what the bot sent, banned, kicked and granted.
pub struct NullPlatform {
    state: Mutex<State>,
}

impl NullPlatform {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_role: 9000,
                ..State::default()
            }),
        }
    }

    // ── Setup ────────────────────────────────────────────────────────────

    pub fn with_guild(self, id: &str, name: &str) -> Self {
        self.state.lock().unwrap().guilds.push(GuildInfo {
            id: GuildId::new(id),
            name: name.to_string(),
        });
        self
    }

    pub fn with_member(self, guild: &str, user: &str, tag: &str) -> Self {
        self.add_member(guild, user, tag);
        self
    }

    pub fn with_role(self, guild: &str, name: &str, role: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .roles
            .insert((GuildId::new(guild), name.to_string()), RoleId::new(role));
        self
    }

    pub fn add_member(&self, guild: &str, user: &str, tag: &str) {
        self.state.lock().unwrap().members.insert(
            (GuildId::new(guild), UserId::new(user)),
            MemberInfo {
                id: UserId::new(user),
                tag: tag.to_string(),
                bot: false,
            },
        );
    }

    pub fn remove_member(&self, guild: &str, user: &str) {
        self.state
            .lock()
            .unwrap()
            .members
            .remove(&(GuildId::new(guild), UserId::new(user)));
    }

    /// Queue the next answer `user` gives in DMs. `None` simulates a timeout.
    pub fn queue_dm_reply(&self, user: &str, reply: Option<&str>) {
        self.state
            .lock()
            .unwrap()
            .dm_replies
            .entry(UserId::new(user))
            .or_default()
            .push_back(reply.map(str::to_string));
    }

    /// Make DMs to `user` fail.
    pub fn close_dms(&self, user: &str) {
        self.state.lock().unwrap().closed_dms.insert(UserId::new(user));
    }

    pub fn refuse_bans(&self) {
        self.state.lock().unwrap().refuse_bans = true;
    }

    pub fn refuse_role_changes(&self) {
        self.state.lock().unwrap().refuse_roles = true;
    }

    // ── Assertions ───────────────────────────────────────────────────────

    pub fn dms_to(&self, user: &str) -> Vec<Message> {
        let target = UserId::new(user);
        self.state
            .lock()
            .unwrap()
            .dms
            .iter()
            .filter(|(to, _)| *to == target)
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// DMs to `user` flattened to text.
    pub fn dm_texts(&self, user: &str) -> Vec<String> {
        self.dms_to(user).iter().map(Message::plain_text).collect()
    }

    pub fn bans(&self) -> Vec<(GuildId, UserId, Option<String>)> {
        self.state.lock().unwrap().bans.clone()
    }

    pub fn kicks(&self) -> Vec<(GuildId, UserId, String)> {
        self.state.lock().unwrap().kicks.clone()
    }

    pub fn created_roles(&self) -> Vec<(GuildId, String)> {
        self.state.lock().unwrap().created_roles.clone()
    }

    pub fn roles_of(&self, guild: &str, user: &str) -> Vec<RoleId> {
        let (guild, user) = (GuildId::new(guild), UserId::new(user));
        self.state
            .lock()
            .unwrap()
            .member_roles
            .iter()
            .filter(|(g, u, _)| *g == guild && *u == user)
            .map(|(_, _, role)| role.clone())
            .collect()
    }

    /// Timeouts the bot asked for, in order.
    pub fn reply_waits(&self) -> Vec<Duration> {
        self.state.lock().unwrap().reply_waits.clone()
    }
}

impl Default for NullPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for NullPlatform {
    async fn open_dm(&self, user: &UserId) -> Result<(), PlatformError> {
        if self.state.lock().unwrap().closed_dms.contains(user) {
            return Err(PlatformError::DmClosed(user.to_string()));
        }
        Ok(())
    }

    async fn send_dm(&self, user: &UserId, message: Message) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        if state.closed_dms.contains(user) {
            return Err(PlatformError::DmClosed(user.to_string()));
        }
        state.dms.push((user.clone(), message));
        Ok(())
    }

    async fn await_dm_reply(&self, user: &UserId, timeout: Duration) -> Option<String> {
        let mut state = self.state.lock().unwrap();
        state.reply_waits.push(timeout);
        state
            .dm_replies
            .get_mut(user)
            .and_then(VecDeque::pop_front)
            .flatten()
    }

    async fn ban(
        &self,
        guild: &GuildId,
        user: &UserId,
        reason: Option<&str>,
    ) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        if state.refuse_bans {
            return Err(PlatformError::Forbidden("BAN_MEMBERS".into()));
        }
        state.members.remove(&(guild.clone(), user.clone()));
        state
            .bans
            .push((guild.clone(), user.clone(), reason.map(str::to_string)));
        Ok(())
    }

    async fn kick(&self, guild: &GuildId, user: &UserId, reason: &str) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        state.members.remove(&(guild.clone(), user.clone()));
        state
            .kicks
            .push((guild.clone(), user.clone(), reason.to_string()));
        Ok(())
    }

    async fn guilds(&self) -> Vec<GuildInfo> {
        self.state.lock().unwrap().guilds.clone()
    }

    async fn guild(&self, guild: &GuildId) -> Option<GuildInfo> {
        self.state
            .lock()
            .unwrap()
            .guilds
            .iter()
            .find(|g| &g.id == guild)
            .cloned()
    }

    async fn member(&self, guild: &GuildId, user: &UserId) -> Option<MemberInfo> {
        self.state
            .lock()
            .unwrap()
            .members
            .get(&(guild.clone(), user.clone()))
            .cloned()
    }

    async fn find_role(&self, guild: &GuildId, name: &str) -> Result<Option<RoleId>, PlatformError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .roles
            .get(&(guild.clone(), name.to_string()))
            .cloned())
    }

    async fn create_role(
        &self,
        guild: &GuildId,
        name: &str,
        _reason: &str,
    ) -> Result<RoleId, PlatformError> {
        let mut state = self.state.lock().unwrap();
        if state.refuse_roles {
            return Err(PlatformError::Forbidden("MANAGE_ROLES".into()));
        }
        state.next_role += 1;
        let role = RoleId::from(state.next_role);
        state
            .roles
            .insert((guild.clone(), name.to_string()), role.clone());
        state.created_roles.push((guild.clone(), name.to_string()));
        Ok(role)
    }

    async fn add_role(
        &self,
        guild: &GuildId,
        user: &UserId,
        role: &RoleId,
        _reason: &str,
    ) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        if state.refuse_roles {
            return Err(PlatformError::Forbidden("MANAGE_ROLES".into()));
        }
        state
            .member_roles
            .push((guild.clone(), user.clone(), role.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_replies_come_back_in_order_then_time_out() {
        let platform = NullPlatform::new();
        platform.queue_dm_reply("1", Some("first"));
        platform.queue_dm_reply("1", None);
        let user = UserId::new("1");
        let wait = Duration::from_secs(60);

        assert_eq!(platform.await_dm_reply(&user, wait).await.as_deref(), Some("first"));
        assert_eq!(platform.await_dm_reply(&user, wait).await, None);
        assert_eq!(platform.await_dm_reply(&user, wait).await, None);
        assert_eq!(platform.reply_waits().len(), 3);
    }

    #[tokio::test]
    async fn kick_removes_the_member() {
        let platform = NullPlatform::new()
            .with_guild("g", "Guild")
            .with_member("g", "u", "user#1");
        let (guild, user) = (GuildId::new("g"), UserId::new("u"));
        assert!(platform.member(&guild, &user).await.is_some());
        platform.kick(&guild, &user, "bye").await.unwrap();
        assert!(platform.member(&guild, &user).await.is_none());
        assert_eq!(platform.kicks().len(), 1);
    }

    #[tokio::test]
    async fn closed_dms_fail() {
        let platform = NullPlatform::new();
        platform.close_dms("u");
        let result = platform.send_dm(&UserId::new("u"), Message::text("hi")).await;
        assert!(matches!(result, Err(PlatformError::DmClosed(_))));
        assert!(platform.dms_to("u").is_empty());
    }
}
