#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;
use warden_bot::{Bot, BotConfig, Invocation};
use warden_nullables::{NullExplorer, NullPlatform, NullResponder};
use warden_store::JsonStore;
use warden_types::{GuildId, UserId};

pub const OWNER: &str = "1141085246226452643";
pub const GUILD: &str = "500";
pub const GUILD_NAME: &str = "Test Server";

pub struct Harness {
    pub bot: Bot,
    pub platform: NullPlatform,
    pub explorer: Arc<NullExplorer>,
    pub dir: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(NullPlatform::new().with_guild(GUILD, GUILD_NAME), NullExplorer::new())
    }

    pub fn with(platform: NullPlatform, explorer: NullExplorer) -> Self {
        Self::configured(platform, explorer, BotConfig::default())
    }

    /// Like [`Harness::with`], but starting from `config`. The data
    /// directory is always replaced by a fresh temp dir.
    pub fn configured(platform: NullPlatform, explorer: NullExplorer, config: BotConfig) -> Self {
        let dir = TempDir::new().unwrap();
        let config = BotConfig {
            data_dir: dir.path().to_path_buf(),
            ..config
        };
        let store = JsonStore::open(dir.path()).unwrap();
        let explorer = Arc::new(explorer);
        let bot = Bot::new(config, store, explorer.clone());
        Self {
            bot,
            platform,
            explorer,
            dir,
        }
    }

    /// Reopen the data directory from scratch, bypassing the bot's cache.
    pub fn reopen_store(&self) -> JsonStore {
        JsonStore::open(self.dir.path()).unwrap()
    }
}

pub fn in_guild(user: &str, can_ban: bool) -> Invocation {
    Invocation {
        user: UserId::new(user),
        user_name: format!("user-{user}"),
        guild: Some(GuildId::new(GUILD)),
        can_ban,
    }
}

pub fn in_dm(user: &str) -> Invocation {
    Invocation {
        user: UserId::new(user),
        user_name: format!("user-{user}"),
        guild: None,
        can_ban: false,
    }
}

pub fn responder() -> NullResponder {
    NullResponder::new()
}
