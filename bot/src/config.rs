//! Bot configuration with TOML file support.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use warden_types::UserId;
use warden_utils::LogFormat;

use crate::BotError;

/// Configuration for the bot.
///
/// Can be loaded from a TOML file via [`BotConfig::from_toml_file`] or built
/// programmatically (e.g. for tests). The login token is deliberately not
/// part of it; the daemon reads it from the environment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BotConfig {
    /// The single operator allowed to manage the blacklist and issue keys.
    #[serde(default = "default_owner_id")]
    pub owner_id: UserId,

    /// Directory holding the four JSON documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Role granted after a member accepts the terms.
    #[serde(default = "default_verified_role")]
    pub verified_role: String,

    /// Word the member has to type to accept the terms.
    #[serde(default = "default_accept_keyword")]
    pub accept_keyword: String,

    /// Terms shown in the verification prompt, one rule per entry.
    #[serde(default = "default_terms")]
    pub terms: Vec<String>,

    /// Explorer REST base URL.
    #[serde(default = "default_explorer_base")]
    pub explorer_base: String,

    /// Optional explorer API token.
    #[serde(default)]
    pub explorer_token: Option<String>,

    /// How long each access-key wizard step waits for an answer.
    #[serde(default = "default_wizard_timeout_secs")]
    pub wizard_timeout_secs: u64,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_owner_id() -> UserId {
    UserId::new("1141085246226452643")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_verified_role() -> String {
    "Verified".to_string()
}

fn default_accept_keyword() -> String {
    "ACCEPT".to_string()
}

fn default_terms() -> Vec<String> {
    [
        "Do not share illegal or malicious content, or content that infringes copyright.",
        "Treat every member of the server with respect.",
        "Spam, flooding and alternate accounts used to dodge sanctions are forbidden.",
        "The moderation team may remove you if you break these rules.",
        "Taking part in this server means following these terms and local law.",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_explorer_base() -> String {
    warden_explorer::DEFAULT_API_BASE.to_string()
}

fn default_wizard_timeout_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            owner_id: default_owner_id(),
            data_dir: default_data_dir(),
            verified_role: default_verified_role(),
            accept_keyword: default_accept_keyword(),
            terms: default_terms(),
            explorer_base: default_explorer_base(),
            explorer_token: None,
            wizard_timeout_secs: default_wizard_timeout_secs(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl BotConfig {
    /// Load a configuration from a TOML file. Missing keys take defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, BotError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| BotError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, BotError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| BotError::Config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the bot cannot run with.
    pub fn validate(&self) -> Result<(), BotError> {
        if self.owner_id.as_str().trim().is_empty() {
            return Err(BotError::Config("owner_id must not be empty".into()));
        }
        if self.accept_keyword.trim().is_empty() {
            return Err(BotError::Config("accept_keyword must not be empty".into()));
        }
        if self.verified_role.trim().is_empty() {
            return Err(BotError::Config("verified_role must not be empty".into()));
        }
        if self.wizard_timeout_secs == 0 {
            return Err(BotError::Config("wizard_timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = BotConfig::from_toml_str("").unwrap();
        assert_eq!(config.owner_id, UserId::new("1141085246226452643"));
        assert_eq!(config.accept_keyword, "ACCEPT");
        assert_eq!(config.verified_role, "Verified");
        assert_eq!(config.terms.len(), 5);
        assert_eq!(config.wizard_timeout_secs, 60);
        assert_eq!(config.log_format, LogFormat::Human);
    }

    #[test]
    fn overrides_are_applied() {
        let config = BotConfig::from_toml_str(
            r#"
            owner_id = "42"
            accept_keyword = "AGREE"
            terms = ["Be nice."]
            explorer_token = "t"
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.owner_id, UserId::new("42"));
        assert_eq!(config.accept_keyword, "AGREE");
        assert_eq!(config.terms, vec!["Be nice.".to_string()]);
        assert_eq!(config.explorer_token.as_deref(), Some("t"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_unusable_values() {
        assert!(BotConfig::from_toml_str("accept_keyword = \"  \"").is_err());
        assert!(BotConfig::from_toml_str("wizard_timeout_secs = 0").is_err());
        assert!(BotConfig::from_toml_str("owner_id = 5").is_err());
    }
}
