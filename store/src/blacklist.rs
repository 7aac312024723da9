//! Blacklist: blocked members and blocked communities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use warden_types::{GuildId, UserId};

/// Which of the two blacklist sets an entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlacklistKind {
    Member,
    Community,
}

impl BlacklistKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Community => "community",
        }
    }
}

impl fmt::Display for BlacklistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlacklistKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" | "user" => Ok(Self::Member),
            "community" | "guild" | "server" => Ok(Self::Community),
            other => Err(format!("unknown blacklist type: {other}")),
        }
    }
}

/// Two insertion-ordered id sets. Ids are kept exactly as the operator
/// typed them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blacklist {
    #[serde(default, deserialize_with = "id_list")]
    users: Vec<String>,
    #[serde(default, deserialize_with = "id_list")]
    guilds: Vec<String>,
}

impl Blacklist {
    pub fn entries(&self, kind: BlacklistKind) -> &[String] {
        match kind {
            BlacklistKind::Member => &self.users,
            BlacklistKind::Community => &self.guilds,
        }
    }

    pub fn contains(&self, kind: BlacklistKind, id: &str) -> bool {
        self.entries(kind).iter().any(|entry| entry == id)
    }

    /// Add `id`; returns `false` if it was already present.
    pub fn insert(&mut self, kind: BlacklistKind, id: &str) -> bool {
        if self.contains(kind, id) {
            return false;
        }
        self.entries_mut(kind).push(id.to_string());
        true
    }

    /// Remove `id`; returns `false` if it was not present.
    pub fn remove(&mut self, kind: BlacklistKind, id: &str) -> bool {
        let entries = self.entries_mut(kind);
        match entries.iter().position(|entry| entry == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_user_blacklisted(&self, user: &UserId) -> bool {
        self.contains(BlacklistKind::Member, user.as_str())
    }

    pub fn is_guild_blacklisted(&self, guild: &GuildId) -> bool {
        self.contains(BlacklistKind::Community, guild.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.guilds.is_empty()
    }

    fn entries_mut(&mut self, kind: BlacklistKind) -> &mut Vec<String> {
        match kind {
            BlacklistKind::Member => &mut self.users,
            BlacklistKind::Community => &mut self.guilds,
        }
    }
}

/// A list field that is not an array of strings is treated as empty rather
/// than failing the whole document; non-string elements are dropped.
fn id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut blacklist = Blacklist::default();
        assert!(blacklist.insert(BlacklistKind::Member, "1"));
        assert!(!blacklist.insert(BlacklistKind::Member, "1"));
        assert_eq!(blacklist.entries(BlacklistKind::Member).len(), 1);
        assert!(blacklist.entries(BlacklistKind::Community).is_empty());
    }

    #[test]
    fn remove_reports_absence() {
        let mut blacklist = Blacklist::default();
        assert!(!blacklist.remove(BlacklistKind::Community, "9"));
        blacklist.insert(BlacklistKind::Community, "9");
        assert!(blacklist.remove(BlacklistKind::Community, "9"));
        assert!(!blacklist.is_guild_blacklisted(&GuildId::new("9")));
    }

    #[test]
    fn sets_are_independent() {
        let mut blacklist = Blacklist::default();
        blacklist.insert(BlacklistKind::Member, "5");
        assert!(blacklist.is_user_blacklisted(&UserId::new("5")));
        assert!(!blacklist.is_guild_blacklisted(&GuildId::new("5")));
    }

    #[test]
    fn malformed_fields_are_normalised() {
        let blacklist: Blacklist =
            serde_json::from_str(r#"{"users": null, "guilds": ["1", 2, {}]}"#).unwrap();
        assert!(blacklist.entries(BlacklistKind::Member).is_empty());
        assert_eq!(blacklist.entries(BlacklistKind::Community), ["1", "2"]);

        let blacklist: Blacklist = serde_json::from_str("{}").unwrap();
        assert!(blacklist.is_empty());
    }

    #[test]
    fn kind_parses_choice_values() {
        assert_eq!("member".parse::<BlacklistKind>(), Ok(BlacklistKind::Member));
        assert_eq!(
            "community".parse::<BlacklistKind>(),
            Ok(BlacklistKind::Community)
        );
        assert!("planet".parse::<BlacklistKind>().is_err());
    }
}
