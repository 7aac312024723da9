//! Opaque platform identifiers.
//!
//! The gateway hands out numeric snowflakes, but operators type ids by hand
//! (blacklist entries, wizard answers), so every id is kept as the exact
//! string the platform or the operator supplied.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Return the raw id string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Parse the id as a numeric snowflake, if it is one.
            pub fn as_u64(&self) -> Option<u64> {
                self.0.parse::<u64>().ok().filter(|v| *v != 0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<u64> for $name {
            fn from(v: u64) -> Self {
                Self(v.to_string())
            }
        }
    };
}

string_id!(
    /// A user (member) id.
    UserId
);
string_id!(
    /// A community (guild) id.
    GuildId
);
string_id!(
    /// A role id within a community.
    RoleId
);

impl UserId {
    /// Mention markup that the client renders as the user's name.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }

    /// Accept either a bare id or a mention (`<@id>` / `<@!id>`).
    ///
    /// Returns `None` for empty input.
    pub fn parse_reference(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let inner = trimmed
            .strip_prefix("<@")
            .and_then(|rest| rest.strip_suffix('>'))
            .map(|rest| rest.trim_start_matches('!'))
            .unwrap_or(trimmed);
        if inner.is_empty() {
            None
        } else {
            Some(Self(inner.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reference_accepts_raw_and_mentions() {
        assert_eq!(UserId::parse_reference("42"), Some(UserId::new("42")));
        assert_eq!(UserId::parse_reference("<@42>"), Some(UserId::new("42")));
        assert_eq!(UserId::parse_reference(" <@!42> "), Some(UserId::new("42")));
        assert_eq!(UserId::parse_reference("   "), None);
    }

    #[test]
    fn zero_is_not_a_snowflake() {
        assert_eq!(GuildId::new("0").as_u64(), None);
        assert_eq!(GuildId::new("abc").as_u64(), None);
        assert_eq!(GuildId::new("17").as_u64(), Some(17));
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&UserId::new("99")).unwrap();
        assert_eq!(json, "\"99\"");
    }
}
