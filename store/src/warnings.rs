//! Warning ledger: community → member → warning count.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use warden_types::{GuildId, UserId};

/// Per-community warning counters. Counts only ever go up.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarningLedger(BTreeMap<GuildId, BTreeMap<UserId, u64>>);

impl WarningLedger {
    /// Warnings recorded for `user` in `guild`; 0 if never warned.
    pub fn count(&self, guild: &GuildId, user: &UserId) -> u64 {
        self.0
            .get(guild)
            .and_then(|members| members.get(user))
            .copied()
            .unwrap_or(0)
    }

    /// Add one warning and return the new count.
    pub fn increment(&mut self, guild: &GuildId, user: &UserId) -> u64 {
        let count = self
            .0
            .entry(guild.clone())
            .or_default()
            .entry(user.clone())
            .or_insert(0);
        *count = count.saturating_add(1);
        *count
    }
}
