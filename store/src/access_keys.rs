//! Access keys: opaque bearer credentials bound to one recipient and one
//! wallet address.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use warden_types::{Timestamp, UserId};

/// One issued key. Field names match the on-disk camelCase layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKey {
    /// The only user allowed to redeem this key.
    pub allowed_user_id: UserId,
    pub wallet_address: String,
    pub created_by: UserId,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redeemed_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redeemed_at: Option<Timestamp>,
}

impl AccessKey {
    pub fn is_allowed(&self, user: &UserId) -> bool {
        &self.allowed_user_id == user
    }

    pub fn is_redeemed(&self) -> bool {
        self.redeemed_at.is_some()
    }
}

/// Key string → record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessKeyRegistry(BTreeMap<String, AccessKey>);

impl AccessKeyRegistry {
    pub fn get(&self, key: &str) -> Option<&AccessKey> {
        self.0.get(key)
    }

    /// Store a freshly minted key. An existing entry under the same key is
    /// replaced.
    pub fn insert(&mut self, key: impl Into<String>, record: AccessKey) {
        self.0.insert(key.into(), record);
    }

    /// Record who redeemed the key and when. Only the first redemption is
    /// kept; the key stays valid either way. Returns `true` if this call
    /// recorded it.
    pub fn record_redemption(&mut self, key: &str, by: &UserId, at: Timestamp) -> bool {
        match self.0.get_mut(key) {
            Some(record) if !record.is_redeemed() => {
                record.redeemed_by = Some(by.clone());
                record.redeemed_at = Some(at);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
