//! Wallet registry: member → wallet address.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use warden_types::UserId;

/// One self-registered wallet address per member. Last write wins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletRegistry(BTreeMap<UserId, String>);

impl WalletRegistry {
    pub fn get(&self, user: &UserId) -> Option<&str> {
        self.0.get(user).map(String::as_str)
    }

    /// Register or replace the member's address.
    pub fn set(&mut self, user: UserId, address: impl Into<String>) {
        self.0.insert(user, address.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let mut wallets = WalletRegistry::default();
        let user = UserId::new("7");
        wallets.set(user.clone(), "0xfirst");
        wallets.set(user.clone(), "0xsecond");
        assert_eq!(wallets.get(&user), Some("0xsecond"));
        assert_eq!(wallets.len(), 1);
    }
}
