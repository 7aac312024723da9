//! Nullable explorer: canned snapshots, configurable failures.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use warden_explorer::{BalanceSource, ExplorerError, TxRef, WalletSnapshot};

/// Answers every address with an empty snapshot unless told otherwise.
pub struct NullExplorer {
    balances: Mutex<HashMap<String, (u128, Vec<TxRef>)>>,
    failure: Mutex<Option<u16>>,
    queried: Mutex<Vec<String>>,
}

impl NullExplorer {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
            queried: Mutex::new(Vec::new()),
        }
    }

    pub fn with_wallet(self, address: &str, balance: u128, transactions: Vec<TxRef>) -> Self {
        self.balances
            .lock()
            .unwrap()
            .insert(address.to_string(), (balance, transactions));
        self
    }

    /// Every following lookup fails with this HTTP status.
    pub fn fail_with_status(&self, status: u16) {
        *self.failure.lock().unwrap() = Some(status);
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

impl Default for NullExplorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BalanceSource for NullExplorer {
    async fn fetch_snapshot(&self, address: &str) -> Result<WalletSnapshot, ExplorerError> {
        self.queried.lock().unwrap().push(address.to_string());
        if let Some(status) = *self.failure.lock().unwrap() {
            return Err(ExplorerError::Status(status));
        }
        let (balance, transactions) = self
            .balances
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_default();
        Ok(WalletSnapshot {
            address: address.to_string(),
            balance,
            final_balance: balance,
            transactions,
        })
    }
}
