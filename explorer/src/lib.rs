//! Blockchain explorer client.
//!
//! Fetches a wallet's balance and its most recent transaction references
//! from a BlockCypher-style REST API and normalises them into a
//! [`WalletSnapshot`]. Callers depend on the [`BalanceSource`] trait so tests
//! can substitute a canned source.

pub mod client;
pub mod error;
pub mod snapshot;

pub use client::{ExplorerClient, ExplorerConfig, DEFAULT_API_BASE};
pub use error::ExplorerError;
pub use snapshot::{AddressPayload, Direction, TxRef, WalletSnapshot, MAX_RECENT_TXS};

use async_trait::async_trait;

/// Anything that can produce a wallet snapshot.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn fetch_snapshot(&self, address: &str) -> Result<WalletSnapshot, ExplorerError>;
}
