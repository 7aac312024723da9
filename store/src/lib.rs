//! File-backed JSON documents for the Warden bot.
//!
//! Four independent documents (warnings, blacklist, wallets, access keys)
//! live as whole JSON files under one data directory. Each is read once into
//! an in-memory cache and rewritten in full on every change. The rest of the
//! codebase reaches them only through [`JsonStore`] and the [`Document`]
//! trait, so the backend can change without touching callers.

pub mod access_keys;
pub mod blacklist;
pub mod document;
pub mod error;
pub mod json;
pub mod wallets;
pub mod warnings;

pub use access_keys::{AccessKey, AccessKeyRegistry};
pub use blacklist::{Blacklist, BlacklistKind};
pub use document::{Document, DocumentKind, Slot};
pub use error::StoreError;
pub use json::JsonStore;
pub use wallets::WalletRegistry;
pub use warnings::WarningLedger;
