//! The document abstraction: one JSON file, one Rust type, one cache slot.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::json::JsonStore;

/// Which of the four persisted documents a type maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Warnings,
    Blacklist,
    Wallets,
    AccessKeys,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Warnings,
        DocumentKind::Blacklist,
        DocumentKind::Wallets,
        DocumentKind::AccessKeys,
    ];

    /// File name under the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Warnings => "warnings.json",
            Self::Blacklist => "blacklist.json",
            Self::Wallets => "wallets.json",
            Self::AccessKeys => "accessKeys.json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warnings => "warnings",
            Self::Blacklist => "blacklist",
            Self::Wallets => "wallets",
            Self::AccessKeys => "accessKeys",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A whole-file JSON document.
///
/// `Default` is the empty document written when the file is missing or
/// unreadable.
pub trait Document: Serialize + DeserializeOwned + Default + Clone + Send + 'static {
    const KIND: DocumentKind;

    /// The cache slot for this document inside a [`JsonStore`].
    fn slot(store: &JsonStore) -> &Slot<Self>;
}

/// Cache slot for one document. `None` until first loaded.
///
/// The mutex also serialises read-modify-write cycles on the document.
pub struct Slot<D>(Mutex<Option<D>>);

impl<D> Slot<D> {
    pub(crate) fn empty() -> Self {
        Self(Mutex::new(None))
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Option<D>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
