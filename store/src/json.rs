//! JSON-file backend with a per-document in-memory cache.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::document::{Document, DocumentKind, Slot};
use crate::error::StoreError;
use crate::{AccessKeyRegistry, Blacklist, WalletRegistry, WarningLedger};

/// The store: a data directory plus one cache slot per document.
pub struct JsonStore {
    dir: PathBuf,
    warnings: Slot<WarningLedger>,
    blacklist: Slot<Blacklist>,
    wallets: Slot<WalletRegistry>,
    access_keys: Slot<AccessKeyRegistry>,
}

impl JsonStore {
    /// Open (and if needed create) the data directory, making sure every
    /// document file exists with its empty default.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            dir: dir.into(),
            warnings: Slot::empty(),
            blacklist: Slot::empty(),
            wallets: Slot::empty(),
            access_keys: Slot::empty(),
        };
        store.ensure_file::<WarningLedger>()?;
        store.ensure_file::<Blacklist>()?;
        store.ensure_file::<WalletRegistry>()?;
        store.ensure_file::<AccessKeyRegistry>()?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the backing file for `kind`.
    pub fn path_of(&self, kind: DocumentKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Current contents of a document (from cache once loaded).
    pub fn load<D: Document>(&self) -> Result<D, StoreError> {
        let mut slot = D::slot(self).lock();
        if let Some(doc) = slot.as_ref() {
            return Ok(doc.clone());
        }
        let doc = self.read_document::<D>()?;
        *slot = Some(doc.clone());
        Ok(doc)
    }

    /// Overwrite a document on disk and in the cache.
    pub fn save<D: Document>(&self, doc: D) -> Result<(), StoreError> {
        let mut slot = D::slot(self).lock();
        self.write_document(&doc)?;
        *slot = Some(doc);
        Ok(())
    }

    /// Read-modify-write under the document's lock, persisting the result.
    ///
    /// Concurrent `update` calls on the same document never lose each
    /// other's changes. If the write fails the cache keeps the previous
    /// version.
    pub fn update<D, R>(&self, f: impl FnOnce(&mut D) -> R) -> Result<R, StoreError>
    where
        D: Document,
    {
        let mut slot = D::slot(self).lock();
        let mut doc = match slot.as_ref() {
            Some(doc) => doc.clone(),
            None => self.read_document::<D>()?,
        };
        let out = f(&mut doc);
        self.write_document(&doc)?;
        *slot = Some(doc);
        Ok(out)
    }

    fn ensure_file<D: Document>(&self) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        let path = self.path_of(D::KIND);
        if !path.exists() {
            let compact = serde_json::to_string(&D::default())?;
            fs::write(&path, compact).map_err(|e| StoreError::io(&path, e))?;
            debug!(document = %D::KIND, path = %path.display(), "created empty document");
        }
        Ok(path)
    }

    fn read_document<D: Document>(&self) -> Result<D, StoreError> {
        let path = self.ensure_file::<D>()?;
        let raw = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        match serde_json::from_str::<D>(&raw) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                warn!(
                    document = %D::KIND,
                    path = %path.display(),
                    error = %e,
                    "could not parse document, resetting it to empty"
                );
                let doc = D::default();
                self.write_document(&doc)?;
                Ok(doc)
            }
        }
    }

    fn write_document<D: Document>(&self, doc: &D) -> Result<(), StoreError> {
        let path = self.ensure_file::<D>()?;
        let json = serde_json::to_string_pretty(doc)?;
        fs::write(&path, json).map_err(|e| StoreError::io(&path, e))
    }
}

impl Document for WarningLedger {
    const KIND: DocumentKind = DocumentKind::Warnings;

    fn slot(store: &JsonStore) -> &Slot<Self> {
        &store.warnings
    }
}

impl Document for Blacklist {
    const KIND: DocumentKind = DocumentKind::Blacklist;

    fn slot(store: &JsonStore) -> &Slot<Self> {
        &store.blacklist
    }
}

impl Document for WalletRegistry {
    const KIND: DocumentKind = DocumentKind::Wallets;

    fn slot(store: &JsonStore) -> &Slot<Self> {
        &store.wallets
    }
}

impl Document for AccessKeyRegistry {
    const KIND: DocumentKind = DocumentKind::AccessKeys;

    fn slot(store: &JsonStore) -> &Slot<Self> {
        &store.access_keys
    }
}
