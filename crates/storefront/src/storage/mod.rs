//! Key-value persistence boundary.
//!
//! A [`Storage`] holds whole string values under string keys, like browser
//! local storage. Every write is reported to watchers as a [`StorageEvent`]
//! tagged with the [`ContextId`] of the writer, so each browsing context can
//! tell its own writes apart from writes made elsewhere.

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::notify::Subscription;

/// Identity of one browsing context (a tab, a CLI invocation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(Uuid);

impl ContextId {
    /// A fresh random context ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A completed write to a storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// Key that changed.
    pub key: String,
    /// Value after the write; `None` when the key was removed.
    pub new_value: Option<String>,
    /// Context that performed the write.
    pub origin: ContextId,
}

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Callback invoked for each storage write.
pub type StorageListener = Box<dyn Fn(&StorageEvent) + Send + Sync>;

/// A key-value store addressed by string keys.
///
/// Values are replaced whole; there is no partial update.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key` and notify watchers.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, origin: ContextId, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` and notify watchers. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, origin: ContextId, key: &str) -> Result<(), StorageError>;

    /// Watch every write made through any handle to this storage.
    fn watch(&self, listener: StorageListener) -> Subscription;
}

/// Keys must be usable as file names on every backend.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("freshlife_products").is_ok());
        assert!(validate_key("catalog-v2.backup").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("with space").is_err());
    }

    #[test]
    fn test_context_ids_are_unique() {
        assert_ne!(ContextId::new(), ContextId::new());
    }
}
