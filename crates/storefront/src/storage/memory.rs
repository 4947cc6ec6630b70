//! In-memory storage shared between handles.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::{ContextId, Storage, StorageError, StorageEvent, StorageListener, validate_key};
use crate::notify::{Listeners, Subscription};

/// Process-local storage. Clones share the same entries and watchers, the way
/// tabs of one browser share local storage.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    entries: RwLock<HashMap<String, String>>,
    watchers: Listeners<StorageEvent>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys = self
            .inner
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("MemoryStorage")
            .field("keys", &keys)
            .field("watchers", &self.inner.watchers.len())
            .finish()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self
            .inner
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, origin: ContextId, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.inner
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());

        self.inner.watchers.emit(&StorageEvent {
            key: key.to_owned(),
            new_value: Some(value.to_owned()),
            origin,
        });
        Ok(())
    }

    fn remove(&self, origin: ContextId, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let removed = self
            .inner
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);

        if removed.is_some() {
            self.inner.watchers.emit(&StorageEvent {
                key: key.to_owned(),
                new_value: None,
                origin,
            });
        }
        Ok(())
    }

    fn watch(&self, listener: StorageListener) -> Subscription {
        self.inner.watchers.subscribe(listener)
    }
}
