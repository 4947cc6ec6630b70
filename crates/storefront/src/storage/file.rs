//! Directory-backed storage: one JSON file per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::{ContextId, Storage, StorageError, StorageEvent, StorageListener, validate_key};
use crate::notify::{Listeners, Subscription};

/// Storage that keeps each key in `<dir>/<key>.json`.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// reader sees either the previous snapshot or the new one, never a mix.
/// Watchers only observe writes made through handles cloned from the same
/// `FileStorage`; writes by other processes are picked up by re-reading.
#[derive(Clone)]
pub struct FileStorage {
    dir: PathBuf,
    watchers: Arc<Listeners<StorageEvent>>,
}

impl FileStorage {
    /// Create a storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            watchers: Arc::new(Listeners::new()),
        }
    }

    /// Root directory of this storage.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid file name.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn io_error(path: &Path, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_owned(),
            source,
        }
    }
}

impl std::fmt::Debug for FileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorage")
            .field("dir", &self.dir)
            .field("watchers", &self.watchers.len())
            .finish()
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }

    fn set(&self, origin: ContextId, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(&self.dir, e))?;

        let tmp = self.dir.join(format!(".{key}.{}.tmp", Uuid::new_v4().simple()));
        std::fs::write(&tmp, value).map_err(|e| Self::io_error(&tmp, e))?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(Self::io_error(&path, e));
        }
        debug!(path = %path.display(), bytes = value.len(), "snapshot written");

        self.watchers.emit(&StorageEvent {
            key: key.to_owned(),
            new_value: Some(value.to_owned()),
            origin,
        });
        Ok(())
    }

    fn remove(&self, origin: ContextId, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                self.watchers.emit(&StorageEvent {
                    key: key.to_owned(),
                    new_value: None,
                    origin,
                });
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }

    fn watch(&self, listener: StorageListener) -> Subscription {
        self.watchers.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("data"));
        let ctx = ContextId::new();

        assert_eq!(storage.get("catalog").unwrap(), None);
        storage.set(ctx, "catalog", "[1]").unwrap();
        storage.set(ctx, "catalog", "[1,2]").unwrap();
        assert_eq!(storage.get("catalog").unwrap().as_deref(), Some("[1,2]"));
        assert!(dir.path().join("data/catalog.json").exists());

        storage.remove(ctx, "catalog").unwrap();
        storage.remove(ctx, "catalog").unwrap();
        assert_eq!(storage.get("catalog").unwrap(), None);
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set(ContextId::new(), "catalog", "[]").unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["catalog.json".to_string()]);
    }

    #[test]
    fn test_clones_share_watchers() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let _watch = storage.watch(Box::new(move |_: &StorageEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        storage.clone().set(ContextId::new(), "catalog", "[]").unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_path_for_rejects_traversal() {
        let storage = FileStorage::new("/tmp/unused");
        assert!(storage.path_for("../escape").is_err());
    }
}
