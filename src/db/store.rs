//! JSON file storage for the entry collection.
//!
//! The whole collection lives in one document:
//! ```text
//! {
//!   "entries": {
//!     "2025-01-01": [
//!       { "id": "...", "name": "Apple", "calories": 95, "timestamp": "2025-01-01T08:00:00.000Z" }
//!     ]
//!   }
//! }
//! ```
//!
//! Every request loads the full document and mutating requests write it back
//! in full. An in-process mutex serializes these cycles.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use crate::models::Collection;

/// Errors that can occur reading or writing the store file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error reading or writing a file.
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The store file exists but is not a valid snapshot.
    #[error("Store file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize entries: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What a [`JsonStore::update`] closure did to the collection.
#[derive(Debug)]
pub enum Mutation<T> {
    /// The collection changed and must be written back.
    Save(T),
    /// Nothing changed; skip the write.
    Skip(T),
}

#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    entries: Collection,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    entries: &'a Collection,
}

/// Owner of the on-disk JSON document.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    /// Opens the store at `path`, creating an empty document if none exists.
    ///
    /// Fails if an existing file cannot be parsed; it is never overwritten.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            lock: Mutex::new(()),
        };

        let count = store.read(Collection::len)?;
        tracing::info!("Opened store {} ({} entries)", store.path.display(), count);

        Ok(store)
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full collection from disk.
    ///
    /// A missing file yields an empty collection, which is written back
    /// immediately. Callers outside this module should prefer [`read`] and
    /// [`update`], which hold the store lock.
    ///
    /// [`read`]: JsonStore::read
    /// [`update`]: JsonStore::update
    pub fn load(&self) -> Result<Collection, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice::<Snapshot>(&bytes)
                .map(|snapshot| snapshot.entries)
                .map_err(|source| StoreError::Corrupt {
                    path: self.path.clone(),
                    source,
                }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(
                    "No store file at {}, initializing empty store",
                    self.path.display()
                );
                let entries = Collection::new();
                self.save(&entries)?;
                Ok(entries)
            }
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    /// Replaces the file contents with `entries`.
    ///
    /// Writes to a temporary file and renames it over the target so a crash
    /// never leaves a truncated document behind.
    pub fn save(&self, entries: &Collection) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let bytes = serde_json::to_vec_pretty(&SnapshotRef { entries })?;

        let temp_path = self.path.with_extension("json.tmp");

        let mut file = File::create(&temp_path).map_err(|e| StoreError::io(&temp_path, e))?;
        file.write_all(&bytes)
            .map_err(|e| StoreError::io(&temp_path, e))?;
        file.sync_all()
            .map_err(|e| StoreError::io(&temp_path, e))?;

        // Rename to final path (atomic on most filesystems)
        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        Ok(())
    }

    /// Runs `f` against a freshly loaded collection while holding the lock.
    pub fn read<T>(&self, f: impl FnOnce(&Collection) -> T) -> Result<T, StoreError> {
        let _guard = self.lock();
        let entries = self.load()?;
        Ok(f(&entries))
    }

    /// Load-modify-save under the lock.
    ///
    /// The collection is written back only when `f` returns [`Mutation::Save`].
    pub fn update<T>(
        &self,
        f: impl FnOnce(&mut Collection) -> Mutation<T>,
    ) -> Result<T, StoreError> {
        let _guard = self.lock();
        let mut entries = self.load()?;

        match f(&mut entries) {
            Mutation::Save(value) => {
                self.save(&entries)?;
                Ok(value)
            }
            Mutation::Skip(value) => Ok(value),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded data is (), so a poisoned lock carries no broken state.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
