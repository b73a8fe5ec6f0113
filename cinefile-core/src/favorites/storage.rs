//! Durable storage for the favorites list
//!
//! The stored value is a JSON array of integers under a fixed key. Reads are
//! typed rather than fallible: anything that cannot be understood comes back
//! as [`StorageRead::Empty`] with the reason attached.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::MovieId;
use crate::error::StorageError;

/// Fixed storage key for the favorites list
pub const FAVORITES_KEY: &str = "movie-app-favorites";

/// Result of reading the stored favorites
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageRead {
    /// A well-formed list (duplicates already collapsed)
    Loaded(Vec<MovieId>),
    /// Nothing usable was stored
    Empty(EmptyReason),
}

/// Why a read produced no favorites
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// Nothing has been stored yet
    Missing,
    /// Stored data exists but is not a JSON array of ids
    Malformed(String),
    /// The storage could not be read at all
    Unavailable(String),
}

/// Backing store for the favorites list
pub trait FavoritesStorage {
    /// Read the stored list. Never fails; see [`StorageRead`].
    fn read(&self) -> StorageRead;

    /// Overwrite the stored list with `ids`
    fn write(&self, ids: &[MovieId]) -> Result<(), StorageError>;

    /// Where the data lives, for display and logging
    fn describe(&self) -> String;
}

impl<S: FavoritesStorage + ?Sized> FavoritesStorage for Box<S> {
    fn read(&self) -> StorageRead {
        (**self).read()
    }

    fn write(&self, ids: &[MovieId]) -> Result<(), StorageError> {
        (**self).write(ids)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Parse a stored payload
///
/// Accepts only a JSON array of non-negative integers. Duplicate ids are
/// collapsed, keeping the first occurrence.
pub fn parse_favorites(content: &str) -> StorageRead {
    if content.trim().is_empty() {
        return StorageRead::Empty(EmptyReason::Malformed("stored value is empty".to_string()));
    }

    match serde_json::from_str::<Vec<MovieId>>(content) {
        Ok(ids) => {
            let mut seen = HashSet::with_capacity(ids.len());
            let unique = ids.into_iter().filter(|id| seen.insert(*id)).collect();
            StorageRead::Loaded(unique)
        }
        Err(e) => StorageRead::Empty(EmptyReason::Malformed(e.to_string())),
    }
}

fn serialize(ids: &[MovieId]) -> Result<String, StorageError> {
    serde_json::to_string(ids).map_err(|source| StorageError::Serialize { source })
}

/// Favorites stored as a JSON file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Store favorites in `<dir>/<FAVORITES_KEY>.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::at_path(dir.join(format!("{FAVORITES_KEY}.json")))
    }

    /// Store favorites at an explicit file path
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStorage for FileStorage {
    fn read(&self) -> StorageRead {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => parse_favorites(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                StorageRead::Empty(EmptyReason::Missing)
            }
            Err(e) => StorageRead::Empty(EmptyReason::Unavailable(e.to_string())),
        }
    }

    fn write(&self, ids: &[MovieId]) -> Result<(), StorageError> {
        let content = serialize(ids)?;
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        std::fs::create_dir_all(dir).map_err(write_err)?;

        // Write beside the target and rename so a crash never leaves half a file
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        temp.write_all(content.as_bytes()).map_err(write_err)?;
        temp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::trace!("Wrote {} favorites to {}", ids.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process storage
///
/// Clones share the same cell, so a test can keep a handle and inspect what
/// the store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryCell>>,
}

#[derive(Debug, Default)]
struct MemoryCell {
    value: Option<String>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw stored value, as if written by an earlier session
    pub fn with_raw(value: &str) -> Self {
        let storage = Self::new();
        storage.lock().value = Some(value.to_string());
        storage
    }

    /// Make subsequent writes fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// The raw stored value, if any
    pub fn raw(&self) -> Option<String> {
        self.lock().value.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryCell> {
        // A poisoned cell still holds a usable string
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FavoritesStorage for MemoryStorage {
    fn read(&self) -> StorageRead {
        match self.lock().value.as_deref() {
            Some(content) => parse_favorites(content),
            None => StorageRead::Empty(EmptyReason::Missing),
        }
    }

    fn write(&self, ids: &[MovieId]) -> Result<(), StorageError> {
        let mut cell = self.lock();
        if cell.fail_writes {
            return Err(StorageError::Unavailable("memory storage is read-only".to_string()));
        }
        cell.value = Some(serialize(ids)?);
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory (session only)".to_string()
    }
}
