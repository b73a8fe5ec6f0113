//! The favorites store and its in-memory set

use serde::{Deserialize, Serialize};

use super::storage::{EmptyReason, FavoritesStorage, StorageRead};
use super::MovieId;

/// Insertion-ordered set of favorite ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: Vec<MovieId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.ids.contains(&id)
    }

    /// Append `id` unless present. Returns whether the set changed.
    pub fn insert(&mut self, id: MovieId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Drop `id` if present. Returns whether the set changed.
    pub fn remove(&mut self, id: MovieId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    pub fn as_slice(&self) -> &[MovieId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<MovieId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = MovieId>>(iter: I) -> Self {
        let mut set = FavoriteSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Owns the favorites for one running client
///
/// Constructed once by the application and passed to whatever needs it.
/// `Uninitialized` until [`FavoritesStore::load`]; every other operation loads
/// on first use.
pub struct FavoritesStore<S: FavoritesStorage> {
    storage: S,
    set: Option<FavoriteSet>,
    degraded: bool,
}

impl<S: FavoritesStorage> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            set: None,
            degraded: false,
        }
    }

    /// Hydrate from storage
    ///
    /// Missing or malformed data yields an empty set. Calling `load` again
    /// re-reads storage, dropping any session-only changes.
    pub fn load(&mut self) -> &FavoriteSet {
        let ids = match self.storage.read() {
            StorageRead::Loaded(ids) => {
                tracing::debug!(
                    "Loaded {} favorites from {}",
                    ids.len(),
                    self.storage.describe()
                );
                ids
            }
            StorageRead::Empty(EmptyReason::Missing) => {
                tracing::debug!("No favorites stored at {}", self.storage.describe());
                Vec::new()
            }
            StorageRead::Empty(EmptyReason::Malformed(reason)) => {
                tracing::warn!(
                    "Ignoring malformed favorites at {}: {}",
                    self.storage.describe(),
                    reason
                );
                Vec::new()
            }
            StorageRead::Empty(EmptyReason::Unavailable(reason)) => {
                tracing::warn!(
                    "Favorites storage {} is unavailable: {}",
                    self.storage.describe(),
                    reason
                );
                Vec::new()
            }
        };

        self.set.insert(ids.into_iter().collect())
    }

    fn ready(&mut self) -> &mut FavoriteSet {
        if self.set.is_none() {
            self.load();
        }
        self.set.get_or_insert_with(FavoriteSet::new)
    }

    /// Current favorites
    pub fn favorites(&mut self) -> &FavoriteSet {
        self.ready()
    }

    pub fn ids(&mut self) -> Vec<MovieId> {
        self.ready().as_slice().to_vec()
    }

    pub fn contains(&mut self, id: MovieId) -> bool {
        self.ready().contains(id)
    }

    pub fn len(&mut self) -> usize {
        self.ready().len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.ready().is_empty()
    }

    /// Add a favorite and persist the full set
    ///
    /// Returns whether the id was newly added.
    pub fn add(&mut self, id: MovieId) -> bool {
        let changed = self.ready().insert(id);
        self.persist();
        changed
    }

    /// Remove a favorite and persist the full set
    ///
    /// Returns whether the id was present.
    pub fn remove(&mut self, id: MovieId) -> bool {
        let changed = self.ready().remove(id);
        self.persist();
        changed
    }

    /// Flip membership of `id`. Returns whether it is now a favorite.
    pub fn toggle(&mut self, id: MovieId) -> bool {
        if self.contains(id) {
            self.remove(id);
            false
        } else {
            self.add(id);
            true
        }
    }

    /// True while the last write failed and favorites live only in memory
    pub fn is_persistence_degraded(&self) -> bool {
        self.degraded
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) {
        let ids = self.ready().as_slice().to_vec();
        match self.storage.write(&ids) {
            Ok(()) => {
                if self.degraded {
                    tracing::info!("Favorites storage is writable again");
                }
                self.degraded = false;
            }
            Err(e) => {
                tracing::warn!(
                    "Keeping favorites for this session only; write to {} failed: {:#}",
                    self.storage.describe(),
                    anyhow::Error::new(e)
                );
                self.degraded = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::MemoryStorage;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_favorite_set_keeps_insertion_order() {
        let mut set = FavoriteSet::new();
        assert!(set.insert(3));
        assert!(set.insert(1));
        assert!(!set.insert(3));
        assert!(set.insert(2));

        assert_eq!(set.as_slice(), &[3, 1, 2]);
        assert!(set.remove(1));
        assert!(!set.remove(1));
        assert_eq!(set.as_slice(), &[3, 2]);
    }

    #[test]
    fn test_favorite_set_serializes_as_array() {
        let set: FavoriteSet = [27205, 550, 27205].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[27205,550]");
    }

    #[test]
    fn test_operations_before_load_auto_initialize() {
        let storage = MemoryStorage::with_raw("[7]");
        let mut store = FavoritesStore::new(storage);

        assert!(store.contains(7));
        assert!(!store.contains(8));
    }

    #[test]
    fn test_add_and_remove_report_changes() {
        let mut store = FavoritesStore::new(MemoryStorage::new());
        store.load();

        assert!(store.add(1));
        assert!(!store.add(1));
        assert!(store.remove(1));
        assert!(!store.remove(1));
    }

    #[test]
    fn test_toggle() {
        let storage = MemoryStorage::new();
        let mut store = FavoritesStore::new(storage.clone());

        assert!(store.toggle(42));
        assert_eq!(storage.raw().as_deref(), Some("[42]"));
        assert!(!store.toggle(42));
        assert_eq!(storage.raw().as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_failure_degrades_to_session_only() {
        let storage = MemoryStorage::with_raw("[1]");
        let mut store = FavoritesStore::new(storage.clone());
        store.load();

        storage.set_fail_writes(true);
        assert!(store.add(2));
        assert!(store.contains(2));
        assert!(store.is_persistence_degraded());
        assert_eq!(storage.raw().as_deref(), Some("[1]"));

        // The next successful write catches storage up with memory
        storage.set_fail_writes(false);
        store.add(3);
        assert!(!store.is_persistence_degraded());
        assert_eq!(storage.raw().as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_reload_discards_session_only_changes() {
        let storage = MemoryStorage::with_raw("[1]");
        let mut store = FavoritesStore::new(storage.clone());
        storage.set_fail_writes(true);
        store.add(2);

        assert_eq!(store.load().as_slice(), &[1]);
    }
}
