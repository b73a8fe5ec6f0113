use cinefile_core::favorites::{
    FavoritesStorage, FavoritesStore, FileStorage, MemoryStorage, MovieId, StorageRead,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

/// Expected contents after applying add/remove operations in order
fn fold(ops: &[(bool, MovieId)]) -> Vec<MovieId> {
    let mut expected: Vec<MovieId> = Vec::new();
    for (add, id) in ops {
        if *add {
            if !expected.contains(id) {
                expected.push(*id);
            }
        } else {
            expected.retain(|existing| existing != id);
        }
    }
    expected
}

#[test]
fn test_operation_sequence_matches_fold() {
    let ops = [
        (true, 550),
        (true, 27205),
        (true, 550),
        (false, 13),
        (true, 13),
        (false, 550),
        (true, 680),
        (false, 27205),
        (true, 550),
    ];

    let storage = MemoryStorage::new();
    let mut store = FavoritesStore::new(storage.clone());
    for (add, id) in ops {
        if add {
            store.add(id);
        } else {
            store.remove(id);
        }
    }

    let expected = fold(&ops);
    assert_eq!(store.ids(), expected);
    assert_eq!(expected, vec![13, 680, 550]);

    // Persisted value mirrors memory after every operation
    assert_eq!(storage.read(), StorageRead::Loaded(expected));
}

#[test]
fn test_add_then_remove_restores_original() {
    let storage = MemoryStorage::with_raw("[1, 2, 3]");
    let mut store = FavoritesStore::new(storage.clone());
    let before = store.ids();

    assert!(store.add(42));
    assert!(store.contains(42));
    assert!(store.remove(42));

    assert_eq!(store.ids(), before);
    assert_eq!(storage.raw().as_deref(), Some("[1,2,3]"));
}

#[test]
fn test_membership_queries_never_duplicate() {
    let mut store = FavoritesStore::new(MemoryStorage::new());
    for _ in 0..3 {
        store.add(7);
    }
    assert_eq!(store.len(), 1);
    assert!(store.contains(7));
    assert!(!store.contains(8));
}

#[test]
fn test_file_storage_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let mut store = FavoritesStore::new(FileStorage::in_dir(temp_dir.path()));
        store.add(27205);
        store.add(550);
        store.remove(27205);
        store.add(603);
    }

    let path = temp_dir.path().join("movie-app-favorites.json");
    assert_eq!(fs::read_to_string(&path).unwrap(), "[550,603]");

    let mut reopened = FavoritesStore::new(FileStorage::in_dir(temp_dir.path()));
    assert_eq!(reopened.ids(), vec![550, 603]);
}

#[test]
fn test_corrupted_file_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("movie-app-favorites.json");
    fs::write(&path, "{\"favorites\": [1, 2]}").unwrap();

    let mut store = FavoritesStore::new(FileStorage::in_dir(temp_dir.path()));
    assert!(store.is_empty());

    // First successful write replaces the corrupted payload
    store.add(550);
    assert_eq!(fs::read_to_string(&path).unwrap(), "[550]");
}

#[test]
fn test_missing_directory_is_created_on_write() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("data").join("cinefile");

    let mut store = FavoritesStore::new(FileStorage::in_dir(&nested));
    assert!(store.is_empty());
    store.add(11);

    assert!(nested.join("movie-app-favorites.json").exists());
    assert!(!store.is_persistence_degraded());
}

#[test]
fn test_end_to_end_session() {
    let storage = MemoryStorage::new();
    let mut store = FavoritesStore::new(storage.clone());
    assert!(store.is_empty());

    store.add(27205);
    assert_eq!(storage.raw().as_deref(), Some("[27205]"));
    assert!(store.contains(27205));

    store.add(27205);
    assert_eq!(store.ids(), vec![27205]);
    assert_eq!(storage.raw().as_deref(), Some("[27205]"));

    store.remove(550);
    assert_eq!(store.ids(), vec![27205]);
    assert_eq!(storage.raw().as_deref(), Some("[27205]"));

    store.remove(27205);
    assert!(store.is_empty());
    assert_eq!(storage.raw().as_deref(), Some("[]"));
}

#[test]
fn test_failed_writes_keep_session_state() {
    let storage = MemoryStorage::with_raw("[5]");
    let mut store = FavoritesStore::new(storage.clone());

    storage.set_fail_writes(true);
    assert!(store.add(6));
    assert!(store.is_persistence_degraded());
    assert_eq!(store.ids(), vec![5, 6]);
    assert_eq!(storage.raw().as_deref(), Some("[5]"));

    // Next mutation writes the whole set once storage recovers
    storage.set_fail_writes(false);
    store.add(7);
    assert!(!store.is_persistence_degraded());
    assert_eq!(storage.raw().as_deref(), Some("[5,6,7]"));
}
