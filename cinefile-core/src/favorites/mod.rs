//! Favorites - the persisted list of bookmarked movie ids
//!
//! The store keeps an insertion-ordered, duplicate-free list of provider ids
//! in memory and overwrites the stored copy after every mutation.
//!
//! ```text
//! FavoritesStore ── read() at load ──▶ FavoritesStorage
//!        │                              ├── FileStorage   (movie-app-favorites.json)
//!        └── write(all ids) per add/remove └── MemoryStorage (session-only, tests)
//! ```
//!
//! Storage is best effort: a failed write keeps the change in memory and the
//! session continues with session-only favorites.

mod storage;
mod store;

pub use storage::{
    parse_favorites, EmptyReason, FavoritesStorage, FileStorage, MemoryStorage, StorageRead,
    FAVORITES_KEY,
};
pub use store::{FavoriteSet, FavoritesStore};

/// Provider id of a catalog item
pub type MovieId = u64;
