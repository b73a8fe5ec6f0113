//! Composition root shared by every command
//!
//! Resolves paths and configuration once, then hands out the favorites store
//! and the metadata provider to the handlers that need them.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use cinefile_core::catalog::{ImageUrls, TmdbClient};
use cinefile_core::config::CinefileConfig;
use cinefile_core::favorites::{
    FavoritesStorage, FavoritesStore, FileStorage, MemoryStorage, FAVORITES_KEY,
};
use cinefile_core::paths::CinefilePaths;

/// Favorites store as used by the CLI: file-backed or session-only
pub type CliFavorites = FavoritesStore<Box<dyn FavoritesStorage>>;

pub struct AppContext {
    pub paths: CinefilePaths,
    pub config: CinefileConfig,
    pub config_path: PathBuf,
    /// False with `--no-persist`: favorites changes last for this invocation only
    pub persist: bool,
}

impl AppContext {
    pub fn new(
        config_override: Option<PathBuf>,
        language: Option<String>,
        persist: bool,
    ) -> Result<Self> {
        let paths = CinefilePaths::discover().context("Failed to resolve cinefile directories")?;
        let config_path = config_override.unwrap_or_else(|| paths.config_file());
        let config = CinefileConfig::load_from_path(&config_path).with_language(language);

        debug!(
            "Config: {} (language {}), data dir: {}",
            config_path.display(),
            config.language,
            paths.data_dir.display()
        );

        Ok(Self {
            paths,
            config,
            config_path,
            persist,
        })
    }

    pub fn favorites_path(&self) -> PathBuf {
        self.paths.favorites_file(FAVORITES_KEY)
    }

    /// Build the favorites store for this invocation
    ///
    /// Session-only mode starts from whatever is on disk but never writes back.
    pub fn favorites(&self) -> CliFavorites {
        let path = self.favorites_path();
        let storage: Box<dyn FavoritesStorage> = if self.persist {
            Box::new(FileStorage::at_path(path))
        } else {
            let storage = match std::fs::read_to_string(&path) {
                Ok(content) => MemoryStorage::with_raw(&content),
                Err(_) => MemoryStorage::new(),
            };
            Box::new(storage)
        };
        FavoritesStore::new(storage)
    }

    pub fn provider(&self) -> Result<TmdbClient> {
        TmdbClient::new(&self.config).context("Failed to set up the movie database client")
    }

    pub fn images(&self) -> ImageUrls {
        ImageUrls::new(self.config.image_base_url.clone())
    }
}

/// Print a one-line note when favorites could not be saved
pub fn report_degraded(store: &CliFavorites) {
    if store.is_persistence_degraded() {
        eprintln!(
            "Note: favorites could not be saved to {}; changes last for this session only.",
            store.storage().describe()
        );
    }
}
