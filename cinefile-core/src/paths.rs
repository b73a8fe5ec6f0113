//! Locations of the config file and the favorites file
//!
//! `CINEFILE_HOME` puts both under one directory. Otherwise the platform
//! config and data directories are used.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable that relocates all cinefile files under one directory
pub const HOME_ENV: &str = "CINEFILE_HOME";

/// Path management for cinefile configuration and data files
#[derive(Debug, Clone)]
pub struct CinefilePaths {
    /// Configuration directory (holds config.yaml)
    pub config_dir: PathBuf,
    /// Data directory (holds the favorites file)
    pub data_dir: PathBuf,
}

impl CinefilePaths {
    /// Resolve paths, honoring `CINEFILE_HOME` before platform directories
    pub fn discover() -> Result<Self, ConfigError> {
        match std::env::var_os(HOME_ENV) {
            Some(home) if !home.is_empty() => {
                tracing::debug!("Using {} override: {:?}", HOME_ENV, home);
                Ok(Self::under(Path::new(&home)))
            }
            _ => Self::new(),
        }
    }

    /// Create new paths instance using standard directories
    pub fn new() -> Result<Self, ConfigError> {
        if let Some(dirs) = ProjectDirs::from("io", "cinefile", "cinefile") {
            return Ok(Self {
                config_dir: dirs.config_dir().to_path_buf(),
                data_dir: dirs.data_dir().to_path_buf(),
            });
        }

        let config_dir = dirs::config_dir()
            .map(|d| d.join("cinefile"))
            .ok_or(ConfigError::NoDirectory("config"))?;
        let data_dir = dirs::data_dir()
            .map(|d| d.join("cinefile"))
            .unwrap_or_else(|| config_dir.clone());

        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Keep config and data together under a single root
    pub fn under(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            data_dir: root.to_path_buf(),
        }
    }

    /// Get the config file path
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.yaml")
    }

    /// Get the favorites file path for a storage key
    pub fn favorites_file(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}
