//! cinefile configuration
//!
//! ## Configuration Sources (in precedence order)
//!
//! 1. CLI flags (`--language`, `--config`)
//! 2. `config.yaml` in the config directory (or `$CINEFILE_HOME/config.yaml`)
//! 3. Built-in defaults
//!
//! The API key is never stored in the file. It is read from the environment
//! variable named by `api_key_env` (default `TMDB_API_KEY`).
//!
//! ```yaml
//! language: en-US
//! timeout_seconds: 30
//! api_key_env: TMDB_API_KEY
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default TMDB v3 API root
pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default TMDB image CDN root
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Top-level cinefile configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CinefileConfig {
    /// Root of the metadata API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Root of the image CDN
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Language tag sent with every request
    #[serde(default = "default_language")]
    pub language: String,

    /// Environment variable name containing the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Timeout for provider calls in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for CinefileConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_api_key_env() -> String {
    "TMDB_API_KEY".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl CinefileConfig {
    /// Load config from a file, falling back to defaults
    ///
    /// A missing file is normal. An unreadable or unparseable file is logged
    /// and replaced by defaults so browsing still works.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        let config = match std::fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => Self::default(),
            Ok(content) => match serde_yaml_ng::from_str::<Self>(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        };

        config.normalized()
    }

    /// Override the language tag (from the `--language` flag)
    pub fn with_language(mut self, language: Option<String>) -> Self {
        if let Some(language) = language.filter(|l| !l.trim().is_empty()) {
            self.language = language;
        }
        self
    }

    /// Read the API key from the configured environment variable
    ///
    /// Blank values count as missing.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    fn normalized(mut self) -> Self {
        if self.timeout_seconds == 0 {
            tracing::warn!("Configured timeout_seconds=0 is invalid; using minimum of 1 second");
            self.timeout_seconds = 1;
        }
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        self.image_base_url = self.image_base_url.trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = CinefileConfig::load_from_path(&temp_dir.path().join("config.yaml"));
        assert_eq!(config, CinefileConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "language: fr-FR\napi_base_url: http://localhost:9999/3/\n").unwrap();

        let config = CinefileConfig::load_from_path(&path);
        assert_eq!(config.language, "fr-FR");
        assert_eq!(config.api_base_url, "http://localhost:9999/3");
        assert_eq!(config.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_garbage_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "language: [unclosed").unwrap();

        let config = CinefileConfig::load_from_path(&path);
        assert_eq!(config, CinefileConfig::default());
    }

    #[test]
    fn test_zero_timeout_is_raised() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "timeout_seconds: 0\n").unwrap();

        assert_eq!(CinefileConfig::load_from_path(&path).timeout_seconds, 1);
    }

    #[test]
    fn test_blank_language_override_is_ignored() {
        let config = CinefileConfig::default().with_language(Some("  ".to_string()));
        assert_eq!(config.language, "en-US");
    }

    #[test]
    #[serial]
    fn test_api_key_from_env() {
        let config = CinefileConfig {
            api_key_env: "CINEFILE_TEST_API_KEY".to_string(),
            ..Default::default()
        };

        std::env::remove_var("CINEFILE_TEST_API_KEY");
        assert_eq!(config.api_key(), None);

        std::env::set_var("CINEFILE_TEST_API_KEY", "   ");
        assert_eq!(config.api_key(), None);

        std::env::set_var("CINEFILE_TEST_API_KEY", "abc123");
        assert_eq!(config.api_key(), Some("abc123".to_string()));

        std::env::remove_var("CINEFILE_TEST_API_KEY");
    }
}
