//! Metadata provider client
//!
//! The [`MetadataProvider`] trait is the seam between browsing logic and the
//! remote catalog; [`TmdbClient`] implements it over HTTPS.

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace, warn};

use super::models::{Genre, GenreList, MovieDetails, MoviePage, MovieSummary};
use super::query::MovieQuery;
use crate::config::CinefileConfig;
use crate::error::CatalogError;
use crate::favorites::MovieId;

/// Sections appended to a detail request
const DETAIL_APPENDS: &str = "credits,videos,similar";

/// Read-only access to the movie catalog
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Popular, search or discovery listing
    async fn fetch_movies(&self, query: &MovieQuery) -> Result<MoviePage, CatalogError>;

    /// Detail record with credits, videos and similar movies
    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, CatalogError>;

    /// Plain detail record, used for favorites listings
    async fn movie_summary(&self, id: MovieId) -> Result<MovieSummary, CatalogError>;

    /// Genres usable as discovery filters
    async fn genres(&self) -> Result<Vec<Genre>, CatalogError>;

    /// Provider identifier for logging
    fn name(&self) -> &'static str;
}

/// TMDB v3 API client
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    language: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl TmdbClient {
    /// Create a client, reading the API key from the configured environment variable
    ///
    /// A missing key is not an error here; it is reported by the first fetch.
    pub fn new(config: &CinefileConfig) -> Result<Self, CatalogError> {
        Self::with_api_key(config, config.api_key())
    }

    /// Create a client with an explicit key
    pub fn with_api_key(
        config: &CinefileConfig,
        api_key: Option<String>,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cinefile/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|source| CatalogError::Client { source })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_key_env: config.api_key_env.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, CatalogError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| CatalogError::MissingApiKey {
                env: self.api_key_env.clone(),
            })
    }

    /// GET `path` with `params`, decoding the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        // Checked before anything touches the network
        let api_key = self.api_key()?;

        let display_url = self.display_url(path, params);
        let mut url = Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            warn!("Invalid provider URL {}: {}", display_url, e);
            CatalogError::InvalidUrl {
                url: display_url.clone(),
            }
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", api_key);
            pairs.append_pair("language", &self.language);
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        debug!("GET {}", display_url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CatalogError::Request {
                url: display_url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Provider error: {} from {} - {}", status, display_url, body);
            return Err(CatalogError::Http {
                status: status.as_u16(),
                url: display_url,
            });
        }

        let value = response
            .json::<T>()
            .await
            .map_err(|source| CatalogError::Decode {
                url: display_url.clone(),
                source,
            })?;

        trace!("Decoded response from {}", display_url);
        Ok(value)
    }

    /// URL for logs and errors; never contains the API key
    fn display_url(&self, path: &str, params: &[(&str, String)]) -> String {
        let query: Vec<String> = std::iter::once(format!("language={}", self.language))
            .chain(params.iter().map(|(k, v)| format!("{k}={v}")))
            .collect();
        format!("{}{}?{}", self.base_url, path, query.join("&"))
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn fetch_movies(&self, query: &MovieQuery) -> Result<MoviePage, CatalogError> {
        debug!("Fetching {}", query);
        self.get_json(query.endpoint(), &query.params()).await
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, CatalogError> {
        self.get_json(
            &format!("/movie/{id}"),
            &[("append_to_response", DETAIL_APPENDS.to_string())],
        )
        .await
    }

    async fn movie_summary(&self, id: MovieId) -> Result<MovieSummary, CatalogError> {
        self.get_json(&format!("/movie/{id}"), &[]).await
    }

    async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let list: GenreList = self.get_json("/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

/// Fetch summaries for favorite ids concurrently
///
/// Results keep the order of `ids`. Ids that fail to load are logged and
/// skipped, except a missing API key which fails the whole call.
pub async fn fetch_favorites<P: MetadataProvider + ?Sized>(
    provider: &P,
    ids: &[MovieId],
) -> Result<Vec<MovieSummary>, CatalogError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let results = join_all(ids.iter().map(|id| provider.movie_summary(*id))).await;

    let mut movies = Vec::with_capacity(ids.len());
    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(movie) => movies.push(movie),
            Err(e) if e.is_configuration() => return Err(e),
            Err(e) => warn!("Failed to load favorite {} from {}: {}", id, provider.name(), e),
        }
    }
    Ok(movies)
}
