//! Browse session - the listing view and its request ordering
//!
//! Every navigation takes a ticket from a generation counter. When a response
//! arrives, it is applied only if no newer navigation has started since;
//! otherwise it is dropped. Superseded requests are not cancelled.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::client::MetadataProvider;
use super::models::MoviePage;
use super::pagination::PageInfo;
use super::query::BrowseQuery;
use crate::error::CatalogError;

/// Message shown for any network or provider failure
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load movies.";

/// What the listing view currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Loaded { page: MoviePage, info: PageInfo },
    Failed { message: String },
}

/// User-facing message for a failed listing request
pub fn failure_message(error: &CatalogError) -> String {
    if error.is_configuration() {
        error.to_string()
    } else {
        LOAD_FAILED_MESSAGE.to_string()
    }
}

#[derive(Debug)]
struct Current {
    query: BrowseQuery,
    view: ViewState,
}

/// Listing view bound to one provider
pub struct BrowseSession<P: MetadataProvider> {
    provider: P,
    generation: AtomicU64,
    current: Mutex<Current>,
}

impl<P: MetadataProvider> BrowseSession<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            generation: AtomicU64::new(0),
            current: Mutex::new(Current {
                query: BrowseQuery::default(),
                view: ViewState::Idle,
            }),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Query of the most recent navigation
    pub fn query(&self) -> BrowseQuery {
        self.lock().query.clone()
    }

    pub fn view(&self) -> ViewState {
        self.lock().view.clone()
    }

    /// Load `query` into the view
    ///
    /// Returns the new view state, or `None` when a newer navigation started
    /// while this one was in flight and its result was discarded.
    pub async fn navigate(&self, query: BrowseQuery) -> Option<ViewState> {
        let request = query.resolve();

        let ticket = {
            let mut current = self.lock();
            current.query = query;
            current.view = ViewState::Loading;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        tracing::debug!("Navigation #{} -> {}", ticket, request);
        let result = self.provider.fetch_movies(&request).await;

        let view = match result {
            Ok(page) => {
                let info = PageInfo::from_page(&page);
                ViewState::Loaded { page, info }
            }
            Err(e) => {
                let message = failure_message(&e);
                tracing::error!("Failed to fetch movies: {:#}", anyhow::Error::new(e));
                ViewState::Failed { message }
            }
        };

        let mut current = self.lock();
        // Compared under the lock so a newer navigation cannot slip in between
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!("Discarding stale response for navigation #{}", ticket);
            return None;
        }
        current.view = view.clone();
        Some(view)
    }

    /// Move to another page of the current query
    pub async fn go_to_page(&self, page: u32) -> Option<ViewState> {
        let query = self.query().with_page(page);
        self.navigate(query).await
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Current> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}
