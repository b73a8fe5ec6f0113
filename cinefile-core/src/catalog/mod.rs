//! cinefile catalog - browsing the remote movie database
//!
//! # Overview
//!
//! The catalog side lets users:
//! - Browse popular movies, search by keyword, or discover by genre/year
//! - Page through results (the provider serves at most 500 pages)
//! - Open a detail record with cast, trailer and similar movies
//!
//! # Architecture
//!
//! ```text
//! BrowseQuery (text, page, genre, year)
//!     │ resolve(): precedence + page clamp
//!     ▼
//! MovieQuery ──▶ MetadataProvider (TmdbClient over HTTPS)
//!                     │
//!                     ▼
//!              MoviePage / MovieDetails ──▶ ImageUrls (CDN composition)
//! ```
//!
//! [`BrowseSession`] ties these together for an interactive view and drops
//! responses that arrive after a newer navigation.

mod client;
mod images;
mod models;
mod pagination;
mod query;
mod session;

pub use client::{fetch_favorites, MetadataProvider, TmdbClient};
pub use images::{image_url, ImageSize, ImageUrls};
pub use models::{
    CastMember, Credits, Genre, GenreList, MovieDetails, MoviePage, MovieSummary, Video,
    VideoList, TOP_CAST_LIMIT,
};
pub use pagination::PageInfo;
pub use query::{
    available_years, clamp_page, BrowseQuery, MovieQuery, QueryMode, EARLIEST_YEAR, MAX_PAGE,
};
pub use session::{failure_message, BrowseSession, ViewState, LOAD_FAILED_MESSAGE};
