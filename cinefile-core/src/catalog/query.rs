//! Query construction
//!
//! Turns the browse state (search text, page, genre, year) into one of three
//! read-only listing requests. Text search wins over filters; filters alone
//! mean discovery; nothing at all means the popular listing.

use chrono::Datelike;
use reqwest::Url;
use std::fmt;

/// Highest page the provider will serve
pub const MAX_PAGE: u32 = 500;

/// Oldest year offered by the year filter
pub const EARLIEST_YEAR: i32 = 1950;

/// Browse state as carried by the command line or a query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseQuery {
    pub text: Option<String>,
    pub page: u32,
    pub genre: Option<u32>,
    pub year: Option<i32>,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self {
            text: None,
            page: 1,
            genre: None,
            year: None,
        }
    }
}

/// Which listing endpoint a query targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    Popular,
    Search { text: String },
    Discover { genre: Option<u32>, year: Option<i32> },
}

/// A resolved request: mode plus an in-range page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    pub mode: QueryMode,
    pub page: u32,
}

/// Clamp a requested page into `1..=MAX_PAGE`
pub fn clamp_page(page: u32) -> u32 {
    page.clamp(1, MAX_PAGE)
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

impl BrowseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw parameter strings, the way a URL carries them
    ///
    /// Empty values are absent. A page that does not parse becomes 1; a genre
    /// or year that does not parse is dropped, as is a year the filter does
    /// not offer.
    pub fn from_params(text: &str, page: &str, genre: &str, year: &str) -> Self {
        let page = non_blank(page)
            .and_then(|p| p.parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);

        let genre = non_blank(genre).and_then(|g| match g.parse::<u32>() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::debug!("Ignoring unparseable genre filter {:?}", g);
                None
            }
        });

        let year = non_blank(year).and_then(|y| match y.parse::<i32>() {
            Ok(year) if available_years().contains(&year) => Some(year),
            Ok(year) => {
                tracing::debug!("Ignoring year filter {} outside the offered range", year);
                None
            }
            Err(_) => {
                tracing::debug!("Ignoring unparseable year filter {:?}", y);
                None
            }
        });

        Self {
            text: non_blank(text).map(str::to_string),
            page,
            genre,
            year,
        }
    }

    /// Parse `query=..&page=..&genre=..&year=..`, with or without a leading `?`
    pub fn from_query_string(query_string: &str) -> Self {
        let trimmed = query_string.trim().trim_start_matches('?');
        let Ok(url) = Url::parse(&format!("cinefile://browse/?{trimmed}")) else {
            return Self::default();
        };

        let (mut text, mut page, mut genre, mut year) =
            (String::new(), String::new(), String::new(), String::new());
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "query" => text = value.into_owned(),
                "page" => page = value.into_owned(),
                "genre" => genre = value.into_owned(),
                "year" => year = value.into_owned(),
                other => tracing::debug!("Ignoring unknown browse parameter {:?}", other),
            }
        }

        Self::from_params(&text, &page, &genre, &year)
    }

    /// Render the state as a query string, omitting absent values
    pub fn to_query_string(&self) -> String {
        let mut url = match Url::parse("cinefile://browse/") {
            Ok(url) => url,
            Err(_) => return String::new(),
        };
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(text) = &self.text {
                pairs.append_pair("query", text);
            }
            pairs.append_pair("page", &self.page.to_string());
            if let Some(genre) = self.genre {
                pairs.append_pair("genre", &genre.to_string());
            }
            if let Some(year) = self.year {
                pairs.append_pair("year", &year.to_string());
            }
        }
        url.query().unwrap_or_default().to_string()
    }

    /// New text search: filters cleared, back to page 1
    pub fn with_search(&self, text: &str) -> Self {
        Self {
            text: non_blank(text).map(str::to_string),
            ..Self::default()
        }
    }

    /// Change the genre filter: text cleared, back to page 1
    pub fn with_genre(&self, genre: Option<u32>) -> Self {
        Self {
            text: None,
            page: 1,
            genre,
            year: self.year,
        }
    }

    /// Change the year filter: text cleared, back to page 1
    pub fn with_year(&self, year: Option<i32>) -> Self {
        Self {
            text: None,
            page: 1,
            genre: self.genre,
            year,
        }
    }

    /// Same query, different page
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Back to the popular listing
    pub fn cleared(&self) -> Self {
        Self::default()
    }

    pub fn has_filters(&self) -> bool {
        self.genre.is_some() || self.year.is_some()
    }

    /// Resolve into a request, applying precedence and page clamping
    pub fn resolve(&self) -> MovieQuery {
        let text = self.text.as_deref().and_then(non_blank);

        let mode = match text {
            Some(text) => QueryMode::Search {
                text: text.to_string(),
            },
            None if self.has_filters() => QueryMode::Discover {
                genre: self.genre,
                year: self.year,
            },
            None => QueryMode::Popular,
        };

        let page = clamp_page(self.page);
        if page != self.page {
            tracing::debug!("Clamped requested page {} to {}", self.page, page);
        }

        MovieQuery { mode, page }
    }
}

impl MovieQuery {
    /// Endpoint path relative to the API root
    pub fn endpoint(&self) -> &'static str {
        match self.mode {
            QueryMode::Popular => "/movie/popular",
            QueryMode::Search { .. } => "/search/movie",
            QueryMode::Discover { .. } => "/discover/movie",
        }
    }

    /// Mode-specific parameters plus the page (credentials and language are
    /// added by the client)
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string())];
        match &self.mode {
            QueryMode::Popular => {}
            QueryMode::Search { text } => params.push(("query", text.clone())),
            QueryMode::Discover { genre, year } => {
                if let Some(genre) = genre {
                    params.push(("with_genres", genre.to_string()));
                }
                if let Some(year) = year {
                    params.push(("primary_release_year", year.to_string()));
                }
            }
        }
        params
    }
}

impl fmt::Display for MovieQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mode {
            QueryMode::Popular => write!(f, "popular movies")?,
            QueryMode::Search { text } => write!(f, "search \"{text}\"")?,
            QueryMode::Discover { genre, year } => {
                write!(f, "discover")?;
                if let Some(genre) = genre {
                    write!(f, " genre {genre}")?;
                }
                if let Some(year) = year {
                    write!(f, " year {year}")?;
                }
            }
        }
        write!(f, " (page {})", self.page)
    }
}

/// Years offered by the year filter, newest first
pub fn available_years() -> Vec<i32> {
    let current = chrono::Local::now().year();
    (EARLIEST_YEAR..=current).rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_takes_precedence_over_filters() {
        let query = BrowseQuery::from_params("batman", "2", "28", "1999").resolve();

        assert_eq!(
            query.mode,
            QueryMode::Search {
                text: "batman".to_string()
            }
        );
        assert_eq!(query.page, 2);
        assert_eq!(query.endpoint(), "/search/movie");
        assert_eq!(
            query.params(),
            vec![("page", "2".to_string()), ("query", "batman".to_string())]
        );
    }

    #[test]
    fn test_genre_only_is_discovery_for_all_years() {
        let query = BrowseQuery::from_params("", "", "28", "").resolve();

        assert_eq!(
            query.mode,
            QueryMode::Discover {
                genre: Some(28),
                year: None
            }
        );
        assert_eq!(query.page, 1);
        assert_eq!(query.endpoint(), "/discover/movie");
        assert_eq!(
            query.params(),
            vec![("page", "1".to_string()), ("with_genres", "28".to_string())]
        );
    }

    #[test]
    fn test_year_only_is_discovery() {
        let query = BrowseQuery::from_params("", "3", "", "1999").resolve();
        assert_eq!(
            query.params(),
            vec![
                ("page", "3".to_string()),
                ("primary_release_year", "1999".to_string())
            ]
        );
    }

    #[test]
    fn test_nothing_set_is_popular() {
        let query = BrowseQuery::from_params("   ", "", "", "").resolve();
        assert_eq!(query.mode, QueryMode::Popular);
        assert_eq!(query.endpoint(), "/movie/popular");
    }

    #[test]
    fn test_page_is_clamped_before_request() {
        let query = BrowseQuery::new().with_page(999).resolve();
        assert_eq!(query.page, MAX_PAGE);
        assert_eq!(query.params()[0], ("page", "500".to_string()));

        assert_eq!(BrowseQuery::from_params("", "0", "", "").page, 1);
        assert_eq!(BrowseQuery::from_params("", "abc", "", "").page, 1);
        assert_eq!(clamp_page(0), 1);
    }

    #[test]
    fn test_unparseable_filters_are_dropped() {
        let query = BrowseQuery::from_params("", "1", "action", "nineteen");
        assert_eq!(query.genre, None);
        assert_eq!(query.year, None);
        assert_eq!(query.resolve().mode, QueryMode::Popular);
    }

    #[test]
    fn test_years_outside_the_filter_are_dropped() {
        assert_eq!(BrowseQuery::from_params("", "1", "", "1949").year, None);
        assert_eq!(BrowseQuery::from_params("", "1", "", "9999").year, None);
        assert_eq!(BrowseQuery::from_params("", "1", "", "-3").year, None);
        assert_eq!(BrowseQuery::from_params("", "1", "", "1950").year, Some(1950));

        let query = BrowseQuery::from_query_string("genre=28&year=1800");
        assert_eq!(query.genre, Some(28));
        assert_eq!(query.year, None);
    }

    #[test]
    fn test_transitions() {
        let filtered = BrowseQuery::new().with_genre(Some(28)).with_year(Some(1999)).with_page(4);
        assert_eq!(filtered.page, 4);

        let searched = filtered.with_search("heat");
        assert_eq!(searched.text.as_deref(), Some("heat"));
        assert_eq!(searched.genre, None);
        assert_eq!(searched.year, None);
        assert_eq!(searched.page, 1);

        let refiltered = searched.with_page(3).with_genre(Some(80));
        assert_eq!(refiltered.text, None);
        assert_eq!(refiltered.genre, Some(80));
        assert_eq!(refiltered.page, 1);

        assert_eq!(refiltered.cleared(), BrowseQuery::default());
    }

    #[test]
    fn test_query_string_round_trip() {
        let query = BrowseQuery {
            text: Some("the matrix & co".to_string()),
            page: 2,
            genre: None,
            year: None,
        };

        let encoded = query.to_query_string();
        assert_eq!(encoded, "query=the+matrix+%26+co&page=2");
        assert_eq!(BrowseQuery::from_query_string(&encoded), query);
    }

    #[test]
    fn test_from_query_string_with_filters() {
        let query = BrowseQuery::from_query_string("?genre=28&year=1999&page=7&sort=asc");
        assert_eq!(
            query,
            BrowseQuery {
                text: None,
                page: 7,
                genre: Some(28),
                year: Some(1999),
            }
        );
    }

    #[test]
    fn test_display() {
        let query = BrowseQuery::from_params("", "2", "28", "1999").resolve();
        assert_eq!(query.to_string(), "discover genre 28 year 1999 (page 2)");
    }

    #[test]
    fn test_available_years() {
        let years = available_years();
        assert_eq!(*years.last().unwrap(), EARLIEST_YEAR);
        assert!(years.windows(2).all(|w| w[0] == w[1] + 1));
    }
}
