//! Listing commands: browse, search and genres

use anyhow::{bail, Context, Result};
use clap::Args;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use cinefile_core::catalog::{
    available_years, BrowseQuery, BrowseSession, ImageUrls, MetadataProvider, MovieSummary,
    PageInfo, ViewState, EARLIEST_YEAR,
};

use crate::context::{AppContext, CliFavorites};

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Search text (takes precedence over genre and year)
    #[clap(long)]
    pub query: Option<String>,

    /// Result page (1-500)
    #[clap(long)]
    pub page: Option<u32>,

    /// Genre id, see `cinefile genres`
    #[clap(long)]
    pub genre: Option<u32>,

    /// Release year (1950 to the current year)
    #[clap(long, value_parser = parse_year)]
    pub year: Option<i32>,

    /// Browse state as a query string, e.g. "genre=28&year=1999&page=2"
    #[clap(long)]
    pub params: Option<String>,

    /// Output results as JSON
    #[clap(long)]
    pub json: bool,
}

/// Accept only the years offered by the year filter
fn parse_year(value: &str) -> Result<i32, String> {
    let year: i32 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a year"))?;
    let years = available_years();
    if years.contains(&year) {
        Ok(year)
    } else {
        Err(format!(
            "year must be between {} and {}",
            EARLIEST_YEAR,
            years.first().copied().unwrap_or(EARLIEST_YEAR)
        ))
    }
}

impl BrowseArgs {
    /// Start from `--params` (if any) and apply explicit flags as navigation
    ///
    /// Filter flags clear search text, and a search clears filters, each
    /// going back to page 1. `--page` is applied last.
    pub fn to_query(&self) -> BrowseQuery {
        let mut query = self
            .params
            .as_deref()
            .map(BrowseQuery::from_query_string)
            .unwrap_or_default();

        if let Some(genre) = self.genre {
            query = query.with_genre(Some(genre));
        }
        if let Some(year) = self.year {
            query = query.with_year(Some(year));
        }
        if let Some(text) = &self.query {
            query = query.with_search(text);
        }
        if let Some(page) = self.page {
            query = query.with_page(page);
        }
        query
    }
}

/// Reject a served page beyond the end of the listing
fn check_page_in_range(query: &BrowseQuery, info: &PageInfo) -> Result<()> {
    if info.contains(info.page) {
        return Ok(());
    }
    bail!(
        "Page {} is out of range: this listing has {} page(s).\n\nLast page: cinefile browse --params '{}'",
        info.page,
        info.total_pages,
        query.with_page(info.total_pages).to_query_string()
    )
}

/// Table row for a movie listing
#[derive(Tabled)]
struct MovieRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "★")]
    favorite: String,
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// Render movie cards as a table; cards without a poster are skipped
pub(crate) fn movie_table(movies: &[MovieSummary], favorites: &mut CliFavorites) -> Option<String> {
    let rows: Vec<MovieRow> = movies
        .iter()
        .filter(|movie| movie.has_poster())
        .map(|movie| MovieRow {
            id: movie.id,
            title: truncate(&movie.title, 50),
            year: movie.release_year().unwrap_or("-").to_string(),
            rating: movie.rating_display(),
            favorite: if favorites.contains(movie.id) {
                "★".to_string()
            } else {
                String::new()
            },
        })
        .collect();

    if rows.is_empty() {
        return None;
    }

    Some(
        Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string(),
    )
}

pub(crate) fn movie_json(
    movie: &MovieSummary,
    images: &ImageUrls,
    favorites: &mut CliFavorites,
) -> serde_json::Value {
    serde_json::json!({
        "id": movie.id,
        "title": movie.title,
        "year": movie.release_year(),
        "vote_average": movie.vote_average,
        "poster_url": images.poster(movie),
        "favorite": favorites.contains(movie.id),
    })
}

/// Fetch one listing page and print it
pub async fn execute_browse(
    ctx: &AppContext,
    query: BrowseQuery,
    json_output: bool,
) -> Result<()> {
    let session = BrowseSession::new(ctx.provider()?);
    let request = query.resolve();

    let view = session
        .navigate(query)
        .await
        .context("Listing request was superseded")?;

    let (page, info) = match view {
        ViewState::Loaded { page, info } => (page, info),
        ViewState::Failed { message } => bail!(message),
        ViewState::Idle | ViewState::Loading => bail!("Listing did not load"),
    };

    let current = session.query();
    check_page_in_range(&current, &info)?;

    let mut favorites = ctx.favorites();

    if json_output {
        let images = ctx.images();
        let results: Vec<serde_json::Value> = page
            .results
            .iter()
            .filter(|movie| movie.has_poster())
            .map(|movie| movie_json(movie, &images, &mut favorites))
            .collect();

        let output = serde_json::json!({
            "request": request.to_string(),
            "params": current.to_query_string(),
            "page": info.page,
            "total_pages": info.total_pages,
            "total_results": info.total_results,
            "results": results,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Showing {request}\n");
    match movie_table(&page.results, &mut favorites) {
        Some(table) => println!("{table}"),
        None => println!("No movies found."),
    }

    println!("\n{}", info);
    print_navigation(&current, &info);

    Ok(())
}

fn print_navigation(query: &BrowseQuery, info: &PageInfo) {
    if let Some(previous) = info.previous() {
        println!(
            "  Previous: cinefile browse --params '{}'",
            query.with_page(previous).to_query_string()
        );
    }
    if let Some(next) = info.next() {
        println!(
            "  Next:     cinefile browse --params '{}'",
            query.with_page(next).to_query_string()
        );
    }
}

/// Table row for the genre list
#[derive(Tabled)]
struct GenreRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Genre")]
    name: String,
}

pub async fn execute_genres(ctx: &AppContext, json_output: bool) -> Result<()> {
    let provider = ctx.provider()?;
    let genres = provider
        .genres()
        .await
        .context("Failed to load genres")?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&genres)?);
        return Ok(());
    }

    if genres.is_empty() {
        println!("No genres available.");
        return Ok(());
    }

    let rows: Vec<GenreRow> = genres
        .iter()
        .map(|g| GenreRow {
            id: g.id,
            name: g.name.clone(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();
    println!("{table}");
    println!("\nUse an id with: cinefile browse --genre <ID>");

    Ok(())
}
