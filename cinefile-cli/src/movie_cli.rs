//! Movie detail command

use anyhow::{Context, Result};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use cinefile_core::catalog::{ImageUrls, MetadataProvider, MovieDetails, TOP_CAST_LIMIT};

use crate::browse_cli::{movie_json, movie_table};
use crate::context::{AppContext, CliFavorites};

#[derive(Tabled)]
struct CastRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Character")]
    character: String,
}

pub async fn execute_movie(ctx: &AppContext, id: u64, json_output: bool) -> Result<()> {
    let provider = ctx.provider()?;
    let movie = provider
        .movie_details(id)
        .await
        .with_context(|| format!("Failed to load movie {id}"))?;

    let images = ctx.images();
    let mut favorites = ctx.favorites();

    if json_output {
        let output = details_json(&movie, &images, &mut favorites);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_details(&movie, &images, &mut favorites);
    }

    Ok(())
}

fn details_json(
    movie: &MovieDetails,
    images: &ImageUrls,
    favorites: &mut CliFavorites,
) -> serde_json::Value {
    let cast: Vec<serde_json::Value> = movie
        .top_cast(TOP_CAST_LIMIT)
        .into_iter()
        .map(|member| {
            serde_json::json!({
                "id": member.id,
                "name": member.name,
                "character": member.character,
                "profile_url": images.profile(member),
            })
        })
        .collect();

    let similar: Vec<serde_json::Value> = movie
        .similar_movies()
        .iter()
        .filter(|m| m.has_poster())
        .map(|m| movie_json(m, images, favorites))
        .collect();

    let summary = movie.summary();
    serde_json::json!({
        "id": movie.id,
        "title": movie.title,
        "tagline": movie.tagline,
        "overview": movie.overview,
        "year": summary.release_year(),
        "release_date": movie.release_date,
        "vote_average": movie.vote_average,
        "runtime": movie.runtime,
        "genres": movie.genre_names(),
        "poster_url": images.detail_poster(movie),
        "backdrop_url": images.backdrop(movie),
        "trailer_url": movie.trailer().and_then(|v| v.embed_url()),
        "cast": cast,
        "similar": similar,
        "favorite": favorites.contains(movie.id),
    })
}

fn print_details(movie: &MovieDetails, images: &ImageUrls, favorites: &mut CliFavorites) {
    let summary = movie.summary();

    println!();
    match summary.release_year() {
        Some(year) => print!("{} ({year})", movie.title),
        None => print!("{}", movie.title),
    }
    if favorites.contains(movie.id) {
        print!("  ★ favorite");
    }
    println!();

    if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
        println!("\"{tagline}\"");
    }
    println!();

    println!("Rating:   {}", summary.rating_display());
    if let Some(runtime) = movie.runtime.filter(|r| *r > 0) {
        println!("Runtime:  {runtime} min");
    }
    let genres = movie.genre_names();
    if !genres.is_empty() {
        println!("Genres:   {}", genres.join(", "));
    }
    if let Some(url) = images.detail_poster(movie) {
        println!("Poster:   {url}");
    }
    if let Some(url) = images.backdrop(movie) {
        println!("Backdrop: {url}");
    }
    match movie.trailer().and_then(|v| v.embed_url()) {
        Some(url) => println!("Trailer:  {url}"),
        None => println!("Trailer:  none available"),
    }

    if let Some(overview) = movie.overview.as_deref().filter(|o| !o.is_empty()) {
        println!();
        println!("Overview:");
        for line in overview.lines() {
            println!("  {line}");
        }
    }

    let cast = movie.top_cast(TOP_CAST_LIMIT);
    if !cast.is_empty() {
        let rows: Vec<CastRow> = cast
            .iter()
            .map(|member| CastRow {
                name: member.name.clone(),
                character: member.character.clone().unwrap_or_default(),
            })
            .collect();
        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string();

        println!();
        println!("Cast:");
        println!("{table}");
    }

    if let Some(table) = movie_table(movie.similar_movies(), favorites) {
        println!();
        println!("Similar movies:");
        println!("{table}");
    }

    println!();
    if favorites.contains(movie.id) {
        println!("Remove from favorites: cinefile favorites remove {}", movie.id);
    } else {
        println!("Add to favorites: cinefile favorites add {}", movie.id);
    }
}
