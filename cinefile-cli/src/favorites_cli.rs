//! Favorites commands
//!
//! The list lives in `movie-app-favorites.json` in the data directory (see
//! `cinefile favorites path`).

use anyhow::Result;
use clap::Subcommand;

use cinefile_core::catalog::fetch_favorites;
use cinefile_core::favorites::MovieId;

use crate::browse_cli::{movie_json, movie_table};
use crate::context::{report_degraded, AppContext};

#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    /// List favorite movies
    List {
        /// Print ids only, without contacting the movie database
        #[clap(long)]
        ids: bool,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Add a movie to favorites
    Add {
        /// Movie id
        id: MovieId,
    },

    /// Remove a movie from favorites
    Remove {
        /// Movie id
        id: MovieId,
    },

    /// Check whether a movie is a favorite (exit status 1 when it is not)
    Contains {
        /// Movie id
        id: MovieId,
    },

    /// Show where favorites are stored
    Path,
}

impl FavoritesCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        match self {
            FavoritesCommand::List { ids, json } => execute_list(ctx, ids, json).await,
            FavoritesCommand::Add { id } => execute_add(ctx, id),
            FavoritesCommand::Remove { id } => execute_remove(ctx, id),
            FavoritesCommand::Contains { id } => execute_contains(ctx, id),
            FavoritesCommand::Path => {
                println!("{}", ctx.favorites_path().display());
                Ok(())
            }
        }
    }
}

async fn execute_list(ctx: &AppContext, ids_only: bool, json_output: bool) -> Result<()> {
    let mut favorites = ctx.favorites();
    let ids = favorites.ids();

    if ids_only {
        if json_output {
            println!("{}", serde_json::to_string(&ids)?);
        } else {
            for id in &ids {
                println!("{id}");
            }
        }
        return Ok(());
    }

    if ids.is_empty() {
        if json_output {
            println!("[]");
        } else {
            println!("No favorites yet.");
            println!("\nAdd one with: cinefile favorites add <ID>");
        }
        return Ok(());
    }

    let provider = ctx.provider()?;
    let movies = fetch_favorites(&provider, &ids).await?;

    if json_output {
        let images = ctx.images();
        let results: Vec<serde_json::Value> = movies
            .iter()
            .map(|movie| movie_json(movie, &images, &mut favorites))
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("Your favorites ({}):\n", ids.len());
    match movie_table(&movies, &mut favorites) {
        Some(table) => println!("{table}"),
        None => println!("None of your favorites could be loaded."),
    }
    if movies.len() < ids.len() {
        println!(
            "\n{} favorite(s) could not be loaded and were skipped.",
            ids.len() - movies.len()
        );
    }

    Ok(())
}

fn execute_add(ctx: &AppContext, id: MovieId) -> Result<()> {
    let mut favorites = ctx.favorites();
    if favorites.add(id) {
        println!("Added {id} to favorites");
    } else {
        println!("{id} is already a favorite");
    }
    report_degraded(&favorites);
    Ok(())
}

fn execute_remove(ctx: &AppContext, id: MovieId) -> Result<()> {
    let mut favorites = ctx.favorites();
    if favorites.remove(id) {
        println!("Removed {id} from favorites");
    } else {
        println!("{id} is not a favorite");
    }
    report_degraded(&favorites);
    Ok(())
}

fn execute_contains(ctx: &AppContext, id: MovieId) -> Result<()> {
    let mut favorites = ctx.favorites();
    if favorites.contains(id) {
        println!("{id} is a favorite");
        Ok(())
    } else {
        println!("{id} is not a favorite");
        std::process::exit(1);
    }
}
