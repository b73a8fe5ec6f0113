//! cinefile - browse, search and bookmark movies from the terminal
//!
//! Entry point: parses the command line, sets up tracing and dispatches to the
//! command handlers.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod browse_cli;
mod config_cli;
mod context;
mod favorites_cli;
mod movie_cli;

use context::AppContext;

/// Trace modules for detailed logging
#[derive(Debug, Clone, ValueEnum)]
enum TraceModule {
    Http,
    Favorites,
    All,
}

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "cinefile",
    about = "Browse, search and bookmark movies from The Movie Database",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Enable detailed tracing (comma-separated: http,favorites,all)
    #[clap(long, value_delimiter = ',', global = true)]
    trace: Vec<TraceModule>,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Use this configuration file instead of the default location
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Language tag for titles and overviews (e.g. en-US, fr-FR)
    #[clap(long, global = true)]
    language: Option<String>,

    /// Keep favorites changes for this invocation only
    #[clap(long, global = true)]
    no_persist: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Browse popular movies, or discover by genre and year
    Browse(browse_cli::BrowseArgs),

    /// Search movies by title
    Search {
        /// Search text
        text: String,

        /// Result page (1-500)
        #[clap(long, default_value_t = 1)]
        page: u32,

        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show details, cast, trailer and similar movies
    Movie {
        /// Movie id
        id: u64,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// List genres usable with `browse --genre`
    Genres {
        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Manage your favorites list
    Favorites {
        #[clap(subcommand)]
        command: favorites_cli::FavoritesCommand,
    },

    /// Inspect configuration
    Config {
        #[clap(subcommand)]
        command: config_cli::ConfigCommand,
    },
}

fn initialize_tracing(log_level: &LogLevel, trace_modules: &[TraceModule]) {
    let mut filter = EnvFilter::new(log_level.to_filter_directive());

    for module in trace_modules {
        let directive = match module {
            TraceModule::Http => "cinefile_core::catalog=trace",
            TraceModule::Favorites => "cinefile_core::favorites=trace",
            TraceModule::All => "cinefile_core=trace",
        };

        if let Ok(parsed) = directive.parse() {
            filter = filter.add_directive(parsed);
        }
    }

    // Logs go to stderr; stdout carries command output only
    if !trace_modules.is_empty() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init();

        tracing::info!(trace_modules = ?trace_modules, "cinefile tracing enabled");
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level, &cli.trace);

    let ctx = AppContext::new(cli.config, cli.language, !cli.no_persist)?;

    match cli.command {
        Command::Browse(args) => browse_cli::execute_browse(&ctx, args.to_query(), args.json).await,
        Command::Search { text, page, json } => {
            let query = cinefile_core::catalog::BrowseQuery::new()
                .with_search(&text)
                .with_page(page);
            browse_cli::execute_browse(&ctx, query, json).await
        }
        Command::Movie { id, json } => movie_cli::execute_movie(&ctx, id, json).await,
        Command::Genres { json } => browse_cli::execute_genres(&ctx, json).await,
        Command::Favorites { command } => command.execute(&ctx).await,
        Command::Config { command } => command.execute(&ctx),
    }
}
