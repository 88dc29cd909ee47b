//! Quire CLI - content pipeline for MDX blogs.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quire_content::BuildMode;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Tag table, search index and tag listings for MDX blogs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to quire.toml config file
    #[arg(short, long, default_value = "quire.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a config file and a sample post
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the tag table and search index
    Build {
        /// production or development (defaults to config, then QUIRE_ENV)
        #[arg(short, long)]
        mode: Option<BuildMode>,
    },

    /// Build, then rebuild whenever a post changes
    Dev {
        /// production or development (defaults to config, then QUIRE_ENV)
        #[arg(short, long)]
        mode: Option<BuildMode>,
    },

    /// Print the tag table, or one page of a tag listing
    Tags {
        /// Tag to list, as it appears in the route (may be percent-encoded)
        tag: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, requires = "tag")]
        page: Option<String>,

        /// production or development (defaults to config, then QUIRE_ENV)
        #[arg(short, long)]
        mode: Option<BuildMode>,
    },

    /// Query the search index
    Search {
        /// Case-insensitive text matched against titles, summaries and tags
        query: Option<String>,

        /// production or development (defaults to config, then QUIRE_ENV)
        #[arg(short, long)]
        mode: Option<BuildMode>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Build { mode } => {
            commands::build::run(&cli.config, mode).await?;
        }
        Commands::Dev { mode } => {
            commands::dev::run(&cli.config, mode).await?;
        }
        Commands::Tags { tag, page, mode } => {
            commands::tags::run(&cli.config, tag, page, mode).await?;
        }
        Commands::Search { query, mode } => {
            commands::search::run(&cli.config, query, mode).await?;
        }
    }

    Ok(())
}
