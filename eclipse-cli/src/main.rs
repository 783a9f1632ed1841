//! Eclipse CLI - Command-line access to book search and rentals

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::Context;
use eclipse_core::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "eclipse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Document store directory (overrides ECLIPSE_STORE_PATH)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the book API
    Search {
        /// Subject (or full-text query with --full-text)
        query: String,

        /// Strict full-text search instead of a cached subject search
        #[arg(long)]
        full_text: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all renters
    Renters {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a renter's name and rating
    Renter {
        /// Renter id
        renter_id: String,
    },

    /// Show a user's status lists (or custom lists)
    Lists {
        /// Show custom lists instead of status lists
        #[arg(long)]
        custom: bool,

        /// User id (defaults to ECLIPSE_USER_ID)
        #[arg(short, long)]
        user: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the books a user currently has rented
    Rented {
        /// User id (defaults to ECLIPSE_USER_ID)
        #[arg(short, long)]
        user: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rate a renter
    Rate {
        /// Renter id
        renter_id: String,

        /// Book quality score
        #[arg(long)]
        quality: f64,

        /// Communication score
        #[arg(long)]
        communication: f64,

        /// Overall experience score
        #[arg(long)]
        experience: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "eclipse_cli=debug,eclipse_core=debug"
    } else {
        "eclipse_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    let ctx = Context::new(config);

    match cli.command {
        Commands::Search {
            query,
            full_text,
            json,
        } => commands::search(&ctx, &query, full_text, json).await,

        Commands::Renters { json } => commands::renters(&ctx, json).await,

        Commands::Renter { renter_id } => commands::renter(&ctx, &renter_id).await,

        Commands::Lists { custom, user, json } => commands::lists(&ctx, user, custom, json).await,

        Commands::Rented { user, json } => commands::rented(&ctx, user, json).await,

        Commands::Rate {
            renter_id,
            quality,
            communication,
            experience,
        } => commands::rate(&ctx, &renter_id, quality, communication, experience).await,
    }
}
