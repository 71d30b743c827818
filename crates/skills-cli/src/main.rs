//! Skills - catalog service for named skill records
//!
//! - `skills serve` — HTTP API over the catalog
//! - `skills reset-db` — recreate the SQLite table with the default entries

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use skills_core::storage::Database;
use skills_core::{paths, Backend};
use skills_server::ServerConfig;

/// Skills - catalog service
#[derive(Parser)]
#[command(name = "skills")]
#[command(about = "Catalog service for named skill records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 8080)]
        port: u16,

        /// Catalog store implementation (memory or sqlite)
        #[arg(long, env = "SKILLS_BACKEND", default_value = "sqlite")]
        backend: Backend,

        /// SQLite database file (defaults to ~/.skills/skills.db)
        #[arg(long, env = "SKILLS_DATABASE")]
        database: Option<PathBuf>,

        /// Populate an empty catalog with the default skills
        #[arg(long)]
        seed: bool,
    },

    /// Drop and recreate the skills table, then insert the default skills
    ResetDb {
        /// SQLite database file (defaults to ~/.skills/skills.db)
        #[arg(long, env = "SKILLS_DATABASE")]
        database: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match cli.command {
        Commands::Serve {
            port,
            backend,
            database,
            seed,
        } => {
            let config = ServerConfig {
                port,
                backend,
                database_path: database.unwrap_or_else(paths::database_path),
                seed,
            };
            skills_server::start_server(config).await?;
        }
        Commands::ResetDb { database } => {
            let path = database.unwrap_or_else(paths::database_path);
            Database::new(&path)?.reset()?;
            tracing::info!("Reset skills database at {}", path.display());
        }
    }

    Ok(())
}
