//! smorfia-seed: replace the meaning table from the seed file.
//!
//! ```bash
//! smorfia-seed --seed-file data/smorfia_napoletana.json
//! smorfia-seed --dry-run        # validate only
//! ```
//!
//! Running it twice with the same file leaves the same table.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use smorfia::config::{DatabaseConfig, DEFAULT_DATABASE_URL, DEFAULT_SEED_FILE};
use smorfia::store::{read_seed_file, DatabaseManager, MeaningStore, SqliteMeaningStore};

#[derive(Parser, Debug)]
#[command(name = "smorfia-seed", about = "Reseed the smorfia meaning table")]
struct Args {
    /// Meaning store connection string
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Seed file with a top-level "numbers" array
    #[arg(long, env = "SMORFIA_SEED_FILE", default_value = DEFAULT_SEED_FILE)]
    seed_file: PathBuf,

    /// Validate the seed file without touching the store
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let entries = read_seed_file(&args.seed_file)
        .await
        .with_context(|| format!("seed file {} rejected", args.seed_file.display()))?;
    tracing::info!(entries = entries.len(), "seed file validated");

    if args.dry_run {
        return Ok(());
    }

    let db = DatabaseManager::new(DatabaseConfig {
        database_url: args.database_url,
        max_connections: 1,
        connection_timeout: Duration::from_secs(10),
    })
    .await
    .context("failed to open meaning store")?;

    let store = SqliteMeaningStore::new(db.pool().clone()).await?;
    store.reseed(entries).await?;
    tracing::info!(rows = store.count().await?, "meaning table reseeded");

    db.close().await;
    Ok(())
}
