//! smorfia-server: HTTP server for the smorfia resolution routes.
//!
//! Reads config from env vars (see `smorfia::config`):
//!   DATABASE_URL        meaning store (default: sqlite://data/smorfia.db?mode=rwc)
//!   API_BASE_URL        upstream draw service (default: http://localhost:8080)
//!   SMORFIA_BIND_ADDR   listen address (default: 0.0.0.0:3000)
//!   SMORFIA_SEED_FILE   seed used when the table is empty on startup
//!   MEANING_STORE       sqlite (default) or file

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use smorfia::api::{build_router, AppState};
use smorfia::config::{ServiceConfig, StoreMedium};
use smorfia::source::HttpNumberSource;
use smorfia::store::{
    read_seed_file, DatabaseManager, InMemoryMeaningStore, MeaningStore, SqliteMeaningStore,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,smorfia=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServiceConfig::from_env()?;

    let (store, db) = open_store(&config).await?;

    let source = Arc::new(HttpNumberSource::new(config.upstream.clone())?);
    tracing::info!(
        upstream = %source.endpoint(),
        timeout_ms = config.upstream.timeout.as_millis() as u64,
        "upstream draw service configured"
    );

    let app = build_router(AppState::new(store, source));

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("smorfia-server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(db) = db {
        db.close().await;
    }
    Ok(())
}

/// Build the configured meaning store. The pool manager comes back too so
/// it can be closed on shutdown.
async fn open_store(
    config: &ServiceConfig,
) -> anyhow::Result<(Arc<dyn MeaningStore>, Option<DatabaseManager>)> {
    match config.store {
        StoreMedium::File => {
            let store = InMemoryMeaningStore::from_seed_file(&config.seed_file)
                .await
                .with_context(|| {
                    format!("failed to load seed file {}", config.seed_file.display())
                })?;
            tracing::info!(
                seed_file = %config.seed_file.display(),
                "serving meaning table straight from the seed file"
            );
            let store: Arc<dyn MeaningStore> = Arc::new(store);
            Ok((store, None))
        }
        StoreMedium::Sqlite => {
            let db = DatabaseManager::new(config.database.clone())
                .await
                .context("failed to open meaning store")?;
            db.test_connection()
                .await
                .context("meaning store connection test failed")?;

            let store = SqliteMeaningStore::new(db.pool().clone()).await?;
            if store.count().await? == 0 {
                seed_empty_table(&store, &config.seed_file).await?;
            }
            let store: Arc<dyn MeaningStore> = Arc::new(store);
            Ok((store, Some(db)))
        }
    }
}

async fn seed_empty_table(store: &SqliteMeaningStore, seed_file: &Path) -> anyhow::Result<()> {
    match read_seed_file(seed_file).await {
        Ok(entries) => {
            store.reseed(entries).await?;
            tracing::info!(seed_file = %seed_file.display(), "empty meaning table seeded");
        }
        Err(e) => tracing::warn!(
            seed_file = %seed_file.display(),
            error = %e,
            "meaning table is empty and could not be seeded; every draw will resolve to the fallback meaning"
        ),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
