//! Relational meaning store on SQLite.
//!
//! Layout: `smorfia(number INTEGER PRIMARY KEY, meaning TEXT NOT NULL)`.
//! A reseed is one transaction (delete all, insert all), so readers only
//! ever see a committed table.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::MeaningStore;
use crate::error::Result;
use crate::models::{validate_seed, MeaningEntry};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS smorfia (
        number  INTEGER PRIMARY KEY,
        meaning TEXT NOT NULL
    )
"#;

#[derive(sqlx::FromRow)]
struct MeaningRow {
    number: i64,
    meaning: String,
}

impl From<MeaningRow> for MeaningEntry {
    fn from(row: MeaningRow) -> Self {
        Self {
            number: row.number,
            meaning: row.meaning,
        }
    }
}

pub struct SqliteMeaningStore {
    pool: SqlitePool,
    reseed_lock: Mutex<()>,
}

impl SqliteMeaningStore {
    /// Wrap a pool, creating the table if it does not exist yet.
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self {
            pool,
            reseed_lock: Mutex::new(()),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Number of rows currently committed.
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM smorfia")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl MeaningStore for SqliteMeaningStore {
    async fn load(&self) -> Result<Vec<MeaningEntry>> {
        let rows: Vec<MeaningRow> =
            sqlx::query_as("SELECT number, meaning FROM smorfia ORDER BY number ASC")
                .fetch_all(&self.pool)
                .await?;
        debug!(rows = rows.len(), "loaded meaning table");
        Ok(rows.into_iter().map(MeaningEntry::from).collect())
    }

    async fn reseed(&self, entries: Vec<MeaningEntry>) -> Result<()> {
        validate_seed(&entries)?;

        let _guard = self.reseed_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM smorfia").execute(&mut *tx).await?;
        for entry in &entries {
            sqlx::query("INSERT INTO smorfia (number, meaning) VALUES (?, ?)")
                .bind(entry.number)
                .bind(&entry.meaning)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(entries = entries.len(), "meaning table reseeded");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
