//! Meaning table storage.
//!
//! [`MeaningStore`] is the only way the rest of the crate touches the table.
//! Two media sit behind it:
//!
//! | Type | Medium |
//! |------|--------|
//! | [`SqliteMeaningStore`] | relational table `smorfia` via `sqlx` (production) |
//! | [`InMemoryMeaningStore`] | `Arc` snapshot swapped under a lock (tests, file-only deployments) |
//!
//! Both guarantee that `load()` sees either the whole old table or the whole
//! new one while a `reseed()` is running, and both serialize reseeds.

mod database;
mod memory;
mod seed_file;
mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::MeaningEntry;

pub use database::DatabaseManager;
pub use memory::InMemoryMeaningStore;
pub use seed_file::{parse_seed, read_seed_file, SeedFile};
pub use sqlite::SqliteMeaningStore;

/// Canonical number → meaning table.
#[async_trait]
pub trait MeaningStore: Send + Sync {
    /// Full table ordered by number ascending.
    async fn load(&self) -> Result<Vec<MeaningEntry>>;

    /// Replace the whole table. Validates first; an invalid set changes
    /// nothing and fails with `InvalidSeedData`.
    async fn reseed(&self, entries: Vec<MeaningEntry>) -> Result<()>;

    /// Short medium name for logs.
    fn backend(&self) -> &'static str;
}
