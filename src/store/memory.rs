use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use super::{read_seed_file, MeaningStore};
use crate::error::Result;
use crate::models::{sort_by_number, validate_seed, MeaningEntry};

/// Meaning table held in process memory.
///
/// The table is an immutable `Arc` snapshot; a reseed builds the new
/// snapshot off to the side and swaps the pointer, so `load()` only waits
/// for the swap itself.
#[derive(Default)]
pub struct InMemoryMeaningStore {
    table: RwLock<Arc<Vec<MeaningEntry>>>,
    reseed_lock: Mutex<()>,
}

impl InMemoryMeaningStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store already holding `entries`.
    pub fn with_entries(entries: Vec<MeaningEntry>) -> Result<Self> {
        validate_seed(&entries)?;
        let mut entries = entries;
        sort_by_number(&mut entries);
        Ok(Self {
            table: RwLock::new(Arc::new(entries)),
            reseed_lock: Mutex::new(()),
        })
    }

    /// Build a store from a seed file on disk.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let entries = read_seed_file(path).await?;
        Self::with_entries(entries)
    }

    /// Current snapshot without copying the rows.
    pub async fn snapshot(&self) -> Arc<Vec<MeaningEntry>> {
        Arc::clone(&*self.table.read().await)
    }
}

#[async_trait]
impl MeaningStore for InMemoryMeaningStore {
    async fn load(&self) -> Result<Vec<MeaningEntry>> {
        Ok(self.snapshot().await.as_ref().clone())
    }

    async fn reseed(&self, entries: Vec<MeaningEntry>) -> Result<()> {
        validate_seed(&entries)?;

        let _guard = self.reseed_lock.lock().await;
        let mut entries = entries;
        sort_by_number(&mut entries);
        let count = entries.len();
        let next = Arc::new(entries);

        *self.table.write().await = next;
        info!(entries = count, "meaning table reseeded");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
