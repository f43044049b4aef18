//! Joins a drawn batch against the meaning table.
//!
//! Pure and deterministic: no I/O and no shared state. A number missing from
//! the table resolves to [`MEANING_NOT_FOUND`] instead of failing the draw.

use std::collections::HashMap;

use crate::models::{DrawnNumberBatch, MeaningEntry, ResolvedEntry};

/// Meaning emitted for a drawn number the table does not know.
pub const MEANING_NOT_FOUND: &str = "Meaning not found";

/// Result of one join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// One entry per drawn number, in draw order.
    pub entries: Vec<ResolvedEntry>,
    /// How many drawn numbers fell back to the sentinel meaning.
    pub unresolved: usize,
}

/// Resolve every number of `batch` against `table`, preserving draw order
/// and duplicates.
pub fn resolve(batch: &DrawnNumberBatch, table: &[MeaningEntry]) -> Vec<ResolvedEntry> {
    resolve_with_stats(batch, table).entries
}

/// Same as [`resolve`], also counting sentinel fallbacks.
pub fn resolve_with_stats(batch: &DrawnNumberBatch, table: &[MeaningEntry]) -> Resolution {
    let index: HashMap<i64, &str> = table
        .iter()
        .map(|e| (e.number, e.meaning.as_str()))
        .collect();

    let mut unresolved = 0;
    let entries = batch
        .numbers
        .iter()
        .map(|&number| {
            let meaning = match index.get(&number) {
                Some(meaning) => (*meaning).to_string(),
                None => {
                    unresolved += 1;
                    MEANING_NOT_FOUND.to_string()
                }
            };
            ResolvedEntry { number, meaning }
        })
        .collect();

    Resolution {
        entries,
        unresolved,
    }
}
