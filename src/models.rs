//! Domain types for the smorfia meaning table and drawn batches.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SmorfiaError};

/// Every smorfia number lives in this range.
pub const NUMBER_DOMAIN: RangeInclusive<i64> = 1..=90;

/// One row of the canonical meaning table. `number` is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeaningEntry {
    pub number: i64,
    pub meaning: String,
}

impl MeaningEntry {
    pub fn new(number: i64, meaning: impl Into<String>) -> Self {
        Self {
            number,
            meaning: meaning.into(),
        }
    }
}

/// Numbers produced by one upstream draw, in draw order.
///
/// Duplicates and empty draws are legal; nothing downstream may assume
/// uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnNumberBatch {
    pub numbers: Vec<i64>,
}

impl DrawnNumberBatch {
    pub fn new(numbers: Vec<i64>) -> Self {
        Self { numbers }
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// A drawn number paired with its meaning, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    pub number: i64,
    pub meaning: String,
}

/// Body of `GET /resolution/random`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDraw {
    pub numbers: Vec<ResolvedEntry>,
}

/// Check a full seed set against the table invariants.
///
/// The whole set is rejected on the first violation; callers must not write
/// anything unless this returns `Ok`.
pub fn validate_seed(entries: &[MeaningEntry]) -> Result<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !NUMBER_DOMAIN.contains(&entry.number) {
            return Err(SmorfiaError::InvalidSeedData(format!(
                "number {} outside {}..={}",
                entry.number,
                NUMBER_DOMAIN.start(),
                NUMBER_DOMAIN.end()
            )));
        }
        if entry.meaning.trim().is_empty() {
            return Err(SmorfiaError::InvalidSeedData(format!(
                "number {} has an empty meaning",
                entry.number
            )));
        }
        if !seen.insert(entry.number) {
            return Err(SmorfiaError::InvalidSeedData(format!(
                "number {} appears more than once",
                entry.number
            )));
        }
    }
    Ok(())
}

/// Sort a table by number ascending, the order `load()` promises.
pub fn sort_by_number(entries: &mut [MeaningEntry]) {
    entries.sort_by_key(|e| e.number);
}
