//! The static seed file: `{ "numbers": [ { "number": 1, "meaning": "..." } ] }`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SmorfiaError};
use crate::models::{validate_seed, MeaningEntry};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub numbers: Vec<MeaningEntry>,
}

/// Parse and validate seed JSON.
pub fn parse_seed(json: &str) -> Result<Vec<MeaningEntry>> {
    let file: SeedFile = serde_json::from_str(json)
        .map_err(|e| SmorfiaError::InvalidSeedData(format!("unparseable seed file: {e}")))?;
    validate_seed(&file.numbers)?;
    Ok(file.numbers)
}

pub async fn read_seed_file(path: impl AsRef<Path>) -> Result<Vec<MeaningEntry>> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        SmorfiaError::InvalidSeedData(format!("cannot read {}: {e}", path.display()))
    })?;
    parse_seed(&contents)
}
