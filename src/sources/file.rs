use crate::models::Listing;
use crate::sources::decode_rows;
use crate::sources::traits::ListingSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Reads an exported JSON array of `cars` rows from disk
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ListingSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<Listing>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        debug!("Read {} bytes from {}", raw.len(), self.path.display());

        let rows: Vec<Value> = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a JSON array of rows", self.path.display()))?;

        Ok(decode_rows(rows))
    }

    fn source_name(&self) -> &'static str {
        "JSON file"
    }
}
