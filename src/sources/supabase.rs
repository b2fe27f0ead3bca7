use crate::models::Listing;
use crate::sources::decode_rows;
use crate::sources::traits::ListingSource;
use crate::sources::types::QueryParams;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Reads the `cars` table through the hosted backend's REST endpoint
pub struct SupabaseSource {
    client: Client,
    base_url: String,
    api_key: String,
    params: QueryParams,
}

impl SupabaseSource {
    /// Create a source reading available cars, newest first
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::with_params(base_url, api_key, QueryParams::default())
    }

    /// Create a source with custom query parameters
    pub fn with_params(base_url: &str, api_key: &str, params: QueryParams) -> Result<Self> {
        // One-shot read with no client timeout
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            params,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/rest/v1/{}?{}",
            self.base_url,
            self.params.table,
            self.params.to_query_string()
        )
    }
}

#[async_trait]
impl ListingSource for SupabaseSource {
    async fn fetch(&self) -> Result<Vec<Listing>> {
        let url = self.endpoint();
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Failed to reach the listings backend")?;

        if !response.status().is_success() {
            warn!("Backend returned status: {}", response.status());
            anyhow::bail!("Failed to fetch listings: {}", response.status());
        }

        let rows: Vec<Value> = response
            .json()
            .await
            .context("Failed to parse listings response")?;

        info!("Fetched {} rows from table {}", rows.len(), self.params.table);
        Ok(decode_rows(rows))
    }

    fn source_name(&self) -> &'static str {
        "Supabase"
    }
}
