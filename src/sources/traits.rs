use crate::models::Listing;
use anyhow::Result;
use async_trait::async_trait;

/// Anything that can produce the current rows of the `cars` table.
/// The backend is hosted elsewhere; implementations only read.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the available listings, newest first
    async fn fetch(&self) -> Result<Vec<Listing>>;

    /// Get the name of the source, for logs
    fn source_name(&self) -> &'static str;
}
