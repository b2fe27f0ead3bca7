pub mod file;
pub mod supabase;
pub mod traits;
pub mod types;

pub use file::JsonFileSource;
pub use supabase::SupabaseSource;
pub use traits::ListingSource;
pub use types::QueryParams;

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::{Listing, Snapshot};

/// Fetch a snapshot once. A failed fetch is logged and yields an empty
/// snapshot; there is no retry.
pub async fn load_snapshot(source: &dyn ListingSource) -> Snapshot {
    info!("Loading listings from {}", source.source_name());

    match source.fetch().await {
        Ok(listings) => {
            let fetched = listings.len();
            let snapshot = Snapshot::new(listings);
            info!(
                "Loaded {} available listings ({} fetched) from {}",
                snapshot.len(),
                fetched,
                source.source_name()
            );
            snapshot
        }
        Err(e) => {
            warn!("Failed to load listings from {}: {:#}", source.source_name(), e);
            Snapshot::empty()
        }
    }
}

/// Decode raw table rows, skipping any that do not fit the listing shape
pub(crate) fn decode_rows(rows: Vec<Value>) -> Vec<Listing> {
    let total = rows.len();
    let listings: Vec<Listing> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            let id = row.get("id").and_then(Value::as_str).unwrap_or("?").to_string();
            match serde_json::from_value::<Listing>(row) {
                Ok(listing) => Some(listing),
                Err(e) => {
                    warn!("Skipping row {} (id {}): {}", idx, id, e);
                    None
                }
            }
        })
        .collect();

    {
        let mut seen: HashSet<&str> = HashSet::new();
        for listing in &listings {
            if !seen.insert(listing.id.as_str()) {
                warn!("Duplicate listing id {}; both rows are kept", listing.id);
            }
        }
    }

    debug!("Decoded {} of {} rows", listings.len(), total);
    listings
}
