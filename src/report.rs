use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::catalog::{
    aggregate_price_ranges, categorize, filter_listings, CategorizeOptions, Category, FilterSpec,
    PriceRange,
};
use crate::models::{Listing, Snapshot};

/// Every derived view of one snapshot, as written to the output file
#[derive(Debug, Serialize)]
pub struct CatalogReport<'a> {
    pub fetched_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub total_listings: usize,
    pub options: CategorizeOptions,
    pub categories: Vec<Category<'a>>,
    pub filter: FilterSpec,
    pub filtered: Vec<&'a Listing>,
    pub price_ranges: Vec<PriceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range_error: Option<String>,
}

impl<'a> CatalogReport<'a> {
    pub fn build(snapshot: &'a Snapshot, options: CategorizeOptions, filter: FilterSpec) -> Self {
        let sale_listings: Vec<Listing> = snapshot.sale_listings();
        let (price_ranges, price_range_error) = match aggregate_price_ranges(&sale_listings) {
            Ok(ranges) => (ranges, None),
            Err(e) => {
                warn!("Price ranges unavailable: {}", e);
                (Vec::new(), Some(e.to_string()))
            }
        };

        Self {
            fetched_at: snapshot.fetched_at,
            generated_at: Utc::now(),
            total_listings: snapshot.len(),
            options,
            categories: categorize(&snapshot.listings, &options),
            filtered: filter_listings(&snapshot.listings, &filter),
            filter,
            price_ranges,
            price_range_error,
        }
    }
}
