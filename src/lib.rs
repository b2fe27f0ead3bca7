//! Catalog views for a used-car dealership storefront.
//!
//! The storefront keeps one snapshot of the `cars` table and derives its
//! display sections from it with [`catalog::categorize`],
//! [`catalog::filter_listings`] and [`catalog::aggregate_price_ranges`].
//! Reads go through a [`sources::ListingSource`]; writes belong to the
//! admin workflow, which only validates drafts here.

pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod report;
pub mod sources;

pub use catalog::{
    aggregate_price_ranges, categorize, filter_listings, CategorizeOptions, Category, CategoryKind,
    FilterSpec, PriceInterval, PriceRange, RentalPolicy,
};
pub use error::{DraftError, ParseError, PriceRangeError};
pub use models::{Listing, ListingType, Snapshot, TypeLabel};
