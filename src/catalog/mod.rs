//! Derived views over a listing snapshot.
//!
//! Everything here is a pure function of its input: no I/O, no state kept
//! between calls. The caller owns the snapshot and recomputes views when it
//! changes.

pub mod categorize;
pub mod filter;
pub mod price_range;

pub use categorize::{
    categorize, is_certified, is_hot_deal, CategorizeOptions, Category, CategoryKind, RentalPolicy,
};
pub use filter::{filter_listings, max_observed_price, FilterSpec, PriceInterval};
pub use price_range::{aggregate_price_ranges, PriceRange};
