use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{Listing, TypeLabel};

/// Closed price interval `[low, high]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceInterval {
    pub low: f64,
    pub high: f64,
}

impl PriceInterval {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// False for inverted or NaN bounds, which no price can satisfy
    pub fn contains(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }

    pub fn is_satisfiable(&self) -> bool {
        self.low <= self.high
    }
}

/// Sidebar filter state. Empty sets mean "no restriction".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterSpec {
    pub brands: BTreeSet<String>,
    pub price_range: PriceInterval,
    pub types: BTreeSet<TypeLabel>,
}

impl FilterSpec {
    /// The cleared filter for a snapshot: every brand, every type, `[0, max price]`
    pub fn for_snapshot(listings: &[Listing]) -> Self {
        Self {
            brands: BTreeSet::new(),
            price_range: PriceInterval::new(0.0, max_observed_price(listings)),
            types: BTreeSet::new(),
        }
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = brands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_types<I>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = TypeLabel>,
    {
        self.types = types.into_iter().collect();
        self
    }

    pub fn with_price_range(mut self, low: f64, high: f64) -> Self {
        self.price_range = PriceInterval::new(low, high);
        self
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        listing.available
            && matches_brand(&self.brands, listing)
            && self.price_range.contains(listing.price)
            && matches_type(&self.types, listing)
    }
}

/// Highest price in the snapshot, or 0 when it is empty
pub fn max_observed_price(listings: &[Listing]) -> f64 {
    listings
        .iter()
        .filter(|l| l.available)
        .map(|l| l.price)
        .fold(0.0, f64::max)
}

/// Stable filter: survivors keep their input order.
pub fn filter_listings<'a>(listings: &'a [Listing], spec: &FilterSpec) -> Vec<&'a Listing> {
    if !spec.price_range.is_satisfiable() {
        return Vec::new();
    }
    listings.iter().filter(|l| spec.matches(l)).collect()
}

fn matches_brand(brands: &BTreeSet<String>, listing: &Listing) -> bool {
    brands.is_empty() || brands.contains(&listing.brand)
}

fn matches_type(types: &BTreeSet<TypeLabel>, listing: &Listing) -> bool {
    types.is_empty() || types.contains(&listing.type_label())
}
