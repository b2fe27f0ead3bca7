use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseError;
use crate::i18n::{translate, Language};
use crate::models::Listing;

/// How the Rental Cars group treats rentals already shown as deals or certified
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RentalPolicy {
    /// A rental appears in at most one group
    #[default]
    Disjoint,
    /// Every rental appears under Rental Cars, even if also a hot deal or certified
    Overlap,
}

impl FromStr for RentalPolicy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disjoint" => Ok(RentalPolicy::Disjoint),
            "overlap" => Ok(RentalPolicy::Overlap),
            other => Err(ParseError::RentalPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for RentalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RentalPolicy::Disjoint => f.write_str("disjoint"),
            RentalPolicy::Overlap => f.write_str("overlap"),
        }
    }
}

/// Display groups in priority order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    HotDeals,
    Certified,
    UsedForSale,
    Rental,
}

impl CategoryKind {
    pub const PRIORITY: [CategoryKind; 4] = [
        CategoryKind::HotDeals,
        CategoryKind::Certified,
        CategoryKind::UsedForSale,
        CategoryKind::Rental,
    ];

    pub fn title_key(self) -> &'static str {
        match self {
            CategoryKind::HotDeals => "hotDealsForSale",
            CategoryKind::Certified => "certifiedInspected",
            CategoryKind::UsedForSale => "usedCarsForSale",
            CategoryKind::Rental => "rentalCars",
        }
    }

    pub fn description_key(self) -> &'static str {
        match self {
            CategoryKind::HotDeals => "hotDealsDesc",
            CategoryKind::Certified => "certifiedInspectedDesc",
            CategoryKind::UsedForSale => "usedCarsDesc",
            CategoryKind::Rental => "rentalCarsDesc",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorizeOptions {
    pub rental_policy: RentalPolicy,
    pub language: Language,
}

/// One non-empty display section
#[derive(Debug, Clone, Serialize)]
pub struct Category<'a> {
    pub kind: CategoryKind,
    pub name: String,
    pub description: String,
    pub listings: Vec<&'a Listing>,
}

/// Title heuristic for the Hot Deals group.
///
/// Featured listings always count; otherwise the title must mention
/// "hot deal" in any case.
pub fn is_hot_deal(listing: &Listing) -> bool {
    listing.featured || title_contains(listing, "hot deal")
}

/// Title heuristic for the Certified & Inspected group
pub fn is_certified(listing: &Listing) -> bool {
    title_contains(listing, "certified") || title_contains(listing, "inspected")
}

fn title_contains(listing: &Listing, needle: &str) -> bool {
    listing.title.to_lowercase().contains(needle)
}

/// Partition a snapshot into display groups.
///
/// Claims run strictly Hot Deals -> Certified -> Used For Sale, so a sale
/// listing lands in exactly one of those three. Rental Cars follows
/// `options.rental_policy`. Unavailable listings are ignored and empty
/// groups are left out.
pub fn categorize<'a>(listings: &'a [Listing], options: &CategorizeOptions) -> Vec<Category<'a>> {
    let visible: Vec<&Listing> = listings.iter().filter(|l| l.available).collect();

    let mut claimed: HashSet<usize> = HashSet::new();
    let hot_deals = claim(&visible, &mut claimed, is_hot_deal);
    let certified = claim(&visible, &mut claimed, is_certified);
    let used_for_sale = claim(&visible, &mut claimed, Listing::is_sale);

    let rentals: Vec<&Listing> = visible
        .iter()
        .enumerate()
        .filter(|(_, l)| l.is_rent())
        .filter(|(pos, _)| match options.rental_policy {
            RentalPolicy::Disjoint => !claimed.contains(pos),
            RentalPolicy::Overlap => true,
        })
        .map(|(_, l)| *l)
        .collect();

    let groups = [
        (CategoryKind::HotDeals, hot_deals),
        (CategoryKind::Certified, certified),
        (CategoryKind::UsedForSale, used_for_sale),
        (CategoryKind::Rental, rentals),
    ];

    let categories: Vec<Category<'a>> = groups
        .into_iter()
        .filter(|(_, members)| !members.is_empty())
        .map(|(kind, members)| Category {
            kind,
            name: translate(options.language, kind.title_key()).to_string(),
            description: translate(options.language, kind.description_key()).to_string(),
            listings: members,
        })
        .collect();

    debug!(
        "Categorized {} listings into {} groups ({} policy)",
        visible.len(),
        categories.len(),
        options.rental_policy
    );

    categories
}

/// Take every unclaimed listing matching `predicate`. Claims are keyed by
/// position in `visible`; rows sharing an id are each placed.
fn claim<'a>(
    visible: &[&'a Listing],
    claimed: &mut HashSet<usize>,
    predicate: impl Fn(&Listing) -> bool,
) -> Vec<&'a Listing> {
    let mut members = Vec::new();
    for (pos, &listing) in visible.iter().enumerate() {
        if !claimed.contains(&pos) && predicate(listing) {
            claimed.insert(pos);
            members.push(listing);
        }
    }
    members
}
