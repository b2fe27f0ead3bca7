use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::PriceRangeError;
use crate::models::{format_price, Listing};

/// Observed price band for one brand + model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub brand: String,
    pub model: String,
    pub min_price: f64,
    pub max_price: f64,
    pub currency: String,
    pub count: usize,
}

impl PriceRange {
    fn start(listing: &Listing) -> Self {
        Self {
            brand: listing.brand.clone(),
            model: listing.model.clone(),
            min_price: listing.price,
            max_price: listing.price,
            currency: listing.currency.clone(),
            count: 1,
        }
    }

    /// "Toyota RAV4: 18,000,000 - 20,000,000 RWF (2)"
    pub fn display(&self) -> String {
        if self.min_price == self.max_price {
            format!(
                "{} {}: {} ({})",
                self.brand,
                self.model,
                format_price(self.min_price, &self.currency),
                self.count
            )
        } else {
            format!(
                "{} {}: {} - {} ({})",
                self.brand,
                self.model,
                format_price(self.min_price, "").trim_end(),
                format_price(self.max_price, &self.currency),
                self.count
            )
        }
    }
}

/// Group sale listings by `(brand, model)` and report each group's price band.
///
/// Output is sorted by `min_price`, ties keeping first-seen order. Rentals and
/// unavailable listings are skipped. A group quoting more than one currency is
/// rejected instead of mixing amounts.
pub fn aggregate_price_ranges(listings: &[Listing]) -> Result<Vec<PriceRange>, PriceRangeError> {
    let mut ranges: Vec<PriceRange> = Vec::new();
    let mut currencies: Vec<Vec<String>> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for listing in listings.iter().filter(|l| l.available && l.is_sale()) {
        match index.get(&(listing.brand.as_str(), listing.model.as_str())) {
            Some(&idx) => {
                let range = &mut ranges[idx];
                range.min_price = range.min_price.min(listing.price);
                range.max_price = range.max_price.max(listing.price);
                range.count += 1;
                if !currencies[idx].contains(&listing.currency) {
                    currencies[idx].push(listing.currency.clone());
                }
            }
            None => {
                index.insert((listing.brand.as_str(), listing.model.as_str()), ranges.len());
                ranges.push(PriceRange::start(listing));
                currencies.push(vec![listing.currency.clone()]);
            }
        }
    }

    if let Some(idx) = currencies.iter().position(|seen| seen.len() > 1) {
        return Err(PriceRangeError::MixedCurrency {
            brand: ranges[idx].brand.clone(),
            model: ranges[idx].model.clone(),
            currencies: currencies.swap_remove(idx),
        });
    }

    ranges.sort_by(|a, b| a.min_price.total_cmp(&b.min_price));
    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{listing, sample_lot};
    use crate::models::ListingType;

    fn car(id: &str, brand: &str, model: &str, price: f64) -> Listing {
        let mut l = listing(id, &format!("{} {}", brand, model), brand, ListingType::Sale, price);
        l.model = model.to_string();
        l
    }

    #[test]
    fn test_groups_by_brand_and_model() {
        let lot = vec![
            car("1", "Toyota", "RAV4", 20_000_000.0),
            car("2", "Honda", "CR-V", 15_000_000.0),
            car("3", "Toyota", "RAV4", 18_000_000.0),
            car("4", "Toyota", "Prado", 45_000_000.0),
            car("5", "Toyota", "RAV4", 22_500_000.0),
        ];

        let ranges = aggregate_price_ranges(&lot).unwrap();
        let keys: Vec<(&str, &str)> = ranges.iter().map(|r| (r.brand.as_str(), r.model.as_str())).collect();
        assert_eq!(keys, vec![("Honda", "CR-V"), ("Toyota", "RAV4"), ("Toyota", "Prado")]);

        let rav4 = &ranges[1];
        assert_eq!(rav4.min_price, 18_000_000.0);
        assert_eq!(rav4.max_price, 22_500_000.0);
        assert_eq!(rav4.count, 3);
        assert_eq!(rav4.currency, "RWF");
        assert_eq!(ranges.iter().map(|r| r.count).sum::<usize>(), lot.len());
    }

    #[test]
    fn test_rentals_are_not_counted() {
        let ranges = aggregate_price_ranges(&sample_lot()).unwrap();
        assert_eq!(ranges.len(), 3);
        assert!(ranges.iter().all(|r| r.brand != "Mazda"));
        assert!(ranges.iter().all(|r| r.min_price <= r.max_price && r.count >= 1));
    }

    #[test]
    fn test_mixed_currency_is_rejected() {
        let mut usd = car("2", "Toyota", "RAV4", 15_000.0);
        usd.currency = "USD".to_string();
        let lot = vec![car("1", "Toyota", "RAV4", 20_000_000.0), usd];

        assert_eq!(
            aggregate_price_ranges(&lot),
            Err(PriceRangeError::MixedCurrency {
                brand: "Toyota".to_string(),
                model: "RAV4".to_string(),
                currencies: vec!["RWF".to_string(), "USD".to_string()],
            })
        );
    }

    #[test]
    fn test_equal_min_price_keeps_input_order() {
        let fit = car("1", "Honda", "Fit", 7_000_000.0);
        let vitz = car("2", "Toyota", "Vitz", 7_000_000.0);

        let ranges = aggregate_price_ranges(&[fit.clone(), vitz.clone()]).unwrap();
        let models: Vec<&str> = ranges.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(models, vec!["Fit", "Vitz"]);

        let ranges = aggregate_price_ranges(&[vitz, fit]).unwrap();
        let models: Vec<&str> = ranges.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(models, vec!["Vitz", "Fit"]);
    }

    #[test]
    fn test_same_model_under_different_brands_is_two_groups() {
        let lot = vec![
            car("1", "Toyota", "Corolla", 9_000_000.0),
            car("2", "Kia", "Corolla", 8_000_000.0),
        ];
        let ranges = aggregate_price_ranges(&lot).unwrap();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].brand, "Kia");
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_price_ranges(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_display() {
        let lot = vec![
            car("1", "Toyota", "RAV4", 20_000_000.0),
            car("2", "Toyota", "RAV4", 18_000_000.0),
            car("3", "Honda", "Fit", 7_000_000.0),
        ];
        let ranges = aggregate_price_ranges(&lot).unwrap();
        assert_eq!(ranges[0].display(), "Honda Fit: 7,000,000 RWF (1)");
        assert_eq!(ranges[1].display(), "Toyota RAV4: 18,000,000 - 20,000,000 RWF (2)");
    }
}
