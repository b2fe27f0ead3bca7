use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info, warn};

use crate::catalog::{CategorizeOptions, FilterSpec, RentalPolicy};
use crate::i18n::Language;
use crate::models::draft::DEFAULT_MIN_PHOTOS;
use crate::models::{DealershipContact, Listing, TypeLabel};

/// Where the listing snapshot comes from
#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    Supabase { url: String, anon_key: String },
    File(PathBuf),
}

/// Filter criteria supplied at startup; unset parts fall back to the
/// cleared filter for whatever snapshot gets loaded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterConfig {
    pub brands: Vec<String>,
    pub types: Vec<TypeLabel>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl FilterConfig {
    pub fn to_spec(&self, listings: &[Listing]) -> FilterSpec {
        let cleared = FilterSpec::for_snapshot(listings);
        let low = self.min_price.unwrap_or(cleared.price_range.low);
        let high = self.max_price.unwrap_or(cleared.price_range.high);

        cleared
            .with_brands(self.brands.iter().cloned())
            .with_types(self.types.iter().copied())
            .with_price_range(low, high)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceConfig,
    pub language: Language,
    pub rental_policy: RentalPolicy,
    pub filter: FilterConfig,
    pub output: PathBuf,
    pub contact: DealershipContact,
    pub min_photos: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `load` uses the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let source = match (var("SUPABASE_URL"), var("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => SourceConfig::Supabase { url, anon_key },
            (Some(_), None) => return Err(anyhow!("SUPABASE_URL is set but SUPABASE_ANON_KEY is not")),
            (None, anon_key) => {
                if anon_key.is_some() {
                    warn!("SUPABASE_ANON_KEY is set but SUPABASE_URL is not, reading the snapshot file instead");
                } else {
                    info!("SUPABASE_URL not set, reading the snapshot file");
                }
                SourceConfig::File(PathBuf::from(string_or(&var, "CATALOG_SNAPSHOT_FILE", "cars.json")))
            }
        };

        let defaults = DealershipContact::default();
        let contact = DealershipContact {
            phone: string_or(&var, "DEALERSHIP_PHONE", &defaults.phone),
            whatsapp: string_or(&var, "DEALERSHIP_WHATSAPP", &defaults.whatsapp),
            email: string_or(&var, "DEALERSHIP_EMAIL", &defaults.email),
        };

        let filter = FilterConfig {
            brands: split_list(var("CATALOG_FILTER_BRANDS")),
            types: split_list(var("CATALOG_FILTER_TYPES"))
                .iter()
                .map(|t| t.parse::<TypeLabel>())
                .collect::<Result<_, _>>()
                .context("Invalid CATALOG_FILTER_TYPES")?,
            min_price: parse_optional(&var, "CATALOG_MIN_PRICE")?,
            max_price: parse_optional(&var, "CATALOG_MAX_PRICE")?,
        };

        let config = Self {
            source,
            language: parse_or(&var, "CATALOG_LANGUAGE", Language::default())?,
            rental_policy: parse_or(&var, "CATALOG_RENTAL_POLICY", RentalPolicy::default())?,
            filter,
            output: PathBuf::from(string_or(&var, "CATALOG_OUTPUT", "catalog.json")),
            contact,
            min_photos: parse_or(&var, "CATALOG_MIN_PHOTOS", DEFAULT_MIN_PHOTOS)?,
        };

        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    pub fn categorize_options(&self) -> CategorizeOptions {
        CategorizeOptions {
            rental_policy: self.rental_policy,
            language: self.language,
        }
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw.parse().with_context(|| format!("Invalid {key} value: {raw}")),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn string_or<F>(var: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

/// Unset means "take the bound from the loaded snapshot"
fn parse_optional<F>(var: &F, key: &str) -> Result<Option<f64>>
where
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .with_context(|| format!("Invalid {key} value: {raw}")),
        None => {
            info!("{key} not set, using default: snapshot price bound");
            Ok(None)
        }
    }
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_lot;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.source, SourceConfig::File(PathBuf::from("cars.json")));
        assert_eq!(config.language, Language::En);
        assert_eq!(config.rental_policy, RentalPolicy::Disjoint);
        assert_eq!(config.filter, FilterConfig::default());
        assert_eq!(config.output, PathBuf::from("catalog.json"));
        assert_eq!(config.contact, DealershipContact::default());
        assert_eq!(config.min_photos, 3);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SUPABASE_URL", "https://example.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("CATALOG_LANGUAGE", "rw"),
            ("CATALOG_RENTAL_POLICY", "overlap"),
            ("CATALOG_FILTER_BRANDS", "Toyota, Honda,"),
            ("CATALOG_FILTER_TYPES", "For Sale"),
            ("CATALOG_MAX_PRICE", "16000000"),
            ("DEALERSHIP_EMAIL", "sales@example.com"),
        ])
        .unwrap();

        assert!(matches!(config.source, SourceConfig::Supabase { .. }));
        assert_eq!(config.language, Language::Rw);
        assert_eq!(config.rental_policy, RentalPolicy::Overlap);
        assert_eq!(config.filter.brands, vec!["Toyota", "Honda"]);
        assert_eq!(config.filter.types, vec![TypeLabel::ForSale]);
        assert_eq!(config.filter.max_price, Some(16_000_000.0));
        assert_eq!(config.contact.email, "sales@example.com");
        assert_eq!(config.contact.phone, "+250796684401");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("CATALOG_LANGUAGE", "de")]).is_err());
        assert!(config_from(&[("CATALOG_FILTER_TYPES", "For Lease")]).is_err());
        assert!(config_from(&[("CATALOG_MIN_PRICE", "cheap")]).is_err());
        assert!(config_from(&[("SUPABASE_URL", "https://example.supabase.co")]).is_err());
    }

    #[test]
    fn test_anon_key_without_url_reads_the_file() {
        let config = config_from(&[
            ("SUPABASE_ANON_KEY", "anon"),
            ("CATALOG_SNAPSHOT_FILE", "export.json"),
        ])
        .unwrap();
        assert_eq!(config.source, SourceConfig::File(PathBuf::from("export.json")));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("CATALOG_OUTPUT", "  "),
            ("DEALERSHIP_PHONE", ""),
            ("CATALOG_MIN_PRICE", " "),
        ])
        .unwrap();
        assert_eq!(config.output, PathBuf::from("catalog.json"));
        assert_eq!(config.contact.phone, "+250796684401");
        assert_eq!(config.filter.min_price, None);
    }

    #[test]
    fn test_filter_config_to_spec() {
        let lot = sample_lot();
        let filter = FilterConfig {
            max_price: Some(16_000_000.0),
            ..Default::default()
        };
        let spec = filter.to_spec(&lot);
        assert_eq!(spec.price_range.low, 0.0);
        assert_eq!(spec.price_range.high, 16_000_000.0);
        assert!(spec.brands.is_empty());
    }
}
