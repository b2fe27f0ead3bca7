pub mod draft;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParseError;

pub use draft::{ListingDraft, NewListing};

/// Image shown when a listing carries no photo at all
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Whether a vehicle is offered for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Sale,
    Rent,
}

impl ListingType {
    /// Label used by the storefront filters ("For Sale" / "For Rent")
    pub fn label(self) -> TypeLabel {
        match self {
            ListingType::Sale => TypeLabel::ForSale,
            ListingType::Rent => TypeLabel::ForRent,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListingType::Sale => "sale",
            ListingType::Rent => "rent",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sale" => Ok(ListingType::Sale),
            "rent" => Ok(ListingType::Rent),
            other => Err(ParseError::ListingType(other.to_string())),
        }
    }
}

/// Display label of a listing type, as shown in the filter sidebar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeLabel {
    #[serde(rename = "For Sale")]
    ForSale,
    #[serde(rename = "For Rent")]
    ForRent,
}

impl TypeLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeLabel::ForSale => "For Sale",
            TypeLabel::ForRent => "For Rent",
        }
    }
}

impl fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeLabel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "for sale" | "sale" => Ok(TypeLabel::ForSale),
            "for rent" | "rent" => Ok(TypeLabel::ForRent),
            other => Err(ParseError::TypeLabel(other.to_string())),
        }
    }
}

/// A vehicle record, shaped exactly like a row of the `cars` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub currency: String,
    #[serde(rename = "type")]
    pub kind: ListingType,
    pub fuel_type: String,
    pub transmission: String,
    pub seats: i32,
    #[serde(default)]
    pub mileage: Option<u64>,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gallery_urls: Vec<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_whatsapp: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Listing {
    pub fn type_label(&self) -> TypeLabel {
        self.kind.label()
    }

    pub fn is_sale(&self) -> bool {
        self.kind == ListingType::Sale
    }

    pub fn is_rent(&self) -> bool {
        self.kind == ListingType::Rent
    }

    /// Primary image first, then the gallery, skipping blanks and repeats.
    /// Falls back to the placeholder so a card always has something to show.
    pub fn images(&self) -> Vec<&str> {
        let mut images: Vec<&str> = Vec::new();
        let candidates = self
            .image_url
            .iter()
            .chain(self.gallery_urls.iter())
            .map(|url| url.trim())
            .filter(|url| !url.is_empty());

        for url in candidates {
            if !images.contains(&url) {
                images.push(url);
            }
        }

        if images.is_empty() {
            images.push(PLACEHOLDER_IMAGE);
        }
        images
    }

    /// Contact details for this listing, with dealership defaults filling gaps
    pub fn contact(&self, defaults: &DealershipContact) -> ContactDetails {
        ContactDetails {
            phone: non_blank(&self.contact_phone).unwrap_or(defaults.phone.as_str()).to_string(),
            whatsapp: non_blank(&self.contact_whatsapp)
                .unwrap_or(defaults.whatsapp.as_str())
                .to_string(),
            email: non_blank(&self.contact_email).unwrap_or(defaults.email.as_str()).to_string(),
        }
    }

    /// Price formatted for a card; rentals are quoted per day
    pub fn display_price(&self) -> String {
        match self.kind {
            ListingType::Sale => format_price(self.price, &self.currency),
            ListingType::Rent => format_rental_price(self.price, &self.currency),
        }
    }
}

/// Dealership-wide contact fallbacks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DealershipContact {
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
}

impl Default for DealershipContact {
    fn default() -> Self {
        Self {
            phone: "+250796684401".to_string(),
            whatsapp: "+250796684401".to_string(),
            email: "info@jomarbusinessgroup.com".to_string(),
        }
    }
}

/// Resolved contact details for one listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactDetails {
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
}

impl ContactDetails {
    pub fn phone_link(&self) -> String {
        format!("tel:{}", self.phone)
    }

    pub fn whatsapp_link(&self) -> String {
        let number: String = self.whatsapp.chars().filter(|c| c.is_ascii_digit()).collect();
        format!("https://wa.me/{}", number)
    }

    pub fn email_link(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

/// The available listings observed at one point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub listings: Vec<Listing>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Build a snapshot, dropping anything not marked available
    pub fn new(mut listings: Vec<Listing>) -> Self {
        listings.retain(|listing| listing.available);
        Self {
            listings,
            fetched_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn sale_listings(&self) -> Vec<Listing> {
        self.listings.iter().filter(|l| l.is_sale()).cloned().collect()
    }
}

/// `20000000, "RWF"` -> `"20,000,000 RWF"`
pub fn format_price(price: f64, currency: &str) -> String {
    format!("{} {}", group_thousands(price), currency)
}

/// `30000, "RWF"` -> `"30,000 RWF/day"`
pub fn format_rental_price(price: f64, currency: &str) -> String {
    format!("{} {}/day", group_thousands(price), currency)
}

fn group_thousands(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents_total = (value.abs() * 100.0).round() as u64;
    let whole = (cents_total / 100).to_string();
    let cents = cents_total % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match cents {
        0 => format!("{}{}", sign, grouped),
        c if c % 10 == 0 => format!("{}{}.{}", sign, grouped, c / 10),
        c => format!("{}{}.{:02}", sign, grouped, c),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}


#[cfg(test)]
mod tests {
    use super::fixtures::listing;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_row_with_nulls() {
        let row = json!({
            "id": "a1",
            "title": "Toyota Prado",
            "brand": "Toyota",
            "model": "Prado",
            "year": 2018,
            "price": 45000000,
            "currency": "RWF",
            "type": "sale",
            "fuel_type": "Diesel",
            "transmission": "Automatic",
            "seats": 7,
            "mileage": null,
            "location": "Kigali",
            "description": null,
            "features": null,
            "image_url": null,
            "gallery_urls": null,
            "contact_email": null,
            "contact_phone": null,
            "contact_whatsapp": null,
            "featured": null,
            "available": true,
            "created_at": "2025-07-28T10:00:00.123456+00:00"
        });

        let listing: Listing = serde_json::from_value(row).unwrap();
        assert_eq!(listing.kind, ListingType::Sale);
        assert_eq!(listing.price, 45_000_000.0);
        assert!(listing.features.is_empty());
        assert!(listing.gallery_urls.is_empty());
        assert!(!listing.featured);
        assert!(listing.available);
        assert!(listing.created_at.is_some());
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let mut row = serde_json::to_value(listing("x", "Kia Rio", "Kia", ListingType::Sale, 1.0)).unwrap();
        row["type"] = json!("lease");
        assert!(serde_json::from_value::<Listing>(row).is_err());
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(ListingType::Sale.label().to_string(), "For Sale");
        assert_eq!(ListingType::Rent.label().to_string(), "For Rent");
        assert_eq!("For Rent".parse::<TypeLabel>().unwrap(), TypeLabel::ForRent);
        assert_eq!(" SALE ".parse::<ListingType>().unwrap(), ListingType::Sale);
        assert!("lease".parse::<ListingType>().is_err());
    }

    #[test]
    fn test_images_dedup_and_placeholder() {
        let mut car = listing("1", "Toyota RAV4", "Toyota", ListingType::Sale, 1.0);
        assert_eq!(car.images(), vec![PLACEHOLDER_IMAGE]);

        car.image_url = Some("https://cdn/a.jpg".to_string());
        car.gallery_urls = vec![
            "https://cdn/a.jpg".to_string(),
            " ".to_string(),
            "https://cdn/b.jpg".to_string(),
        ];
        assert_eq!(car.images(), vec!["https://cdn/a.jpg", "https://cdn/b.jpg"]);
    }

    #[test]
    fn test_contact_fallbacks() {
        let mut car = listing("1", "Toyota RAV4", "Toyota", ListingType::Sale, 1.0);
        car.contact_phone = Some("  ".to_string());
        car.contact_email = Some("sales@example.com".to_string());

        let contact = car.contact(&DealershipContact::default());
        assert_eq!(contact.phone, "+250796684401");
        assert_eq!(contact.email, "sales@example.com");
        assert_eq!(contact.whatsapp_link(), "https://wa.me/250796684401");
        assert_eq!(contact.phone_link(), "tel:+250796684401");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(20_000_000.0, "RWF"), "20,000,000 RWF");
        assert_eq!(format_price(999.0, "USD"), "999 USD");
        assert_eq!(format_price(1234.5, "USD"), "1,234.5 USD");
        assert_eq!(format_price(0.0, "RWF"), "0 RWF");
        assert_eq!(format_rental_price(30_000.0, "RWF"), "30,000 RWF/day");
    }

    #[test]
    fn test_snapshot_drops_unavailable() {
        let mut hidden = listing("2", "Honda Fit", "Honda", ListingType::Sale, 1.0);
        hidden.available = false;
        let snapshot = Snapshot::new(vec![
            listing("1", "Toyota RAV4", "Toyota", ListingType::Sale, 1.0),
            hidden,
        ]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.listings[0].id, "1");
    }
}
