use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DraftError;
use crate::models::ListingType;

/// Currency assumed when the admin form leaves it blank
pub const DEFAULT_CURRENCY: &str = "RWF";

/// Photos the admin panel asks for before a car can be published
pub const DEFAULT_MIN_PHOTOS: usize = 3;

const OLDEST_MODEL_YEAR: i32 = 1900;

/// Raw admin form input for a new vehicle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingDraft {
    pub title: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub currency: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub fuel_type: String,
    pub transmission: String,
    pub seats: i32,
    pub mileage: Option<u64>,
    pub location: String,
    pub description: String,
    /// Comma-separated, as typed into the form
    pub features: String,
    /// Uploaded photo URLs in upload order
    pub photos: Vec<String>,
    pub contact_email: String,
    pub contact_phone: String,
    pub contact_whatsapp: String,
    pub featured: bool,
}

/// A validated record, ready to be inserted into the `cars` table.
/// The backend assigns `id` and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewListing {
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
    pub mileage: Option<u64>,
    pub location: String,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub image_url: String,
    pub gallery_urls: Vec<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_whatsapp: Option<String>,
    pub featured: bool,
    pub available: bool,
}

impl ListingDraft {
    pub fn validate(&self, min_photos: usize) -> Result<NewListing, DraftError> {
        let title = required(&self.title, "title")?;
        let brand = required(&self.brand, "brand")?;
        let model = required(&self.model, "model")?;
        let location = required(&self.location, "location")?;
        let kind: ListingType = self.kind.parse()?;

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DraftError::InvalidPrice(self.price));
        }

        let newest_model_year = Utc::now().year() + 1;
        if !(OLDEST_MODEL_YEAR..=newest_model_year).contains(&self.year) {
            return Err(DraftError::InvalidYear(self.year));
        }

        if self.seats < 1 {
            return Err(DraftError::InvalidSeats(self.seats));
        }

        let photos: Vec<String> = self
            .photos
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        let mut photos = photos.into_iter();
        let image_url = match photos.next() {
            Some(primary) if photos.len() + 1 >= min_photos => primary,
            first => {
                return Err(DraftError::NotEnoughPhotos {
                    required: min_photos,
                    provided: first.map_or(0, |_| photos.len() + 1),
                })
            }
        };

        let currency = match self.currency.trim() {
            "" => DEFAULT_CURRENCY.to_string(),
            c => c.to_uppercase(),
        };

        Ok(NewListing {
            title,
            brand,
            model,
            year: self.year,
            price: self.price,
            currency,
            kind,
            fuel_type: self.fuel_type.trim().to_string(),
            transmission: self.transmission.trim().to_string(),
            seats: self.seats,
            mileage: self.mileage,
            location,
            description: optional(&self.description),
            features: split_features(&self.features),
            image_url,
            gallery_urls: photos.collect(),
            contact_email: optional(&self.contact_email),
            contact_phone: optional(&self.contact_phone),
            contact_whatsapp: optional(&self.contact_whatsapp),
            featured: self.featured,
            available: true,
        })
    }
}

/// "AC, Bluetooth,, Sunroof " -> ["AC", "Bluetooth", "Sunroof"]
pub fn split_features(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

fn required(value: &str, field: &'static str) -> Result<String, DraftError> {
    match value.trim() {
        "" => Err(DraftError::MissingField(field)),
        v => Ok(v.to_string()),
    }
}

fn optional(value: &str) -> Option<String> {
    match value.trim() {
        "" => None,
        v => Some(v.to_string()),
    }
}
