use thiserror::Error;

/// Errors from parsing user- or config-supplied labels
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown listing type: {0:?} (expected \"sale\" or \"rent\")")]
    ListingType(String),

    #[error("Unknown type label: {0:?} (expected \"For Sale\" or \"For Rent\")")]
    TypeLabel(String),

    #[error("Unknown language: {0:?} (expected en, rw or fr)")]
    Language(String),

    #[error("Unknown rental policy: {0:?} (expected disjoint or overlap)")]
    RentalPolicy(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceRangeError {
    #[error("Mixed currencies for {brand} {model}: {currencies:?}")]
    MixedCurrency {
        brand: String,
        model: String,
        currencies: Vec<String>,
    },
}

/// Reasons an admin draft cannot become a listing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    InvalidType(#[from] ParseError),

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    #[error("Invalid seat count: {0}")]
    InvalidSeats(i32),

    #[error("At least {required} photos are required, got {provided}")]
    NotEnoughPhotos { required: usize, provided: usize },
}
