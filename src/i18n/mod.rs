//! Storefront translations.
//!
//! Keys are flat or dotted (`rentalBlog.call`). Lookup falls back to
//! English, then to the key itself, so a missing translation never hides
//! a label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Rw,
    Fr,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Rw, Language::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Rw => "rw",
            Language::Fr => "fr",
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => EN,
            Language::Rw => RW,
            Language::Fr => FR,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "rw" => Ok(Language::Rw),
            "fr" => Ok(Language::Fr),
            other => Err(ParseError::Language(other.to_string())),
        }
    }
}

/// Look up `key` in `language`, falling back to English and then to the key
pub fn translate<'a>(language: Language, key: &'a str) -> &'a str {
    lookup(language, key)
        .or_else(|| lookup(Language::En, key))
        .unwrap_or(key)
}

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    language
        .table()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

const EN: &[(&str, &str)] = &[
    ("home", "Home"),
    ("contact", "Contact"),
    ("aboutUs", "About Us"),
    ("cars", "Cars"),
    ("forSale", "For Sale"),
    ("forRental", "For Rental"),
    ("allCars", "All Cars"),
    ("call", "Call"),
    ("whatsapp", "WhatsApp"),
    ("featuredCars", "FEATURED CARS"),
    ("hotDeals", "HOT DEALS"),
    ("certifiedInspected", "Certified & Inspected Cars"),
    ("certifiedInspectedDesc", "\"Imodoka zigenzuwe &zifite ibyangombwa\""),
    ("loadingCars", "Loading cars..."),
    ("noFeaturedCars", "No featured cars available at the moment."),
    ("viewAllCars", "View All Cars"),
    ("forSaleLabel", "For Sale"),
    ("forRentLabel", "For Rent"),
    ("year", "Year"),
    ("mileage", "Mileage"),
    ("price", "Price"),
    ("transmission", "Transmission"),
    ("fuel", "Fuel"),
    ("seats", "Seats"),
    ("features", "Features:"),
    ("fullDetails", "Full Details"),
    ("priceOnRequest", "Price on request"),
    ("hotDealsForSale", "HOT DEALS FOR SALE"),
    ("hotDealsDesc", "Professionally inspected and hot deal vehicles."),
    ("usedCarsForSale", "USED CARS FOR SALE"),
    ("usedCarsDesc", "Quality pre-owned vehicles ready for new owners"),
    ("rentalCars", "Rental Cars"),
    ("rentalCarsDesc", "Vehicles available for short and long-term rental"),
    ("rentalBlog.title", "Car Rental Services"),
    (
        "rentalBlog.subtitle",
        "Explore our premium fleet of rental vehicles. Perfect for business trips, family vacations, or daily commutes.",
    ),
    ("rentalBlog.noCars", "No rental cars available at the moment."),
    ("rentalBlog.photos", "Photos"),
    ("rentalBlog.noImage", "No image available"),
    ("rentalBlog.rental", "For Rent"),
    ("rentalBlog.seats", "Seats"),
    ("rentalBlog.transmission", "Transmission"),
    ("rentalBlog.fuel", "Fuel Type"),
    ("rentalBlog.call", "Call Now"),
    ("rentalBlog.details", "View Details"),
];

const RW: &[(&str, &str)] = &[
    ("home", "Ahabanza"),
    ("contact", "Twandikire"),
    ("aboutUs", "Turi nde"),
    ("cars", "Imodoka"),
    ("forSale", "Zo kugura"),
    ("forRental", "Zo gukodesha"),
    ("allCars", "Imodoka zose"),
    ("call", "Duhamagare"),
    ("whatsapp", "WhatsApp"),
    ("featuredCars", "IMODOKA ZIKOMEYE"),
    ("hotDeals", "AMACURUZI ASHYUHA"),
    ("certifiedInspected", "Imodoka Zigenzuwe & Zifite Ibyangombwa"),
    ("certifiedInspectedDesc", "\"Imodoka zigenzuwe &zifite ibyangombwa\""),
    ("loadingCars", "Gupakurura imodoka..."),
    ("noFeaturedCars", "Nta modoka zikomeye ziboneka ubu."),
    ("viewAllCars", "Reba Imodoka Zose"),
    ("forSaleLabel", "Zo Kugura"),
    ("forRentLabel", "Zo Gukodesha"),
    ("year", "Umwaka"),
    ("mileage", "Kilometero"),
    ("price", "Igiciro"),
    ("transmission", "Transmission"),
    ("fuel", "Lisansi"),
    ("seats", "Intebe"),
    ("features", "Ibiranga:"),
    ("fullDetails", "Amakuru Yose"),
    ("priceOnRequest", "Igiciro ku gusaba"),
    ("hotDealsForSale", "AMACURUZI ASHYUHA YO KUGURA"),
    ("hotDealsDesc", "Imodoka zagenzuwe neza kandi zifite amacuruzi ashyuha."),
    ("usedCarsForSale", "IMODOKA ZAKORESHEJWE ZO KUGURA"),
    ("usedCarsDesc", "Imodoka nziza zakoreshejwe ziteguye abanyereza bashya"),
    ("rentalCars", "Imodoka zo Gukodesha"),
    ("rentalCarsDesc", "Imodoka ziboneka zo gukodesha mu gihe kigufi no kirekire"),
    ("rentalBlog.title", "Serivisi z'Ubukode bw'Ibinyabiziga"),
    (
        "rentalBlog.subtitle",
        "Reba ubwato bwacu bwiza bw'ibinyabiziga byo gukodesha. Byiza mu rugendo rw'ubucuruzi, amahoro y'umuryango, cyangwa ingendo za buri munsi.",
    ),
    ("rentalBlog.noCars", "Nta binyabiziga byo gukodesha bihari uyu munsi."),
    ("rentalBlog.photos", "Amafoto"),
    ("rentalBlog.noImage", "Nta shusho ihari"),
    ("rentalBlog.rental", "Byo Gukodesha"),
    ("rentalBlog.seats", "Intebe"),
    ("rentalBlog.transmission", "Ubwishingizi"),
    ("rentalBlog.fuel", "Ubwoko bwa Lisansi"),
    ("rentalBlog.call", "Hamagara None"),
    ("rentalBlog.details", "Reba Amakuru"),
];

const FR: &[(&str, &str)] = &[
    ("home", "Accueil"),
    ("contact", "Contact"),
    ("aboutUs", "À propos"),
    ("cars", "Voitures"),
    ("forSale", "À vendre"),
    ("forRental", "À louer"),
    ("allCars", "Toutes les voitures"),
    ("call", "Appeler"),
    ("whatsapp", "WhatsApp"),
    ("featuredCars", "VOITURES VEDETTES"),
    ("hotDeals", "BONNES AFFAIRES"),
    ("certifiedInspected", "Voitures Certifiées et Inspectées"),
    ("certifiedInspectedDesc", "\"Voitures inspectées et certifiées\""),
    ("loadingCars", "Chargement des voitures..."),
    ("noFeaturedCars", "Aucune voiture vedette disponible pour le moment."),
    ("viewAllCars", "Voir Toutes les Voitures"),
    ("forSaleLabel", "À Vendre"),
    ("forRentLabel", "À Louer"),
    ("year", "Année"),
    ("mileage", "Kilométrage"),
    ("price", "Prix"),
    ("transmission", "Transmission"),
    ("fuel", "Carburant"),
    ("seats", "Sièges"),
    ("features", "Caractéristiques:"),
    ("fullDetails", "Détails Complets"),
    ("priceOnRequest", "Prix sur demande"),
    ("hotDealsForSale", "BONNES AFFAIRES À VENDRE"),
    ("hotDealsDesc", "Véhicules inspectés professionnellement et bonnes affaires."),
    ("usedCarsForSale", "VOITURES D'OCCASION À VENDRE"),
    ("usedCarsDesc", "Véhicules d'occasion de qualité prêts pour de nouveaux propriétaires"),
    ("rentalCars", "Voitures de Location"),
    ("rentalCarsDesc", "Véhicules disponibles pour location court et long terme"),
    ("rentalBlog.title", "Services de Location de Voitures"),
    (
        "rentalBlog.subtitle",
        "Explorez notre flotte premium de véhicules de location. Parfait pour les voyages d'affaires, les vacances en famille ou les trajets quotidiens.",
    ),
    ("rentalBlog.noCars", "Aucune voiture de location disponible pour le moment."),
    ("rentalBlog.photos", "Photos"),
    ("rentalBlog.noImage", "Aucune image disponible"),
    ("rentalBlog.rental", "À Louer"),
    ("rentalBlog.seats", "Sièges"),
    ("rentalBlog.transmission", "Transmission"),
    ("rentalBlog.fuel", "Type de Carburant"),
    ("rentalBlog.call", "Appeler Maintenant"),
    ("rentalBlog.details", "Voir Détails"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate() {
        assert_eq!(translate(Language::En, "rentalCars"), "Rental Cars");
        assert_eq!(translate(Language::Fr, "rentalCars"), "Voitures de Location");
        assert_eq!(translate(Language::Rw, "rentalBlog.call"), "Hamagara None");
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(translate(Language::Rw, "noSuchKey"), "noSuchKey");
    }

    #[test]
    fn test_parse_language() {
        assert_eq!("FR".parse::<Language>().unwrap(), Language::Fr);
        assert_eq!(" rw ".parse::<Language>().unwrap(), Language::Rw);
        assert!("de".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_original_strings_are_carried() {
        assert_eq!(translate(Language::Rw, "home"), "Ahabanza");
        assert_eq!(
            translate(Language::Fr, "noFeaturedCars"),
            "Aucune voiture vedette disponible pour le moment."
        );
        assert_eq!(
            translate(Language::Rw, "rentalBlog.title"),
            "Serivisi z'Ubukode bw'Ibinyabiziga"
        );
        assert_eq!(translate(Language::Fr, "rentalBlog.details"), "Voir Détails");
    }

    #[test]
    fn test_every_language_has_every_english_key() {
        for language in Language::ALL {
            for (key, _) in EN {
                assert!(lookup(language, key).is_some(), "{} missing {}", language, key);
            }
        }
    }

    #[test]
    fn test_no_duplicate_keys() {
        for language in Language::ALL {
            let table = language.table();
            for (i, (key, _)) in table.iter().enumerate() {
                assert!(
                    table[i + 1..].iter().all(|(k, _)| k != key),
                    "{} repeats {}",
                    language,
                    key
                );
            }
        }
    }
}
