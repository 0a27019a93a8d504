//! # TravelMate
//!
//! Core of the TravelMate travel-booking demo: a bundled catalog of flights,
//! hotels and package deals, the filters used by the listing pages, an
//! append-only booking ledger, a page-navigation reducer and an AI-backed
//! itinerary planner.
//!
//! Everything except the itinerary request is synchronous and pure. A
//! [`Session`] ties the pieces together for one running front end.

pub mod booking;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod gemini;
pub mod i18n;
pub mod itinerary;
pub mod logging;
pub mod navigation;
pub mod view;

use thiserror::Error;

// Re-export main types for convenience
pub use booking::{record_booking, record_booking_on, Booking, BookingDetails, BookingKind, Ledger};
pub use catalog::{Catalog, CatalogError, FlightOffer, HotelOffer, PackageDeal};
pub use crate::config::Settings;
pub use filter::{filter_flights, filter_hotels, FlightFilter, HotelFilter};
pub use gemini::{GeminiClient, GenerationError};
pub use i18n::{Language, TextDirection, Translations};
pub use itinerary::{
    GenerationRequest, ItineraryOutcome, ItineraryRequester, TextGenerator, FAILURE_MESSAGE,
};
pub use navigation::{reduce, AppState, Event, Page, PlannerState, PlannerStatus, Session};

/// Error types for the TravelMate library
#[derive(Error, Debug)]
pub enum TravelError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Itinerary generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Translation table is invalid: {0}")]
    Translations(#[from] serde_json::Error),
}

/// Load the catalog and translation table shipped with the crate
pub fn load_bundled() -> Result<(Catalog, Translations), TravelError> {
    Ok((Catalog::bundled()?, Translations::bundled()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_bundled() {
        let (catalog, translations) = load_bundled().unwrap();
        assert!(!catalog.flights().is_empty());
        assert!(translations.contains("book_now"));
    }

    #[test]
    fn test_catalog_error_converts() {
        let err: TravelError = Catalog::from_json("not json").unwrap_err().into();
        assert!(err.to_string().starts_with("Catalog error"));
    }
}
