//! Bundled catalog of flights, hotels and package deals
//!
//! The catalog is read once from `data/catalog.json` (embedded at build time),
//! checked for consistency and then only ever read. Packages are stored on disk
//! as references to a flight and a hotel and are resolved into value snapshots
//! here, so a `PackageDeal` is self-contained once loaded.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

/// Catalog-specific error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    #[error("{kind} {id} has a non-positive price: {price}")]
    InvalidPrice { kind: &'static str, id: u32, price: f64 },

    #[error("Hotel {id} has a rating outside 0-5: {rating}")]
    InvalidRating { id: u32, rating: u8 },

    #[error("Package {id} has a discount outside 0-100: {discount}")]
    InvalidDiscount { id: u32, discount: f64 },

    #[error("Package {package_id} references unknown {kind} {id}")]
    UnknownReference { package_id: u32, kind: &'static str, id: u32 },
}

/// A bookable flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub id: u32,
    pub from: String,
    pub to: String,
    pub departure_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub airline: String,
    pub price: f64,
    pub seats_available: u32,
    pub airline_logo: String,
}

/// A bookable hotel room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelOffer {
    pub id: u32,
    pub hotel_name: String,
    pub city: String,
    pub room_type: String,
    pub price_per_night: f64,
    pub rating: u8,
    pub available_rooms: u32,
    pub image: String,
}

/// A flight and a hotel night sold together at a discount.
///
/// Prices are always derived from the embedded offers, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDeal {
    pub id: u32,
    pub flight: FlightOffer,
    pub hotel: HotelOffer,
    pub discount_percentage: f64,
}

impl PackageDeal {
    fn discount_fraction(&self) -> f64 {
        self.discount_percentage.clamp(0.0, 100.0) / 100.0
    }

    /// Flight plus one hotel night, before any discount
    pub fn original_price(&self) -> f64 {
        self.flight.price + self.hotel.price_per_night
    }

    /// Flight price plus the discounted hotel night
    pub fn total_price(&self) -> f64 {
        let total = self.flight.price + self.hotel.price_per_night * (1.0 - self.discount_fraction());
        total.max(0.0)
    }

    /// Discount applied to the undiscounted bundle
    pub fn savings(&self) -> f64 {
        self.original_price() * self.discount_fraction()
    }
}

/// Home page teaser for a destination city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub city: String,
    pub image: String,
}

/// Home page promotional banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialOffer {
    pub title: String,
    pub discount: String,
    pub image: String,
}

/// On-disk package record, resolved into a `PackageDeal` at load
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageRecord {
    id: u32,
    flight_id: u32,
    hotel_id: u32,
    discount_percentage: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    flights: Vec<FlightOffer>,
    hotels: Vec<HotelOffer>,
    packages: Vec<PackageRecord>,
    #[serde(default)]
    popular_destinations: Vec<Destination>,
    #[serde(default)]
    special_offers: Vec<SpecialOffer>,
}

/// Read-only collections of everything that can be booked
#[derive(Debug, Clone)]
pub struct Catalog {
    flights: Vec<FlightOffer>,
    hotels: Vec<HotelOffer>,
    packages: Vec<PackageDeal>,
    destinations: Vec<Destination>,
    special_offers: Vec<SpecialOffer>,
}

impl Catalog {
    /// Load the catalog shipped with the crate
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Parse and validate a catalog document
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;

        ensure_unique("flight", file.flights.iter().map(|f| f.id))?;
        ensure_unique("hotel", file.hotels.iter().map(|h| h.id))?;
        ensure_unique("package", file.packages.iter().map(|p| p.id))?;

        for flight in &file.flights {
            if !(flight.price > 0.0) {
                return Err(CatalogError::InvalidPrice { kind: "Flight", id: flight.id, price: flight.price });
            }
        }
        for hotel in &file.hotels {
            if !(hotel.price_per_night > 0.0) {
                return Err(CatalogError::InvalidPrice { kind: "Hotel", id: hotel.id, price: hotel.price_per_night });
            }
            if hotel.rating > 5 {
                return Err(CatalogError::InvalidRating { id: hotel.id, rating: hotel.rating });
            }
        }

        let mut packages = Vec::with_capacity(file.packages.len());
        for record in file.packages {
            if !(0.0..=100.0).contains(&record.discount_percentage) {
                return Err(CatalogError::InvalidDiscount { id: record.id, discount: record.discount_percentage });
            }
            let flight = file
                .flights
                .iter()
                .find(|f| f.id == record.flight_id)
                .ok_or(CatalogError::UnknownReference { package_id: record.id, kind: "flight", id: record.flight_id })?;
            let hotel = file
                .hotels
                .iter()
                .find(|h| h.id == record.hotel_id)
                .ok_or(CatalogError::UnknownReference { package_id: record.id, kind: "hotel", id: record.hotel_id })?;

            packages.push(PackageDeal {
                id: record.id,
                flight: flight.clone(),
                hotel: hotel.clone(),
                discount_percentage: record.discount_percentage,
            });
        }

        debug!(
            flights = file.flights.len(),
            hotels = file.hotels.len(),
            packages = packages.len(),
            "Catalog loaded"
        );

        Ok(Self {
            flights: file.flights,
            hotels: file.hotels,
            packages,
            destinations: file.popular_destinations,
            special_offers: file.special_offers,
        })
    }

    pub fn flights(&self) -> &[FlightOffer] {
        &self.flights
    }

    pub fn hotels(&self) -> &[HotelOffer] {
        &self.hotels
    }

    pub fn packages(&self) -> &[PackageDeal] {
        &self.packages
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn special_offers(&self) -> &[SpecialOffer] {
        &self.special_offers
    }

    pub fn flight(&self, id: u32) -> Option<&FlightOffer> {
        self.flights.iter().find(|f| f.id == id)
    }

    pub fn hotel(&self, id: u32) -> Option<&HotelOffer> {
        self.hotels.iter().find(|h| h.id == id)
    }

    pub fn package(&self, id: u32) -> Option<&PackageDeal> {
        self.packages.iter().find(|p| p.id == id)
    }

    /// Distinct airlines in catalog order, for the airline filter panel
    pub fn airlines(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.flights
            .iter()
            .map(|f| f.airline.as_str())
            .filter(|airline| seen.insert(*airline))
            .collect()
    }
}

fn ensure_unique(kind: &'static str, ids: impl Iterator<Item = u32>) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId { kind, id });
        }
    }
    Ok(())
}
