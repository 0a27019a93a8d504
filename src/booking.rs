//! Booking ledger for one session
//!
//! Bookings carry a value copy of the offer they were made for, so nothing in
//! the catalog can change a booking after the fact. The ledger is persistent in
//! the functional sense: recording returns a new ledger and leaves the old one
//! untouched.

use crate::catalog::{FlightOffer, HotelOffer, PackageDeal};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Display format of booking dates (month/day/year, no padding)
pub const BOOKING_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// What was booked, with a snapshot of the offer at booking time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum BookingDetails {
    Flight(FlightOffer),
    Hotel(HotelOffer),
    Package(PackageDeal),
}

impl BookingDetails {
    pub fn kind(&self) -> BookingKind {
        match self {
            BookingDetails::Flight(_) => BookingKind::Flight,
            BookingDetails::Hotel(_) => BookingKind::Hotel,
            BookingDetails::Package(_) => BookingKind::Package,
        }
    }

    /// Price charged for the booking: the fare, one hotel night, or the
    /// discounted package total
    pub fn price(&self) -> f64 {
        match self {
            BookingDetails::Flight(flight) => flight.price,
            BookingDetails::Hotel(hotel) => hotel.price_per_night,
            BookingDetails::Package(package) => package.total_price(),
        }
    }

    /// One-line description used in booking lists
    pub fn headline(&self) -> String {
        match self {
            BookingDetails::Flight(flight) => format!("{}: {} to {}", flight.airline, flight.from, flight.to),
            BookingDetails::Hotel(hotel) => format!("{}, {}", hotel.hotel_name, hotel.city),
            BookingDetails::Package(package) => format!(
                "{}: flight with {} & stay at {}",
                package.flight.to, package.flight.airline, package.hotel.hotel_name
            ),
        }
    }
}

/// Booking discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingKind {
    Flight,
    Hotel,
    Package,
}

impl fmt::Display for BookingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookingKind::Flight => "Flight",
            BookingKind::Hotel => "Hotel",
            BookingKind::Package => "Package",
        };
        f.write_str(label)
    }
}

/// A confirmed booking. Never modified once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(flatten)]
    details: BookingDetails,
    #[serde(rename = "bookingDate")]
    booking_date: String,
}

impl Booking {
    pub fn kind(&self) -> BookingKind {
        self.details.kind()
    }

    pub fn details(&self) -> &BookingDetails {
        &self.details
    }

    pub fn booking_date(&self) -> &str {
        &self.booking_date
    }

    pub fn price(&self) -> f64 {
        self.details.price()
    }
}

/// Bookings of the current session, in the order they were made
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    bookings: Vec<Booking>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.iter()
    }

    /// Most recent booking
    pub fn last(&self) -> Option<&Booking> {
        self.bookings.last()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Booking;
    type IntoIter = std::slice::Iter<'a, Booking>;

    fn into_iter(self) -> Self::IntoIter {
        self.bookings.iter()
    }
}

/// Record a booking dated today (local time).
///
/// Returns the extended ledger together with the new booking; `ledger` itself
/// is left as it was.
pub fn record_booking(ledger: &Ledger, details: BookingDetails) -> (Ledger, Booking) {
    record_booking_on(ledger, details, Local::now().date_naive())
}

/// Record a booking with an explicit booking date
pub fn record_booking_on(ledger: &Ledger, details: BookingDetails, date: NaiveDate) -> (Ledger, Booking) {
    let booking = Booking {
        details,
        booking_date: date.format(BOOKING_DATE_FORMAT).to_string(),
    };

    let mut bookings = Vec::with_capacity(ledger.bookings.len() + 1);
    bookings.extend(ledger.bookings.iter().cloned());
    bookings.push(booking.clone());

    info!(
        kind = %booking.kind(),
        price = booking.price(),
        booking_date = %booking.booking_date,
        ledger_size = bookings.len(),
        "Booking recorded"
    );

    (Ledger { bookings }, booking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 3).unwrap()
    }

    #[test]
    fn test_record_booking_grows_ledger_by_one() {
        let catalog = Catalog::bundled().unwrap();
        let empty = Ledger::new();

        let (one, first) = record_booking_on(&empty, BookingDetails::Flight(catalog.flight(1).unwrap().clone()), date());
        let (two, second) = record_booking_on(&one, BookingDetails::Hotel(catalog.hotel(2).unwrap().clone()), date());

        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(two.len(), 2);
        assert_eq!(one.last(), Some(&first));
        assert_eq!(two.last(), Some(&second));
        assert_eq!(two.iter().next(), Some(&first));
    }

    #[test]
    fn test_prior_ledger_is_unchanged() {
        let catalog = Catalog::bundled().unwrap();
        let (before, _) = record_booking_on(&Ledger::new(), BookingDetails::Hotel(catalog.hotel(4).unwrap().clone()), date());
        let snapshot = before.clone();

        let _ = record_booking_on(&before, BookingDetails::Package(catalog.package(3).unwrap().clone()), date());

        assert_eq!(before, snapshot);
    }

    #[test]
    fn test_identical_bookings_are_not_merged() {
        let catalog = Catalog::bundled().unwrap();
        let details = BookingDetails::Flight(catalog.flight(5).unwrap().clone());
        let (ledger, _) = record_booking_on(&Ledger::new(), details.clone(), date());
        let (ledger, _) = record_booking_on(&ledger, details, date());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_booking_kind_and_price() {
        let catalog = Catalog::bundled().unwrap();
        let (_, flight) = record_booking_on(&Ledger::new(), BookingDetails::Flight(catalog.flight(1).unwrap().clone()), date());
        assert_eq!(flight.kind(), BookingKind::Flight);
        assert_eq!(flight.kind().to_string(), "Flight");
        assert_eq!(flight.price(), 750.0);
        assert_eq!(flight.booking_date(), "9/3/2024");

        let (_, package) = record_booking_on(&Ledger::new(), BookingDetails::Package(catalog.package(1).unwrap().clone()), date());
        assert_eq!(package.kind(), BookingKind::Package);
        assert!((package.price() - 1277.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_booking_stamps_today() {
        let catalog = Catalog::bundled().unwrap();
        let (_, booking) = record_booking(&Ledger::new(), BookingDetails::Hotel(catalog.hotel(6).unwrap().clone()));
        assert!(!booking.booking_date().is_empty());
    }

    #[test]
    fn test_booking_serializes_with_type_tag() {
        let catalog = Catalog::bundled().unwrap();
        let (_, booking) = record_booking_on(&Ledger::new(), BookingDetails::Hotel(catalog.hotel(2).unwrap().clone()), date());
        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["type"], "Hotel");
        assert_eq!(json["details"]["hotelName"], "The Ritz");
        assert_eq!(json["bookingDate"], "9/3/2024");
    }

    #[test]
    fn test_headlines() {
        let catalog = Catalog::bundled().unwrap();
        let package = BookingDetails::Package(catalog.package(2).unwrap().clone());
        assert_eq!(package.headline(), "Paris: flight with Emirates & stay at Le Bristol");
        let flight = BookingDetails::Flight(catalog.flight(3).unwrap().clone());
        assert_eq!(flight.headline(), "Emirates: Dubai to Paris");
    }
}
