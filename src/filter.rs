//! Listing filters for the flights and hotels pages
//!
//! The free functions are the whole filtering contract: pure, order
//! preserving and cheap enough to rerun on every slider change. The
//! `FlightFilter`/`HotelFilter` structs hold the filter-panel state of a page
//! and simply delegate to them.

use crate::catalog::{FlightOffer, HotelOffer};

/// Lowest value of the price slider
pub const MIN_PRICE_CEILING: f64 = 300.0;
/// Highest value of the price slider, and the initial ceiling
pub const MAX_PRICE_CEILING: f64 = 1500.0;
/// Price slider granularity
pub const PRICE_STEP: f64 = 50.0;
/// Rating choices offered by the hotel filter; 0 means "all"
pub const RATING_CHOICES: [u8; 4] = [0, 5, 4, 3];

/// Flights priced at or below `max_price`, restricted to `airlines` unless it
/// is empty.
pub fn filter_flights<'a, S: AsRef<str>>(
    flights: &'a [FlightOffer],
    max_price: f64,
    airlines: &[S],
) -> Vec<&'a FlightOffer> {
    flights
        .iter()
        .filter(|flight| flight.price <= max_price)
        .filter(|flight| airlines.is_empty() || airlines.iter().any(|a| a.as_ref() == flight.airline))
        .collect()
}

/// Hotels priced at or below `max_price` per night with at least `min_rating`
/// stars. A `min_rating` of 0 disables the rating check.
pub fn filter_hotels(hotels: &[HotelOffer], max_price: f64, min_rating: u8) -> Vec<&HotelOffer> {
    hotels
        .iter()
        .filter(|hotel| hotel.price_per_night <= max_price)
        .filter(|hotel| min_rating == 0 || hotel.rating >= min_rating)
        .collect()
}

/// Snap a requested ceiling onto the slider range
pub fn snap_price_ceiling(value: f64) -> f64 {
    let clamped = value.clamp(MIN_PRICE_CEILING, MAX_PRICE_CEILING);
    MIN_PRICE_CEILING + ((clamped - MIN_PRICE_CEILING) / PRICE_STEP).round() * PRICE_STEP
}

/// Filter panel state of the flights page
#[derive(Debug, Clone, PartialEq)]
pub struct FlightFilter {
    pub max_price: f64,
    pub airlines: Vec<String>,
}

impl Default for FlightFilter {
    fn default() -> Self {
        Self {
            max_price: MAX_PRICE_CEILING,
            airlines: Vec::new(),
        }
    }
}

impl FlightFilter {
    pub fn set_max_price(&mut self, value: f64) {
        self.max_price = snap_price_ceiling(value);
    }

    /// Select the airline if unselected, unselect it otherwise
    pub fn toggle_airline(&mut self, airline: &str) {
        if let Some(pos) = self.airlines.iter().position(|a| a == airline) {
            self.airlines.remove(pos);
        } else {
            self.airlines.push(airline.to_string());
        }
    }

    pub fn apply<'a>(&self, flights: &'a [FlightOffer]) -> Vec<&'a FlightOffer> {
        filter_flights(flights, self.max_price, &self.airlines)
    }
}

/// Filter panel state of the hotels page
#[derive(Debug, Clone, PartialEq)]
pub struct HotelFilter {
    pub max_price: f64,
    pub min_rating: u8,
}

impl Default for HotelFilter {
    fn default() -> Self {
        Self {
            max_price: MAX_PRICE_CEILING,
            min_rating: 0,
        }
    }
}

impl HotelFilter {
    pub fn set_max_price(&mut self, value: f64) {
        self.max_price = snap_price_ceiling(value);
    }

    /// Ratings outside the offered choices fall back to "all"
    pub fn set_min_rating(&mut self, rating: u8) {
        self.min_rating = if RATING_CHOICES.contains(&rating) { rating } else { 0 };
    }

    pub fn apply<'a>(&self, hotels: &'a [HotelOffer]) -> Vec<&'a HotelOffer> {
        filter_hotels(hotels, self.max_price, self.min_rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use rstest::rstest;

    fn ids<T, F: Fn(&T) -> u32>(items: &[&T], id: F) -> Vec<u32> {
        items.iter().map(|item| id(*item)).collect()
    }

    #[rstest]
    #[case(1500.0, vec![1, 2, 3, 4, 5, 6])]
    #[case(800.0, vec![1, 3, 6])]
    #[case(750.0, vec![1, 3])]
    #[case(300.0, vec![])]
    fn test_flights_by_price(#[case] max_price: f64, #[case] expected: Vec<u32>) {
        let catalog = Catalog::bundled().unwrap();
        let none: [&str; 0] = [];
        let result = filter_flights(catalog.flights(), max_price, &none);
        assert_eq!(ids(&result, |f: &FlightOffer| f.id), expected);
        assert!(result.iter().all(|f| f.price <= max_price));
    }

    #[test]
    fn test_flights_by_airline() {
        let catalog = Catalog::bundled().unwrap();
        let allow = ["Emirates", "Qantas"];
        let result = filter_flights(catalog.flights(), 1500.0, &allow);
        assert_eq!(ids(&result, |f: &FlightOffer| f.id), vec![3, 5]);
        assert!(result.iter().all(|f| allow.contains(&f.airline.as_str())));

        let result = filter_flights(catalog.flights(), 1000.0, &allow);
        assert_eq!(ids(&result, |f: &FlightOffer| f.id), vec![3]);
    }

    #[test]
    fn test_empty_allowlist_means_no_restriction() {
        let catalog = Catalog::bundled().unwrap();
        let none: Vec<String> = Vec::new();
        let result = filter_flights(catalog.flights(), f64::MAX, &none);
        assert_eq!(result.len(), catalog.flights().len());
    }

    #[test]
    fn test_unknown_airline_excludes_everything() {
        let catalog = Catalog::bundled().unwrap();
        assert!(filter_flights(catalog.flights(), 1500.0, &["Pan Am"]).is_empty());
    }

    #[test]
    fn test_flight_filter_is_idempotent() {
        let catalog = Catalog::bundled().unwrap();
        let first = filter_flights(catalog.flights(), 900.0, &["British Airways", "Air France"]);
        let second = filter_flights(catalog.flights(), 900.0, &["British Airways", "Air France"]);
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(1500.0, 0, vec![1, 2, 3, 4, 5, 6])]
    #[case(1500.0, 5, vec![1, 2, 3, 4, 5])]
    #[case(1500.0, 4, vec![1, 2, 3, 4, 5, 6])]
    #[case(600.0, 0, vec![1, 6])]
    #[case(600.0, 5, vec![1])]
    #[case(400.0, 3, vec![])]
    fn test_hotels_by_price_and_rating(
        #[case] max_price: f64,
        #[case] min_rating: u8,
        #[case] expected: Vec<u32>,
    ) {
        let catalog = Catalog::bundled().unwrap();
        let result = filter_hotels(catalog.hotels(), max_price, min_rating);
        assert_eq!(ids(&result, |h: &HotelOffer| h.id), expected);
        assert_eq!(result, filter_hotels(catalog.hotels(), max_price, min_rating));
    }

    #[test]
    fn test_toggle_airline() {
        let mut filter = FlightFilter::default();
        filter.toggle_airline("Qantas");
        filter.toggle_airline("Emirates");
        assert_eq!(filter.airlines, vec!["Qantas", "Emirates"]);
        filter.toggle_airline("Qantas");
        assert_eq!(filter.airlines, vec!["Emirates"]);
    }

    #[test]
    fn test_price_ceiling_snaps_to_slider() {
        let mut filter = HotelFilter::default();
        filter.set_max_price(612.0);
        assert_eq!(filter.max_price, 600.0);
        filter.set_max_price(10.0);
        assert_eq!(filter.max_price, MIN_PRICE_CEILING);
        filter.set_max_price(9999.0);
        assert_eq!(filter.max_price, MAX_PRICE_CEILING);
    }

    #[test]
    fn test_unsupported_rating_falls_back_to_all() {
        let mut filter = HotelFilter::default();
        filter.set_min_rating(4);
        assert_eq!(filter.min_rating, 4);
        filter.set_min_rating(2);
        assert_eq!(filter.min_rating, 0);
    }
}
