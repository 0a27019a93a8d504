//! Plain-text rendering of each page
//!
//! Views only read from the state and the catalog; every change goes through
//! [`crate::navigation::reduce`].

use crate::booking::{Booking, BookingDetails};
use crate::catalog::{Catalog, FlightOffer, HotelOffer, PackageDeal};
use crate::i18n::{TextDirection, Translations};
use crate::itinerary::{ItineraryOutcome, EXAMPLE_PROMPTS};
use crate::navigation::{AppState, Page, PlannerStatus};

/// Render the active page
pub fn render(state: &AppState, catalog: &Catalog, translations: &Translations) -> String {
    let view = View { state, catalog, t: translations };
    let mut lines = vec![view.header()];

    match state.page {
        Page::Home => view.home(&mut lines),
        Page::Flights => view.flights(&mut lines),
        Page::Hotels => view.hotels(&mut lines),
        Page::Packages => view.packages(&mut lines),
        Page::TripPlanner => view.trip_planner(&mut lines),
        Page::Confirmation => view.confirmation(&mut lines),
        Page::Bookings => view.bookings(&mut lines),
    }

    let body = lines.join("\n");
    match state.language.direction() {
        TextDirection::Ltr => body,
        TextDirection::Rtl => body.lines().map(|line| format!("\u{200F}{}", line)).collect::<Vec<_>>().join("\n"),
    }
}

fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

struct View<'a> {
    state: &'a AppState,
    catalog: &'a Catalog,
    t: &'a Translations,
}

impl<'a> View<'a> {
    fn tr(&self, key: &'a str) -> &'a str {
        self.t.lookup(key, self.state.language)
    }

    fn header(&self) -> String {
        format!(
            "== {} :: {} ==",
            self.tr("travelmate"),
            self.tr(self.state.page.title_key())
        )
    }

    fn home(&self, lines: &mut Vec<String>) {
        lines.push(self.tr("search_flights_and_hotels").to_string());
        lines.push(format!("\n{}:", self.tr("popular_destinations")));
        for destination in self.catalog.destinations() {
            lines.push(format!("  - {}", destination.city));
        }
        lines.push(format!("\n{}:", self.tr("special_offers")));
        for offer in self.catalog.special_offers() {
            lines.push(format!("  - {} ({})", offer.title, offer.discount));
        }
    }

    fn flight_line(&self, flight: &FlightOffer) -> String {
        format!(
            "  [{}] {} -> {} | {} | {} | {} | {} {}",
            flight.id,
            flight.from,
            flight.to,
            flight.departure_date,
            flight.airline,
            money(flight.price),
            flight.seats_available,
            self.tr("seats_available"),
        )
    }

    fn hotel_line(&self, hotel: &HotelOffer) -> String {
        format!(
            "  [{}] {}, {} | {} | {} | {} {} | {} {}",
            hotel.id,
            hotel.hotel_name,
            hotel.city,
            hotel.room_type,
            stars(hotel.rating),
            money(hotel.price_per_night),
            self.tr("per_night"),
            hotel.available_rooms,
            self.tr("rooms_available"),
        )
    }

    fn flights(&self, lines: &mut Vec<String>) {
        let filter = &self.state.flight_filter;
        let airlines = if filter.airlines.is_empty() {
            self.tr("all").to_string()
        } else {
            filter.airlines.join(", ")
        };
        lines.push(format!(
            "{} {} <= {} | {}: {}",
            self.tr("filter_by"),
            self.tr("price_range"),
            money(filter.max_price),
            self.tr("airlines"),
            airlines
        ));

        let results = filter.apply(self.catalog.flights());
        if results.is_empty() {
            lines.push(self.tr("no_results").to_string());
        }
        lines.extend(results.into_iter().map(|flight| self.flight_line(flight)));
    }

    fn hotels(&self, lines: &mut Vec<String>) {
        let filter = &self.state.hotel_filter;
        let rating = if filter.min_rating == 0 {
            self.tr("all").to_string()
        } else {
            format!("{} {}", filter.min_rating, self.tr("stars_and_up"))
        };
        lines.push(format!(
            "{} {} <= {} | {}: {}",
            self.tr("filter_by"),
            self.tr("price_range"),
            money(filter.max_price),
            self.tr("rating"),
            rating
        ));

        let results = filter.apply(self.catalog.hotels());
        if results.is_empty() {
            lines.push(self.tr("no_results").to_string());
        }
        lines.extend(results.into_iter().map(|hotel| self.hotel_line(hotel)));
    }

    fn package_lines(&self, package: &PackageDeal, lines: &mut Vec<String>) {
        lines.push(format!(
            "  [{}] {}: {} ({} -> {}, {})",
            package.id,
            self.tr("package_deal"),
            package.flight.to,
            package.flight.from,
            package.flight.to,
            package.flight.airline
        ));
        lines.push(format!(
            "      {} | {} | {}",
            package.hotel.hotel_name,
            stars(package.hotel.rating),
            package.hotel.room_type
        ));
        lines.push(format!(
            "      {}: {} | {}: {} | {} {}!",
            self.tr("original_price"),
            money(package.original_price()),
            self.tr("total_price"),
            money(package.total_price()),
            self.tr("you_save"),
            money(package.savings())
        ));
    }

    fn packages(&self, lines: &mut Vec<String>) {
        for package in self.catalog.packages() {
            self.package_lines(package, lines);
        }
    }

    fn trip_planner(&self, lines: &mut Vec<String>) {
        let planner = &self.state.planner;
        lines.push(self.tr("trip_planner_title").to_string());
        lines.push(self.tr("describe_trip").to_string());
        if planner.prompt.is_empty() {
            lines.push(format!("> ({})", self.tr("trip_planner_prompt")));
            for example in EXAMPLE_PROMPTS {
                lines.push(format!("  * {}", example));
            }
        } else {
            lines.push(format!("> {}", planner.prompt));
        }

        match &planner.status {
            PlannerStatus::Idle => lines.push(format!("[{}]", self.tr("generate_itinerary"))),
            PlannerStatus::Loading => lines.push(self.tr("generating").to_string()),
            PlannerStatus::Done(ItineraryOutcome::Itinerary { text }) => {
                lines.push(String::new());
                lines.push(text.clone());
            }
            PlannerStatus::Done(failed) => lines.push(format!("! {}", failed.message())),
        }
    }

    fn confirmation(&self, lines: &mut Vec<String>) {
        let Some(booking) = self.state.confirmation() else {
            lines.push(self.tr("no_booking_found").to_string());
            lines.push(format!("[{}]", self.tr("back_to_home")));
            return;
        };

        lines.push(self.tr("thank_you").to_string());
        lines.push(format!("{}:", self.tr("booking_summary")));
        lines.push(format!("  {} {}", self.tr("booking_type"), booking.kind()));
        lines.push(format!("  {} {}", self.tr("booking_date"), booking.booking_date()));
        self.booking_details(booking, lines);
        lines.push(format!("  {}: {}", self.tr("price"), money(booking.price())));
        lines.push(format!("[{}]", self.tr("back_to_home")));
    }

    fn booking_details(&self, booking: &Booking, lines: &mut Vec<String>) {
        match booking.details() {
            BookingDetails::Flight(flight) => {
                lines.push(format!("  {}: {}", self.tr("from"), flight.from));
                lines.push(format!("  {}: {}", self.tr("to"), flight.to));
                lines.push(format!("  {}: {}", self.tr("departure"), flight.departure_date));
            }
            BookingDetails::Hotel(hotel) => {
                lines.push(format!("  {}: {}", hotel.hotel_name, stars(hotel.rating)));
                lines.push(format!("  {}: {}", self.tr("city"), hotel.city));
                lines.push(format!("  {}: {}", self.tr("room"), hotel.room_type));
            }
            BookingDetails::Package(package) => {
                lines.push(format!(
                    "  {}: {} -> {}",
                    package.flight.airline, package.flight.from, package.flight.to
                ));
                lines.push(format!("  {}: {}", self.tr("departure"), package.flight.departure_date));
                lines.push(format!("  {}, {}", package.hotel.hotel_name, package.hotel.city));
                lines.push(format!("  {}: {}", self.tr("room"), package.hotel.room_type));
            }
        }
    }

    fn bookings(&self, lines: &mut Vec<String>) {
        if self.state.ledger.is_empty() {
            lines.push(self.tr("no_bookings_yet").to_string());
            return;
        }
        for (index, booking) in self.state.ledger.iter().enumerate() {
            lines.push(format!(
                "  {}. {} - {} ({} {})",
                index + 1,
                booking.kind(),
                booking.details().headline(),
                self.tr("booked_on"),
                booking.booking_date()
            ));
        }
    }
}
