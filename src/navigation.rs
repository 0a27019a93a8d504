//! Page navigation and session state
//!
//! All state of a running front end lives in [`AppState`]. It only changes
//! through [`reduce`], a pure function of the previous state and an
//! [`Event`], which keeps every transition testable without a renderer.
//! [`Session`] is the thin impure shell around it: it reads the clock for
//! booking dates and performs the itinerary request.

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::booking::{record_booking_on, Booking, BookingDetails, Ledger};
use crate::catalog::Catalog;
use crate::filter::{FlightFilter, HotelFilter};
use crate::i18n::Language;
use crate::itinerary::{ItineraryOutcome, ItineraryRequester, TextGenerator};

/// Pages of the application. There is no history; every page links home.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
    #[default]
    Home,
    Flights,
    Hotels,
    Packages,
    TripPlanner,
    Confirmation,
    Bookings,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Home,
        Page::Flights,
        Page::Hotels,
        Page::Packages,
        Page::TripPlanner,
        Page::Confirmation,
        Page::Bookings,
    ];

    /// Translation key of the page title
    pub fn title_key(self) -> &'static str {
        match self {
            Page::Home => "travelmate",
            Page::Flights => "flights",
            Page::Hotels => "hotels",
            Page::Packages => "packages",
            Page::TripPlanner => "trip_planner",
            Page::Confirmation => "booking_confirmation",
            Page::Bookings => "my_bookings",
        }
    }
}

/// Lifecycle of the trip planner form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlannerStatus {
    #[default]
    Idle,
    /// Request in flight; the submit control is disabled
    Loading,
    Done(ItineraryOutcome),
}

/// Trip planner form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerState {
    pub prompt: String,
    pub status: PlannerStatus,
}

impl PlannerState {
    pub fn is_loading(&self) -> bool {
        self.status == PlannerStatus::Loading
    }

    /// Submitting is possible with a non-blank prompt and no request in flight
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.prompt.trim().is_empty()
    }
}

/// User actions and async completions
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Navigate(Page),
    BookNow { details: BookingDetails, date: NaiveDate },
    SetLanguage(Language),
    SetFlightMaxPrice(f64),
    ToggleAirline(String),
    SetHotelMaxPrice(f64),
    SetMinRating(u8),
    PromptEdited(String),
    ItineraryRequested,
    ItineraryReceived(ItineraryOutcome),
}

/// Everything a front end needs to draw the current page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub page: Page,
    pub language: Language,
    pub ledger: Ledger,
    /// Booking shown on the confirmation page
    pub current_booking: Option<Booking>,
    pub flight_filter: FlightFilter,
    pub hotel_filter: HotelFilter,
    pub planner: PlannerState,
}

impl AppState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// The booking to confirm, if any was made this session
    pub fn confirmation(&self) -> Option<&Booking> {
        self.current_booking.as_ref()
    }
}

/// Apply one event to the state
pub fn reduce(state: AppState, event: Event) -> AppState {
    let mut next = state;

    match event {
        Event::Navigate(page) => enter(&mut next, page),
        Event::BookNow { details, date } => {
            let (ledger, booking) = record_booking_on(&next.ledger, details, date);
            next.ledger = ledger;
            next.current_booking = Some(booking);
            enter(&mut next, Page::Confirmation);
        }
        Event::SetLanguage(language) => next.language = language,
        Event::SetFlightMaxPrice(value) => next.flight_filter.set_max_price(value),
        Event::ToggleAirline(airline) => next.flight_filter.toggle_airline(&airline),
        Event::SetHotelMaxPrice(value) => next.hotel_filter.set_max_price(value),
        Event::SetMinRating(rating) => next.hotel_filter.set_min_rating(rating),
        Event::PromptEdited(prompt) => {
            if !next.planner.is_loading() {
                next.planner.prompt = prompt;
            }
        }
        Event::ItineraryRequested => {
            if next.page == Page::TripPlanner && next.planner.can_submit() {
                next.planner.status = PlannerStatus::Loading;
            }
        }
        Event::ItineraryReceived(outcome) => {
            if next.page == Page::TripPlanner && next.planner.is_loading() {
                next.planner.status = PlannerStatus::Done(outcome);
            } else {
                debug!(page = ?next.page, "Discarding itinerary for a page that is no longer shown");
            }
        }
    }

    next
}

/// Switch pages, dropping the page-local state of the page being left
fn enter(state: &mut AppState, page: Page) {
    if state.page != page {
        state.flight_filter = FlightFilter::default();
        state.hotel_filter = HotelFilter::default();
        state.planner = PlannerState::default();
    }
    state.page = page;
}

/// One running front end: state plus the collaborators it needs
pub struct Session<G> {
    catalog: Catalog,
    requester: ItineraryRequester<G>,
    state: AppState,
}

impl<G: TextGenerator> Session<G> {
    pub fn new(catalog: Catalog, generator: G, language: Language) -> Self {
        Self {
            catalog,
            requester: ItineraryRequester::new(generator),
            state: AppState::new(language),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn requester(&self) -> &ItineraryRequester<G> {
        &self.requester
    }

    pub fn dispatch(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event);
    }

    pub fn navigate(&mut self, page: Page) {
        self.dispatch(Event::Navigate(page));
    }

    /// Book `details` today and move to the confirmation page. Returns the
    /// booking now being confirmed.
    pub fn book_now(&mut self, details: BookingDetails) -> Option<&Booking> {
        let date = Local::now().date_naive();
        self.dispatch(Event::BookNow { details, date });
        self.state.confirmation()
    }

    pub fn book_flight(&mut self, id: u32) -> Option<&Booking> {
        let flight = self.catalog.flight(id)?.clone();
        self.book_now(BookingDetails::Flight(flight))
    }

    pub fn book_hotel(&mut self, id: u32) -> Option<&Booking> {
        let hotel = self.catalog.hotel(id)?.clone();
        self.book_now(BookingDetails::Hotel(hotel))
    }

    pub fn book_package(&mut self, id: u32) -> Option<&Booking> {
        let package = self.catalog.package(id)?.clone();
        self.book_now(BookingDetails::Package(package))
    }

    /// Submit the planner prompt.
    ///
    /// Returns `None` without contacting the generator when the form cannot
    /// be submitted (blank prompt, request already running, or the planner is
    /// not the active page).
    pub async fn generate_itinerary(&mut self) -> Option<ItineraryOutcome> {
        if self.state.page != Page::TripPlanner || !self.state.planner.can_submit() {
            debug!("Itinerary request skipped");
            return None;
        }

        self.dispatch(Event::ItineraryRequested);
        let prompt = self.state.planner.prompt.trim().to_string();
        info!(prompt_length = prompt.len(), "Submitting trip planner prompt");

        let outcome = self.requester.request_itinerary(&prompt).await;
        self.dispatch(Event::ItineraryReceived(outcome.clone()));
        Some(outcome)
    }
}
