//! CLI interface for travelmate

use anyhow::{bail, Context};
use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::{info, warn};
use travelmate::{
    filter_flights, filter_hotels, logging, view, Event, GeminiClient, GenerationError,
    GenerationRequest, Language, Page, Session, Settings, TextGenerator, Translations,
};

#[derive(Parser)]
#[command(name = "travelmate")]
#[command(about = "Browse, book and plan trips from the terminal")]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML, optional)
    #[arg(long, global = true, default_value = "travelmate")]
    pub config: String,
    /// Display language (en, ar)
    #[arg(long, global = true)]
    pub language: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OfferKind {
    Flight,
    Hotel,
    Package,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List flights
    Flights {
        /// Maximum price
        #[arg(long, default_value = "1500")]
        max_price: f64,
        /// Airlines to include (comma-separated)
        #[arg(long)]
        airlines: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List hotels
    Hotels {
        /// Maximum price per night
        #[arg(long, default_value = "1500")]
        max_price: f64,
        /// Minimum star rating (0 for all)
        #[arg(long, default_value = "0")]
        min_rating: u8,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List package deals
    Packages,
    /// Book an offer and show the confirmation
    Book {
        kind: OfferKind,
        id: u32,
        /// Output file for the booking as JSON
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Generate an itinerary from a description
    Plan {
        prompt: String,
        /// Output file for the itinerary
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Interactive session
    Shell,
}

/// Stand-in generator used when no API key is configured
struct Unconfigured;

#[async_trait]
impl TextGenerator for Unconfigured {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, GenerationError> {
        Err(GenerationError::MissingApiKey)
    }
}

fn generator(settings: &Settings) -> Box<dyn TextGenerator> {
    match GeminiClient::new(&settings.planner) {
        Ok(client) => Box::new(client),
        Err(e) => {
            warn!(error = %e, "Itinerary planner unavailable");
            Box::new(Unconfigured)
        }
    }
}

fn book<G: TextGenerator>(session: &mut Session<G>, kind: OfferKind, id: u32) -> Option<&travelmate::Booking> {
    match kind {
        OfferKind::Flight => session.book_flight(id),
        OfferKind::Hotel => session.book_hotel(id),
        OfferKind::Package => session.book_package(id),
    }
}

/// Commands understood by the interactive session
#[derive(Debug, PartialEq)]
enum ShellCommand {
    Go(Page),
    Book(OfferKind, u32),
    MaxPrice(f64),
    Airline(String),
    Rating(u8),
    Prompt(String),
    Generate,
    Language(Language),
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = line.split_once(' ').map_or((line, ""), |(w, r)| (w, r.trim()));

        let page = match word.to_lowercase().as_str() {
            "home" => Some(Page::Home),
            "flights" => Some(Page::Flights),
            "hotels" => Some(Page::Hotels),
            "packages" => Some(Page::Packages),
            "planner" => Some(Page::TripPlanner),
            "confirmation" => Some(Page::Confirmation),
            "bookings" => Some(Page::Bookings),
            _ => None,
        };
        if let Some(page) = page {
            return Ok(ShellCommand::Go(page));
        }

        match word.to_lowercase().as_str() {
            "book" => {
                let mut parts = rest.split_whitespace();
                let kind = parts
                    .next()
                    .and_then(|kind| <OfferKind as ValueEnum>::from_str(kind, true).ok())
                    .ok_or_else(|| "Usage: book <flight|hotel|package> <id>".to_string())?;
                let id = parts
                    .next()
                    .and_then(|id| id.parse().ok())
                    .ok_or_else(|| "Usage: book <flight|hotel|package> <id>".to_string())?;
                Ok(ShellCommand::Book(kind, id))
            }
            "price" => rest
                .parse()
                .map(ShellCommand::MaxPrice)
                .map_err(|_| format!("Invalid price: {}", rest)),
            "airline" if !rest.is_empty() => Ok(ShellCommand::Airline(rest.to_string())),
            "rating" => rest
                .parse()
                .map(ShellCommand::Rating)
                .map_err(|_| format!("Invalid rating: {}", rest)),
            "prompt" => Ok(ShellCommand::Prompt(rest.to_string())),
            "generate" => Ok(ShellCommand::Generate),
            "lang" => rest.parse().map(ShellCommand::Language),
            "help" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            _ => Err(format!("Unknown command: {} (try 'help')", line)),
        }
    }
}

const SHELL_HELP: &str = "\
Pages:    home | flights | hotels | packages | planner | confirmation | bookings
Booking:  book <flight|hotel|package> <id>
Filters:  price <max> | airline <name> (toggle) | rating <0|3|4|5>
Planner:  prompt <text> | generate
Other:    lang <en|ar> | help | quit";

async fn run_shell<G: TextGenerator>(session: &mut Session<G>, translations: &Translations) -> anyhow::Result<()> {
    let stdin = io::stdin();
    println!("{}", view::render(session.state(), session.catalog(), translations));
    println!("\n{}", SHELL_HELP);

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            ShellCommand::Go(page) => session.navigate(page),
            ShellCommand::Book(kind, id) => {
                if book(session, kind, id).is_none() {
                    println!("No {:?} with id {}", kind, id);
                    continue;
                }
            }
            ShellCommand::MaxPrice(value) => match session.state().page {
                Page::Hotels => session.dispatch(Event::SetHotelMaxPrice(value)),
                _ => session.dispatch(Event::SetFlightMaxPrice(value)),
            },
            ShellCommand::Airline(airline) => session.dispatch(Event::ToggleAirline(airline)),
            ShellCommand::Rating(rating) => session.dispatch(Event::SetMinRating(rating)),
            ShellCommand::Prompt(prompt) => session.dispatch(Event::PromptEdited(prompt)),
            ShellCommand::Generate => {
                if session.state().page != Page::TripPlanner {
                    session.navigate(Page::TripPlanner);
                }
                println!("{}", translations.lookup("generating", session.state().language));
                if session.generate_itinerary().await.is_none() {
                    println!("Enter a prompt first (prompt <text>)");
                }
            }
            ShellCommand::Language(language) => session.dispatch(Event::SetLanguage(language)),
            ShellCommand::Help => {
                println!("{}", SHELL_HELP);
                continue;
            }
            ShellCommand::Quit => break,
        }

        println!("{}", view::render(session.state(), session.catalog(), translations));
    }

    info!(bookings = session.state().ledger.len(), "Session ended");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load_from(&cli.config).context("Failed to load settings")?;
    let _log_guard = logging::init_logging(&settings.log)?;

    let language = match cli.language.as_deref() {
        Some(code) => code.parse::<Language>().map_err(anyhow::Error::msg)?,
        None => settings.locale.language,
    };

    let (catalog, translations) = travelmate::load_bundled()?;

    match cli.command {
        Commands::Flights { max_price, airlines, json } => {
            let allow: Vec<String> = airlines
                .map(|a| a.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
                .unwrap_or_default();
            let flights = filter_flights(catalog.flights(), max_price, &allow);

            if json {
                println!("{}", serde_json::to_string_pretty(&flights)?);
            } else {
                for flight in &flights {
                    println!(
                        "[{}] {} -> {} | {} | {} | ${:.2}",
                        flight.id, flight.from, flight.to, flight.departure_date, flight.airline, flight.price
                    );
                }
                println!("\nFound {} flights", flights.len());
            }
        }
        Commands::Hotels { max_price, min_rating, json } => {
            let hotels = filter_hotels(catalog.hotels(), max_price, min_rating);

            if json {
                println!("{}", serde_json::to_string_pretty(&hotels)?);
            } else {
                for hotel in &hotels {
                    println!(
                        "[{}] {}, {} | {} | {}* | ${:.2}/night",
                        hotel.id, hotel.hotel_name, hotel.city, hotel.room_type, hotel.rating, hotel.price_per_night
                    );
                }
                println!("\nFound {} hotels", hotels.len());
            }
        }
        Commands::Packages => {
            let mut session = Session::new(catalog, generator(&settings), language);
            session.navigate(Page::Packages);
            println!("{}", view::render(session.state(), session.catalog(), &translations));
        }
        Commands::Book { kind, id, output } => {
            let mut session = Session::new(catalog, generator(&settings), language);
            let Some(booking) = book(&mut session, kind, id) else {
                bail!("No offer with id {}", id);
            };

            if let Some(output_file) = output {
                fs::write(&output_file, serde_json::to_string_pretty(booking)?)?;
                println!("Booking saved to {}", output_file);
            }
            println!("{}", view::render(session.state(), session.catalog(), &translations));
        }
        Commands::Plan { prompt, output } => {
            if prompt.trim().is_empty() {
                bail!("Describe the trip you want to plan");
            }

            let mut session = Session::new(catalog, generator(&settings), language);
            session.navigate(Page::TripPlanner);
            session.dispatch(Event::PromptEdited(prompt));

            println!("{}", translations.lookup("generating", language));
            let Some(outcome) = session.generate_itinerary().await else {
                bail!("Describe the trip you want to plan");
            };

            if let (Some(output_file), false) = (output, outcome.is_failure()) {
                fs::write(&output_file, outcome.message())?;
                println!("Itinerary saved to {}", output_file);
            } else {
                println!("{}", outcome.message());
            }
            if outcome.is_failure() {
                drop(_log_guard);
                std::process::exit(1);
            }
        }
        Commands::Shell => {
            let mut session = Session::new(catalog, generator(&settings), language);
            run_shell(&mut session, &translations).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["travelmate", "flights", "--max-price", "800", "--airlines", "Emirates,Qantas"]);
        assert!(cli.is_ok());

        if let Ok(Cli { command: Commands::Flights { max_price, airlines, json }, .. }) = cli {
            assert_eq!(max_price, 800.0);
            assert_eq!(airlines.as_deref(), Some("Emirates,Qantas"));
            assert!(!json);
        }
    }

    #[test]
    fn test_book_parsing() {
        let cli = Cli::try_parse_from(["travelmate", "book", "package", "2", "--language", "ar"]).unwrap();
        assert_eq!(cli.language.as_deref(), Some("ar"));
        assert!(matches!(cli.command, Commands::Book { kind: OfferKind::Package, id: 2, output: None }));
    }

    #[test]
    fn test_shell_commands() {
        assert_eq!("flights".parse::<ShellCommand>(), Ok(ShellCommand::Go(Page::Flights)));
        assert_eq!("book hotel 3".parse::<ShellCommand>(), Ok(ShellCommand::Book(OfferKind::Hotel, 3)));
        assert_eq!("price 900".parse::<ShellCommand>(), Ok(ShellCommand::MaxPrice(900.0)));
        assert_eq!(
            "airline Japan Airlines".parse::<ShellCommand>(),
            Ok(ShellCommand::Airline("Japan Airlines".to_string()))
        );
        assert_eq!(
            "prompt 4 days in Seoul".parse::<ShellCommand>(),
            Ok(ShellCommand::Prompt("4 days in Seoul".to_string()))
        );
        assert_eq!("lang ar".parse::<ShellCommand>(), Ok(ShellCommand::Language(Language::Ar)));
        assert!("book car 1".parse::<ShellCommand>().is_err());
        assert!("teleport".parse::<ShellCommand>().is_err());
    }

    #[tokio::test]
    async fn test_unconfigured_generator_fails() {
        let result = Unconfigured.generate(GenerationRequest::itinerary("anything")).await;
        assert!(matches!(result, Err(GenerationError::MissingApiKey)));
    }
}
