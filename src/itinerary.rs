//! AI trip planning
//!
//! [`ItineraryRequester`] turns a traveller's free-text description into a
//! single request to a [`TextGenerator`] and reports the result as an
//! [`ItineraryOutcome`]. Provider errors never escape: they are logged and
//! folded into `ItineraryOutcome::Failed`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::gemini::GenerationError;

/// Message shown to the user whenever generation fails
pub const FAILURE_MESSAGE: &str = "Failed to generate itinerary. Please try again later.";

/// Standing instruction sent with every itinerary request
pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful travel assistant. You create detailed and exciting travel itineraries.";

/// Starting points offered below the prompt box
pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "A 7-day family-friendly trip to Orlando theme parks",
    "A 10-day romantic getaway to Paris for a foodie couple",
    "A 3-week solo backpacking adventure through Southeast Asia",
    "A historical tour of ancient Greece for 2 weeks",
];

/// One-shot text generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub prompt: String,
}

impl GenerationRequest {
    /// Wrap a traveller's description in the itinerary prompt
    pub fn itinerary(description: &str) -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            prompt: format!(
                "Generate a travel itinerary based on this prompt: \"{}\". Structure the response in clear, easy-to-read markdown format.",
                description
            ),
        }
    }
}

/// A provider of single-turn, non-streaming text completion
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        (**self).generate(request).await
    }
}

/// Result of an itinerary request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ItineraryOutcome {
    /// Markdown itinerary as returned by the provider
    Itinerary { text: String },
    /// Generation failed; `reason` is the underlying cause, for logs only
    Failed { reason: String },
}

impl ItineraryOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ItineraryOutcome::Failed { .. })
    }

    /// Text to put in front of the user
    pub fn message(&self) -> &str {
        match self {
            ItineraryOutcome::Itinerary { text } => text,
            ItineraryOutcome::Failed { .. } => FAILURE_MESSAGE,
        }
    }
}

/// Sends itinerary prompts to a text generator
pub struct ItineraryRequester<G> {
    generator: G,
}

impl<G: TextGenerator> ItineraryRequester<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Ask the generator for an itinerary.
    ///
    /// Callers are expected to skip blank prompts; this method forwards
    /// whatever it is given.
    #[instrument(level = "info", skip(self, prompt), fields(prompt_length = prompt.len()))]
    pub async fn request_itinerary(&self, prompt: &str) -> ItineraryOutcome {
        info!("Requesting itinerary");
        let start_time = std::time::Instant::now();

        match self.generator.generate(GenerationRequest::itinerary(prompt)).await {
            Ok(text) => {
                info!(
                    duration_ms = start_time.elapsed().as_millis(),
                    itinerary_length = text.len(),
                    "Itinerary generated"
                );
                ItineraryOutcome::Itinerary { text }
            }
            Err(e) => {
                error!(
                    duration_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Error generating itinerary"
                );
                ItineraryOutcome::Failed { reason: e.to_string() }
            }
        }
    }
}
