//! HTTP client for the Google Generative Language API
//!
//! Implements [`TextGenerator`] with a single `generateContent` call. No
//! streaming and no retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use crate::config::PlannerSettings;
use crate::itinerary::{GenerationRequest, TextGenerator};

/// Generation-specific error types
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("No API key configured for the itinerary planner")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    StatusError { status: reqwest::StatusCode, body: String },

    #[error("Provider returned no text")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<OutgoingPart<'a>>,
}

#[derive(Debug, Serialize)]
struct OutgoingPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<IncomingPart>,
}

#[derive(Debug, Deserialize)]
struct IncomingPart {
    text: Option<String>,
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a client from planner settings. Fails when no API key is set.
    pub fn new(settings: &PlannerSettings) -> Result<Self, GenerationError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GenerationError::MissingApiKey)?;

        debug!(model = %settings.model, endpoint = %settings.endpoint, "Creating Gemini client");
        let http_client = Client::builder()
            .user_agent(concat!("travelmate/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            model: settings.model.clone(),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(level = "info", skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let body = build_request_body(&request);
        let url = self.url();
        info!(url = %url, "Making HTTP request to Gemini");

        let start_time = std::time::Instant::now();
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        info!(
            status = %status,
            duration_ms = start_time.elapsed().as_millis(),
            "HTTP request completed"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Gemini request failed");
            return Err(GenerationError::StatusError { status, body });
        }

        let payload: GenerateContentResponse = response.json().await?;
        extract_text(payload)
    }
}

fn build_request_body(request: &GenerationRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![OutgoingPart { text: &request.system_instruction }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![OutgoingPart { text: &request.prompt }],
        }],
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_key: Option<&str>) -> PlannerSettings {
        PlannerSettings {
            api_key: api_key.map(str::to_string),
            ..PlannerSettings::default()
        }
    }

    #[test]
    fn test_client_requires_api_key() {
        assert!(matches!(GeminiClient::new(&settings(None)), Err(GenerationError::MissingApiKey)));
        assert!(matches!(GeminiClient::new(&settings(Some("  "))), Err(GenerationError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_client_url() {
        let mut s = settings(Some("test-key"));
        s.endpoint = "https://example.test/v1beta/".to_string();
        let client = GeminiClient::new(&s).unwrap();
        assert_eq!(client.url(), "https://example.test/v1beta/models/gemini-2.5-flash:generateContent");
    }

    #[test]
    fn test_request_body_shape() {
        let request = GenerationRequest::itinerary("Two days in Rome");
        let json = serde_json::to_value(build_request_body(&request)).unwrap();

        assert_eq!(json["systemInstruction"]["parts"][0]["text"], request.system_instruction);
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], request.prompt);
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r##"{ "candidates": [ { "content": { "parts": [ { "text": "# Rome\n" }, { "text": "Day 1" } ], "role": "model" } } ] }"##,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "# Rome\nDay 1");
    }

    #[test]
    fn test_extract_text_rejects_empty() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{ "candidates": [] }"#).unwrap();
        assert!(matches!(extract_text(response), Err(GenerationError::EmptyResponse)));

        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(extract_text(response), Err(GenerationError::EmptyResponse)));
    }
}
