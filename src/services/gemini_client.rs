use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::generator::{Generation, GenerationRequest, GroundingMetadata, TextGenerator};
use crate::error::{PlannerError, Result};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-04-17";

const INVALID_KEY_MARKER: &str = "API key not valid";

/// `generateContent` client for the Gemini API
#[derive(Clone, Debug)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    async fn generate_content(&self, request: &GenerationRequest) -> Result<Generation> {
        let request_url = build_generate_url(&self.base_url, request.model());
        debug!(target: "trip_planner::gemini", url = %request_url, "sending generateContent");

        let response = self
            .http
            .post(&request_url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request.clone().into_value())
            .send()
            .await
            .map_err(|err| PlannerError::Service(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| PlannerError::Service(format!("Failed to read response: {err}")))?;

        if !status.is_success() {
            return Err(classify_failure(status, &response_text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|err| PlannerError::Service(format!("Failed to parse response: {err}")))?;

        Ok(parsed.into_generation())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation> {
        self.generate_content(request).await
    }
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    let model = model.trim_start_matches("models/");
    format!("{}/models/{}:generateContent", trimmed, model)
}

fn classify_failure(status: StatusCode, body: &str) -> PlannerError {
    let api_message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|error| error.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string());

    warn!(target: "trip_planner::gemini", %status, message = %api_message, "generateContent failed");

    if api_message.contains(INVALID_KEY_MARKER)
        || status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
    {
        return PlannerError::InvalidApiKey(api_message);
    }

    PlannerError::Service(format!("HTTP {} error: {}", status, api_message))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: Option<bool>,
}

impl GenerateContentResponse {
    fn into_generation(self) -> Generation {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Generation::default();
        };

        let texts: Vec<String> = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text)
            .collect();

        Generation {
            text: if texts.is_empty() {
                None
            } else {
                Some(texts.concat())
            },
            grounding: candidate.grounding_metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_generate_url() {
        assert_eq!(
            build_generate_url("https://example.com/v1beta/", "gemini-x"),
            "https://example.com/v1beta/models/gemini-x:generateContent"
        );
        assert_eq!(
            build_generate_url("https://example.com/v1beta", "models/gemini-x"),
            "https://example.com/v1beta/models/gemini-x:generateContent"
        );
    }

    #[test]
    fn test_classify_invalid_key() {
        let body = json!({
            "error": { "code": 400, "message": "API key not valid. Please pass a valid API key." }
        })
        .to_string();

        assert!(matches!(
            classify_failure(StatusCode::BAD_REQUEST, &body),
            PlannerError::InvalidApiKey(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::FORBIDDEN, "denied"),
            PlannerError::InvalidApiKey(_)
        ));
    }

    #[test]
    fn test_classify_generic_failure() {
        let err = classify_failure(StatusCode::SERVICE_UNAVAILABLE, "overloaded");
        match err {
            PlannerError::Service(message) => {
                assert!(message.contains("503"));
                assert!(message.contains("overloaded"));
            }
            other => panic!("expected Service, got {other:?}"),
        }
    }

    #[test]
    fn test_response_text_skips_thoughts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "{\"itinerary\":" },
                    { "text": "[]}" }
                ]},
                "groundingMetadata": { "groundingChunks": [] }
            }]
        }))
        .unwrap();

        let generation = response.into_generation();
        assert_eq!(generation.text.as_deref(), Some("{\"itinerary\":[]}"));
        assert!(generation.grounding.is_some());
    }

    #[test]
    fn test_response_without_candidates() {
        let generation = GenerateContentResponse::default().into_generation();
        assert!(generation.text.is_none());
        assert!(generation.citations().is_empty());
    }
}
