use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::Result,
    types::{Citation, WebSource},
};

const JSON_MIME_TYPE: &str = "application/json";

/// A hosted text-generation capability.
///
/// Implementations must be stateless between calls; the planner shares one
/// instance across concurrent requests.
#[async_trait]
pub trait TextGenerator: Send + Sync + std::fmt::Debug {
    /// Submit a prompt and wait for the completion.
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation>;
}

/// One generation call: model, prompt and requested output format
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    model: String,
    prompt: String,
    response_mime_type: Option<String>,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            response_mime_type: None,
        }
    }

    /// Ask the service for a JSON document instead of free text.
    pub fn with_json_output(mut self) -> Self {
        self.response_mime_type = Some(JSON_MIME_TYPE.to_string());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn wants_json(&self) -> bool {
        self.response_mime_type.as_deref() == Some(JSON_MIME_TYPE)
    }

    /// `generateContent` request body
    pub fn into_value(self) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": self.prompt }]
            }],
        });

        if let Some(mime_type) = self.response_mime_type {
            body["generationConfig"] = json!({ "responseMimeType": mime_type });
        }

        body
    }
}

/// Raw completion returned by a generator
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Generation {
    pub text: Option<String>,
    pub grounding: Option<GroundingMetadata>,
}

impl Generation {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            grounding: None,
        }
    }

    pub fn with_grounding(mut self, grounding: GroundingMetadata) -> Self {
        self.grounding = Some(grounding);
        self
    }

    /// Web citations from the grounding metadata; empty when there is none.
    pub fn citations(&self) -> Vec<Citation> {
        self.grounding
            .as_ref()
            .map(GroundingMetadata::citations)
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<GroundingWeb>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GroundingWeb {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl GroundingMetadata {
    /// One citation per chunk; chunks of other kinds become empty citations.
    pub fn citations(&self) -> Vec<Citation> {
        self.grounding_chunks
            .iter()
            .map(|chunk| Citation {
                web: chunk.web.as_ref().map(|web| WebSource {
                    uri: web.uri.clone().unwrap_or_default(),
                    title: web.title.clone().unwrap_or_default(),
                }),
            })
            .collect()
    }
}
