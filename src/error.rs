use thiserror::Error;

/// Main error type for the itinerary pipeline
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation service error: {0}")]
    Service(String),

    #[error("Generation service rejected the API key: {0}")]
    InvalidApiKey(String),

    #[error("Generation service returned an empty response")]
    EmptyResponse,

    #[error("Generation service returned malformed JSON: {source}")]
    MalformedJson {
        /// Untouched model output, kept for logs only.
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Generation service returned neither an itinerary array nor an error field")]
    UnexpectedShape,

    #[error("Generation service returned an itinerary with an unusable day entry: {0}")]
    MalformedItinerary(String),

    #[error("Generation service declined the request: {0}")]
    Refused(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
            PlannerError::Service(_) => "SERVICE_ERROR",
            PlannerError::InvalidApiKey(_) => "INVALID_API_KEY",
            PlannerError::EmptyResponse => "EMPTY_RESPONSE",
            PlannerError::MalformedJson { .. } => "MALFORMED_JSON",
            PlannerError::UnexpectedShape => "UNEXPECTED_SHAPE",
            PlannerError::MalformedItinerary(_) => "MALFORMED_ITINERARY",
            PlannerError::Refused(_) => "EXPLICIT_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// HTTP status a routing layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            PlannerError::Validation(_) | PlannerError::Refused(_) => 400,
            _ => 500,
        }
    }

    /// Message suitable for an end user. Never contains raw model output.
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Config(_) => "API Key is not configured on the server. Please set GEMINI_API_KEY in backend .env file.".to_string(),
            PlannerError::Validation(message) | PlannerError::Refused(message) => message.clone(),
            PlannerError::Service(message) => message.clone(),
            PlannerError::InvalidApiKey(_) => "API Key is invalid or not authorized on the backend. Please check your GEMINI_API_KEY environment variable.".to_string(),
            PlannerError::EmptyResponse => "Received an empty response from the AI.".to_string(),
            PlannerError::MalformedJson { .. } => "Failed to parse the AI's response on the backend. The format might be incorrect.".to_string(),
            PlannerError::UnexpectedShape | PlannerError::MalformedItinerary(_) => "The AI returned data in an unexpected format. Please try again.".to_string(),
            PlannerError::Serialization(_) => "Failed to generate itinerary due to an AI service error on the backend.".to_string(),
        }
    }

    /// Convert to the `{ "error": ... }` payload handed back to callers
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.user_message() })
    }
}
