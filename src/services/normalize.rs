use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{PlannerError, Result},
    types::ItineraryData,
};

/// What a well-formed generation response turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// `{ "itinerary": [...] }`
    Itinerary(ItineraryData),
    /// `{ "error": "..." }` emitted by the service on purpose
    Refused(String),
}

/// How the trimmed response text is wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fence<'a> {
    Bare(&'a str),
    Tagged { lang: &'a str, body: &'a str },
    Untagged { body: &'a str },
}

impl<'a> Fence<'a> {
    pub(crate) fn classify(text: &'a str) -> Self {
        static FENCE_RE: OnceLock<Regex> = OnceLock::new();
        let fence_re = FENCE_RE.get_or_init(|| {
            Regex::new(r"(?s)^```([\w.+-]*)\s*(.*?)\s*```$").expect("fence pattern is valid")
        });

        let Some(caps) = fence_re.captures(text) else {
            return Fence::Bare(text);
        };

        let body = caps.get(2).map_or("", |m| m.as_str()).trim();
        match caps.get(1).map(|m| m.as_str()).filter(|lang| !lang.is_empty()) {
            Some(lang) => Fence::Tagged { lang, body },
            None => Fence::Untagged { body },
        }
    }

    pub(crate) fn content(&self) -> &'a str {
        match *self {
            Fence::Bare(text) => text,
            Fence::Tagged { body, .. } | Fence::Untagged { body } => body,
        }
    }
}

/// Clean, parse and shape-check raw generation output.
pub fn normalize(raw: &str) -> Result<Normalized> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PlannerError::EmptyResponse);
    }

    let fence = Fence::classify(trimmed);
    if let Fence::Tagged { lang, .. } = fence {
        debug!(target: "trip_planner::normalize", lang, "stripping tagged code fence");
    }

    let parsed: Value =
        serde_json::from_str(fence.content()).map_err(|source| PlannerError::MalformedJson {
            raw: raw.to_string(),
            source,
        })?;

    if let Some(message) = explicit_error(&parsed) {
        return Ok(Normalized::Refused(message));
    }

    ItineraryData::from_value(parsed).map(Normalized::Itinerary)
}

fn explicit_error(parsed: &Value) -> Option<String> {
    match parsed.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
