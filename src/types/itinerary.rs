use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlannerError, Result};

/// A single planned activity within a day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Activity {
    /// Period name ("Morning") or a clock time ("9:00 AM")
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub name: String,
    /// One to three sentences, possibly with practical tips
    #[serde(default)]
    pub description: String,
}

/// One day of the itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DailyPlan {
    /// Expected as "Day N - YYYY-MM-DD"
    #[serde(default)]
    pub day: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl DailyPlan {
    /// "Day N" part of the label, or a positional fallback when the model
    /// used some other format.
    pub fn day_label(&self, index: usize) -> String {
        if self.day.starts_with("Day") {
            self.day
                .split(" - ")
                .next()
                .unwrap_or(&self.day)
                .to_string()
        } else {
            format!("Day {}", index + 1)
        }
    }

    /// Date part of the label, if the label has one.
    pub fn date_label(&self) -> Option<&str> {
        self.day.split(" - ").nth(1).filter(|date| !date.is_empty())
    }

    pub fn heading(&self) -> String {
        match self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(title) => title.to_string(),
            None => format!("Activities for {}", self.date_label().unwrap_or(&self.day)),
        }
    }
}

/// A validated `{ "itinerary": [...] }` payload.
///
/// Only the outer shape is guaranteed; the JSON is kept exactly as the
/// generation service produced it. Use [`ItineraryData::plans`] for a typed,
/// lenient view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ItineraryData {
    value: Value,
}

impl ItineraryData {
    /// Wrap a parsed payload, checking that `itinerary` is an array.
    pub fn from_value(value: Value) -> Result<Self> {
        match value.get("itinerary") {
            Some(Value::Array(_)) => Ok(Self { value }),
            _ => Err(PlannerError::UnexpectedShape),
        }
    }

    pub fn day_count(&self) -> usize {
        self.days().len()
    }

    fn days(&self) -> &[Value] {
        self.value
            .get("itinerary")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Deserialize the days, tolerating missing optional fields.
    pub fn plans(&self) -> Result<Vec<DailyPlan>> {
        self.days()
            .iter()
            .enumerate()
            .map(|(idx, day)| {
                serde_path_to_error::deserialize::<_, DailyPlan>(day).map_err(|err| {
                    let path = err.path().to_string();
                    let location = if path.is_empty() || path == "." {
                        format!("itinerary[{idx}]")
                    } else {
                        format!("itinerary[{idx}].{path}")
                    };
                    PlannerError::MalformedItinerary(format!(
                        "day entry does not match the expected layout at {}: {}",
                        location,
                        err.inner()
                    ))
                })
            })
            .collect()
    }
}

/// A web reference the generation service used to ground its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Citation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

impl Citation {
    pub fn web(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            web: Some(WebSource {
                uri: uri.into(),
                title: title.into(),
            }),
        }
    }

    /// The link to display, if this citation carries a usable web entry.
    pub fn link(&self) -> Option<&WebSource> {
        self.web.as_ref().filter(|web| !web.uri.is_empty())
    }
}
