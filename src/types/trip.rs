use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trip parameters as they arrive from a caller. Every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPayload {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub preferences: Option<String>,
}

impl TripPayload {
    pub fn new(
        destination: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            destination: Some(destination.into()),
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
            preferences: None,
        }
    }

    pub fn with_preferences(mut self, preferences: impl Into<String>) -> Self {
        self.preferences = Some(preferences.into());
        self
    }

    /// Check required fields and date ordering, producing a `TripRequest`.
    pub fn validate(&self) -> Result<TripRequest> {
        let destination = non_empty(self.destination.as_deref());
        let start = non_empty(self.start_date.as_deref());
        let end = non_empty(self.end_date.as_deref());

        let (Some(destination), Some(start), Some(end)) = (destination, start, end) else {
            return Err(PlannerError::Validation(
                "Missing required fields: startDate, endDate, destination.".to_string(),
            ));
        };

        let start_date = parse_date("startDate", start)?;
        let end_date = parse_date("endDate", end)?;

        TripRequest::new(
            destination,
            start_date,
            end_date,
            self.preferences.clone().unwrap_or_default(),
        )
    }
}

/// Validated trip parameters. `start_date <= end_date` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    preferences: String,
}

impl TripRequest {
    pub fn new(
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        preferences: impl Into<String>,
    ) -> Result<Self> {
        let destination = destination.into();
        if destination.trim().is_empty() {
            return Err(PlannerError::Validation(
                "Missing required fields: startDate, endDate, destination.".to_string(),
            ));
        }
        if start_date > end_date {
            return Err(PlannerError::Validation(
                "End Date cannot be before Start Date.".to_string(),
            ));
        }

        Ok(Self {
            destination,
            start_date,
            end_date,
            preferences: preferences.into(),
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn preferences(&self) -> &str {
        &self.preferences
    }

    /// Number of calendar days covered, both ends inclusive.
    pub fn day_span(&self) -> u32 {
        (self.end_date - self.start_date).num_days() as u32 + 1
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|err| {
        PlannerError::Validation(format!(
            "Invalid {field} `{value}`: expected YYYY-MM-DD ({err})"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_payload() {
        let request = TripPayload::new("Kyoto, Japan", "2024-05-01", "2024-05-03")
            .validate()
            .unwrap();

        assert_eq!(request.destination(), "Kyoto, Japan");
        assert_eq!(request.day_span(), 3);
        assert_eq!(request.preferences(), "");
    }

    #[test]
    fn test_same_day_is_accepted() {
        let request = TripPayload::new("Lisbon", "2024-06-10", "2024-06-10")
            .validate()
            .unwrap();
        assert_eq!(request.day_span(), 1);
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let err = TripPayload::new("X", "2024-05-03", "2024-05-01")
            .validate()
            .unwrap_err();

        assert!(matches!(err, PlannerError::Validation(_)));
        assert_eq!(err.user_message(), "End Date cannot be before Start Date.");
    }

    #[test]
    fn test_missing_fields_rejected() {
        let payload: TripPayload =
            serde_json::from_str(r#"{"destination": "Rome", "startDate": "2024-01-01"}"#).unwrap();
        let err = payload.validate().unwrap_err();
        assert!(err.user_message().starts_with("Missing required fields"));

        let blank = TripPayload::new("   ", "2024-01-01", "2024-01-02");
        assert!(matches!(
            blank.validate(),
            Err(PlannerError::Validation(_))
        ));
    }

    #[test]
    fn test_unparseable_date_rejected() {
        let err = TripPayload::new("Rome", "01/05/2024", "2024-05-03")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("startDate"));
    }

    #[test]
    fn test_span_crosses_month_boundary() {
        let request = TripPayload::new("Oslo", "2024-02-28", "2024-03-01")
            .validate()
            .unwrap();
        assert_eq!(request.day_span(), 3);
    }
}
