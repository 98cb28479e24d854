use serde::Serialize;

use super::itinerary::{Citation, ItineraryData};
use crate::error::{PlannerError, Result};

/// Envelope returned across the caller-facing boundary.
///
/// Serializes as either `{ "itineraryData": ..., "sources": [...] }` or
/// `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlannerResponse {
    #[serde(rename_all = "camelCase")]
    Success {
        itinerary_data: ItineraryData,
        sources: Vec<Citation>,
    },
    Failure {
        error: String,
        #[serde(skip)]
        status: u16,
    },
}

impl PlannerResponse {
    pub fn from_result(result: Result<super::result::PlannedTrip>) -> Self {
        match result {
            Ok(trip) => {
                let (itinerary_data, sources) = trip.into_parts();
                PlannerResponse::Success {
                    itinerary_data,
                    sources,
                }
            }
            Err(err) => PlannerResponse::from_error(&err),
        }
    }

    pub fn from_error(err: &PlannerError) -> Self {
        PlannerResponse::Failure {
            error: err.user_message(),
            status: err.status_code(),
        }
    }

    /// HTTP status a routing layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            PlannerResponse::Success { .. } => 200,
            PlannerResponse::Failure { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PlannerResponse::Success { .. })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
