use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::config::{PlannerConfig, API_KEY_VAR};
use crate::{
    error::{PlannerError, Result},
    services::{
        gemini_client::GeminiClient,
        generator::{GenerationRequest, TextGenerator},
        normalize::{normalize, Normalized},
        prompt::build_prompt,
    },
    types::{PlannedTrip, PlannerResponse, TripPayload, TripRequest},
};

/// Whether the generation service can be reached at all. Decided once.
#[derive(Clone, Debug)]
enum Readiness {
    Ready(Arc<dyn TextGenerator>),
    Unconfigured(String),
}

/// Turns trip parameters into a validated itinerary.
///
/// Holds no per-request state; share one instance behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Planner {
    readiness: Readiness,
    model: String,
}

impl Planner {
    pub fn new(generator: impl TextGenerator + 'static) -> Self {
        Self::with_generator(Arc::new(generator))
    }

    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            readiness: Readiness::Ready(generator),
            model: PlannerConfig::default().model,
        }
    }

    /// A planner that rejects every request with a configuration error.
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            readiness: Readiness::Unconfigured(reason.into()),
            model: PlannerConfig::default().model,
        }
    }

    pub fn from_config(config: PlannerConfig) -> Self {
        let planner = match config.api_key {
            Some(api_key) => {
                Self::new(GeminiClient::new(api_key).with_base_url(config.base_url))
            }
            None => {
                error!(
                    target: "trip_planner::planner",
                    "{} environment variable is not set; itinerary generation is disabled",
                    API_KEY_VAR
                );
                Self::unconfigured(format!("{API_KEY_VAR} is not set"))
            }
        };
        planner.with_model(config.model)
    }

    pub fn from_env() -> Self {
        Self::from_config(PlannerConfig::from_env())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.readiness, Readiness::Ready(_))
    }

    fn generator(&self) -> Result<&dyn TextGenerator> {
        match &self.readiness {
            Readiness::Ready(generator) => Ok(generator.as_ref()),
            Readiness::Unconfigured(reason) => Err(PlannerError::Config(reason.clone())),
        }
    }

    /// Caller-facing operation: never fails, always yields an envelope.
    pub async fn generate_itinerary(&self, payload: TripPayload) -> PlannerResponse {
        PlannerResponse::from_result(self.plan(&payload).await)
    }

    /// Validate the payload and run the pipeline.
    pub async fn plan(&self, payload: &TripPayload) -> Result<PlannedTrip> {
        self.generator()?;
        let request = payload.validate()?;
        self.plan_request(request).await
    }

    /// Run the pipeline for an already validated request.
    pub async fn plan_request(&self, request: TripRequest) -> Result<PlannedTrip> {
        let generator = self.generator()?;

        info!(
            target: "trip_planner::planner",
            destination = request.destination(),
            start = %request.start_date(),
            end = %request.end_date(),
            model = %self.model,
            "generating itinerary"
        );

        let generation_request =
            GenerationRequest::new(self.model.as_str(), build_prompt(&request)).with_json_output();

        let generation = generator.generate(&generation_request).await.map_err(|err| {
            error!(target: "trip_planner::planner", error = %err, "generation call failed");
            err
        })?;

        let raw = generation.text.as_deref().unwrap_or_default();
        debug!(target: "trip_planner::planner", raw, "raw generation output");

        let itinerary = match normalize(raw) {
            Ok(Normalized::Itinerary(itinerary)) => itinerary,
            Ok(Normalized::Refused(message)) => {
                info!(target: "trip_planner::planner", %message, "generation service declined");
                return Err(PlannerError::Refused(message));
            }
            Err(err) => {
                error!(
                    target: "trip_planner::planner",
                    code = err.error_code(),
                    error = %err,
                    raw,
                    "generation output rejected"
                );
                return Err(err);
            }
        };

        let trip = PlannedTrip::new(request, itinerary, generation.citations());
        if !trip.matches_requested_span() {
            warn!(
                target: "trip_planner::planner",
                expected = trip.request.day_span(),
                actual = trip.itinerary.day_count(),
                "itinerary day count differs from requested span"
            );
        }

        Ok(trip)
    }
}
