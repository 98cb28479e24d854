//! trip-planner-rs: turn trip parameters into an LLM-generated, day-by-day itinerary
//!
//! The pipeline is small: a deterministic prompt builder, one call to a hosted
//! text-generation service, and a defensive normalizer that strips code fences,
//! parses JSON and checks the itinerary shape before anything reaches the caller.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_planner_rs::{Planner, TripPayload};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let planner = Planner::from_env();
//!
//!     let payload = TripPayload::new("Kyoto, Japan", "2024-05-01", "2024-05-03")
//!         .with_preferences("temples, tea houses, easy walking");
//!
//!     let trip = planner.plan(&payload).await?;
//!     println!("{}", trip.render());
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod error;
pub(crate) mod services;
pub mod types;

pub use crate::core::{Planner, PlannerConfig};
pub use error::{PlannerError, Result};
pub use services::gemini_client::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use services::generator::{
    Generation, GenerationRequest, GroundingChunk, GroundingMetadata, GroundingWeb, TextGenerator,
};
pub use services::normalize::{normalize, Normalized};
pub use services::prompt::build_prompt;
pub use types::{
    Activity, Citation, DailyPlan, ItineraryData, PlannedTrip, PlannerResponse, TripPayload,
    TripRequest, WebSource,
};

#[cfg(feature = "cli")]
pub mod cli;
