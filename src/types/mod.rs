pub mod itinerary;
pub mod response;
pub mod result;
pub mod trip;

pub use itinerary::{Activity, Citation, DailyPlan, ItineraryData, WebSource};
pub use response::PlannerResponse;
pub use result::PlannedTrip;
pub use trip::{TripPayload, TripRequest};
