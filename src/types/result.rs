use super::{
    itinerary::{Citation, ItineraryData},
    trip::TripRequest,
};
use serde::Serialize;

/// Outcome of a successful planner run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedTrip {
    /// The validated request the itinerary was generated for
    pub request: TripRequest,
    /// Itinerary exactly as the generation service returned it
    pub itinerary: ItineraryData,
    /// Grounding references, possibly empty
    pub sources: Vec<Citation>,
}

impl PlannedTrip {
    pub fn new(request: TripRequest, itinerary: ItineraryData, sources: Vec<Citation>) -> Self {
        Self {
            request,
            itinerary,
            sources,
        }
    }

    pub fn into_parts(self) -> (ItineraryData, Vec<Citation>) {
        (self.itinerary, self.sources)
    }

    /// Citations that carry a displayable web link
    pub fn web_sources(&self) -> impl Iterator<Item = &Citation> {
        self.sources.iter().filter(|c| c.link().is_some())
    }

    /// Whether the day count matches the requested span. Informational only.
    pub fn matches_requested_span(&self) -> bool {
        self.itinerary.day_count() == self.request.day_span() as usize
    }

    /// Generate a human-readable itinerary
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("=== {} ===", self.request.destination()));
        let span = self.request.day_span();
        lines.push(format!(
            "{} to {} ({} {})",
            self.request.start_date(),
            self.request.end_date(),
            span,
            if span == 1 { "day" } else { "days" }
        ));

        let plans = match self.itinerary.plans() {
            Ok(plans) => plans,
            Err(err) => {
                lines.push(String::new());
                lines.push(format!("Itinerary could not be displayed: {}", err));
                return lines.join("\n");
            }
        };

        if plans.is_empty() {
            lines.push(String::new());
            lines.push("No itinerary details available.".to_string());
            lines.push(
                "The AI might not have been able to generate a plan for the provided inputs."
                    .to_string(),
            );
        }

        for (idx, plan) in plans.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!("[{}] {}", plan.day_label(idx), plan.heading()));
            if plan.title.is_some() {
                if let Some(date) = plan.date_label() {
                    lines.push(format!("    {}", date));
                }
            }

            if plan.activities.is_empty() {
                lines.push(
                    "  No specific activities planned for this day. Enjoy some free time!"
                        .to_string(),
                );
                continue;
            }

            for activity in &plan.activities {
                if activity.time.is_empty() {
                    lines.push(format!("  - {}", activity.name));
                } else {
                    lines.push(format!("  - {} ({})", activity.name, activity.time));
                }
                if !activity.description.is_empty() {
                    lines.push(format!("    {}", activity.description));
                }
            }
        }

        let links: Vec<_> = self.web_sources().filter_map(Citation::link).collect();
        if !links.is_empty() {
            lines.push(String::new());
            lines.push("--- Information Sources ---".to_string());
            for web in links {
                let label = if web.title.is_empty() {
                    &web.uri
                } else {
                    &web.title
                };
                lines.push(format!("  * {} <{}>", label, web.uri));
            }
            lines.push(
                "Note: These sources were used by the AI to help generate the itinerary. Please verify all information independently."
                    .to_string(),
            );
        }

        lines.join("\n")
    }
}
