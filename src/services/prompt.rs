use crate::types::TripRequest;

const DEFAULT_PREFERENCES: &str =
    "No specific preferences provided. Please suggest a balanced itinerary.";

const OUTPUT_SCHEMA: &str = r#"Please provide the itinerary in JSON format. The root of the JSON object should be a key named "itinerary", which is an array of objects.
Each object in the "itinerary" array represents a single day and must have the following structure:
{
  "day": "Day X - YYYY-MM-DD",
  "title": "A concise and engaging title for the day's theme",
  "activities": [
    {
      "time": "Morning | Afternoon | Evening | Specific Time (e.g., 9:00 AM)",
      "name": "Activity Name",
      "description": "A brief, helpful description of the activity (1-3 sentences). Include practical tips if relevant."
    }
  ]
}"#;

/// Render trip parameters into the generation prompt.
///
/// Pure: the same request always yields the same text.
pub fn build_prompt(request: &TripRequest) -> String {
    let preferences = match request.preferences().trim() {
        "" => DEFAULT_PREFERENCES,
        prefs => prefs,
    };

    let span = request.day_span();
    let policies = [
        format!(
            "Ensure the number of days in the itinerary matches the duration between the start and end dates, inclusive ({} {}).",
            span,
            if span == 1 { "day" } else { "days" }
        ),
        r#"If the date range is invalid (e.g., end date before start date), or too short for a meaningful plan (e.g. same day), respond with a JSON indicating an error, like: {"error": "Invalid date range provided."}."#.to_string(),
        "If the destination is unclear or too broad, try to make reasonable assumptions or indicate this in an error JSON.".to_string(),
        "Activities should be realistic, culturally relevant if applicable, and aligned with the destination and stated preferences.".to_string(),
        "Distribute activities sensibly across the days. Avoid over-scheduling. Include some leisure time if appropriate.".to_string(),
        r#"The "day" field should accurately reflect the progression of days and include the actual date."#.to_string(),
        "If no preferences are given, create a well-rounded itinerary including popular attractions, cultural experiences, and some dining suggestions.".to_string(),
        "If suggesting specific restaurants or ticketed attractions, mention that booking in advance might be advisable, but do not provide booking links.".to_string(),
        r#"The "description" for activities should be concise but informative."#.to_string(),
        "Ensure the output is ONLY the JSON object, without any surrounding text or markdown.".to_string(),
    ];

    let numbered = policies
        .iter()
        .enumerate()
        .map(|(idx, policy)| format!("{}. {}", idx + 1, policy))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert travel planner AI. Your goal is to generate a detailed, engaging, and practical day-by-day travel itinerary.\n\n\
         Trip Details:\n\
         - Destination: {}\n\
         - Start Date: {}\n\
         - End Date: {}\n\
         - Traveler's Preferences: {}\n\n\
         {}\n\n\
         Important Instructions:\n\
         {}\n",
        request.destination(),
        request.start_date().format("%Y-%m-%d"),
        request.end_date().format("%Y-%m-%d"),
        preferences,
        OUTPUT_SCHEMA,
        numbered
    )
}
