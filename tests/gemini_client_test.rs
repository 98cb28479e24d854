use mockito::Matcher;
use serde_json::json;
use trip_planner_rs::{
    Citation, GeminiClient, GenerationRequest, Planner, PlannerConfig, PlannerError,
    TextGenerator, TripPayload,
};

const MODEL: &str = "gemini-test";
const PATH: &str = "/models/gemini-test:generateContent";

fn success_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP",
            "groundingMetadata": {
                "groundingChunks": [
                    { "web": { "uri": "https://www.japan.travel/en/", "title": "japan.travel" } }
                ]
            }
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_generate_sends_key_and_json_mode() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{ "parts": [{ "text": "hello" }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success_body(r#"{"itinerary":[]}"#))
        .create_async()
        .await;

    let client = GeminiClient::new("test-key").with_base_url(server.url());
    let request = GenerationRequest::new(MODEL, "hello").with_json_output();
    let generation = client.generate(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(generation.text.as_deref(), Some(r#"{"itinerary":[]}"#));
    assert_eq!(
        generation.citations(),
        vec![Citation::web("https://www.japan.travel/en/", "japan.travel")]
    );
}

#[tokio::test]
async fn test_invalid_key_is_distinguished() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = GeminiClient::new("bad-key").with_base_url(server.url());
    let err = client
        .generate(&GenerationRequest::new(MODEL, "hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, PlannerError::InvalidApiKey(_)));
    assert!(err.user_message().contains("invalid or not authorized"));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(503)
        .with_body(json!({ "error": { "message": "The model is overloaded." } }).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = GeminiClient::new("test-key").with_base_url(server.url());
    let err = client
        .generate(&GenerationRequest::new(MODEL, "hello"))
        .await
        .unwrap_err();

    mock.assert_async().await;
    match err {
        PlannerError::Service(message) => assert!(message.contains("overloaded")),
        other => panic!("expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_custom_http_client_is_used() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("user-agent", "trip-planner-test")
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success_body(r#"{"itinerary":[]}"#))
        .create_async()
        .await;

    let http = reqwest::Client::builder()
        .user_agent("trip-planner-test")
        .build()
        .unwrap();
    let client = GeminiClient::new("test-key")
        .with_http_client(http)
        .with_base_url(server.url());
    let generation = client
        .generate(&GenerationRequest::new(MODEL, "hello"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(generation.text.as_deref(), Some(r#"{"itinerary":[]}"#));
}

#[tokio::test]
async fn test_planner_end_to_end_over_http() {
    let itinerary = json!({
        "itinerary": [
            { "day": "Day 1 - 2024-05-01", "title": "Arrival", "activities": [] },
            { "day": "Day 2 - 2024-05-02", "title": "Temples", "activities": [] }
        ]
    })
    .to_string();
    let fenced = format!("```json\n{itinerary}\n```");

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success_body(&fenced))
        .create_async()
        .await;

    let config = PlannerConfig::default()
        .with_api_key("test-key")
        .with_model(MODEL)
        .with_base_url(server.url());
    let planner = Planner::from_config(config);
    assert!(planner.is_ready());

    let trip = planner
        .plan(&TripPayload::new("Kyoto, Japan", "2024-05-01", "2024-05-02"))
        .await
        .unwrap();

    assert_eq!(trip.itinerary.day_count(), 2);
    assert_eq!(trip.web_sources().count(), 1);
    assert!(trip.render().contains("[Day 2] Temples"));
}
