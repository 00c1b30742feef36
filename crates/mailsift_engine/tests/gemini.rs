use std::time::Duration;

use mailsift_engine::{
    EmailExtractor, ExtractError, ExtractorSettings, GeminiExtractor, DEFAULT_MODEL,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint_path() -> String {
    format!("/v1beta/models/{DEFAULT_MODEL}:generateContent")
}

fn settings_for(server: &MockServer) -> ExtractorSettings {
    let mut settings = ExtractorSettings::new("test-key");
    settings.base_url = format!("{}/v1beta", server.uri());
    settings
}

fn candidate_text(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": text } ] } }
        ]
    })
}

#[tokio::test]
async fn sends_schema_constrained_request_and_filters_emails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint_path()))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "required": ["emails"]
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_text(
            r#"{"emails": ["x@y.com", "not-an-email"]}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let extractor = GeminiExtractor::new(settings_for(&server)).unwrap();
    let emails = extractor.extract("https://example.com").await.unwrap();

    assert_eq!(emails, vec!["x@y.com".to_string()]);
}

#[tokio::test]
async fn prompt_carries_the_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_text(r#"{"emails": []}"#)))
        .mount(&server)
        .await;

    let extractor = GeminiExtractor::new(settings_for(&server)).unwrap();
    extractor.try_extract("https://acme.example/team").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("https://acme.example/team"));
}

#[tokio::test]
async fn http_errors_are_swallowed_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let extractor = GeminiExtractor::new(settings_for(&server)).unwrap();
    assert_eq!(extractor.extract("https://a.com").await.unwrap(), Vec::<String>::new());

    let err = extractor.try_extract("https://a.com").await.unwrap_err();
    assert!(matches!(err, ExtractError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn http_errors_surface_when_reporting_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let mut settings = settings_for(&server);
    settings.report_failures = true;
    let extractor = GeminiExtractor::new(settings).unwrap();

    let err = extractor.extract("https://a.com").await.unwrap_err();
    assert!(matches!(err, ExtractError::HttpStatus { status: 429, .. }));
}

#[tokio::test]
async fn malformed_model_text_yields_no_emails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(candidate_text("Sure! Emails: x@y.com")),
        )
        .mount(&server)
        .await;

    let extractor = GeminiExtractor::new(settings_for(&server)).unwrap();
    assert!(extractor.extract("https://a.com").await.unwrap().is_empty());
    assert!(matches!(
        extractor.try_extract("https://a.com").await,
        Err(ExtractError::Json(_))
    ));
}

#[tokio::test]
async fn empty_or_missing_text_yields_no_emails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_text("   ")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let extractor = GeminiExtractor::new(settings_for(&server)).unwrap();
    assert!(extractor.try_extract("https://a.com").await.unwrap().is_empty());
    assert!(extractor.try_extract("https://b.com").await.unwrap().is_empty());
}

#[tokio::test]
async fn slow_responses_hit_the_client_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_json(candidate_text(r#"{"emails": ["x@y.com"]}"#)),
        )
        .mount(&server)
        .await;

    let mut settings = settings_for(&server);
    settings.request_timeout = Duration::from_millis(50);
    let extractor = GeminiExtractor::new(settings).unwrap();

    assert!(matches!(
        extractor.try_extract("https://a.com").await,
        Err(ExtractError::Request(_))
    ));
    assert!(extractor.extract("https://a.com").await.unwrap().is_empty());
}
