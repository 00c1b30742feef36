use engine_logging::{engine_debug, engine_warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::email::parse_email_payload;
use crate::ExtractorSettings;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("http status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turns a URL into the email addresses found on that page.
#[async_trait::async_trait]
pub trait EmailExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<Vec<String>, ExtractError>;
}

pub fn build_prompt(url: &str) -> String {
    format!(
        "You are an expert web scraper. Extract every email address from the content of the website at this URL: {url}\n\
         \n\
         Do not guess or invent email addresses. Only return addresses that are explicitly present in the website's content.\n\
         \n\
         If no emails are found, return an empty list. Respond ONLY with a JSON object that matches the provided schema."
    )
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "emails": {
                "type": "ARRAY",
                "description": "A list of email addresses found on the webpage.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["emails"]
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Gemini `generateContent` client constrained to a `{ emails: [string] }` answer.
#[derive(Debug, Clone)]
pub struct GeminiExtractor {
    client: reqwest::Client,
    settings: ExtractorSettings,
}

impl GeminiExtractor {
    pub fn new(settings: ExtractorSettings) -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    /// Runs one extraction and reports every failure.
    pub async fn try_extract(&self, url: &str) -> Result<Vec<String>, ExtractError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: build_prompt(url),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = parsed.text();
        let text = text.trim();
        if text.is_empty() {
            engine_warn!("Gemini returned an empty response for URL: {}", url);
            return Ok(Vec::new());
        }

        let emails = parse_email_payload(text)?;
        engine_debug!("Gemini returned {} valid emails for {}", emails.len(), url);
        Ok(emails)
    }
}

#[async_trait::async_trait]
impl EmailExtractor for GeminiExtractor {
    async fn extract(&self, url: &str) -> Result<Vec<String>, ExtractError> {
        match self.try_extract(url).await {
            Ok(emails) => Ok(emails),
            Err(err) if self.settings.report_failures => Err(err),
            Err(err) => {
                engine_warn!("Error scraping emails from {}: {}", url, err);
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_url_and_forbids_guessing() {
        let prompt = build_prompt("https://example.com/contact");
        assert!(prompt.contains("https://example.com/contact"));
        assert!(prompt.contains("Do not guess"));
        assert!(prompt.contains("JSON"));
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "{\"emails\": [" }, { "text": "\"a@b.com\"]}" } ] } },
                { "content": { "parts": [ { "text": "ignored" } ] } }
            ]
        }))
        .unwrap();
        assert_eq!(response.text(), "{\"emails\": [\"a@b.com\"]}");
    }

    #[test]
    fn response_without_candidates_has_empty_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn endpoint_uses_model_and_trims_slash() {
        let mut settings = ExtractorSettings::new("k");
        settings.base_url = "http://localhost:1234/v1beta/".into();
        settings.model = "m-1".into();
        let extractor = GeminiExtractor::new(settings).unwrap();
        assert_eq!(extractor.endpoint(), "http://localhost:1234/v1beta/models/m-1:generateContent");
    }
}
