//! Google Gemini API client.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::providers::provider::{ProviderError, ProviderResult, TextGenerator};

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

/// Request body for the Gemini generateContent API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

/// Request content (one user turn carrying the whole prompt)
#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

/// Request content part
#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// Generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// Response from the generateContent API
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    // Absent entirely when the prompt is blocked
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Candidate response
#[derive(Debug, Deserialize)]
struct Candidate {
    // Safety-blocked candidates carry no content
    #[serde(default)]
    content: CandidateContent,
}

/// Candidate content
#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

/// Candidate part. Non-text parts deserialize with `text: None`.
#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// Override the API base URL (used for proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_output_tokens: u32,
    ) -> ProviderResult<String> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens,
            },
        };

        let response = self
            .http_client
            .post(self.request_url())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), response_text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&response_text)?;

        extract_text(parsed)
    }
}

/// Map a non-2xx response to an API error, pulling the message out of
/// the structured error body when there is one.
fn api_error(status: u16, body: String) -> ProviderError {
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|parsed| parsed.error.message)
        .unwrap_or(body);

    ProviderError::ApiError { status, message }
}

/// Extract the generated text from the first candidate.
fn extract_text(response: GenerateContentResponse) -> ProviderResult<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ProviderError::NoContent)?;

    let text: String = candidate
        .content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        return Err(ProviderError::NoContent);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_uses_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "Halo".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 256,
            },
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "Halo");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 256);
        assert!((value["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_extract_text_concatenates_parts() {
        let json = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [
                            {"text": "Jakarta adalah "},
                            {"text": "ibu kota Indonesia."}
                        ],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let text = extract_text(response).unwrap();

        assert_eq!(text, "Jakarta adalah ibu kota Indonesia.");
    }

    #[test]
    fn test_extract_text_skips_non_text_parts() {
        let json = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [
                            {"functionCall": {"name": "noop", "args": {}}},
                            {"text": "Baik."}
                        ]
                    }
                }
            ]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let text = extract_text(response).unwrap();

        assert_eq!(text, "Baik.");
    }

    #[test]
    fn test_extract_text_no_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        let result = extract_text(response);

        assert!(matches!(result, Err(ProviderError::NoContent)));
    }

    #[test]
    fn test_extract_text_blank_parts() {
        let json = r#"{"candidates": [{"content": {"parts": [{"text": "   "}]}}]}"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let result = extract_text(response);

        assert!(matches!(result, Err(ProviderError::NoContent)));
    }

    #[test]
    fn test_api_error_parses_structured_body() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;

        let err = api_error(400, body.to_string());

        match err {
            ProviderError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        let err = api_error(502, "Bad Gateway".to_string());

        match err {
            ProviderError::ApiError { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_request_url() {
        let client = GeminiClient::new("secret", "gemini-1.5-flash")
            .with_base_url("http://localhost:9090/v1beta");

        assert_eq!(
            client.request_url(),
            "http://localhost:9090/v1beta/models/gemini-1.5-flash:generateContent?key=secret"
        );
    }
}
