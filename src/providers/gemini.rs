//! Native Gemini completion client.
//!
//! Speaks the `generateContent` REST contract directly: one prompt string
//! in, one completion string out. Callers never see the wire shape.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{PlatterError, Result};

use super::CompletionProvider;

/// Gemini v1beta REST API base.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Gemini REST client authenticated with an API key header.
///
/// No client-side timeout is applied: a request is bounded only by the
/// transport defaults, and the calling handler stays open until it
/// resolves.
pub struct GeminiClient {
    api_key: String,
    model: String,
    client: Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: Client::new(),
        }
    }

    /// Build the `generateContent` request body for a single prompt.
    fn build_request_body(prompt: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        })
    }

    /// Extract completion text from a Gemini response.
    ///
    /// The text lives in `candidates[0].content.parts[*].text`; multi-part
    /// candidates are joined in order.
    fn extract_text(response: &Value) -> Option<String> {
        let parts = response["candidates"][0]["content"]["parts"].as_array()?;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p["text"].as_str()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.join(""))
        }
    }

    /// Pull a readable message out of a Gemini error body.
    fn error_message(status: u16, body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                v["error"]["message"]
                    .as_str()
                    .map(|m| format!("Gemini API error ({status}): {m}"))
            })
            .unwrap_or_else(|| format!("Gemini API error ({status}): {body}"))
    }

    fn api_url(&self) -> String {
        format!("{GEMINI_API_BASE}/models/{}:generateContent", self.model)
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!("Gemini request to model {}", self.model);

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_request_body(prompt))
            .send()
            .await
            .map_err(|e| PlatterError::Completion(format!("Gemini request failed: {e}")))?;

        if response.status().is_success() {
            let body: Value = response.json().await.map_err(|e| {
                PlatterError::Completion(format!("failed to parse Gemini response: {e}"))
            })?;
            return Ok(Self::extract_text(&body).unwrap_or_default());
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(PlatterError::Completion(Self::error_message(status, &body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_body_wraps_prompt_in_contents_parts() {
        let body = GeminiClient::build_request_body("What goes with pizza?");
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "What goes with pizza?"
        );
    }

    #[test]
    fn test_extract_text_normal_response() {
        let response = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "Try the Margherita." }]
                }
            }]
        });
        let text = GeminiClient::extract_text(&response);
        assert_eq!(text.as_deref(), Some("Try the Margherita."));
    }

    #[test]
    fn test_extract_text_joins_multiple_parts() {
        let response = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Part one. " },
                        { "text": "Part two." }
                    ]
                }
            }]
        });
        let text = GeminiClient::extract_text(&response);
        assert_eq!(text.as_deref(), Some("Part one. Part two."));
    }

    #[test]
    fn test_extract_text_returns_none_for_empty_parts() {
        let response = serde_json::json!({
            "candidates": [{ "content": { "parts": [] } }]
        });
        assert!(GeminiClient::extract_text(&response).is_none());
    }

    #[test]
    fn test_extract_text_returns_none_without_candidates() {
        let response = serde_json::json!({ "promptFeedback": {} });
        assert!(GeminiClient::extract_text(&response).is_none());
    }

    #[test]
    fn test_api_url_format() {
        let client = GeminiClient::new("key", DEFAULT_GEMINI_MODEL);
        let url = client.api_url();
        assert!(url.contains("generativelanguage.googleapis.com"));
        assert!(url.contains(DEFAULT_GEMINI_MODEL));
        assert!(url.ends_with(":generateContent"));
    }

    #[test]
    fn test_error_message_prefers_body_message() {
        let body = r#"{"error": {"message": "API key not valid"}}"#;
        let msg = GeminiClient::error_message(400, body);
        assert!(msg.contains("400"));
        assert!(msg.contains("API key not valid"));
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        let msg = GeminiClient::error_message(503, "upstream unavailable");
        assert!(msg.contains("503"));
        assert!(msg.contains("upstream unavailable"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = GeminiClient::new("super-secret", DEFAULT_GEMINI_MODEL);
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
