//! Hosted language-model integration (Gemini `generateContent`).

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AppError;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-thinking-exp";

/// Anything that turns a prompt into free text.
///
/// The response is treated as opaque: no parsing, validation or retry.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, AppError>;
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client from `GEMINI_API_KEY` (and `GEMINI_MODEL` when `model` is
    /// not given), reading `.env` first.
    pub fn from_env(model: Option<String>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| AppError::new(2, "Missing GEMINI_API_KEY in environment (.env)."))?;
        let model = model
            .or_else(|| std::env::var("GEMINI_MODEL").ok())
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        info!(model = %self.model, prompt_chars = prompt.len(), "requesting advisory text");
        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", &self.api_key)])
            .json(&payload)
            .send()
            .map_err(|e| AppError::new(4, format!("Gemini request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(AppError::new(
                4,
                format!("Gemini request failed with status {status}: {body}"),
            ));
        }

        let raw = resp
            .text()
            .map_err(|e| AppError::new(4, format!("Failed to read Gemini response: {e}")))?;
        let body: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| AppError::new(4, format!("Failed to parse Gemini response: {e}")))?;

        let text = response_text(&body)
            .ok_or_else(|| AppError::new(4, "Gemini returned no text candidates."))?;
        debug!(chars = text.len(), "received advisory text");
        Ok(text)
    }
}

/// Concatenate the text parts of the first candidate.
fn response_text(body: &GenerateContentResponse) -> Option<String> {
    let candidate = body.candidates.as_ref()?.first()?;
    let content = candidate.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if text.is_empty() { None } else { Some(text) }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_wire_shape() {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some("hello".into()),
                }],
            }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"contents": [{"role": "user", "parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn text_parts_of_first_candidate_are_joined() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[
                {"content":{"role":"model","parts":[{"text":"Bundle "},{"thought":true},{"text":"cards."}]}},
                {"content":{"parts":[{"text":"ignored"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response_text(&body).as_deref(), Some("Bundle cards."));
    }

    #[test]
    fn empty_response_has_no_text() {
        let body: GenerateContentResponse = serde_json::from_str(r#"{"promptFeedback":{}}"#).unwrap();
        assert_eq!(response_text(&body), None);
    }

    #[test]
    fn endpoint_embeds_model() {
        let client = GeminiClient::new("k", "gemini-test").with_base_url("http://localhost:9");
        assert_eq!(client.endpoint(), "http://localhost:9/models/gemini-test:generateContent");
        assert_eq!(client.model(), "gemini-test");
    }
}
