//! Generative-language summarization client

use crate::error::{MailError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Prompt sent for every email.
pub fn build_prompt(email_text: &str) -> String {
    format!(
        "Summarize this email in structured format:\n\
         - Summary\n\
         - Key details\n\
         - Action items (if any)\n\
         \n\
         Email:\n\
         {}\n",
        email_text
    )
}

/// Stateless wrapper around one `generateContent` call.
#[derive(Debug, Clone)]
pub struct SummarizerClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl SummarizerClient {
    pub fn new(http: Client, base_url: &str, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Summarize one email. No retry, no streaming.
    pub async fn summarize(&self, email_text: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let prompt = build_prompt(email_text);
        let request = GenerateRequest {
            contents: [Content {
                parts: [TextPart { text: &prompt }],
            }],
        };

        debug!(model = %self.model, chars = email_text.chars().count(), "Requesting summary");

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MailError::from_response(response).await);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| MailError::Parse(format!("Failed to parse completion: {}", e)))?;

        let candidate = body
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| MailError::Parse("completion has no candidates".to_string()))?;

        Ok(candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_email() {
        let prompt = build_prompt("Invoice #7 is due Friday");

        assert!(prompt.starts_with("Summarize this email in structured format:"));
        assert!(prompt.contains("- Key details\n"));
        assert!(prompt.contains("- Action items (if any)\n"));
        assert!(prompt.ends_with("Email:\nInvoice #7 is due Friday\n"));
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            contents: [Content {
                parts: [TextPart { text: "hi" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]})
        );
    }
}
