//! Generative Language API client

use serde_json::{json, Value};

use crate::ai::{Explain, ExplainError};
use crate::entities::Term;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// HTTP client for the Generative Language API
#[derive(Debug)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a client. Fails early when no API key is configured.
    pub fn new(api_key: Option<String>, model: String) -> Result<Self, ExplainError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(ExplainError::MissingApiKey)?;
        Ok(Self {
            api_key,
            model,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Override the API endpoint (tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn prompt(term: &Term) -> String {
        let categories = term
            .categories
            .iter()
            .map(|c| c.label_ja())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "You are an expert technical interpreter and engineer specializing in \
             Japanese manufacturing (Toyota production system, resin molding, die design).\n\
             \n\
             Please provide a detailed explanation for the following technical term:\n\
             \n\
             Term (Japanese): {}\n\
             Reading: {}\n\
             English: {}\n\
             Categories: {}\n\
             Current Basic Meaning: {}\n\
             \n\
             Your explanation should include:\n\
             1. A deeper technical breakdown of what it is.\n\
             2. Example usage in a factory or design context.\n\
             3. If applicable, related terms or antonyms.\n\
             \n\
             Format the output in clear Markdown using bullet points where necessary. \
             Keep the tone professional and educational. If the term is a Toyota term, \
             emphasize its role in TPS (Toyota Production System).",
            term.term, term.reading, term.english, categories, term.meaning
        )
    }

    fn extract_text(body: &Value) -> Option<String> {
        let parts = body
            .get("candidates")?
            .get(0)?
            .get("content")?
            .get("parts")?
            .as_array()?;

        let text: String = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl Explain for GeminiClient {
    fn explain(&self, term: &Term) -> Result<String, ExplainError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let body = json!({
            "contents": [{
                "parts": [{ "text": Self::prompt(term) }]
            }]
        });

        let response = ureq::post(&url)
            .set("content-type", "application/json")
            .send_json(body)
            .map_err(|e| ExplainError::Transport(e.to_string()))?;

        let body: Value = response
            .into_json()
            .map_err(|e| ExplainError::Transport(e.to_string()))?;

        Self::extract_text(&body).ok_or(ExplainError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::TermId;
    use crate::entities::{Category, TermDraft};
    use chrono::NaiveDate;

    fn term() -> Term {
        Term::new(
            TermId::new(1),
            TermDraft {
                term: "カイゼン".to_string(),
                reading: "かいぜん".to_string(),
                alias: None,
                english: "Kaizen".to_string(),
                meaning: "継続的な改善活動".to_string(),
                categories: vec![Category::ToyotaTerms],
                image_url: None,
            },
            "alice",
            NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        )
    }

    #[test]
    fn test_client_requires_api_key() {
        let err = GeminiClient::new(None, "gemini-2.5-flash".to_string()).unwrap_err();
        assert!(matches!(err, ExplainError::MissingApiKey));

        let err = GeminiClient::new(Some("  ".to_string()), "gemini-2.5-flash".to_string())
            .unwrap_err();
        assert!(matches!(err, ExplainError::MissingApiKey));
    }

    #[test]
    fn test_prompt_includes_term_fields() {
        let prompt = GeminiClient::prompt(&term());
        assert!(prompt.contains("カイゼン"));
        assert!(prompt.contains("かいぜん"));
        assert!(prompt.contains("Kaizen"));
        assert!(prompt.contains("トヨタ用語"));
        assert!(prompt.contains("継続的な改善活動"));
    }

    #[test]
    fn test_extract_text_from_response() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "## カイゼン\n" },
                        { "text": "Continuous improvement." }
                    ]
                }
            }]
        });
        let text = GeminiClient::extract_text(&body).unwrap();
        assert!(text.contains("カイゼン"));
        assert!(text.contains("Continuous improvement."));
    }

    #[test]
    fn test_extract_text_rejects_empty_payload() {
        let body = serde_json::json!({ "candidates": [] });
        assert!(GeminiClient::extract_text(&body).is_none());

        let body = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "  " }] } }]
        });
        assert!(GeminiClient::extract_text(&body).is_none());
    }
}
