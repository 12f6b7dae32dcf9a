//! Google Gemini REST client
//!
//! One `generateContent` call per request, no retries. Errors are returned
//! to [`super::GalaxyAi`] which turns them into the offline reply.

use std::time::Duration;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AiContext, AiError, AiResult};
use crate::config::AiConfig;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
}

impl GeminiClient {
    /// Create a client; fails with [`AiError::MissingApiKey`] when no key is configured
    pub fn new(config: &AiConfig) -> AiResult<Self> {
        let api_key = match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Err(AiError::MissingApiKey),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url.trim_end_matches('/'), self.model)
    }

    /// Ask the model for a reply to `prompt` under the persona for `context`
    pub async fn generate_content(&self, prompt: &str, context: AiContext) -> AiResult<String> {
        let instruction = context.system_instruction();
        let body = build_request(prompt, &instruction);

        debug!(model = %self.model, %context, "Sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(AiError::Api(format!("HTTP {}: {}", status, text)));
        }

        parse_response(&text)
    }
}

fn build_request<'a>(prompt: &'a str, instruction: &'a str) -> GenerateRequest<'a> {
    GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part { text: instruction }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part { text: prompt }],
        }],
    }
}

/// Concatenate the text parts of the first candidate
fn parse_response(body: &str) -> AiResult<String> {
    let response: GenerateResponse = serde_json::from_str(body)?;

    if let Some(usage) = &response.usage_metadata {
        info!(
            "Gemini usage - prompt: {:?} tokens, reply: {:?} tokens",
            usage.prompt_token_count, usage.candidates_token_count
        );
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AiError::InvalidResponse("no candidates in response".to_string()))?;

    let text: String = candidate
        .content
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AiConfig {
        AiConfig {
            api_key: Some("test-key".to_string()),
            ..AiConfig::default()
        }
    }

    #[test]
    fn test_client_creation() {
        let client = GeminiClient::new(&test_config()).unwrap();
        assert!(client.endpoint().ends_with("/gemini-2.5-flash:generateContent"));
    }

    #[test]
    fn test_missing_or_blank_key() {
        let mut config = test_config();
        config.api_key = None;
        assert!(matches!(GeminiClient::new(&config), Err(AiError::MissingApiKey)));
        config.api_key = Some("   ".to_string());
        assert!(matches!(GeminiClient::new(&config), Err(AiError::MissingApiKey)));
    }

    #[test]
    fn test_request_shape() {
        let instruction = AiContext::Notes.system_instruction();
        let body = serde_json::to_value(build_request("summarize this", &instruction)).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "summarize this");
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Note Assist"));
        assert!(body["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "candidates": [{"content": {"parts": [{"text": "**Hello** "}, {"text": "there ✨"}], "role": "model"}}],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4}
        }"#;
        assert_eq!(parse_response(body).unwrap(), "**Hello** there ✨");
    }

    #[test]
    fn test_parse_response_without_candidates() {
        assert!(matches!(
            parse_response(r#"{"candidates": []}"#),
            Err(AiError::InvalidResponse(_))
        ));
        assert!(matches!(parse_response("not json"), Err(AiError::Json(_))));
    }

    #[test]
    fn test_parse_response_empty_text() {
        let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        assert_eq!(parse_response(body).unwrap(), "");
    }
}
