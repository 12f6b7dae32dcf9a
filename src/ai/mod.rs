//! Galaxy AI text generation
//!
//! The shell only ever sees [`TextService`]: a prompt plus a context tag in,
//! a string out. Failures never reach the caller. Without a credential the
//! service answers from canned per-context responses (demo mode); with one
//! it asks Gemini and falls back to a fixed offline line on any error.

pub mod gemini;
pub mod worker;

use std::fmt;
use std::str::FromStr;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use gemini::GeminiClient;
pub use worker::{AiReply, AiWorker, RequestId};

/// Reply used whenever the remote call fails or times out
pub const OFFLINE_REPLY: &str = "AI Connection Offline. Please check internet.";

/// Reply used when the model returns no text
pub const EMPTY_REPLY: &str = "AI processing...";

/// Prompt behind the home screen's Now Brief widget (sent as `wellness`)
pub const NOW_BRIEF_PROMPT: &str = "Generate my daily briefing.";

/// Base persona for every request
const BASE_INSTRUCTION: &str = "You are the AI assistant inside a Samsung Galaxy S25 Ultra simulator. \
Be concise, futuristic, and polished. Use formatting like **bold** and emojis.";

/// Which feature is asking - selects the persona and the demo-mode answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiContext {
    #[default]
    General,
    Notes,
    Drawing,
    Call,
    AudioEraser,
    Wellness,
    PhotoEdit,
}

impl AiContext {
    pub fn tag(self) -> &'static str {
        match self {
            AiContext::General => "general",
            AiContext::Notes => "notes",
            AiContext::Drawing => "drawing",
            AiContext::Call => "call",
            AiContext::AudioEraser => "audio_eraser",
            AiContext::Wellness => "wellness",
            AiContext::PhotoEdit => "photo_edit",
        }
    }

    /// Full system instruction sent with the prompt
    pub fn system_instruction(self) -> String {
        let persona = match self {
            AiContext::General => return BASE_INSTRUCTION.to_string(),
            AiContext::Notes => "You are Note Assist. Summarize, format, or translate text.",
            AiContext::Drawing => "You are Drawing Assist. Describe how you would transform a rough sketch into a masterpiece.",
            AiContext::Call => "You are Live Translate. Translate the conversation.",
            AiContext::AudioEraser => "You are Audio Eraser. Describe the noise removal process technically but clearly.",
            AiContext::Wellness => "You are the Now Brief Widget. Provide a very short, punchy summary including Weather (Dhaka, 28C), \
Energy Score (85), a wellness tip, and a fake podcast recommendation.",
            AiContext::PhotoEdit => "You are Generative Edit. The user is asking to edit a photo. Describe the action taken \
(e.g., resizing, removing, moving objects) and the magical result.",
        };
        format!("{} {}", BASE_INSTRUCTION, persona)
    }

    /// Canned answer used in demo mode (no credential configured)
    pub fn demo_reply(self) -> &'static str {
        match self {
            AiContext::AudioEraser => "Analyzed audio spectrum. Detected 45% wind noise. Removing... 🌊 Audio clarity improved by 85%.",
            AiContext::Wellness => "Energy Score: 85/100 💓. Tip: You had great sleep consistency! Try a 10-minute walk to maintain momentum. \
🎙️ New Podcast: 'Future of AI' is out.",
            AiContext::PhotoEdit => "Generative Edit: Identifying object... Removing and filling background with context-aware pixels. ✨ Done! Object moved naturally.",
            _ => "Demo Mode: API Key missing. (Simulated AI response)",
        }
    }
}

impl fmt::Display for AiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AiContext {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let context = match s.trim().to_lowercase().as_str() {
            "general" => AiContext::General,
            "notes" => AiContext::Notes,
            "drawing" => AiContext::Drawing,
            "call" => AiContext::Call,
            "audio_eraser" => AiContext::AudioEraser,
            "wellness" => AiContext::Wellness,
            "photo_edit" => AiContext::PhotoEdit,
            other => return Err(AiError::UnknownContext(other.to_string())),
        };
        Ok(context)
    }
}

/// Errors from the remote text generation call
#[derive(Debug, Error)]
pub enum AiError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("invalid JSON from API: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("unknown AI context '{0}'")]
    UnknownContext(String),
}

pub type AiResult<T> = Result<T, AiError>;

/// Asynchronous text generation. Implementations must not fail: every
/// error path resolves to a best-effort string.
#[async_trait]
pub trait TextService: Send + Sync {
    async fn generate(&self, prompt: &str, context: AiContext) -> String;
}

/// The text service the shell talks to
#[derive(Debug, Clone)]
pub struct GalaxyAi {
    /// `None` means demo mode
    client: Option<GeminiClient>,
}

impl GalaxyAi {
    /// Demo mode - canned answers per context
    pub fn demo() -> Self {
        Self { client: None }
    }

    pub fn with_client(client: GeminiClient) -> Self {
        Self { client: Some(client) }
    }

    /// Build from config; a missing key is not an error, it selects demo mode
    pub fn from_config(config: &crate::config::AiConfig) -> Self {
        match GeminiClient::new(config) {
            Ok(client) => {
                tracing::info!(model = %config.model, "Galaxy AI using Gemini");
                Self::with_client(client)
            }
            Err(AiError::MissingApiKey) => {
                tracing::info!("No API key configured, Galaxy AI running in demo mode");
                Self::demo()
            }
            Err(e) => {
                tracing::warn!("Failed to create Gemini client, using demo mode: {}", e);
                Self::demo()
            }
        }
    }

    pub fn is_demo(&self) -> bool {
        self.client.is_none()
    }
}

#[async_trait]
impl TextService for GalaxyAi {
    async fn generate(&self, prompt: &str, context: AiContext) -> String {
        let Some(client) = &self.client else {
            return context.demo_reply().to_string();
        };

        reply_text(client.generate_content(prompt, context).await, context)
    }
}

/// Settle a Gemini result into side panel text. Only a truly empty reply
/// is replaced; whitespace is passed through as sent.
fn reply_text(result: AiResult<String>, context: AiContext) -> String {
    match result {
        Ok(text) if text.is_empty() => EMPTY_REPLY.to_string(),
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(%context, "Gemini request failed: {}", e);
            OFFLINE_REPLY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_text_only_replaces_empty() {
        assert_eq!(reply_text(Ok(String::new()), AiContext::General), EMPTY_REPLY);
        assert_eq!(reply_text(Ok(" \n".to_string()), AiContext::General), " \n");
        assert_eq!(reply_text(Ok("hi".to_string()), AiContext::General), "hi");
        assert_eq!(
            reply_text(Err(AiError::Api("quota".into())), AiContext::General),
            OFFLINE_REPLY
        );
    }

    #[tokio::test]
    async fn test_demo_mode_general_fallback() {
        let ai = GalaxyAi::demo();
        let reply = ai.generate("asdkjf randomtext", AiContext::General).await;
        assert_eq!(reply, "Demo Mode: API Key missing. (Simulated AI response)");
    }

    #[tokio::test]
    async fn test_demo_mode_per_context() {
        let ai = GalaxyAi::demo();
        assert!(ai.generate("x", AiContext::Wellness).await.starts_with("Energy Score"));
        assert!(ai.generate("x", AiContext::AudioEraser).await.contains("wind noise"));
        assert!(ai.generate("x", AiContext::PhotoEdit).await.starts_with("Generative Edit"));
        assert_eq!(
            ai.generate("x", AiContext::Notes).await,
            AiContext::General.demo_reply()
        );
    }

    #[test]
    fn test_system_instruction_personas() {
        assert_eq!(AiContext::General.system_instruction(), BASE_INSTRUCTION);
        assert!(AiContext::Call.system_instruction().ends_with("Translate the conversation."));
        assert!(AiContext::Notes.system_instruction().contains("Note Assist"));
    }

    #[test]
    fn test_context_tags_parse() {
        for context in [
            AiContext::General,
            AiContext::Notes,
            AiContext::Drawing,
            AiContext::Call,
            AiContext::AudioEraser,
            AiContext::Wellness,
            AiContext::PhotoEdit,
        ] {
            assert_eq!(context.tag().parse::<AiContext>().unwrap(), context);
        }
        assert!("weather".parse::<AiContext>().is_err());
    }
}
