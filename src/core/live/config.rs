//! Gemini Live API configuration types.
//!
//! This module contains configuration for the Live BidiGenerateContent
//! session:
//! - WebSocket endpoint and model selection
//! - Prebuilt voice selection
//! - Audio MIME/sample-rate constants
//! - The default companion persona

use serde::{Deserialize, Serialize};

use super::LiveError;

/// Gemini Live API WebSocket endpoint.
pub const GEMINI_LIVE_URL: &str =
    "wss://generativelanguage.googleapis.com/ws/google.ai.generativelanguage.v1beta.GenerativeService.BidiGenerateContent";

/// Default Live model.
pub const GEMINI_LIVE_MODEL: &str = "models/gemini-2.0-flash-exp";

/// MIME type for PCM audio sent to the Live API.
pub const LIVE_AUDIO_MIME: &str = "audio/pcm";

/// Sample rate of model output audio (PCM 16-bit, mono).
pub const LIVE_OUTPUT_SAMPLE_RATE: u32 = 24000;

/// Default persona for the companion assistant.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "\
You are 'Ellen', a warm, wise, and empathetic British friend designed to provide caring support and companionship.

CRITICAL: Listen carefully to what the user ACTUALLY says. Do not make up topics or context that wasn't mentioned. Respond ONLY to what they tell you.

Your tone should be comforting, non-judgmental, validating, and casually conversational with a gentle British manner.
Use British English spellings (favour, colour, realise, etc.) but avoid overly familiar terms of endearment like 'love', 'dear', or 'pet'.
Avoid overly clinical language unless asked. Focus on emotional support and practical, gentle advice.

When someone says they're not feeling well, not feeling great, or not feeling their best - recognize this as NEGATIVE sentiment and respond with empathy and support.

IMPORTANT: The user speaks English. Always interpret their speech as English.";

// =============================================================================
// Voices
// =============================================================================

/// Prebuilt voices available for Live audio output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LiveVoice {
    /// Aoede voice (default)
    #[default]
    Aoede,
    /// Puck voice
    Puck,
    /// Charon voice
    Charon,
    /// Kore voice
    Kore,
    /// Fenrir voice
    Fenrir,
}

impl LiveVoice {
    /// Convert to the API parameter value.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aoede => "Aoede",
            Self::Puck => "Puck",
            Self::Charon => "Charon",
            Self::Kore => "Kore",
            Self::Fenrir => "Fenrir",
        }
    }

    /// Parse from string, with fallback to default.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "aoede" => Self::Aoede,
            "puck" => Self::Puck,
            "charon" => Self::Charon,
            "kore" => Self::Kore,
            "fenrir" => Self::Fenrir,
            _ => Self::default(),
        }
    }

    /// Get all available voices.
    pub fn all() -> &'static [LiveVoice] {
        &[Self::Aoede, Self::Puck, Self::Charon, Self::Kore, Self::Fenrir]
    }
}

impl std::fmt::Display for LiveVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Session Configuration
// =============================================================================

/// Configuration for a Live session.
#[derive(Debug, Clone)]
pub struct LiveConfig {
    /// API key for authentication (appended as the `key` query parameter)
    pub api_key: String,
    /// Model to use (e.g. "models/gemini-2.0-flash-exp")
    pub model: String,
    /// Prebuilt voice for audio output
    pub voice: LiveVoice,
    /// System instruction / persona for the assistant
    pub system_instruction: String,
    /// Endpoint override; `None` uses [`GEMINI_LIVE_URL`]
    pub endpoint: Option<String>,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: GEMINI_LIVE_MODEL.to_string(),
            voice: LiveVoice::default(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            endpoint: None,
        }
    }
}

impl LiveConfig {
    /// Validate the configuration before connecting.
    pub fn validate(&self) -> Result<(), LiveError> {
        if self.api_key.is_empty() {
            return Err(LiveError::AuthenticationFailed(
                "API key is required".to_string(),
            ));
        }
        if self.model.is_empty() {
            return Err(LiveError::InvalidConfiguration(
                "model must not be empty".to_string(),
            ));
        }
        if let Some(ref endpoint) = self.endpoint {
            let parsed = url::Url::parse(endpoint).map_err(|e| {
                LiveError::InvalidConfiguration(format!("invalid endpoint '{endpoint}': {e}"))
            })?;
            if parsed.scheme() != "ws" && parsed.scheme() != "wss" {
                return Err(LiveError::InvalidConfiguration(format!(
                    "endpoint must be a ws:// or wss:// URL, got '{}'",
                    parsed.scheme()
                )));
            }
        }
        Ok(())
    }

    /// Build the WebSocket URL with the API key parameter.
    pub fn ws_url(&self) -> String {
        let endpoint = self.endpoint.as_deref().unwrap_or(GEMINI_LIVE_URL);
        format!("{}?key={}", endpoint, self.api_key)
    }
}
