//! Gemini Live BidiGenerateContent wire types.
//!
//! Client messages are an externally tagged union: each frame is a JSON
//! object with exactly one top-level field (`setup`, `realtimeInput`).
//! Server frames may carry several top-level fields at once
//! (`serverContent` alongside usage metadata, for example), so
//! [`ServerMessage`] is a struct of optionals rather than an enum.

use base64::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::LIVE_AUDIO_MIME;

// =============================================================================
// Client Messages (gateway -> Live API)
// =============================================================================

/// Outgoing Live API messages.
///
/// Externally tagged serialization yields `{"setup": {...}}` and
/// `{"realtimeInput": {...}}` frames.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientMessage {
    /// Session setup, sent once after the socket opens
    Setup(Setup),
    /// Streaming realtime input (one audio chunk per frame)
    RealtimeInput(RealtimeInput),
}

impl ClientMessage {
    /// Build a realtime-input frame carrying one PCM chunk.
    pub fn audio_chunk(data: &[u8]) -> Self {
        Self::RealtimeInput(RealtimeInput {
            audio: Blob {
                mime_type: LIVE_AUDIO_MIME.to_string(),
                data: BASE64_STANDARD.encode(data),
            },
        })
    }
}

/// Session setup payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Setup {
    /// Model resource name (e.g. "models/gemini-2.0-flash-exp")
    pub model: String,
    /// Generation configuration (modalities, voice)
    pub generation_config: GenerationConfig,
    /// System instruction / persona
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Enable transcription of user audio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_audio_transcription: Option<AudioTranscriptionConfig>,
    /// Enable transcription of model audio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_audio_transcription: Option<AudioTranscriptionConfig>,
}

/// Generation configuration for the session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Response modalities; the relay always requests `["AUDIO"]`
    pub response_modalities: Vec<String>,
    /// Voice selection for audio output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
}

/// Speech output configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    /// Voice configuration
    pub voice_config: VoiceConfig,
}

/// Voice configuration wrapper.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    /// Prebuilt voice selection
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

/// Prebuilt voice selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    /// Voice name (e.g. "Aoede")
    pub voice_name: String,
}

/// Marker config enabling audio transcription; serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AudioTranscriptionConfig {}

/// Streaming realtime input.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeInput {
    /// One audio chunk
    pub audio: Blob,
}

/// Inline binary payload with MIME type; data is base64 on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// MIME type (e.g. "audio/pcm")
    pub mime_type: String,
    /// Base64-encoded payload
    pub data: String,
}

/// Content: a role plus ordered parts. Used for the system instruction on
/// the way out and for model turns on the way in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Content {
    /// Ordered content parts
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
    /// Optional role ("user", "model")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Content {
    /// Build a content with a single text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text.into()),
                inline_data: None,
            }],
            role: None,
        }
    }
}

/// A single content part: text and/or inline binary data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Part {
    /// Text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary content (model output audio)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
}

// =============================================================================
// Server Messages (Live API -> gateway)
// =============================================================================

/// Incoming Live API frame. All fields optional; unknown fields ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerMessage {
    /// Acknowledges the setup message
    pub setup_complete: Option<SetupComplete>,
    /// Model content, transcriptions, and turn boundaries
    pub server_content: Option<ServerContent>,
    /// Tool call request (observed, not acted on)
    pub tool_call: Option<serde_json::Value>,
    /// Advance notice that the server will close the stream
    pub go_away: Option<GoAway>,
}

/// Setup acknowledgment payload.
#[derive(Debug, Default, Deserialize)]
pub struct SetupComplete {}

/// Content portion of a server frame.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerContent {
    /// Model output parts (audio and/or text)
    pub model_turn: Option<Content>,
    /// Set on the final frame of a turn
    pub turn_complete: bool,
    /// Set when generation was interrupted by user speech
    pub interrupted: bool,
    /// Incremental transcription of user audio
    pub input_transcription: Option<Transcription>,
    /// Incremental transcription of model audio
    pub output_transcription: Option<Transcription>,
}

/// Incremental transcription fragment.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transcription {
    /// Transcribed text fragment
    pub text: Option<String>,
    /// Set on the final fragment
    pub finished: bool,
}

/// Stream-end notice payload.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoAway {
    /// Remaining time before the server closes the stream
    pub time_left: Option<String>,
}
