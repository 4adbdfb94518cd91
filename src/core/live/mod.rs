//! Gemini Live session module.
//!
//! This module provides the upstream side of the relay: a WebSocket
//! client for the Live BidiGenerateContent API with bidirectional audio
//! streaming and transcription.
//!
//! # Architecture
//!
//! - [`LiveSession`] owns the connection and yields typed [`LiveEvent`]s
//! - [`LiveSessionHandle`] is a cheap clone for sending audio upstream
//! - Wire types live in [`messages`]; endpoint/voice settings in [`config`]
//!
//! # Audio Format
//!
//! Input and output audio is PCM 16-bit signed little-endian, mono;
//! model output is produced at 24kHz.

mod client;
pub mod config;
pub mod messages;

pub use client::{LiveSession, LiveSessionHandle};
pub use config::{
    DEFAULT_SYSTEM_INSTRUCTION, GEMINI_LIVE_MODEL, GEMINI_LIVE_URL, LIVE_AUDIO_MIME,
    LIVE_OUTPUT_SAMPLE_RATE, LiveConfig, LiveVoice,
};

use bytes::Bytes;
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur on a Live session.
#[derive(Debug, Error)]
pub enum LiveError {
    /// Connection to the Live API failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// WebSocket error
    #[error("WebSocket error: {0}")]
    WebSocketError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Not connected
    #[error("Not connected")]
    NotConnected,
}

/// Result type for Live session operations.
pub type LiveResult<T> = Result<T, LiveError>;

// =============================================================================
// Events
// =============================================================================

/// Structured events yielded by a Live session.
///
/// One server frame may expand to several events; they are delivered in
/// the order the frame carries them (model audio first, transcriptions
/// next, turn boundary last).
#[derive(Debug, Clone)]
pub enum LiveEvent {
    /// Decoded model output audio (PCM 16-bit, 24kHz, mono)
    Audio(Bytes),
    /// Incremental transcript of the model's speech
    OutputTranscription(String),
    /// Incremental transcript of the user's speech
    InputTranscription(String),
    /// Tool call request (observed, not acted on)
    ToolCall(serde_json::Value),
    /// The current turn is complete
    TurnComplete,
}
