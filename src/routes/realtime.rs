//! Relay WebSocket route configuration
//!
//! This module configures the WebSocket endpoint for the realtime audio
//! relay between browser clients and the Gemini Live API.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::relay::relay_handler;
use crate::state::AppState;
use std::sync::Arc;

/// Create the relay WebSocket router
///
/// # Endpoint
///
/// `GET /ws/realtime` - WebSocket upgrade for the realtime audio relay
///
/// # Protocol
///
/// After WebSocket upgrade, clients send JSON text frames:
///
/// ```json
/// {"type": "input_audio_buffer.append", "audio": "<base64 PCM16>"}
/// ```
///
/// The server responds per turn with the user transcript, its sentiment,
/// buffered audio deltas, the AI transcript, and a closing `response.done`:
///
/// ```json
/// {"type": "conversation.item.input_audio_transcription.completed", "transcript": "..."}
/// {"type": "sentiment.update", "sentiment": "NEGATIVE"}
/// {"type": "response.audio.delta", "delta": "<base64 PCM16>"}
/// {"type": "response.audio_transcript.done", "transcript": "..."}
/// {"type": "response.done"}
/// ```
pub fn create_realtime_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ws/realtime", get(relay_handler))
        .layer(TraceLayer::new_for_http())
}
