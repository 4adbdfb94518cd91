//! Relay WebSocket handler.
//!
//! This module wires one browser WebSocket to one Gemini Live session:
//! the connection supervisor upgrades the socket, establishes the session,
//! and runs the two forwarding loops until either side goes away.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use base64::prelude::*;
use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::time::Duration;
use tracing::{debug, error, info, trace, warn};

use crate::core::live::{LiveEvent, LiveSession, LiveSessionHandle};
use crate::state::AppState;

use super::messages::{ClientFrame, ServerFrame};
use super::turn::TurnState;

/// Pause before re-listening after the upstream event stream ends.
const STREAM_RESUME_DELAY: Duration = Duration::from_millis(100);

/// Inbound audio progress is logged every this many chunks.
const AUDIO_LOG_INTERVAL: u64 = 50;

/// Relay WebSocket handler
///
/// Upgrades the HTTP connection to WebSocket and relays audio between the
/// browser client and a dedicated Live session.
///
/// # Arguments
/// * `ws` - The WebSocket upgrade request from Axum
/// * `state` - Application state containing configuration
///
/// # Returns
/// * `Response` - HTTP response that upgrades the connection to WebSocket
pub async fn relay_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    info!("Relay WebSocket connection upgrade requested");
    ws.on_upgrade(move |socket| handle_relay_socket(socket, state))
}

/// Handle the relay WebSocket connection
async fn handle_relay_socket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("Relay WebSocket connection established");

    let session = match LiveSession::connect(&state.live_config()).await {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to establish Live session: {}", e);
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };

    let (ws_sender, ws_receiver) = socket.split();
    let session_handle = session.handle();

    let mut inbound = tokio::spawn(forward_client_audio(ws_receiver, session_handle));
    let mut outbound = tokio::spawn(forward_live_events(session, ws_sender));

    // Either forwarder finishing tears down the sibling; dropping the
    // outbound task drops the session, which closes the upstream socket.
    tokio::select! {
        _ = &mut inbound => {
            debug!("Client-to-upstream forwarder finished first");
            outbound.abort();
        }
        _ = &mut outbound => {
            debug!("Upstream-to-client forwarder finished first");
            inbound.abort();
        }
    }

    info!("Relay WebSocket connection terminated");
}

/// Forward audio from the client to the Live session.
///
/// Consumes JSON control/audio frames from the browser. Malformed frames
/// and unknown types are dropped without a reply; upstream send failures
/// are logged and the loop continues.
async fn forward_client_audio(
    mut receiver: SplitStream<WebSocket>,
    session: LiveSessionHandle,
) {
    debug!("Listening for client audio");
    let mut audio_chunks: u64 = 0;

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let frame: ClientFrame = match serde_json::from_str(&text) {
                    Ok(frame) => frame,
                    Err(e) => {
                        trace!("Ignoring unrecognized client frame: {}", e);
                        continue;
                    }
                };

                match frame {
                    ClientFrame::AudioAppend { audio } => {
                        let Some(audio) = audio else { continue };
                        let Ok(bytes) = BASE64_STANDARD.decode(audio.as_bytes()) else {
                            trace!("Dropping audio frame with malformed base64");
                            continue;
                        };

                        audio_chunks += 1;
                        if audio_chunks % AUDIO_LOG_INTERVAL == 0 {
                            debug!(
                                "Audio chunk #{} ({} bytes) relayed upstream",
                                audio_chunks,
                                bytes.len()
                            );
                        }

                        if let Err(e) = session.send_audio(Bytes::from(bytes)).await {
                            warn!("Failed to send audio upstream: {}", e);
                        }
                    }
                    ClientFrame::AudioCommit => {
                        debug!("Audio committed; upstream VAD triggers the response");
                    }
                    ClientFrame::ResponseCancel => {
                        info!("Client requested response cancel");
                    }
                }
            }
            Ok(Message::Close(_)) => {
                info!("Client closed the relay socket");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Relay socket error: {}", e);
                break;
            }
        }
    }

    debug!("Client-to-upstream forwarder ended");
}

/// Forward Live session events to the client.
///
/// Owns the send half of the client socket and the per-connection
/// [`TurnState`]. An exhausted upstream event stream is transient: the
/// loop pauses briefly and listens again. The loop itself only ends when
/// the supervisor tears the connection down.
async fn forward_live_events(mut session: LiveSession, sender: SplitSink<WebSocket, Message>) {
    debug!("Listening for Live events");

    let mut client = ClientChannel::new(sender);
    let mut turn = TurnState::new();

    loop {
        let Some(event) = session.recv().await else {
            debug!("Live event stream ended, waiting before resuming");
            tokio::time::sleep(STREAM_RESUME_DELAY).await;
            continue;
        };

        match event {
            LiveEvent::Audio(audio) => {
                for frame in turn.on_audio(&audio) {
                    client.send(&frame).await;
                }
            }
            LiveEvent::OutputTranscription(text) => {
                turn.on_output_transcription(&text);
            }
            LiveEvent::InputTranscription(text) => {
                if let Some(frame) = turn.on_input_transcription(&text) {
                    client.send(&frame).await;
                }
            }
            LiveEvent::ToolCall(call) => {
                debug!("Tool call received (unused): {}", call);
            }
            LiveEvent::TurnComplete => {
                for frame in turn.on_turn_complete() {
                    client.send(&frame).await;
                }
                info!("Turn {} complete, ready for next input", turn.turns_completed());
            }
        }
    }
}

/// Send half of the client socket with failure latching.
///
/// After one failed send the channel is marked closed and every later
/// send becomes a no-op, so a vanished client cannot crash the forwarder.
struct ClientChannel {
    sender: SplitSink<WebSocket, Message>,
    open: bool,
}

impl ClientChannel {
    fn new(sender: SplitSink<WebSocket, Message>) -> Self {
        Self { sender, open: true }
    }

    async fn send(&mut self, frame: &ServerFrame) {
        if !self.open {
            return;
        }

        let json = match serde_json::to_string(frame) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize server frame: {}", e);
                return;
            }
        };

        if let Err(e) = self.sender.send(Message::Text(json.into())).await {
            warn!("Client send failed, suppressing further sends: {}", e);
            self.open = false;
        }
    }
}
