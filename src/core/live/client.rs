//! Gemini Live session client.
//!
//! Connects to the Live BidiGenerateContent WebSocket endpoint, sends the
//! session setup, and then runs an I/O task that multiplexes outgoing
//! messages with incoming server frames. Incoming frames are decoded into
//! [`LiveEvent`]s and delivered over a channel.
//!
//! # Example
//!
//! ```rust,ignore
//! use ellen_gateway::core::live::{LiveConfig, LiveSession};
//!
//! let config = LiveConfig {
//!     api_key: "AIza...".to_string(),
//!     ..Default::default()
//! };
//!
//! let mut session = LiveSession::connect(&config).await?;
//! let handle = session.handle();
//! handle.send_audio(audio_bytes).await?;
//! while let Some(event) = session.recv().await {
//!     // forward to the client
//! }
//! ```

use base64::prelude::*;
use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

use super::config::LiveConfig;
use super::messages::{
    AudioTranscriptionConfig, ClientMessage, Content, GenerationConfig, PrebuiltVoiceConfig,
    ServerMessage, Setup, SpeechConfig, VoiceConfig,
};
use super::{LiveError, LiveEvent, LiveResult};

/// Channel capacity for outgoing messages and decoded events.
const CHANNEL_CAPACITY: usize = 256;

/// Handle for sending audio into a Live session.
///
/// Cheap to clone; all clones feed the same session.
#[derive(Clone)]
pub struct LiveSessionHandle {
    outgoing: mpsc::Sender<ClientMessage>,
}

impl LiveSessionHandle {
    /// Send one audio chunk (PCM 16-bit, mono) to the session.
    pub async fn send_audio(&self, data: Bytes) -> LiveResult<()> {
        self.outgoing
            .send(ClientMessage::audio_chunk(&data))
            .await
            .map_err(|_| LiveError::NotConnected)
    }
}

/// An established Live session.
///
/// Owns the event receiver; the I/O task is aborted when the session is
/// dropped, which closes the upstream socket.
pub struct LiveSession {
    outgoing: mpsc::Sender<ClientMessage>,
    events: mpsc::Receiver<LiveEvent>,
    io_task: JoinHandle<()>,
}

impl LiveSession {
    /// Connect to the Live API and send the session setup.
    pub async fn connect(config: &LiveConfig) -> LiveResult<Self> {
        config.validate()?;

        let url = config.ws_url();
        let (ws_stream, _response) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|e| LiveError::ConnectionFailed(e.to_string()))?;

        tracing::info!("Connected to Gemini Live API");

        let (mut ws_sink, ws_stream) = ws_stream.split();

        // Setup must be the first frame on the socket.
        let setup = ClientMessage::Setup(build_setup(config));
        let json = serde_json::to_string(&setup)
            .map_err(|e| LiveError::SerializationError(e.to_string()))?;
        ws_sink
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| LiveError::WebSocketError(e.to_string()))?;

        let (out_tx, mut out_rx) = mpsc::channel::<ClientMessage>(CHANNEL_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel::<LiveEvent>(CHANNEL_CAPACITY);

        // I/O task: multiplex queued client messages with incoming frames.
        let io_task = tokio::spawn(async move {
            let mut ws_sink = ws_sink;
            let mut ws_stream = ws_stream;

            loop {
                tokio::select! {
                    Some(msg) = out_rx.recv() => {
                        let json = match serde_json::to_string(&msg) {
                            Ok(j) => j,
                            Err(e) => {
                                tracing::error!("Failed to serialize Live message: {}", e);
                                continue;
                            }
                        };

                        if let Err(e) = ws_sink.send(Message::Text(json.into())).await {
                            tracing::error!("Failed to send Live message: {}", e);
                            break;
                        }
                    }

                    Some(frame) = ws_stream.next() => {
                        match frame {
                            // The Live API delivers JSON in both text and binary frames.
                            Ok(Message::Text(text)) => {
                                dispatch_frame(text.as_bytes(), &event_tx).await;
                            }
                            Ok(Message::Binary(data)) => {
                                dispatch_frame(&data, &event_tx).await;
                            }
                            Ok(Message::Ping(data)) => {
                                if let Err(e) = ws_sink.send(Message::Pong(data)).await {
                                    tracing::error!("Failed to send pong: {}", e);
                                }
                            }
                            Ok(Message::Close(_)) => {
                                tracing::info!("Live socket closed by server");
                                break;
                            }
                            Err(e) => {
                                tracing::error!("Live socket error: {}", e);
                                break;
                            }
                            _ => {}
                        }
                    }

                    else => break,
                }
            }

            tracing::info!("Live session I/O task ended");
        });

        Ok(Self {
            outgoing: out_tx,
            events: event_rx,
            io_task,
        })
    }

    /// Get a handle for sending audio into the session.
    pub fn handle(&self) -> LiveSessionHandle {
        LiveSessionHandle {
            outgoing: self.outgoing.clone(),
        }
    }

    /// Receive the next event from the session.
    ///
    /// Returns `None` when the upstream stream has stopped yielding
    /// events. Callers treat this as transient and resume listening; it
    /// only becomes permanent once the connection itself is torn down.
    pub async fn recv(&mut self) -> Option<LiveEvent> {
        self.events.recv().await
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        self.io_task.abort();
    }
}

/// Build the setup payload: audio-only responses, the configured voice,
/// transcription in both directions, and the persona instruction.
fn build_setup(config: &LiveConfig) -> Setup {
    Setup {
        model: config.model.clone(),
        generation_config: GenerationConfig {
            response_modalities: vec!["AUDIO".to_string()],
            speech_config: Some(SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: config.voice.as_str().to_string(),
                    },
                },
            }),
        },
        system_instruction: Some(Content::from_text(config.system_instruction.clone())),
        input_audio_transcription: Some(AudioTranscriptionConfig::default()),
        output_audio_transcription: Some(AudioTranscriptionConfig::default()),
    }
}

/// Parse one server frame and emit its events in wire order.
async fn dispatch_frame(raw: &[u8], events: &mpsc::Sender<LiveEvent>) {
    let msg: ServerMessage = match serde_json::from_slice(raw) {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!("Failed to parse Live frame: {}", e);
            return;
        }
    };

    if msg.setup_complete.is_some() {
        tracing::info!("Live session setup complete");
    }

    let mut turn_complete = false;

    if let Some(content) = msg.server_content {
        turn_complete = content.turn_complete;

        if let Some(turn) = content.model_turn {
            for part in turn.parts {
                if let Some(blob) = part.inline_data {
                    match BASE64_STANDARD.decode(&blob.data) {
                        Ok(audio) => {
                            if emit(events, LiveEvent::Audio(Bytes::from(audio))).await {
                                return;
                            }
                        }
                        Err(e) => {
                            tracing::error!("Failed to decode model audio: {}", e);
                        }
                    }
                }
                if let Some(text) = part.text {
                    tracing::trace!("Model text part: {}", text);
                }
            }
        }

        if let Some(transcription) = content.output_transcription
            && let Some(text) = transcription.text
            && emit(events, LiveEvent::OutputTranscription(text)).await
        {
            return;
        }

        if let Some(transcription) = content.input_transcription {
            let text = transcription.text.unwrap_or_default();
            if emit(events, LiveEvent::InputTranscription(text)).await {
                return;
            }
        }
    }

    if let Some(tool_call) = msg.tool_call
        && emit(events, LiveEvent::ToolCall(tool_call)).await
    {
        return;
    }

    // The turn boundary goes out last so everything the frame carried is
    // already accounted to the turn it closes.
    if turn_complete && emit(events, LiveEvent::TurnComplete).await {
        return;
    }

    if let Some(go_away) = msg.go_away {
        tracing::warn!("Live server going away: {:?}", go_away.time_left);
    }
}

/// Send one event; returns true when the receiver is gone.
async fn emit(events: &mpsc::Sender<LiveEvent>, event: LiveEvent) -> bool {
    events.send(event).await.is_err()
}

// =============================================================================
// Tests
// =============================================================================
