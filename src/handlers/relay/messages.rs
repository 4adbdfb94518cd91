//! Relay WebSocket message types.
//!
//! The client protocol mirrors the browser side of the original voice
//! companion: OpenAI-realtime-style dotted `type` discriminators over JSON
//! text frames. Audio travels base64-encoded in both directions.

use serde::{Deserialize, Serialize};

use crate::core::sentiment::Sentiment;

// =============================================================================
// Incoming Messages (Client -> Server)
// =============================================================================

/// Incoming WebSocket messages from the browser client.
///
/// Frames with an unrecognized `type` fail to parse and are ignored.
#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ClientFrame {
    /// Append one chunk of microphone audio
    #[serde(rename = "input_audio_buffer.append")]
    AudioAppend {
        /// Base64-encoded PCM 16-bit audio; missing or malformed payloads
        /// are dropped without a reply
        #[serde(default)]
        audio: Option<String>,
    },

    /// Client-side end-of-utterance marker; upstream VAD drives response
    /// generation, so this is informational only
    #[serde(rename = "input_audio_buffer.commit")]
    AudioCommit,

    /// Client wants to interrupt the in-progress response; interruption is
    /// handled upstream, so this is informational only
    #[serde(rename = "response.cancel")]
    ResponseCancel,
}

// =============================================================================
// Outgoing Messages (Server -> Client)
// =============================================================================

/// Outgoing WebSocket messages to the browser client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ServerFrame {
    /// Full transcript of the user's utterance, sent once per turn before
    /// the first audio of the response
    #[serde(rename = "conversation.item.input_audio_transcription.completed")]
    UserTranscript {
        /// Accumulated user transcript
        transcript: String,
    },

    /// Sentiment classification of the user transcript, sent immediately
    /// after it
    #[serde(rename = "sentiment.update")]
    SentimentUpdate {
        /// POSITIVE, NEGATIVE, or NEUTRAL
        sentiment: Sentiment,
    },

    /// Buffered model audio, flushed on the sample threshold or at turn end
    #[serde(rename = "response.audio.delta")]
    AudioDelta {
        /// Concatenated base64 fragments (PCM 16-bit, 24kHz)
        delta: String,
    },

    /// The user started speaking over an in-progress response
    #[serde(rename = "input_audio_buffer.speech_started")]
    SpeechStarted,

    /// Full transcript of the model's speech for the completed turn
    #[serde(rename = "response.audio_transcript.done")]
    TranscriptDone {
        /// Accumulated AI transcript
        transcript: String,
    },

    /// Turn boundary; always the last message of a turn
    #[serde(rename = "response.done")]
    ResponseDone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_append_deserialization() {
        let json = r#"{"type": "input_audio_buffer.append", "audio": "AAECAw=="}"#;
        let frame: ClientFrame = serde_json::from_str(json).expect("Should deserialize");
        match frame {
            ClientFrame::AudioAppend { audio } => {
                assert_eq!(audio.as_deref(), Some("AAECAw=="));
            }
            _ => panic!("Expected AudioAppend variant"),
        }
    }

    #[test]
    fn test_audio_append_without_payload() {
        let json = r#"{"type": "input_audio_buffer.append"}"#;
        let frame: ClientFrame = serde_json::from_str(json).expect("Should deserialize");
        match frame {
            ClientFrame::AudioAppend { audio } => assert!(audio.is_none()),
            _ => panic!("Expected AudioAppend variant"),
        }
    }

    #[test]
    fn test_control_frames_deserialize() {
        let commit: ClientFrame =
            serde_json::from_str(r#"{"type": "input_audio_buffer.commit"}"#).unwrap();
        assert!(matches!(commit, ClientFrame::AudioCommit));

        let cancel: ClientFrame = serde_json::from_str(r#"{"type": "response.cancel"}"#).unwrap();
        assert!(matches!(cancel, ClientFrame::ResponseCancel));
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let result = serde_json::from_str::<ClientFrame>(r#"{"type": "session.update"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_user_transcript_serialization() {
        let msg = ServerFrame::UserTranscript {
            transcript: "I don't feel good".to_string(),
        };
        let json = serde_json::to_string(&msg).expect("Should serialize");
        assert!(json.contains(
            r#""type":"conversation.item.input_audio_transcription.completed""#
        ));
        assert!(json.contains(r#""transcript":"I don't feel good""#));
    }

    #[test]
    fn test_sentiment_update_serialization() {
        let msg = ServerFrame::SentimentUpdate {
            sentiment: Sentiment::Negative,
        };
        let json = serde_json::to_string(&msg).expect("Should serialize");
        assert!(json.contains(r#""type":"sentiment.update""#));
        assert!(json.contains(r#""sentiment":"NEGATIVE""#));
    }

    #[test]
    fn test_unit_frames_serialize_with_type_only() {
        let json = serde_json::to_string(&ServerFrame::ResponseDone).unwrap();
        assert_eq!(json, r#"{"type":"response.done"}"#);

        let json = serde_json::to_string(&ServerFrame::SpeechStarted).unwrap();
        assert_eq!(json, r#"{"type":"input_audio_buffer.speech_started"}"#);
    }
}
