//! Per-turn relay state.
//!
//! [`TurnState`] owns everything that accumulates between turn boundaries:
//! the output audio buffer, both transcript accumulators, and the per-turn
//! flags. Each upstream event maps to a transition that returns the frames
//! to emit, in order, so the event→message contract is testable without a
//! socket. [`TurnState::on_turn_complete`] is the single point where all
//! per-turn state resets.

use base64::prelude::*;
use tracing::{debug, info};

use crate::core::sentiment;

use super::messages::ServerFrame;

/// Flush threshold in samples, ~250ms of output audio at 24kHz.
pub const BUFFER_THRESHOLD_SAMPLES: usize = 6000;

/// Bytes per PCM 16-bit sample.
const BYTES_PER_SAMPLE: usize = 2;

/// Per-connection turn state, owned by the upstream-to-client forwarder.
#[derive(Debug, Default)]
pub struct TurnState {
    /// Buffered model audio as base64 fragments, concatenated on flush
    audio_buffer: Vec<String>,
    /// Samples currently buffered
    buffered_samples: usize,
    /// Accumulated transcript of the model's speech
    ai_transcript: String,
    /// Accumulated transcript of the user's speech
    user_transcript: String,
    /// Whether the user transcript has been sent this turn
    user_transcript_sent: bool,
    /// Whether the interruption notice has been sent this turn
    speech_started_sent: bool,
    /// Completed turns on this connection
    turns_completed: u64,
}

impl TurnState {
    /// Create the initial (empty) state for a new connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed turn count.
    pub fn turns_completed(&self) -> u64 {
        self.turns_completed
    }

    /// Model audio arrived.
    ///
    /// The first audio of a response also releases the accumulated user
    /// transcript and its sentiment, in that order, before any audio.
    pub fn on_audio(&mut self, audio: &[u8]) -> Vec<ServerFrame> {
        let mut frames = Vec::new();

        if !self.user_transcript.is_empty() && !self.user_transcript_sent {
            info!("User transcript: {}", self.user_transcript);
            frames.push(ServerFrame::UserTranscript {
                transcript: self.user_transcript.clone(),
            });

            let sentiment = sentiment::classify(&self.user_transcript);
            info!("Sentiment analyzed: {}", sentiment);
            frames.push(ServerFrame::SentimentUpdate { sentiment });

            self.user_transcript_sent = true;
        }

        self.audio_buffer.push(BASE64_STANDARD.encode(audio));
        self.buffered_samples += audio.len() / BYTES_PER_SAMPLE;

        if self.buffered_samples >= BUFFER_THRESHOLD_SAMPLES {
            debug!("Flushing audio buffer: {} samples", self.buffered_samples);
            if let Some(delta) = self.flush_audio() {
                frames.push(delta);
            }
        }

        frames
    }

    /// Incremental transcript of the model's speech arrived.
    pub fn on_output_transcription(&mut self, text: &str) {
        self.ai_transcript.push_str(text);
    }

    /// Incremental transcript of the user's speech arrived.
    ///
    /// User speech after the response already started means the user is
    /// interrupting; the notice is sent at most once per turn.
    pub fn on_input_transcription(&mut self, text: &str) -> Option<ServerFrame> {
        let notice = if self.user_transcript_sent && !self.speech_started_sent {
            self.speech_started_sent = true;
            info!("User interrupting response");
            Some(ServerFrame::SpeechStarted)
        } else {
            None
        };

        if !text.is_empty() {
            self.user_transcript.push_str(text);
        }

        notice
    }

    /// Turn boundary: flush remaining audio, release the AI transcript,
    /// reset all per-turn state, and close the turn with `response.done`.
    pub fn on_turn_complete(&mut self) -> Vec<ServerFrame> {
        self.turns_completed += 1;

        let mut frames = Vec::new();

        if let Some(delta) = self.flush_audio() {
            frames.push(delta);
        }

        if !self.ai_transcript.is_empty() {
            info!("AI transcript: {}", self.ai_transcript);
            frames.push(ServerFrame::TranscriptDone {
                transcript: std::mem::take(&mut self.ai_transcript),
            });
        }

        self.user_transcript.clear();
        self.user_transcript_sent = false;
        self.speech_started_sent = false;

        frames.push(ServerFrame::ResponseDone);
        frames
    }

    /// Drain the audio buffer into one delta frame; `None` when empty.
    fn flush_audio(&mut self) -> Option<ServerFrame> {
        if self.audio_buffer.is_empty() {
            return None;
        }
        let delta = self.audio_buffer.concat();
        self.audio_buffer.clear();
        self.buffered_samples = 0;
        Some(ServerFrame::AudioDelta { delta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sentiment::Sentiment;

    /// 1000 samples of silence.
    fn chunk() -> Vec<u8> {
        vec![0u8; 1000 * BYTES_PER_SAMPLE]
    }

    #[test]
    fn test_audio_buffers_until_threshold() {
        let mut turn = TurnState::new();

        // 5 chunks of 1000 samples stay buffered.
        for _ in 0..5 {
            assert!(turn.on_audio(&chunk()).is_empty());
        }

        // The sixth crosses 6000 samples: exactly one flush with all six
        // chunks concatenated.
        let frames = turn.on_audio(&chunk());
        assert_eq!(frames.len(), 1);
        match &frames[0] {
            ServerFrame::AudioDelta { delta } => {
                assert_eq!(delta, &BASE64_STANDARD.encode(chunk()).repeat(6));
            }
            other => panic!("Expected AudioDelta, got {:?}", other),
        }

        // The counter reset: the next chunk buffers again.
        assert!(turn.on_audio(&chunk()).is_empty());
    }

    #[test]
    fn test_first_audio_releases_user_transcript_then_sentiment() {
        let mut turn = TurnState::new();
        assert!(turn.on_input_transcription("I don't ").is_none());
        assert!(turn.on_input_transcription("feel good").is_none());

        let frames = turn.on_audio(&chunk());
        assert_eq!(
            frames[0],
            ServerFrame::UserTranscript {
                transcript: "I don't feel good".to_string()
            }
        );
        assert_eq!(
            frames[1],
            ServerFrame::SentimentUpdate {
                sentiment: Sentiment::Negative
            }
        );
        assert_eq!(frames.len(), 2);

        // Only once per turn.
        assert!(turn.on_audio(&chunk()).is_empty());
    }

    #[test]
    fn test_speech_started_only_after_transcript_sent() {
        let mut turn = TurnState::new();

        // Before the response starts this is ordinary speech, not an
        // interruption.
        assert!(turn.on_input_transcription("hello").is_none());

        // Response starts; user transcript goes out.
        let frames = turn.on_audio(&chunk());
        assert_eq!(frames.len(), 2);

        // Now further user speech is an interruption, reported once.
        assert_eq!(
            turn.on_input_transcription("wait"),
            Some(ServerFrame::SpeechStarted)
        );
        assert!(turn.on_input_transcription("actually").is_none());
    }

    #[test]
    fn test_turn_complete_flushes_and_resets() {
        let mut turn = TurnState::new();
        turn.on_input_transcription("how are you");
        turn.on_audio(&chunk());
        turn.on_output_transcription("I'm doing ");
        turn.on_output_transcription("well, thanks.");

        let frames = turn.on_turn_complete();
        assert_eq!(frames.len(), 3);
        assert!(matches!(frames[0], ServerFrame::AudioDelta { .. }));
        assert_eq!(
            frames[1],
            ServerFrame::TranscriptDone {
                transcript: "I'm doing well, thanks.".to_string()
            }
        );
        assert_eq!(frames[2], ServerFrame::ResponseDone);
        assert_eq!(turn.turns_completed(), 1);

        // Everything reset: the next turn behaves like the first.
        assert!(turn.on_input_transcription("next question").is_none());
        let frames = turn.on_audio(&chunk());
        assert_eq!(
            frames[0],
            ServerFrame::UserTranscript {
                transcript: "next question".to_string()
            }
        );
    }

    #[test]
    fn test_empty_turn_complete_emits_only_response_done() {
        let mut turn = TurnState::new();
        let frames = turn.on_turn_complete();
        assert_eq!(frames, vec![ServerFrame::ResponseDone]);
        assert_eq!(turn.turns_completed(), 1);
    }

    #[test]
    fn test_response_done_is_always_last() {
        let mut turn = TurnState::new();
        turn.on_audio(&chunk());
        turn.on_output_transcription("hi");

        let frames = turn.on_turn_complete();
        assert_eq!(frames.last(), Some(&ServerFrame::ResponseDone));
    }

    #[test]
    fn test_empty_input_transcription_event_counts_for_interruption() {
        let mut turn = TurnState::new();
        turn.on_input_transcription("question");
        turn.on_audio(&chunk());

        // An input-transcription event with no text still signals speech.
        assert_eq!(
            turn.on_input_transcription(""),
            Some(ServerFrame::SpeechStarted)
        );
    }

    #[test]
    fn test_odd_byte_chunk_floors_sample_count() {
        let mut turn = TurnState::new();
        // 11999 bytes = 5999 full samples: below the threshold.
        assert!(turn.on_audio(&vec![0u8; 11999]).is_empty());
        // One more sample crosses it.
        let frames = turn.on_audio(&vec![0u8; 2]);
        assert_eq!(frames.len(), 1);
    }
}
