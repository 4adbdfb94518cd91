//! Relay WebSocket handlers
//!
//! This module provides the WebSocket handler relaying bidirectional
//! audio between a browser client and a Gemini Live session, with
//! sentiment analysis of transcribed user speech.
//!
//! # Protocol
//!
//! ## Client → Server
//!
//! - **input_audio_buffer.append**: base64 PCM 16-bit microphone audio
//! - **input_audio_buffer.commit**: end-of-utterance marker (informational)
//! - **response.cancel**: interruption request (informational)
//!
//! ## Server → Client
//!
//! - **conversation.item.input_audio_transcription.completed**: full user
//!   transcript, once per turn before the first response audio
//! - **sentiment.update**: POSITIVE/NEGATIVE/NEUTRAL for that transcript
//! - **response.audio.delta**: buffered response audio (base64 PCM 16-bit)
//! - **input_audio_buffer.speech_started**: user interrupted the response
//! - **response.audio_transcript.done**: full AI transcript at turn end
//! - **response.done**: turn boundary, always last

mod handler;
pub mod messages;
mod turn;

pub use handler::relay_handler;
