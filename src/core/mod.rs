pub mod live;
pub mod sentiment;

// Re-export commonly used types for convenience
pub use live::{
    LiveConfig, LiveError, LiveEvent, LiveResult, LiveSession, LiveSessionHandle, LiveVoice,
};
pub use sentiment::{Sentiment, classify};
