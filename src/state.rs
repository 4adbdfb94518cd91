//! Shared application state.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::live::LiveConfig;

/// Application state shared with all handlers.
#[derive(Debug)]
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create shared state from the loaded configuration.
    pub fn new(config: ServerConfig) -> Arc<Self> {
        Arc::new(Self { config })
    }

    /// Build the Live session configuration for a new relay connection.
    pub fn live_config(&self) -> LiveConfig {
        let defaults = LiveConfig::default();
        LiveConfig {
            api_key: self.config.google_api_key.clone().unwrap_or_default(),
            model: self.config.live_model.clone(),
            voice: self.config.live_voice,
            system_instruction: self
                .config
                .system_instruction
                .clone()
                .unwrap_or(defaults.system_instruction),
            endpoint: self.config.live_endpoint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::live::{DEFAULT_SYSTEM_INSTRUCTION, LiveVoice};

    #[test]
    fn test_live_config_from_server_config() {
        let state = AppState::new(ServerConfig {
            google_api_key: Some("test-key".to_string()),
            live_voice: LiveVoice::Kore,
            live_endpoint: Some("ws://127.0.0.1:9000".to_string()),
            ..Default::default()
        });

        let live = state.live_config();
        assert_eq!(live.api_key, "test-key");
        assert_eq!(live.voice, LiveVoice::Kore);
        assert_eq!(live.endpoint.as_deref(), Some("ws://127.0.0.1:9000"));
        assert_eq!(live.system_instruction, DEFAULT_SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_persona_override() {
        let state = AppState::new(ServerConfig {
            system_instruction: Some("You are a test assistant.".to_string()),
            ..Default::default()
        });
        assert_eq!(state.live_config().system_instruction, "You are a test assistant.");
    }
}
