//! Configuration module for the Ellen gateway
//!
//! This module handles server configuration from environment variables,
//! with `.env` support via `dotenvy` (loaded in `main` before the config
//! is read). Priority: process environment > `.env` values > defaults.
//!
//! # Example
//! ```rust,no_run
//! use ellen_gateway::config::ServerConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! config.validate()?;
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use crate::core::live::LiveVoice;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 2179;

/// Default allowed browser origin (the development frontend).
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:2177";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held an unusable value
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// Variable name
        key: String,
        /// What was wrong with it
        message: String,
    },
}

/// Server configuration
///
/// Contains all configuration needed to run the gateway:
/// - Server settings (host, port)
/// - The Gemini API key for Live sessions
/// - Security settings (CORS origins)
/// - Live session settings (model, voice, persona, endpoint override)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    /// Google API key for the Live API; relays fail without it, the HTTP
    /// surface still serves
    pub google_api_key: Option<String>,

    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: the development frontend origin
    pub cors_allowed_origins: Option<String>,

    /// Live model resource name
    pub live_model: String,

    /// Prebuilt voice for Live audio output
    pub live_voice: LiveVoice,

    /// Live endpoint override (ws:// or wss://); used by integration tests
    pub live_endpoint: Option<String>,

    /// Persona override; `None` uses the built-in companion persona
    pub system_instruction: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", DEFAULT_HOST);

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: e.to_string(),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            google_api_key: env_opt("GOOGLE_API_KEY"),
            cors_allowed_origins: Some(env_or("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ORIGIN)),
            live_model: env_or("LIVE_MODEL", crate::core::live::GEMINI_LIVE_MODEL),
            live_voice: LiveVoice::from_str_or_default(&env_or("LIVE_VOICE", "")),
            live_endpoint: env_opt("LIVE_API_URL"),
            system_instruction: env_opt("SYSTEM_INSTRUCTION"),
        })
    }

    /// The bind address, "host:port".
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "HOST".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: "must not be 0".to_string(),
            });
        }
        if let Some(ref endpoint) = self.live_endpoint {
            let parsed = url::Url::parse(endpoint).map_err(|e| ConfigError::InvalidValue {
                key: "LIVE_API_URL".to_string(),
                message: e.to_string(),
            })?;
            if parsed.scheme() != "ws" && parsed.scheme() != "wss" {
                return Err(ConfigError::InvalidValue {
                    key: "LIVE_API_URL".to_string(),
                    message: format!("must be a ws:// or wss:// URL, got '{}'", parsed.scheme()),
                });
            }
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            google_api_key: None,
            cors_allowed_origins: Some(DEFAULT_CORS_ORIGIN.to_string()),
            live_model: crate::core::live::GEMINI_LIVE_MODEL.to_string(),
            live_voice: LiveVoice::default(),
            live_endpoint: None,
            system_instruction: None,
        }
    }
}

/// Read an environment variable with a fallback.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an environment variable, treating empty values as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
