//! Logging configuration.

use super::parse::{env_bool, env_or};
use super::ConfigError;

/// Logging output configuration.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Log level filter (`LOG_LEVEL`, default `info`).
    pub level: String,
    /// Emit the structured JSON format instead of the pretty one
    /// (`LOG_JSON`, default true).
    pub json: bool,
}

impl LoggingConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let level = env_or("LOG_LEVEL", "info");
        match level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::Invalid {
                    key: "LOG_LEVEL".into(),
                    message: format!("unknown level '{}'", other),
                })
            }
        }

        Ok(Self {
            level,
            json: env_bool("LOG_JSON", true),
        })
    }

    /// EnvFilter directive for the subscriber.
    pub fn filter(&self) -> String {
        format!("tokio_api={}", self.level)
    }
}
