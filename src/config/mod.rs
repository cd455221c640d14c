//! Configuration loading from environment variables.
//!
//! # Example
//!
//! ```rust,ignore
//! use tokio_api::config::Config;
//!
//! let config = Config::from_env()?;
//! println!("Listen address: {}", config.server.listen_addr);
//! ```

mod auth;
mod error;
mod logging;
mod parse;
mod server;

pub use auth::{AuthConfig, AuthMode};
pub use error::ConfigError;
pub use logging::LoggingConfig;
pub use server::ServerConfig;

/// Complete application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Authentication configuration.
    pub auth: AuthConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Print configuration summary to log.
    pub fn log_summary(&self) {
        use tracing::info;

        info!("Configuration loaded:");
        info!("  Listen: {}", self.server.listen_addr);
        info!("  Auth mode: {}", self.auth.mode);
        info!("  Log level: {}", self.logging.level);
        info!(
            "  Log format: {}",
            if self.logging.json { "json" } else { "pretty" }
        );
    }
}

/// Tests that mutate process environment variables must hold this lock so
/// they do not race each other across modules.
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|e| e.into_inner())
}
