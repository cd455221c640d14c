//! Server configuration.

use std::net::SocketAddr;

use super::parse::env_parse;
use super::ConfigError;

/// Listener configuration for the dispatcher.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address to listen on (`LISTEN_ADDR`, default `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,
}

impl ServerConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let default: SocketAddr = "0.0.0.0:8080".parse().map_err(|_| ConfigError::Invalid {
            key: "LISTEN_ADDR".into(),
            message: "bad built-in default".into(),
        })?;

        Ok(Self {
            listen_addr: env_parse("LISTEN_ADDR", default)?,
        })
    }
}
