//! Authentication configuration.

use std::fmt;
use std::sync::Arc;

use crate::auth::{Authenticator, BearerToken, NoAuth, SessionCookie};

use super::parse::{env_opt, env_or};
use super::ConfigError;

/// Which authentication strategy the dispatcher runs per request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    /// Accept every request (the default).
    None,
    /// Require a matching `Authorization: Bearer` token.
    Token,
    /// Require a non-empty session cookie.
    Session,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuthMode::None => "none",
            AuthMode::Token => "token",
            AuthMode::Session => "session",
        };
        f.write_str(s)
    }
}

/// Authentication configuration.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Strategy selector (`AUTH_MODE`: `none` | `token` | `session`).
    pub mode: AuthMode,
    /// Shared bearer token (`AUTH_TOKEN`, required when mode is `token`).
    pub token: Option<String>,
    /// Session cookie name (`AUTH_COOKIE`, default `session_id`).
    pub cookie: String,
}

impl AuthConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mode = match env_or("AUTH_MODE", "none").as_str() {
            "none" => AuthMode::None,
            "token" => AuthMode::Token,
            "session" => AuthMode::Session,
            other => {
                return Err(ConfigError::Invalid {
                    key: "AUTH_MODE".into(),
                    message: format!("unknown mode '{}'", other),
                })
            }
        };

        let token = env_opt("AUTH_TOKEN");
        if mode == AuthMode::Token && token.is_none() {
            return Err(ConfigError::Missing {
                key: "AUTH_TOKEN".into(),
            });
        }

        Ok(Self {
            mode,
            token,
            cookie: env_or("AUTH_COOKIE", "session_id"),
        })
    }

    /// Build the configured strategy.
    pub fn authenticator<D>(&self) -> Arc<dyn Authenticator<D>> {
        match self.mode {
            AuthMode::None => Arc::new(NoAuth),
            AuthMode::Token => {
                // from_env guarantees the token is present in token mode.
                let token = self.token.clone().unwrap_or_default();
                Arc::new(BearerToken::new(token))
            }
            AuthMode::Session => Arc::new(SessionCookie::new(self.cookie.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        let _env = crate::config::env_lock();
        std::env::remove_var("AUTH_MODE");
        std::env::remove_var("AUTH_TOKEN");
        std::env::remove_var("AUTH_COOKIE");

        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.mode, AuthMode::None);
        assert_eq!(config.cookie, "session_id");
        assert_eq!(config.authenticator::<()>().name(), "none");
    }

    #[test]
    fn test_token_mode_requires_token() {
        let _env = crate::config::env_lock();
        std::env::set_var("AUTH_MODE", "token");
        std::env::remove_var("AUTH_TOKEN");

        let err = AuthConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));

        std::env::set_var("AUTH_TOKEN", "s3cret");
        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.mode, AuthMode::Token);
        assert_eq!(config.authenticator::<()>().name(), "token");

        std::env::remove_var("AUTH_MODE");
        std::env::remove_var("AUTH_TOKEN");
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let _env = crate::config::env_lock();
        std::env::set_var("AUTH_MODE", "ldap");
        let err = AuthConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        std::env::remove_var("AUTH_MODE");
    }

    #[test]
    fn test_session_mode() {
        let _env = crate::config::env_lock();
        std::env::set_var("AUTH_MODE", "session");
        std::env::set_var("AUTH_COOKIE", "sid");

        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.mode, AuthMode::Session);
        assert_eq!(config.cookie, "sid");
        assert_eq!(config.authenticator::<()>().name(), "session");

        std::env::remove_var("AUTH_MODE");
        std::env::remove_var("AUTH_COOKIE");
    }
}
