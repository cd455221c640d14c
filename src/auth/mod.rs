//! Pluggable per-request authentication strategies.
//!
//! The dispatcher runs exactly one strategy before business logic via
//! [`Context::authenticate`]. Strategies only inspect the context; they never
//! write to the response sink. On failure the dispatcher maps the error to a
//! `401 Unauthorized` envelope.
//!
//! [`Context::authenticate`]: crate::api::Context::authenticate

use std::fmt;

use crate::api::Context;

/// Authentication strategy, selected by configuration and shared across
/// requests.
pub trait Authenticator<D>: Send + Sync {
    /// Strategy name for logs and the config summary.
    fn name(&self) -> &'static str;

    /// Verify the request carried by `ctx`.
    fn verify(&self, ctx: &Context<D>) -> Result<(), AuthError>;
}

/// Authentication failure. Maps to `401 Unauthorized` at the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    message: String,
}

impl AuthError {
    /// Create an authentication error with a client-safe message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The client-safe message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AuthError {}

/// Strategy that accepts every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAuth;

impl<D> Authenticator<D> for NoAuth {
    fn name(&self) -> &'static str {
        "none"
    }

    fn verify(&self, _ctx: &Context<D>) -> Result<(), AuthError> {
        Ok(())
    }
}

/// Strategy that requires a matching `Authorization: Bearer` token.
#[derive(Clone, Debug)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    /// Create a bearer-token strategy with the shared token to match.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl<D> Authenticator<D> for BearerToken {
    fn name(&self) -> &'static str {
        "token"
    }

    fn verify(&self, ctx: &Context<D>) -> Result<(), AuthError> {
        match ctx.request().bearer_token() {
            Some(token) if token == self.token => Ok(()),
            Some(_) => Err(AuthError::new("invalid bearer token")),
            None => Err(AuthError::new("missing bearer token")),
        }
    }
}

/// Strategy that requires a non-empty session cookie.
///
/// Presence-only: validating the session against a store stays with the
/// collaborator that owns the store.
#[derive(Clone, Debug)]
pub struct SessionCookie {
    cookie_name: String,
}

impl SessionCookie {
    /// Create a session-cookie strategy for the given cookie name.
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }
}

impl<D> Authenticator<D> for SessionCookie {
    fn name(&self) -> &'static str {
        "session"
    }

    fn verify(&self, ctx: &Context<D>) -> Result<(), AuthError> {
        match ctx.request().cookie(&self.cookie_name) {
            Some(_) => Ok(()),
            None => Err(AuthError::new("missing session cookie")),
        }
    }
}
