//! tokio_api - Request context and JSON response envelope for async HTTP APIs.
//!
//! This crate provides the per-request plumbing for a JSON API server built
//! on Tokio and Hyper: a request [`api::Context`] carrying the data-store
//! session, route parameters, and a correlation ID, plus a uniform response
//! contract for success and error bodies.
//!
//! # Features
//!
//! - **Uniform envelope**: every error body is `{"error": ..., "fields": [...]}`
//!   with `fields` omitted when empty
//! - **Pluggable auth**: no-op, bearer-token, and session-cookie strategies
//!   selected by configuration
//! - **Injected logging**: contexts write correlation-tagged lines through a
//!   [`api::LogSink`], capturable in tests
//! - **Fatal-by-contract encoding**: a payload that fails to serialize aborts
//!   the request with a bare 500, never a partial body
//!
//! # Example
//!
//! ```rust,ignore
//! use tokio_api::config::Config;
//! use tokio_api::server::{serve, Dispatcher};
//!
//! let config = Config::from_env()?;
//! let dispatcher = Dispatcher::builder(|| (), MyHandler)
//!     .auth(config.auth.authenticator())
//!     .build();
//! serve(config.server.listen_addr, dispatcher).await?;
//! ```

/// Package version from Cargo.toml
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit hash (8 chars), empty outside a checkout
pub const BUILD_VERSION: &str = env!("BUILD_VERSION");

/// Full version string: "0.1.0 (abc12345)"
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_VERSION"), ")");

pub mod api;
pub mod auth;
pub mod config;
pub mod logging;
pub mod server;

// Re-exports for convenience
pub use api::{Context, ErrorEnvelope, Invalid, Request};
pub use config::Config;
pub use server::{serve, Dispatcher, Handler};
