//! Per-request execution context and JSON response envelope.
//!
//! This module is the heart of the API surface. The dispatcher builds one
//! [`Context`] per inbound request; the handler calls exactly one of the
//! respond methods to terminate it:
//!
//! - [`Context::respond`] - serialize a payload as JSON with correct headers
//! - [`Context::respond_invalid`] - 400 with a field-validation envelope
//! - [`Context::respond_error`] - error envelope with a caller-chosen status
//!
//! Error responses share a single wire shape, [`ErrorEnvelope`]:
//!
//! ```json
//! {"error": "field validation failure", "fields": [{"field_name": "name", "error": "required"}]}
//! ```
//!
//! The `fields` key is omitted entirely when there are no field errors.

mod context;
mod envelope;
mod error;
mod log;
mod request;
mod sink;

pub use context::{Context, ContextBuilder, RouteParams};
pub use envelope::{ErrorEnvelope, Invalid};
pub use error::{Error, Result};
pub use log::{CaptureLog, LogSink, TracingLog};
pub use request::Request;
pub use sink::BufferedSink;
