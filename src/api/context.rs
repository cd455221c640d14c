//! Per-request context: the one value handlers receive and respond through.

use std::collections::HashMap;
use std::sync::Arc;

use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderValue, StatusCode};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{AuthError, Authenticator};

use super::envelope::{ErrorEnvelope, Invalid};
use super::error::{Error, Result};
use super::log::{LogSink, TracingLog};
use super::request::Request;
use super::sink::BufferedSink;

/// Route parameters extracted by the router, keyed by parameter name.
pub type RouteParams = HashMap<String, String>;

static APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// Data associated with a single request.
///
/// One context is created per inbound request by the dispatcher and dropped
/// when the handler returns. `D` is the opaque data-session type: the context
/// only carries it for the handler, it never creates or closes it.
///
/// A handler terminates the request by calling exactly one of [`respond`],
/// [`respond_invalid`], or [`respond_error`]; the sink rejects a second
/// status head.
///
/// [`respond`]: Context::respond
/// [`respond_invalid`]: Context::respond_invalid
/// [`respond_error`]: Context::respond_error
pub struct Context<D> {
    session: D,
    request: Request,
    params: RouteParams,
    request_id: String,
    log: Arc<dyn LogSink>,
    sink: BufferedSink,
}

impl<D> Context<D> {
    /// Create a context with a generated correlation ID and tracing-backed log.
    pub fn new(session: D, request: Request) -> Self {
        ContextBuilder::new(session, request).build()
    }

    /// Create a context builder for more control.
    #[inline]
    pub fn builder(session: D, request: Request) -> ContextBuilder<D> {
        ContextBuilder::new(session, request)
    }

    /// Borrow the data-store session handle.
    #[inline]
    pub fn session(&self) -> &D {
        &self.session
    }

    /// Mutably borrow the data-store session handle.
    #[inline]
    pub fn session_mut(&mut self) -> &mut D {
        &mut self.session
    }

    /// The inbound request.
    #[inline]
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// All route parameters.
    #[inline]
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Look up one route parameter.
    #[inline]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The correlation ID tying together all log lines for this request.
    #[inline]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Inspect the response sink (status, headers, body written so far).
    #[inline]
    pub fn sink(&self) -> &BufferedSink {
        &self.sink
    }

    /// Consume the context and take the buffered response out of it.
    #[inline]
    pub fn into_sink(self) -> BufferedSink {
        self.sink
    }

    /// Run the authentication strategy for this request.
    ///
    /// Logs entry/exit with the correlation ID and delegates to the injected
    /// strategy. Never writes to the response sink: on failure the caller is
    /// expected to emit `respond_error(.., 401)` and stop processing.
    pub fn authenticate(&self, auth: &dyn Authenticator<D>) -> std::result::Result<(), AuthError> {
        self.log
            .info(&format!("{} : api : authenticate : Started", self.request_id));

        let result = auth.verify(self);

        match &result {
            Ok(()) => self
                .log
                .info(&format!("{} : api : authenticate : Completed", self.request_id)),
            Err(e) => self.log.error(&format!(
                "{} : api : authenticate : Failed: {}",
                self.request_id, e
            )),
        }

        result
    }

    /// Send `payload` to the client as JSON with status `status`.
    ///
    /// For `204 No Content` only the status head is written: no body, no
    /// `Content-Type`/`Content-Length`, and any payload is ignored (passing
    /// one is a caller bug, the body stays empty regardless).
    ///
    /// Otherwise the payload is pretty-printed, a single trailing newline is
    /// appended, and `Content-Length` is set to the exact byte count. A
    /// serialization failure is a contract violation by the caller: nothing
    /// reaches the sink and [`Error::Encode`] comes back, which the
    /// dispatcher must treat as a 500-class abort.
    pub fn respond<T: Serialize + ?Sized>(&mut self, payload: &T, status: StatusCode) -> Result<()> {
        let code = status.as_u16();
        self.log.info(&format!(
            "{} : api : respond [{}] : Started",
            self.request_id, code
        ));

        if status == StatusCode::NO_CONTENT {
            self.sink.write_head(status)?;
            self.log.info(&format!(
                "{} : api : respond [{}] : Completed",
                self.request_id, code
            ));
            return Ok(());
        }

        let mut body = match serde_json::to_vec_pretty(payload) {
            Ok(body) => body,
            Err(source) => {
                self.log.error(&format!(
                    "{} : api : respond [{}] : Failed: {}",
                    self.request_id, code, source
                ));
                return Err(Error::Encode { status: code, source });
            }
        };
        body.push(b'\n');

        // Head first: if it was already written, bail before touching the
        // headers so the buffered first response stays intact.
        self.sink.write_head(status)?;
        self.sink.set_header(CONTENT_TYPE, APPLICATION_JSON.clone());
        self.sink.set_header(CONTENT_LENGTH, HeaderValue::from(body.len()));
        self.sink.write_body(&body)?;

        self.log.info(&format!(
            "{} : api : respond [{}] : Completed",
            self.request_id, code
        ));
        Ok(())
    }

    /// Send a `204 No Content` response.
    #[inline]
    pub fn respond_no_content(&mut self) -> Result<()> {
        self.respond(&(), StatusCode::NO_CONTENT)
    }

    /// Send a `400 Bad Request` describing field validation errors.
    pub fn respond_invalid(&mut self, fields: Vec<Invalid>) -> Result<()> {
        self.respond(&ErrorEnvelope::invalid(fields), StatusCode::BAD_REQUEST)
    }

    /// Send an error envelope with a caller-chosen status (typically 4xx/5xx).
    pub fn respond_error(&mut self, message: impl Into<String>, status: StatusCode) -> Result<()> {
        self.respond(&ErrorEnvelope::new(message), status)
    }
}

/// Builder for creating a [`Context`] with explicit parts.
pub struct ContextBuilder<D> {
    session: D,
    request: Request,
    params: RouteParams,
    request_id: Option<String>,
    log: Option<Arc<dyn LogSink>>,
}

impl<D> ContextBuilder<D> {
    /// Create a builder from the two mandatory parts.
    pub fn new(session: D, request: Request) -> Self {
        Self {
            session,
            request,
            params: RouteParams::new(),
            request_id: None,
            log: None,
        }
    }

    /// Supply route parameters extracted by the router.
    pub fn params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }

    /// Assign the correlation ID instead of generating one.
    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Inject the logging capability (defaults to [`TracingLog`]).
    pub fn log(mut self, log: Arc<dyn LogSink>) -> Self {
        self.log = Some(log);
        self
    }

    /// Build the context. Generates a v4 UUID correlation ID if none was
    /// assigned.
    pub fn build(self) -> Context<D> {
        Context {
            session: self.session,
            request: self.request,
            params: self.params,
            request_id: self
                .request_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            log: self.log.unwrap_or_else(|| Arc::new(TracingLog)),
            sink: BufferedSink::new(),
        }
    }
}
