//! Dispatcher: builds one request context per inbound request and runs it.
//!
//! The dispatcher owns the collaborators the context consumes: a session
//! factory for the data-store handle, the configured authentication strategy,
//! a route-parameter extractor supplied by the surrounding router, and the
//! single handler. Routing itself is not implemented here; whatever routing
//! exists lives in the extractor and handler the caller provides.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming as IncomingBody;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::api::{Context, Error, LogSink, Request, RouteParams, TracingLog};
use crate::auth::{Authenticator, NoAuth};

/// Request handler. Must call exactly one respond method on the context.
#[async_trait]
pub trait Handler<D>: Send + Sync {
    /// Handle one request to completion.
    async fn handle(&self, ctx: &mut Context<D>) -> Result<(), Error>;
}

/// Produces one data-store session handle per request.
///
/// The dispatcher owns the handle's lifetime for the span of the request;
/// acquisition and teardown details stay with the factory.
pub trait SessionFactory<D>: Send + Sync {
    /// Acquire a session for one request.
    fn session(&self) -> D;
}

impl<D, F> SessionFactory<D> for F
where
    F: Fn() -> D + Send + Sync,
{
    fn session(&self) -> D {
        self()
    }
}

/// Route-parameter extractor hook, supplied by the external router.
pub type ParamsFn = dyn Fn(&Request) -> RouteParams + Send + Sync;

/// Per-request dispatcher.
pub struct Dispatcher<D> {
    sessions: Arc<dyn SessionFactory<D>>,
    auth: Arc<dyn Authenticator<D>>,
    handler: Arc<dyn Handler<D>>,
    params: Arc<ParamsFn>,
    log: Arc<dyn LogSink>,
}

impl<D> Clone for Dispatcher<D> {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            auth: self.auth.clone(),
            handler: self.handler.clone(),
            params: self.params.clone(),
            log: self.log.clone(),
        }
    }
}

impl<D> Dispatcher<D> {
    /// Start building a dispatcher from its two mandatory collaborators.
    pub fn builder(
        sessions: impl SessionFactory<D> + 'static,
        handler: impl Handler<D> + 'static,
    ) -> DispatcherBuilder<D> {
        DispatcherBuilder {
            sessions: Arc::new(sessions),
            handler: Arc::new(handler),
            auth: None,
            params: None,
            log: None,
        }
    }

    /// Run one request to completion and produce the wire response.
    ///
    /// Order per request: construct the context (honoring an inbound
    /// `X-Request-Id`), authenticate, invoke the handler, flush the buffered
    /// sink. A fatal respond failure discards the sink and aborts with a
    /// bare 500 so no bytes of the failed serialization reach the wire.
    pub async fn dispatch(&self, request: Request) -> http::Response<Full<Bytes>> {
        let request_id = request
            .request_id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let params = (self.params.as_ref())(&request);

        let mut ctx = Context::builder(self.sessions.session(), request)
            .params(params)
            .request_id(request_id.clone())
            .log(self.log.clone())
            .build();

        let outcome = match ctx.authenticate(self.auth.as_ref()) {
            Ok(()) => self.handler.handle(&mut ctx).await,
            Err(denied) => ctx.respond_error(denied.message(), StatusCode::UNAUTHORIZED),
        };

        match outcome {
            Ok(()) => {}
            Err(err) if err.is_fatal() => {
                error!(
                    request_id = %request_id,
                    error = %err,
                    "aborting request: respond failed fatally"
                );
                return internal_abort();
            }
            Err(err) => {
                // Double-respond or transport error; whatever response was
                // buffered first still stands.
                error!(request_id = %request_id, error = %err, "respond failed");
            }
        }

        match ctx.into_sink().into_http() {
            Some(res) => res,
            None => {
                warn!(request_id = %request_id, "handler finished without responding");
                internal_abort()
            }
        }
    }
}

/// Builder for [`Dispatcher`].
pub struct DispatcherBuilder<D> {
    sessions: Arc<dyn SessionFactory<D>>,
    handler: Arc<dyn Handler<D>>,
    auth: Option<Arc<dyn Authenticator<D>>>,
    params: Option<Arc<ParamsFn>>,
    log: Option<Arc<dyn LogSink>>,
}

impl<D> DispatcherBuilder<D> {
    /// Set the authentication strategy (defaults to [`NoAuth`]).
    pub fn auth(mut self, auth: Arc<dyn Authenticator<D>>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set the route-parameter extractor (defaults to no parameters).
    pub fn params<F>(mut self, params: F) -> Self
    where
        F: Fn(&Request) -> RouteParams + Send + Sync + 'static,
    {
        self.params = Some(Arc::new(params));
        self
    }

    /// Set the log sink handed to every context (defaults to [`TracingLog`]).
    pub fn log(mut self, log: Arc<dyn LogSink>) -> Self {
        self.log = Some(log);
        self
    }

    /// Build the dispatcher.
    pub fn build(self) -> Dispatcher<D> {
        Dispatcher {
            sessions: self.sessions,
            handler: self.handler,
            auth: self.auth.unwrap_or_else(|| Arc::new(NoAuth)),
            params: self.params.unwrap_or_else(|| Arc::new(|_| RouteParams::new())),
            log: self.log.unwrap_or_else(|| Arc::new(TracingLog)),
        }
    }
}

/// Bare 500 with an empty body, for aborted requests.
fn internal_abort() -> http::Response<Full<Bytes>> {
    let mut res = http::Response::new(Full::new(Bytes::new()));
    *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    res
}

/// Accept loop: one task per connection, graceful exit on ctrl-c.
pub async fn serve<D: Send + 'static>(
    addr: SocketAddr,
    dispatcher: Dispatcher<D>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = accepted?;
                let _ = stream.set_nodelay(true);
                let dispatcher = dispatcher.clone();

                tokio::spawn(async move {
                    let service = service_fn(move |req: http::Request<IncomingBody>| {
                        let dispatcher = dispatcher.clone();
                        async move { Ok::<_, Infallible>(handle_connection_request(&dispatcher, req).await) }
                    });

                    let io = TokioIo::new(stream);
                    if let Err(e) = hyper::server::conn::http1::Builder::new()
                        .serve_connection(io, service)
                        .await
                    {
                        debug!(peer = %peer, error = %e, "connection closed with error");
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received, stopping accept loop");
                return Ok(());
            }
        }
    }
}

/// Collect the body and hand the request to the dispatcher.
async fn handle_connection_request<D>(
    dispatcher: &Dispatcher<D>,
    req: http::Request<IncomingBody>,
) -> http::Response<Full<Bytes>> {
    let (parts, body) = req.into_parts();

    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!(error = %e, "failed to read request body");
            let mut res = http::Response::new(Full::new(Bytes::new()));
            *res.status_mut() = StatusCode::BAD_REQUEST;
            return res;
        }
    };

    let request = Request::new(parts.method, parts.uri, parts.headers, body);
    dispatcher.dispatch(request).await
}
