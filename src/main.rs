use async_trait::async_trait;
use http::StatusCode;
use serde::Serialize;
use tracing::info;

use tokio_api::api::{Context, Error, RouteParams};
use tokio_api::config::Config;
use tokio_api::server::{serve, Dispatcher, Handler};
use tokio_api::Request;

#[derive(Serialize)]
struct Status<'a> {
    status: &'a str,
    version: &'a str,
    request_id: &'a str,
}

/// Demo handler: `/status` reports liveness, `/echo/{name}` echoes a route
/// parameter, everything else is a 404 envelope.
struct ApiHandler;

#[async_trait]
impl Handler<()> for ApiHandler {
    async fn handle(&self, ctx: &mut Context<()>) -> Result<(), Error> {
        match ctx.request().path() {
            "/status" => {
                let id = ctx.request_id().to_string();
                let payload = Status {
                    status: "ok",
                    version: tokio_api::VERSION,
                    request_id: &id,
                };
                ctx.respond(&payload, StatusCode::OK)
            }
            path if path.starts_with("/echo/") => match ctx.param("name") {
                Some(name) => {
                    let body = serde_json::json!({ "name": name });
                    ctx.respond(&body, StatusCode::OK)
                }
                None => ctx.respond_error("not found", StatusCode::NOT_FOUND),
            },
            _ => ctx.respond_error("not found", StatusCode::NOT_FOUND),
        }
    }
}

fn extract_params(req: &Request) -> RouteParams {
    let mut params = RouteParams::new();
    if let Some(name) = req.path().strip_prefix("/echo/") {
        if !name.is_empty() && !name.contains('/') {
            params.insert("name".to_string(), name.to_string());
        }
    }
    params
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;
    tokio_api::logging::init(&config.logging);

    info!("Starting tokio_api {}", tokio_api::VERSION);
    config.log_summary();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(config))
}

async fn async_main(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let dispatcher = Dispatcher::builder(|| (), ApiHandler)
        .auth(config.auth.authenticator())
        .params(extract_params)
        .build();

    serve(config.server.listen_addr, dispatcher).await
}
