//! HTTP server: routing, body limits and graceful shutdown.
//!
//! | Method | Path       | Handler                                  |
//! |--------|------------|------------------------------------------|
//! | GET    | `/health`  | `200 OK`, plain text                     |
//! | GET    | `/trades`  | [`handlers::list_trades`]                |
//! | POST   | `/trades`  | [`handlers::submit_trade`]               |
//! | POST   | `/example` | [`handlers::echo`]                       |
//!
//! Any other path is `404`; a known path with the wrong method is `405`.
//! POST bodies must be `application/octet-stream` (`415` otherwise) and no
//! larger than [`ServerConfig::max_body_bytes`] (`413` otherwise).
//!
//! Successful GalacticBuf responses carry `application/octet-stream`; error
//! responses are a one-line `text/plain` description.
//!
//! Shutdown is triggered by clearing a shared `AtomicBool` (set by the
//! Ctrl+C handler in `main.rs`).  The flag is polled every 200 ms; once it
//! is cleared the listener stops accepting and in-flight requests finish.

use std::convert::Infallible;
use std::net::TcpListener;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use hyper::body::HttpBody;
use hyper::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::application::{handlers, HandlerError, TradeRepository};
use crate::domain::ServerConfig;

/// Content type of every GalacticBuf request and response body.
pub const OCTET_STREAM: &str = "application/octet-stream";

const SHUTDOWN_POLL: Duration = Duration::from_millis(200);

/// Shared state handed to every request.
struct AppState {
    config: ServerConfig,
    store: Arc<dyn TradeRepository>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Binds `config.bind_addr` and serves until `running` is set to `false`.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound (port in use, no
/// permission) or the server fails while running.
pub async fn run_server(
    config: ServerConfig,
    store: Arc<dyn TradeRepository>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .with_context(|| format!("failed to bind HTTP listener on {}", config.bind_addr))?;
    serve(listener, config, store, running).await
}

/// Serves HTTP on an already-bound listener until `running` is cleared.
///
/// Tests bind `127.0.0.1:0` themselves and pass the listener in, so they
/// know the port before the server starts.
pub async fn serve(
    listener: TcpListener,
    config: ServerConfig,
    store: Arc<dyn TradeRepository>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    listener
        .set_nonblocking(true)
        .context("failed to make listener non-blocking")?;
    let addr = listener.local_addr().context("listener has no local address")?;

    let state = Arc::new(AppState { config, store });
    let make_svc = make_service_fn(move |_conn| {
        let state = Arc::clone(&state);
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                let state = Arc::clone(&state);
                handle_request(req, state)
            }))
        }
    });

    let server = Server::from_tcp(listener)
        .with_context(|| format!("failed to start HTTP server on {addr}"))?
        .serve(make_svc);

    info!("GalacticBuf server listening on http://{addr}");
    info!("Endpoints: GET /health, GET /trades, POST /trades, POST /example");

    server
        .with_graceful_shutdown(wait_for_shutdown(running))
        .await
        .context("HTTP server error")?;

    info!("HTTP server on {addr} stopped");
    Ok(())
}

/// Resolves once `running` is cleared.
async fn wait_for_shutdown(running: Arc<AtomicBool>) {
    let mut ticker = interval(SHUTDOWN_POLL);
    while running.load(Ordering::Relaxed) {
        ticker.tick().await;
    }
    info!("shutdown flag set; draining connections");
}

// ── Routing ───────────────────────────────────────────────────────────────────

async fn handle_request(
    req: Request<Body>,
    state: Arc<AppState>,
) -> Result<Response<Body>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    debug!(%method, %path, "request");

    let response = match (path.as_str(), &method) {
        ("/health", &Method::GET) => text(StatusCode::OK, "OK"),
        ("/trades", &Method::GET) => respond(&path, handlers::list_trades(state.store.as_ref())),
        ("/trades", &Method::POST) => match read_body(req, state.config.max_body_bytes).await {
            Ok(body) => respond(&path, handlers::submit_trade(state.store.as_ref(), &body)),
            Err(rejection) => rejection,
        },
        ("/example", &Method::POST) => match read_body(req, state.config.max_body_bytes).await {
            Ok(body) => respond(&path, handlers::echo(&body)),
            Err(rejection) => rejection,
        },
        ("/health" | "/trades" | "/example", _) => {
            text(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
        }
        _ => text(StatusCode::NOT_FOUND, "Not found"),
    };

    debug!(%method, %path, status = response.status().as_u16(), "response");
    Ok(response)
}

/// Checks the content type and size of a POST body and collects it.
///
/// On failure the ready-made rejection response is returned instead.
async fn read_body(req: Request<Body>, limit: usize) -> Result<Vec<u8>, Response<Body>> {
    if !is_octet_stream(req.headers().get(CONTENT_TYPE)) {
        return Err(text(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Content-Type must be application/octet-stream",
        ));
    }

    let too_large = || text(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");

    let declared = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > limit) {
        return Err(too_large());
    }

    // Chunked bodies carry no length up front; count as we go.
    let mut body = req.into_body();
    let mut buf = Vec::with_capacity(declared.unwrap_or(0));
    while let Some(chunk) = body.data().await {
        let chunk = chunk.map_err(|e| {
            warn!("failed to read request body: {e}");
            text(StatusCode::BAD_REQUEST, "Failed to read request body")
        })?;
        if buf.len() + chunk.len() > limit {
            return Err(too_large());
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

fn is_octet_stream(value: Option<&HeaderValue>) -> bool {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(OCTET_STREAM))
}

// ── Responses ─────────────────────────────────────────────────────────────────

fn respond(path: &str, result: Result<Vec<u8>, HandlerError>) -> Response<Body> {
    match result {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(OCTET_STREAM));
            response
        }
        Err(e) => {
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() {
                error!("{path}: {e}");
            } else {
                warn!("{path}: {e}");
            }
            text(status, &e.to_string())
        }
    }
}

fn text(status: StatusCode, message: &str) -> Response<Body> {
    let mut response = Response::new(Body::from(message.to_string()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    response
}

// ── Tests ─────────────────────────────────────────────────────────────────────
