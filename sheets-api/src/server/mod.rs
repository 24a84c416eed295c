//! HTTP server: routing, shared state and cross-cutting layers

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod validation;

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use log::info;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;

use crate::sheets::SheetGateway;

/// Path prefix of every API route
pub const API_PREFIX: &str = "/api/v1";

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: SheetGateway,
}

impl AppState {
    pub fn new(gateway: SheetGateway) -> Self {
        Self { gateway }
    }
}

/// Build the full application router.
///
/// `static_dir` must contain `index.html`, served at `/`.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    with_state_and_layers(routes(static_dir), state)
}

fn routes(static_dir: &Path) -> Router<AppState> {
    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/data",
            get(handlers::read_data).post(handlers::create_data),
        )
        .route(
            "/data/{row_number}",
            axum::routing::put(handlers::modify_data).delete(handlers::remove_data),
        )
        .method_not_allowed_fallback(handlers::method_not_allowed);

    Router::new()
        .nest(API_PREFIX, api)
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
}

// Request logging wraps the panic catcher so panicking requests still get a log line
fn with_state_and_layers(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(CorsLayer::permissive())
}

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, draining connections");
}
