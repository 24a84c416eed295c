//! Request logging and panic capture

use std::any::Any;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::{error, info, warn};

use super::response::ApiError;

/// Log method, path, status and latency of every request.
/// 5xx log at error level, 4xx at warn, everything else at info.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    if status.is_server_error() {
        error!("{} {} -> {} ({:.2}ms)", method, path, status.as_u16(), elapsed_ms);
    } else if status.is_client_error() {
        warn!("{} {} -> {} ({:.2}ms)", method, path, status.as_u16(), elapsed_ms);
    } else {
        info!("{} {} -> {} ({:.2}ms)", method, path, status.as_u16(), elapsed_ms);
    }

    response
}

/// Turn a handler panic into the generic 500 envelope.
/// The panic payload is logged, never sent to the client.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!("Unhandled exception: {}", detail);
    ApiError::Internal.into_response()
}
