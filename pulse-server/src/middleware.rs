use axum::Json;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::{error, info, warn};
use serde_json::json;
use std::any::Any;
use std::time::Instant;

/// One log line per request: method, path, status and elapsed time.
pub async fn request_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed = started.elapsed().as_millis();
    if status.is_server_error() {
        warn!("{} {} {} in {}ms", method, path, status.as_u16(), elapsed);
    } else {
        info!("{} {} {} in {}ms", method, path, status.as_u16(), elapsed);
    }

    response
}

/// Turns a handler panic into the generic 500 body.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Unhandled error: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "An unexpected error occurred" })),
    )
        .into_response()
}
