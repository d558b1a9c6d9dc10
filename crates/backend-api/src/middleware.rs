use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn};

/// Access log. Server errors are raised to `warn` so they stand out under the
/// default `info` filter.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let duration_ms = started.elapsed().as_millis();

    if status.is_server_error() {
        warn!(%method, %path, %status, duration_ms, "request failed");
    } else {
        info!(%method, %path, %status, duration_ms, "request completed");
    }

    response
}
