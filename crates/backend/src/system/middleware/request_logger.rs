use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;

use crate::shared::format::format_size;

/// Logs every HTTP request
///
/// Console line: local time, duration, response size, status, method and path.
/// The same data goes to tracing at debug level.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(%method, path = %path, "failed to read response body: {}", e);
            return Response::from_parts(parts, Body::default());
        }
    };

    let elapsed = start.elapsed();
    // cyan for success, yellow otherwise
    let color_code = if parts.status.is_success() { "36" } else { "33" };

    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>10} | {} {:>6} {}",
        color_code,
        Local::now().format("%H:%M:%S"),
        elapsed.as_millis(),
        format_size(bytes.len()),
        parts.status.as_u16(),
        method,
        path
    );
    tracing::debug!(
        %method,
        path = %path,
        status = parts.status.as_u16(),
        elapsed_ms = elapsed.as_millis() as u64,
        "request handled"
    );

    Response::from_parts(parts, Body::from(bytes))
}
