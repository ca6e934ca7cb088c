//! Request metrics middleware.
//! Counts every response by method and status.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::observability::metrics;

pub async fn track_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();

    let response = next.run(req).await;

    metrics::record_request(&method, response.status().as_u16(), start);
    response
}
