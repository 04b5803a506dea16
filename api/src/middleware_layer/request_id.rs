use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, info_span};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Reuses a non-empty `x-request-id` from the client or mints a random UUID.
fn request_id(headers: &HeaderMap) -> String {
    if let Some(v) = headers.get(REQUEST_ID_HEADER).and_then(|h| h.to_str().ok()) {
        if !v.trim().is_empty() {
            return v.to_string();
        }
    }
    Uuid::new_v4().to_string()
}

/// Runs the request inside a span carrying `request_id` and echoes the id back.
pub async fn with_request_id(req: Request<Body>, next: Next) -> Response {
    let id = request_id(req.headers());
    let span = info_span!("http", request_id = %id, method = %req.method(), path = %req.uri().path());

    let mut res = next.run(req).instrument(span).await;
    if let Ok(v) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, v);
    }
    res
}
