//! Request correlation for the recommendation API
//!
//! Each request is tagged with an `x-request-id`. A client-supplied UUID is
//! reused, so a storefront can follow one recommendation call across its own
//! logs and ours. The trace span also carries the profile a request targets.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::field;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id, stored in request extensions for handlers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Reuses a client-supplied UUID header, or generates a fresh v4 id
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(RequestId)
            .unwrap_or_default()
    }

    fn header_value(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.0.to_string()).ok()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers());
    request.extensions_mut().insert(request_id);

    let mut response = next.run(request).await;
    if let Some(value) = request_id.header_value() {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Profile id from a `/profiles/{id}/...` path
fn profile_in_path(path: &str) -> Option<Uuid> {
    let mut segments = path.split('/');
    segments.find(|segment| *segment == "profiles")?;
    segments.next().and_then(|s| Uuid::parse_str(s).ok())
}

/// `TraceLayer` span: method, path, request id and, on profile routes, the profile id
pub fn make_request_span(request: &Request<Body>) -> tracing::Span {
    let path = request.uri().path();
    let span = tracing::info_span!(
        "recs_request",
        method = %request.method(),
        path = %path,
        request_id = field::Empty,
        profile_id = field::Empty,
    );

    if let Some(request_id) = request.extensions().get::<RequestId>() {
        span.record("request_id", field::display(request_id));
    }
    if let Some(profile_id) = profile_in_path(path) {
        span.record("profile_id", field::display(profile_id));
    }
    span
}
