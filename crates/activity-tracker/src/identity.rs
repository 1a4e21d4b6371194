//! Caller identity for HTTP handlers.
//!
//! Token verification happens upstream; by the time a request reaches these routers the
//! gateway has replaced the bearer token with the verified account id in `x-user-id`.

use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::accounts::UserId;

pub const ACTOR_HEADER: &str = "x-user-id";

pub fn actor_id(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| UserId(value.to_string()))
}

pub(crate) fn unauthenticated() -> Response {
    error_response(
        StatusCode::UNAUTHORIZED,
        format!("missing {ACTOR_HEADER} header"),
    )
}

/// Malformed or mistyped JSON bodies are client errors like any other validation failure.
pub(crate) fn malformed_body(rejection: JsonRejection) -> Response {
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}

pub(crate) fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_trimmed_actor_id() {
        let mut headers = HeaderMap::new();
        headers.insert(ACTOR_HEADER, HeaderValue::from_static(" usr-000042 "));
        assert_eq!(actor_id(&headers), Some(UserId("usr-000042".to_string())));
    }

    #[test]
    fn blank_or_missing_header_is_anonymous() {
        let mut headers = HeaderMap::new();
        assert_eq!(actor_id(&headers), None);
        headers.insert(ACTOR_HEADER, HeaderValue::from_static("   "));
        assert_eq!(actor_id(&headers), None);
    }
}
