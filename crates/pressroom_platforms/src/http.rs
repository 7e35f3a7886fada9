//! Response normalization shared by every adapter.

use pressroom_core::PlatformKind;
use pressroom_error::{PlatformError, PlatformErrorKind, PlatformResult};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, error, warn};

/// Pulls a message out of a platform's JSON error envelope.
pub(crate) type ErrorExtractor = fn(&Value) -> Option<String>;

/// Send a request, mapping transport failures to `Network`.
pub(crate) async fn send(platform: PlatformKind, request: RequestBuilder) -> PlatformResult<Response> {
    request.send().await.map_err(|e| {
        error!(%platform, error = ?e, "HTTP request failed");
        PlatformError::new(PlatformErrorKind::Network(e.to_string()))
    })
}

/// Read a response body as JSON, mapping non-2xx statuses to `Api`.
///
/// An empty success body is returned as `Value::Null`.
pub(crate) async fn read_json(
    platform: PlatformKind,
    response: Response,
    extract: ErrorExtractor,
) -> PlatformResult<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|e| {
            warn!(%platform, status = %status, error = ?e, "Failed to read error body");
            String::new()
        });
        let err = api_error(status, &body, extract);
        error!(%platform, status = %status, error = %err.kind, "API error");
        return Err(err);
    }

    let body = response.text().await.map_err(|e| {
        error!(%platform, error = ?e, "Failed to read response body");
        PlatformError::new(PlatformErrorKind::Network(e.to_string()))
    })?;

    debug!(%platform, status = %status, bytes = body.len(), "Received response");
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| {
        error!(%platform, error = ?e, "Failed to parse response");
        PlatformError::new(PlatformErrorKind::ResponseParsing(format!(
            "Failed to parse JSON: {}",
            e
        )))
    })
}

/// `Api` error for a non-2xx response; `body` may be empty if it could not be read.
pub(crate) fn api_error(status: StatusCode, body: &str, extract: ErrorExtractor) -> PlatformError {
    PlatformError::new(PlatformErrorKind::Api {
        status: status.as_u16(),
        message: error_message(status, body, extract),
    })
}

/// Message for a failed response: the platform's own when parseable.
pub(crate) fn error_message(status: StatusCode, body: &str, extract: ErrorExtractor) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(extract)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "Request failed ({})",
                status.canonical_reason().unwrap_or("unknown status")
            )
        })
}

/// String at `pointer`, if any.
pub(crate) fn str_at(value: &Value, pointer: &str) -> Option<String> {
    value.pointer(pointer).and_then(Value::as_str).map(str::to_string)
}
