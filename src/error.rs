//! Dashboard error types with HTTP status code mapping.
//!
//! Two shapes live here:
//!
//! - [`DashboardError`] is the server-side error. Each variant maps to an
//!   HTTP status code and a structured JSON error response.
//! - [`ApiError`] is the normalized failure of a call to the backend REST
//!   API. Transport failures carry status `0`; server-reported failures
//!   carry the server's status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 3002,
///     "message": "misconfigured: ETH RPC URL not configured",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`DashboardError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                     |
/// |-----------|-----------------|---------------------------------|
/// | 1000–1999 | Request         | 400 / 401 / 405                 |
/// | 2000–2999 | Upstream        | 502 or the upstream's own status |
/// | 3000–3999 | Server          | 500 Internal Server Error       |
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The endpoint does not accept the request's HTTP method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Missing or wrong bearer token.
    #[error("unauthorized")]
    Unauthorized,

    /// A required upstream URL is absent from configuration.
    #[error("{0} not configured")]
    Misconfigured(&'static str),

    /// A backend REST call failed.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// An upstream (RPC node, price feed, release host) failed or answered
    /// with something unusable.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Clipboard write failed on every available mechanism.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Unauthorized => 1002,
            Self::MethodNotAllowed => 1003,
            Self::Api(_) => 2001,
            Self::Upstream(_) => 2002,
            Self::Internal(_) => 3000,
            Self::Misconfigured(_) => 3001,
            Self::Clipboard(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    ///
    /// Backend failures that reached the server keep their status; transport
    /// failures (status `0`) become `502 Bad Gateway`.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Api(err) if err.status >= 400 => {
                StatusCode::from_u16(err.status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Api(_) | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Misconfigured(_) | Self::Clipboard(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether retrying the same request could plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(err) => err.is_retryable(),
            Self::Upstream(_) => true,
            _ => false,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = self.is_retryable().then(|| "retryable".to_string());
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

/// Normalized failure of a backend REST call.
///
/// `status == 0` means the request never produced a usable response
/// (connection refused, DNS, timeout, or an undecodable body). Any other
/// value is the HTTP status the server answered with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("API Error: {message}")]
pub struct ApiError {
    /// HTTP status, or `0` for transport-level failures.
    pub status: u16,
    /// Never empty.
    pub message: String,
    /// Response body, when the server returned JSON.
    pub payload: Option<serde_json::Value>,
}

impl ApiError {
    /// Builds a transport-level error (status `0`).
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: non_empty(message.into()),
            payload: None,
        }
    }

    /// Builds an error from a non-success server response.
    ///
    /// The message is taken from the body's `error` field (either a string or
    /// an object with a `message` string), falling back to
    /// `"HTTP {code}: {reason}"`.
    #[must_use]
    pub fn from_response(status: StatusCode, payload: Option<serde_json::Value>) -> Self {
        let message = payload
            .as_ref()
            .and_then(|body| body.get("error"))
            .and_then(|err| {
                err.as_str()
                    .or_else(|| err.get("message").and_then(|m| m.as_str()))
            })
            .filter(|msg| !msg.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| status_line(status));
        Self {
            status: status.as_u16(),
            message,
            payload,
        }
    }

    /// True when the request failed before reaching the server.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        self.status == 0
    }

    /// True for transport failures and 5xx responses.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.status == 0 || self.status >= 500
    }
}

/// `"HTTP 503: Service Unavailable"`.
pub(crate) fn status_line(status: StatusCode) -> String {
    format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    )
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        "Unknown error occurred".to_string()
    } else {
        message
    }
}
