//! Same-origin passthroughs to the EVM node and the release host.
//!
//! Both routes accept every verb so that a wrong one is answered with a
//! 405 body of our own instead of Axum's empty default, and without the
//! upstream ever being contacted.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::error::{DashboardError, ErrorResponse};
use crate::upstream::UpstreamReply;

/// `POST /eth-rpc`: forwards a JSON-RPC envelope to the configured node.
///
/// # Errors
///
/// 405 for any verb but POST, 500 when `ETH_RPC_URL` is unset, 502 when the
/// node is unreachable.
#[utoipa::path(
    post,
    path = "/api/eth-rpc",
    tag = "Proxy",
    summary = "EVM JSON-RPC proxy",
    description = "Forwards the body verbatim to the configured EVM node and relays its JSON answer. Upstream error statuses are passed through unchanged.",
    request_body(content = serde_json::Value, content_type = "application/json"),
    responses(
        (status = 200, description = "Upstream JSON-RPC response", body = serde_json::Value),
        (status = 405, description = "Not a POST", body = ErrorResponse),
        (status = 500, description = "ETH RPC URL not configured", body = ErrorResponse),
        (status = 502, description = "Node unreachable", body = ErrorResponse),
    )
)]
pub async fn eth_rpc(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Response, DashboardError> {
    if method != Method::POST {
        return Err(DashboardError::MethodNotAllowed);
    }
    let reply = state.proxy.forward_eth_rpc(body).await?;
    Ok(relay(reply))
}

/// `GET /github/releases`: relays the release list.
///
/// # Errors
///
/// 405 for any verb but GET, 500 when `RELEASES_URL` is unset, 502 when the
/// host is unreachable.
#[utoipa::path(
    get,
    path = "/api/github/releases",
    tag = "Proxy",
    summary = "Release list proxy",
    description = "Fetches the client release list from the configured release host.",
    responses(
        (status = 200, description = "Upstream release list", body = serde_json::Value),
        (status = 405, description = "Not a GET", body = ErrorResponse),
        (status = 500, description = "Releases URL not configured", body = ErrorResponse),
        (status = 502, description = "Release host unreachable", body = ErrorResponse),
    )
)]
pub async fn releases(
    State(state): State<AppState>,
    method: Method,
) -> Result<Response, DashboardError> {
    if method != Method::GET {
        return Err(DashboardError::MethodNotAllowed);
    }
    let reply = state.proxy.fetch_releases().await?;
    Ok(relay(reply))
}

fn relay(reply: UpstreamReply) -> Response {
    (reply.status, Json(reply.body)).into_response()
}

/// Proxy routes, mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/eth-rpc", any(eth_rpc))
        .route("/github/releases", any(releases))
}
