//! Same-origin passthrough to the EVM RPC node and the release host.
//!
//! Payloads are relayed untouched. A non-2xx upstream answer keeps its
//! status code so callers can still tell rate limiting from bad input.

use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde_json::{Value, json};

use crate::domain::Release;
use crate::error::{DashboardError, status_line};

/// User agent announced to the release host.
pub const RELEASES_USER_AGENT: &str = "MTM-VPN-Dashboard/1.0";

/// Upstream answer to relay back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    /// Upstream status code.
    pub status: StatusCode,
    /// Upstream JSON body, or an `{"error": "HTTP ..."}` stand-in when a
    /// failing upstream sent something that is not JSON.
    pub body: Value,
}

impl UpstreamReply {
    /// Whether the upstream answered 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Forwarder for the two proxied upstreams.
#[derive(Debug, Clone)]
pub struct UpstreamProxy {
    http: reqwest::Client,
    eth_rpc_url: Option<String>,
    releases_url: Option<String>,
}

impl UpstreamProxy {
    /// Creates a forwarder. Either upstream may be unconfigured.
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        eth_rpc_url: Option<String>,
        releases_url: Option<String>,
    ) -> Self {
        Self {
            http,
            eth_rpc_url,
            releases_url,
        }
    }

    /// POSTs a JSON-RPC body to the EVM node as-is.
    ///
    /// # Errors
    ///
    /// - [`DashboardError::Misconfigured`] when `ETH_RPC_URL` is unset.
    /// - [`DashboardError::Upstream`] when the node is unreachable or a 2xx
    ///   answer is not JSON.
    pub async fn forward_eth_rpc(&self, body: Bytes) -> Result<UpstreamReply, DashboardError> {
        let url = self
            .eth_rpc_url
            .as_deref()
            .ok_or(DashboardError::Misconfigured("ETH RPC URL"))?;

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "ETH RPC proxy error");
                DashboardError::Upstream(e.to_string())
            })?;

        relay(response).await
    }

    /// GETs the release list.
    ///
    /// # Errors
    ///
    /// - [`DashboardError::Misconfigured`] when `RELEASES_URL` is unset.
    /// - [`DashboardError::Upstream`] when the host is unreachable or a 2xx
    ///   answer is not JSON.
    pub async fn fetch_releases(&self) -> Result<UpstreamReply, DashboardError> {
        let url = self
            .releases_url
            .as_deref()
            .ok_or(DashboardError::Misconfigured("Releases URL"))?;

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, RELEASES_USER_AGENT)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "releases proxy error");
                DashboardError::Upstream(e.to_string())
            })?;

        relay(response).await
    }

    /// Fetches and decodes the release list.
    ///
    /// # Errors
    ///
    /// Everything [`Self::fetch_releases`] returns, plus
    /// [`DashboardError::Upstream`] for non-2xx answers and bodies that are
    /// not a release array.
    pub async fn releases(&self) -> Result<Vec<Release>, DashboardError> {
        let reply = self.fetch_releases().await?;
        if !reply.is_success() {
            return Err(DashboardError::Upstream(format!(
                "Failed to fetch releases: {}",
                status_line(reply.status)
            )));
        }
        serde_json::from_value(reply.body)
            .map_err(|e| DashboardError::Upstream(format!("unexpected release list: {e}")))
    }
}

async fn relay(response: reqwest::Response) -> Result<UpstreamReply, DashboardError> {
    let status = response.status();
    if status.is_success() {
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| DashboardError::Upstream(e.to_string()))?;
        return Ok(UpstreamReply { status, body });
    }

    tracing::warn!(status = status.as_u16(), "upstream answered with an error status");
    let body = response
        .json::<Value>()
        .await
        .unwrap_or_else(|_| json!({ "error": status_line(status) }));
    Ok(UpstreamReply { status, body })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_rpc_is_misconfiguration() {
        let proxy = UpstreamProxy::new(reqwest::Client::new(), None, None);
        let result = proxy.forward_eth_rpc(Bytes::from_static(b"{}")).await;
        let Err(DashboardError::Misconfigured(what)) = result else {
            panic!("expected misconfiguration");
        };
        assert_eq!(what, "ETH RPC URL");
    }

    #[tokio::test]
    async fn unconfigured_releases_is_misconfiguration() {
        let proxy = UpstreamProxy::new(reqwest::Client::new(), None, None);
        assert!(matches!(
            proxy.releases().await,
            Err(DashboardError::Misconfigured("Releases URL"))
        ));
    }

    #[tokio::test]
    async fn unreachable_rpc_is_upstream_error() {
        let proxy = UpstreamProxy::new(
            reqwest::Client::new(),
            Some("http://127.0.0.1:1".to_string()),
            None,
        );
        let result = proxy.forward_eth_rpc(Bytes::from_static(b"{}")).await;
        assert!(matches!(result, Err(DashboardError::Upstream(_))));
    }
}
