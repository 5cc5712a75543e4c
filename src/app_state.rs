//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::client::BackendClient;
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::service::{BalanceAggregator, DownloadsAggregator, ViewService};
use crate::upstream::{EvmBalanceSource, NyxBalanceSource, PriceFeed, UpstreamProxy};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Everything inside is immutable and `Arc`-shared; cloning the state per
/// request is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Forwarder behind the RPC and release proxy endpoints.
    pub proxy: Arc<UpstreamProxy>,
    /// Assembles every dashboard view.
    pub views: Arc<ViewService>,
    /// Bearer token required on `/api/*`; `None` disables the guard.
    pub api_token: Option<Arc<str>>,
}

impl AppState {
    /// Wires clients, sources and services from configuration.
    ///
    /// One `reqwest` connection pool is shared by every outbound call.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Internal`] if the HTTP client cannot be
    /// built.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DashboardError::Internal(format!("http client: {e}")))?;

        let proxy = Arc::new(UpstreamProxy::new(
            http.clone(),
            config.eth_rpc_url.clone(),
            config.releases_url.clone(),
        ));
        let backend = Arc::new(BackendClient::with_http(
            &config.mtm_service_url,
            http.clone(),
        ));
        let balances = BalanceAggregator::new(
            Arc::new(EvmBalanceSource::new(Arc::clone(&proxy))),
            Arc::new(NyxBalanceSource::new(http.clone(), config.nyx_api_url.clone())),
            Arc::new(PriceFeed::new(http, &config.price_api_url)),
        );
        let views = Arc::new(ViewService::new(
            backend,
            balances,
            DownloadsAggregator::new(Arc::clone(&proxy)),
            config.page_size,
        ));

        Ok(Self {
            proxy,
            views,
            api_token: config.api_token.as_deref().map(Arc::from),
        })
    }
}
