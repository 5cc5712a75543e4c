//! Dashboard configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Upstream URLs that the proxies need are
//! optional here; their absence surfaces as
//! [`DashboardError::Misconfigured`](crate::error::DashboardError::Misconfigured)
//! at request time rather than at startup.

use std::net::SocketAddr;
use std::time::Duration;

/// Default public price feed.
pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Top-level dashboard configuration.
///
/// Loaded once at startup via [`DashboardConfig::from_env`].
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// Base URL of the MTM backend REST service.
    pub mtm_service_url: String,

    /// Upstream EVM JSON-RPC endpoint used by the `/api/eth-rpc` proxy.
    pub eth_rpc_url: Option<String>,

    /// Upstream release-listing endpoint used by `/api/github/releases`.
    pub releases_url: Option<String>,

    /// Nyx chain REST (LCD) endpoint for bank balance queries.
    pub nyx_api_url: Option<String>,

    /// Base URL of the price feed.
    pub price_api_url: String,

    /// Fixed page size for list views.
    pub page_size: u32,

    /// Timeout applied to every outbound request.
    pub request_timeout: Duration,

    /// Bearer token required on `/api/*` routes. `None` disables the guard.
    pub api_token: Option<String>,

    /// Base log level or a full `EnvFilter` directive string.
    pub log_level: String,

    /// Emit JSON log lines instead of the compact format.
    pub log_json: bool,
}

impl DashboardConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()?;

        let mtm_service_url = optional_url("MTM_SERVICE_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        let price_api_url =
            optional_url("PRICE_API_URL").unwrap_or_else(|| DEFAULT_PRICE_API_URL.to_string());

        let page_size = parse_env("PAGE_SIZE", 5u32).clamp(1, 100);
        let request_timeout = Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 10).max(1));

        Ok(Self {
            listen_addr,
            mtm_service_url,
            eth_rpc_url: optional_url("ETH_RPC_URL"),
            releases_url: optional_url("RELEASES_URL"),
            nyx_api_url: optional_url("NYX_API_URL"),
            price_api_url,
            page_size,
            request_timeout,
            api_token: optional_var("DASHBOARD_API_TOKEN"),
            log_level: optional_var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_json: matches!(
                optional_var("LOG_FORMAT").as_deref(),
                Some("json") | Some("JSON")
            ),
        })
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            mtm_service_url: "http://localhost:3000".to_string(),
            eth_rpc_url: None,
            releases_url: None,
            nyx_api_url: None,
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            page_size: 5,
            request_timeout: Duration::from_secs(10),
            api_token: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Reads a variable, treating blank values as unset.
fn optional_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Like [`optional_var`] with trailing slashes removed so paths can be
/// appended with `format!("{base}/...")`.
fn optional_url(key: &str) -> Option<String> {
    optional_var(key)
        .map(|v| v.trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}
