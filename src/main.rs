//! mtm-dashboard server entry point.
//!
//! Starts the Axum HTTP server with the proxy and view endpoints.

use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use mtm_dashboard::api;
use mtm_dashboard::app_state::AppState;
use mtm_dashboard::config::DashboardConfig;
use mtm_dashboard::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = DashboardConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize tracing
    logging::init(&config.log_level, config.log_json);
    tracing::info!(
        addr = %config.listen_addr,
        backend = %config.mtm_service_url,
        page_size = config.page_size,
        "starting mtm-dashboard"
    );
    if config.api_token.is_none() {
        tracing::warn!("DASHBOARD_API_TOKEN is not set; /api routes are unauthenticated");
    }
    for (name, value) in [
        ("ETH_RPC_URL", &config.eth_rpc_url),
        ("RELEASES_URL", &config.releases_url),
        ("NYX_API_URL", &config.nyx_api_url),
    ] {
        if value.is_none() {
            tracing::warn!(setting = name, "upstream not configured");
        }
    }

    // Build application state
    let app_state = AppState::from_config(&config)?;

    // Build router; the server-side timeout sits just above the outbound one
    let app = api::build_router(app_state)
        .layer(TimeoutLayer::new(config.request_timeout * 2))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
