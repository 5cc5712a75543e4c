//! View endpoints: each returns one dashboard page as render-ready JSON.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ConversionPagesParams, PageParams};
use crate::app_state::AppState;
use crate::domain::{BalanceSnapshot, ConversionListsView, DownloadsView, OverviewView};
use crate::error::{DashboardError, ErrorResponse};

/// `GET /views/overview`: stat cards, monthly trend, balances and the most
/// recent conversions.
///
/// # Errors
///
/// Returns [`DashboardError::Api`] only when stats and recent conversions
/// both fail; partial failures are listed in the view's `errors`.
#[utoipa::path(
    get,
    path = "/api/views/overview",
    tag = "Views",
    summary = "Dashboard overview",
    description = "Sections settle independently; a section that failed is absent and named in `errors`.",
    responses(
        (status = 200, description = "Overview with every section that loaded", body = OverviewView),
        (status = 502, description = "Backend unreachable", body = ErrorResponse),
    )
)]
pub async fn overview(State(state): State<AppState>) -> Result<impl IntoResponse, DashboardError> {
    Ok(Json(state.views.overview().await?))
}

/// `GET /views/balances`: service wallet balances.
///
/// # Errors
///
/// Returns [`DashboardError::Api`] when the wallet addresses cannot be read.
#[utoipa::path(
    get,
    path = "/api/views/balances",
    tag = "Views",
    summary = "Wallet balances",
    description = "One entry per wallet whose balance could be read, ETH first.",
    responses(
        (status = 200, description = "Balances", body = Vec<BalanceSnapshot>),
        (status = 502, description = "Backend unreachable", body = ErrorResponse),
    )
)]
pub async fn balances(State(state): State<AppState>) -> Result<impl IntoResponse, DashboardError> {
    Ok(Json(state.views.balances().await?))
}

/// `GET /views/transactions`: all MTM → NYM and ETH → NYM conversions.
#[utoipa::path(
    get,
    path = "/api/views/transactions",
    tag = "Views",
    summary = "Transactions",
    description = "Two independently paged lists. A failed list is returned in its `errored` state.",
    params(ConversionPagesParams),
    responses(
        (status = 200, description = "Both lists", body = ConversionListsView),
    )
)]
pub async fn transactions(
    State(state): State<AppState>,
    Query(params): Query<ConversionPagesParams>,
) -> impl IntoResponse {
    let params = params.clamped();
    Json(
        state
            .views
            .transactions(params.mtm_page, params.eth_page)
            .await,
    )
}

/// `GET /views/failed`: failed conversions only.
#[utoipa::path(
    get,
    path = "/api/views/failed",
    tag = "Views",
    summary = "Failed transactions",
    description = "Both lists filtered to `status=failed`. Each row carries the full error text for copying.",
    params(ConversionPagesParams),
    responses(
        (status = 200, description = "Both lists", body = ConversionListsView),
    )
)]
pub async fn failed(
    State(state): State<AppState>,
    Query(params): Query<ConversionPagesParams>,
) -> impl IntoResponse {
    let params = params.clamped();
    Json(state.views.failed(params.mtm_page, params.eth_page).await)
}

/// `GET /views/downloads`: download totals and one page of releases.
///
/// # Errors
///
/// 500 when `RELEASES_URL` is unset, 502 when the release host fails.
#[utoipa::path(
    get,
    path = "/api/views/downloads",
    tag = "Views",
    summary = "App downloads",
    description = "Releases without assets are excluded from both the list and the total.",
    params(PageParams),
    responses(
        (status = 200, description = "Download statistics", body = DownloadsView),
        (status = 500, description = "Releases URL not configured", body = ErrorResponse),
        (status = 502, description = "Release host failed", body = ErrorResponse),
    )
)]
pub async fn downloads(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, DashboardError> {
    let params = params.clamped();
    Ok(Json(state.views.downloads(params.page).await?))
}

/// View routes, mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/views/overview", get(overview))
        .route("/views/balances", get(balances))
        .route("/views/transactions", get(transactions))
        .route("/views/failed", get(failed))
        .route("/views/downloads", get(downloads))
}
