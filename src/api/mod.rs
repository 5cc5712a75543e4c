//! REST API layer: route handlers, DTOs, access guard and router
//! composition.
//!
//! Proxy and view endpoints are mounted under `/api` behind the bearer
//! guard; `/health` and the OpenAPI document stay open.

pub mod auth;
pub mod docs;
pub mod dto;
pub mod handlers;

use axum::{Router, middleware};

use crate::app_state::AppState;

/// Builds the complete router with every endpoint and the state applied.
pub fn build_router(state: AppState) -> Router {
    let guarded = handlers::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_bearer,
    ));
    let router = Router::new()
        .nest("/api", guarded)
        .merge(handlers::system::routes());
    docs::mount(router).with_state(state)
}
