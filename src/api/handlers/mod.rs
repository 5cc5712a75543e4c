//! REST endpoint handlers organized by resource.

pub mod proxy;
pub mod system;
pub mod views;

use axum::Router;

use crate::app_state::AppState;

/// Composes the proxy and view routes that live under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new().merge(proxy::routes()).merge(views::routes())
}
