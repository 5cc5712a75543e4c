//! OpenAPI document and its UI.

use axum::Router;
use utoipa::OpenApi;

use super::handlers;
use crate::app_state::AppState;
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI description of every served route.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "mtm-dashboard",
        description = "Read-only admin API for the MTM to NYM conversion service."
    ),
    paths(
        handlers::system::health_handler,
        handlers::proxy::eth_rpc,
        handlers::proxy::releases,
        handlers::views::overview,
        handlers::views::balances,
        handlers::views::transactions,
        handlers::views::failed,
        handlers::views::downloads,
    ),
    components(schemas(ErrorResponse, ErrorBody)),
    tags(
        (name = "System", description = "Liveness"),
        (name = "Proxy", description = "Same-origin passthroughs to upstreams"),
        (name = "Views", description = "Render-ready dashboard pages"),
    )
)]
pub struct ApiDoc;

/// Path of the JSON document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Serves the document, and Swagger UI at `/swagger-ui` when the
/// `swagger-ui` feature is on.
#[cfg(feature = "swagger-ui")]
pub fn mount(router: Router<AppState>) -> Router<AppState> {
    router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()),
    )
}

/// Serves the document.
#[cfg(not(feature = "swagger-ui"))]
pub fn mount(router: Router<AppState>) -> Router<AppState> {
    let doc = ApiDoc::openapi();
    router.route(
        OPENAPI_PATH,
        axum::routing::get(move || {
            let doc = doc.clone();
            async move { axum::Json(doc) }
        }),
    )
}
