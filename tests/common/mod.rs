//! Helpers shared by the integration tests.

#![allow(dead_code, clippy::panic)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;

use mtm_dashboard::api;
use mtm_dashboard::app_state::AppState;
use mtm_dashboard::config::DashboardConfig;

/// Serves `router` on an ephemeral port and returns its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

/// The dashboard router built from `config`.
pub fn dashboard(config: &DashboardConfig) -> Router {
    let Ok(state) = AppState::from_config(config) else {
        panic!("state builds");
    };
    api::build_router(state)
}

/// Sends one request through `router` without a socket.
pub async fn send(router: Router, request: Request<Body>) -> Response<Body> {
    let Ok(response) = router.oneshot(request).await else {
        panic!("router is infallible");
    };
    response
}

/// `GET uri` with an empty body.
pub fn get(uri: &str) -> Request<Body> {
    let Ok(request) = Request::get(uri).body(Body::empty()) else {
        panic!("valid request");
    };
    request
}

/// `POST uri` with a JSON body.
pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    let Ok(request) = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
    else {
        panic!("valid request");
    };
    request
}

/// Collects and parses a JSON response body.
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let Ok(collected) = response.into_body().collect().await else {
        panic!("body collects");
    };
    let Ok(value) = serde_json::from_slice(&collected.to_bytes()) else {
        panic!("body is JSON");
    };
    value
}
