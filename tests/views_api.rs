//! View endpoints end to end: dashboard router over a fake backend and a
//! fake release host.

#![allow(clippy::panic, clippy::indexing_slicing)]

mod common;

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use common::{dashboard, get as get_req, json_body, send, spawn_upstream};
use mtm_dashboard::config::DashboardConfig;

const LONG_ERROR: &str =
    "Insufficient NYM balance in hot wallet: required 1500000unym, available 20unym";

/// Conversion `i`: even ids succeeded, odd ids failed.
fn conversion(i: u64) -> Value {
    let failed = i % 2 == 1;
    let nym_hash = (!failed).then(|| format!("{i:064X}"));
    let error = failed.then_some(LONG_ERROR);
    json!({
        "id": i.to_string(),
        "transactionHash": format!("5u1AnaSignature{i:044}"),
        "fromAddress": "HmWkGTaLbDpKfN2kVqA7sHxCmYjQmt3zR8uTZzBgEHi",
        "nymTransactionHash": nym_hash,
        "error": error,
        "createdAt": format!("2025-08-{:02}T10:30:00Z", 28 - i)
    })
}

fn slice(all: &[Value], query: &HashMap<String, String>) -> (Vec<Value>, u64, Value) {
    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let items = all
        .iter()
        .skip((page - 1) * limit)
        .take(limit)
        .cloned()
        .collect();
    let total = all.len() as u64;
    let pagination = json!({
        "page": page,
        "limit": limit,
        "totalPages": total.div_ceil(limit as u64)
    });
    (items, total, pagination)
}

async fn conversions(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let all: Vec<Value> = (1..=12)
        .map(conversion)
        .filter(|c| {
            query.get("status").map(String::as_str) != Some("failed") || !c["error"].is_null()
        })
        .collect();
    let (transactions, total, pagination) = slice(&all, &query);
    Json(json!({ "transactions": transactions, "totalCount": total, "pagination": pagination }))
}

async fn swaps(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let all = vec![json!({
        "id": 9,
        "ethAmount": "0.25",
        "transactionHash": "0xswap",
        "error": null,
        "createdAt": "2025-08-20T08:00:00Z",
        "bridgeTransaction": {
            "id": 4,
            "nymAmount": "1200.5",
            "ethTransactionHash": "0xbridge",
            "error": null
        }
    })];
    let all: Vec<Value> = all
        .into_iter()
        .filter(|_| query.get("status").map(String::as_str) != Some("failed"))
        .collect();
    let (swaps, total, pagination) = slice(&all, &query);
    Json(json!({ "swaps": swaps, "totalCount": total, "pagination": pagination }))
}

async fn stats() -> Json<Value> {
    Json(json!({
        "totalConversions": 12,
        "successfulConversions": 6,
        "failedConversions": 6,
        "totalDownloads": 2048,
        "monthlyData": [
            { "month": "Jul", "totalConversions": 4, "successfulConversions": 2, "failedConversions": 2 },
            { "month": "Aug", "totalConversions": 8, "successfulConversions": 4, "failedConversions": 4 }
        ],
        "walletAddresses": { "eth": null, "nym": "" }
    }))
}

async fn releases() -> Json<Value> {
    Json(json!([
        {
            "id": 1,
            "tag_name": "v1.0.0",
            "created_at": "2025-06-01T00:00:00Z",
            "published_at": "2025-06-02T00:00:00Z",
            "assets": [{
                "name": "mtm-vpn.apk",
                "size": 1_048_576,
                "download_count": 120,
                "browser_download_url": "https://example.org/v1.0.0.apk"
            }]
        },
        {
            "id": 2,
            "tag_name": "v1.1.0-mtm-0.2.0",
            "created_at": "2025-07-01T00:00:00Z",
            "published_at": null,
            "assets": []
        },
        {
            "id": 3,
            "tag_name": "mtm-vpn-v1.2.0",
            "created_at": "2025-08-01T00:00:00Z",
            "published_at": "2025-08-01T12:00:00Z",
            "assets": [{
                "name": "mtm-vpn.apk",
                "size": 1023,
                "download_count": 30,
                "browser_download_url": "https://example.org/v1.2.0.apk"
            }]
        }
    ]))
}

async fn app() -> Router {
    let backend = spawn_upstream(
        Router::new()
            .route("/api/dashboard/stats", get(stats))
            .route("/api/transactions/conversions", get(conversions))
            .route("/api/swaps", get(swaps)),
    )
    .await;
    let host = spawn_upstream(Router::new().route("/releases", get(releases))).await;
    dashboard(&DashboardConfig {
        mtm_service_url: backend,
        releases_url: Some(format!("{host}/releases")),
        page_size: 5,
        ..DashboardConfig::default()
    })
}

#[tokio::test]
async fn first_page_shows_five_of_twelve() {
    let response = send(app().await, get_req("/api/views/transactions")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let mtm = &body["mtm"];
    assert_eq!(mtm["state"], "loaded");
    assert_eq!(mtm["rows"].as_array().map(Vec::len), Some(5));
    assert_eq!(mtm["pagination"]["label"], "1 of 3");
    assert_eq!(mtm["pagination"]["showing"], "Showing 1 to 5 of 12 results");
    assert_eq!(mtm["pagination"]["has_next"], true);
}

#[tokio::test]
async fn successful_row_links_both_legs() {
    let response = send(app().await, get_req("/api/views/transactions?mtm_page=1")).await;
    let body = json_body(response).await;

    // id 2 is the first successful conversion.
    let row = &body["mtm"]["rows"][1];
    assert_eq!(row["id"], "2");
    assert_eq!(row["status"], "success");
    let source = row["source"]["url"].as_str().unwrap_or_default();
    assert!(source.starts_with("https://explorer.solana.com/tx/5u1AnaSignature"));
    let destination = row["destination"]["url"].as_str().unwrap_or_default();
    assert!(destination.starts_with("https://ping.pub/nyx/tx/"));
    assert!(row["error"].is_null());

    let eth_row = &body["eth"]["rows"][0];
    assert_eq!(eth_row["status"], "success");
    assert_eq!(eth_row["swap"]["url"], "https://etherscan.io/tx/0xswap");
    assert_eq!(eth_row["bridge"]["url"], "https://etherscan.io/tx/0xbridge");
    assert_eq!(eth_row["nym_amount"], "1200.5");
}

#[tokio::test]
async fn failed_row_carries_preview_and_full_error() {
    let response = send(app().await, get_req("/api/views/failed")).await;
    let body = json_body(response).await;

    let row = &body["mtm"]["rows"][0];
    assert_eq!(row["status"], "failed");
    assert!(row["destination"].is_null());
    let preview = row["error"]["preview"].as_str().unwrap_or_default();
    assert_eq!(preview.chars().count(), 43);
    assert!(preview.ends_with("..."));
    assert_eq!(row["error"]["full"], LONG_ERROR);

    assert_eq!(body["mtm"]["pagination"]["total_count"], 6);
    assert_eq!(body["eth"]["state"], "empty");
    assert_eq!(
        body["eth"]["message"],
        "All transactions are processing successfully."
    );
}

#[tokio::test]
async fn second_list_pages_independently() {
    let response = send(
        app().await,
        get_req("/api/views/transactions?mtm_page=3&eth_page=2"),
    )
    .await;
    let body = json_body(response).await;

    assert_eq!(body["mtm"]["rows"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["mtm"]["pagination"]["label"], "3 of 3");
    assert_eq!(body["eth"]["state"], "empty");
}

#[tokio::test]
async fn downloads_exclude_assetless_releases() {
    let response = send(app().await, get_req("/api/views/downloads")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["total_downloads"], 150);
    let rows = body["releases"]["rows"].as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["version"], "1.2.0");
    assert_eq!(rows[0]["file_size"], "1023 B");
    assert_eq!(rows[1]["version"], "1.0.0");
    assert_eq!(rows[1]["file_size"], "1.0 MiB");
}

#[tokio::test]
async fn overview_renders_what_loaded() {
    let response = send(app().await, get_req("/api/views/overview")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["stats"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["stats"][3]["display"], "2,048");
    assert_eq!(body["monthly"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["recent"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["balances"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn unreachable_backend_errors_lists_but_not_the_response() {
    let app = dashboard(&DashboardConfig {
        mtm_service_url: "http://127.0.0.1:1".to_string(),
        ..DashboardConfig::default()
    });

    let response = send(app.clone(), get_req("/api/views/transactions")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["mtm"]["state"], "errored");
    assert_eq!(body["eth"]["state"], "errored");

    let response = send(app, get_req("/api/views/overview")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["error"]["details"], "retryable");
}
