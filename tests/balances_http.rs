//! Balance aggregation over real HTTP sources backed by fake upstreams.

#![allow(clippy::panic, clippy::indexing_slicing)]

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use common::spawn_upstream;
use mtm_dashboard::domain::{BalanceChain, WalletAddresses};
use mtm_dashboard::service::BalanceAggregator;
use mtm_dashboard::upstream::{EvmBalanceSource, NyxBalanceSource, PriceFeed, UpstreamProxy};

/// 1.5 ETH in wei.
const WEI: &str = "0x14d1120d7b160000";

async fn node() -> String {
    spawn_upstream(Router::new().route(
        "/",
        post(|Json(body): Json<Value>| async move {
            Json(json!({ "jsonrpc": "2.0", "id": body["id"], "result": WEI }))
        }),
    ))
    .await
}

async fn lcd(healthy: bool) -> String {
    spawn_upstream(Router::new().route(
        "/cosmos/bank/v1beta1/balances/{address}/by_denom",
        get(
            move |Path(address): Path<String>, Query(q): Query<HashMap<String, String>>| async move {
                if !healthy {
                    return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({})));
                }
                let denom = q.get("denom").cloned().unwrap_or_default();
                let amount = if address == "n1wallet" { "2500000" } else { "0" };
                (
                    StatusCode::OK,
                    Json(json!({ "balance": { "denom": denom, "amount": amount } })),
                )
            },
        ),
    ))
    .await
}

async fn prices() -> String {
    spawn_upstream(Router::new().route(
        "/simple/price",
        get(|Query(q): Query<HashMap<String, String>>| async move {
            let id = q.get("ids").cloned().unwrap_or_default();
            let usd = if id == "ethereum" { 2000.0 } else { 0.1 };
            let mut body = serde_json::Map::new();
            body.insert(id, json!({ "usd": usd }));
            Json(Value::Object(body))
        }),
    ))
    .await
}

async fn aggregator(eth_rpc: Option<String>, nyx: Option<String>) -> BalanceAggregator {
    let http = reqwest::Client::new();
    let proxy = Arc::new(UpstreamProxy::new(http.clone(), eth_rpc, None));
    let price_url = prices().await;
    BalanceAggregator::new(
        Arc::new(EvmBalanceSource::new(proxy)),
        Arc::new(NyxBalanceSource::new(http.clone(), nyx)),
        Arc::new(PriceFeed::new(http, &price_url)),
    )
}

fn wallets() -> WalletAddresses {
    WalletAddresses {
        eth: Some("0x00000000000000000000000000000000000000aa".to_string()),
        nym: "n1wallet".to_string(),
    }
}

#[tokio::test]
async fn both_chains_are_reported_with_usd_values() {
    let balances = aggregator(Some(node().await), Some(lcd(true).await))
        .await
        .fetch_balances(&wallets())
        .await;

    assert_eq!(balances.len(), 2);
    assert_eq!(balances[0].chain, BalanceChain::Eth);
    assert!((balances[0].balance - 1.5).abs() < 1e-9);
    assert_eq!(balances[0].balance_usd, Some(3000.0));
    assert!(
        balances[0]
            .explorer_url
            .starts_with("https://etherscan.io/address/")
    );
    assert_eq!(balances[1].chain, BalanceChain::Nym);
    assert!((balances[1].balance - 2.5).abs() < 1e-9);
    assert_eq!(balances[1].balance_usd, Some(0.25));
}

#[tokio::test]
async fn evm_failure_leaves_exactly_the_nyx_snapshot() {
    let balances = aggregator(Some("http://127.0.0.1:1".to_string()), Some(lcd(true).await))
        .await
        .fetch_balances(&wallets())
        .await;

    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].chain, BalanceChain::Nym);
    assert_eq!(balances[0].address, "n1wallet");
}

#[tokio::test]
async fn unhealthy_lcd_and_missing_rpc_url_yield_nothing() {
    let balances = aggregator(None, Some(lcd(false).await))
        .await
        .fetch_balances(&wallets())
        .await;
    assert!(balances.is_empty());
}
