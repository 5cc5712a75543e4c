//! Wallet balance lookups on the EVM and Nyx chains.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::{Value, json};

use super::proxy::UpstreamProxy;
use crate::domain::BalanceChain;
use crate::error::{DashboardError, status_line};

/// Bank denomination of NYM on Nyx.
pub const NYM_DENOM: &str = "unym";

/// Balance lookup on one chain.
#[async_trait]
pub trait BalanceSource: Send + Sync + std::fmt::Debug {
    /// Chain this source reads.
    fn chain(&self) -> BalanceChain;

    /// Balance of `address` in the chain's base unit (wei, unym).
    ///
    /// # Errors
    ///
    /// Missing configuration, an unreachable node or an unusable answer.
    async fn base_units(&self, address: &str) -> Result<u128, DashboardError>;
}

/// `eth_getBalance` through the RPC proxy.
#[derive(Debug, Clone)]
pub struct EvmBalanceSource {
    proxy: Arc<UpstreamProxy>,
}

impl EvmBalanceSource {
    /// Creates a source that queries through `proxy`.
    #[must_use]
    pub fn new(proxy: Arc<UpstreamProxy>) -> Self {
        Self { proxy }
    }
}

#[async_trait]
impl BalanceSource for EvmBalanceSource {
    fn chain(&self) -> BalanceChain {
        BalanceChain::Eth
    }

    async fn base_units(&self, address: &str) -> Result<u128, DashboardError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_getBalance",
            "params": [address, "latest"],
        });
        let body = serde_json::to_vec(&request)
            .map_err(|e| DashboardError::Internal(e.to_string()))?;

        let reply = self.proxy.forward_eth_rpc(Bytes::from(body)).await?;
        if !reply.is_success() {
            return Err(DashboardError::Upstream(status_line(reply.status)));
        }
        parse_rpc_balance(&reply.body)
    }
}

/// Extracts the wei amount from an `eth_getBalance` response envelope.
fn parse_rpc_balance(envelope: &Value) -> Result<u128, DashboardError> {
    if let Some(error) = envelope.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(DashboardError::Upstream(format!("RPC Error: {message}")));
    }
    let hex = envelope
        .get("result")
        .and_then(Value::as_str)
        .ok_or_else(|| DashboardError::Upstream("RPC response has no result".to_string()))?;
    parse_hex_quantity(hex)
}

/// Parses a JSON-RPC quantity such as `"0x1bc16d674ec80000"`.
fn parse_hex_quantity(hex: &str) -> Result<u128, DashboardError> {
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    if digits.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(digits, 16)
        .map_err(|e| DashboardError::Upstream(format!("invalid quantity {hex}: {e}")))
}

/// Cosmos SDK bank query against a Nyx REST (LCD) endpoint.
#[derive(Debug, Clone)]
pub struct NyxBalanceSource {
    http: reqwest::Client,
    api_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BankBalanceResponse {
    balance: Option<Coin>,
}

#[derive(Debug, Deserialize)]
struct Coin {
    amount: String,
}

impl NyxBalanceSource {
    /// Creates a source. Without `api_url` every lookup fails as
    /// misconfigured.
    #[must_use]
    pub fn new(http: reqwest::Client, api_url: Option<String>) -> Self {
        Self { http, api_url }
    }
}

#[async_trait]
impl BalanceSource for NyxBalanceSource {
    fn chain(&self) -> BalanceChain {
        BalanceChain::Nym
    }

    async fn base_units(&self, address: &str) -> Result<u128, DashboardError> {
        let base = self
            .api_url
            .as_deref()
            .ok_or(DashboardError::Misconfigured("NYX API URL"))?;
        let url = format!("{base}/cosmos/bank/v1beta1/balances/{address}/by_denom");

        let response = self
            .http
            .get(&url)
            .query(&[("denom", NYM_DENOM)])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DashboardError::Upstream(format!("Nyx request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(DashboardError::Upstream(status_line(response.status())));
        }

        let parsed: BankBalanceResponse = response
            .json()
            .await
            .map_err(|e| DashboardError::Upstream(format!("Nyx decode failed: {e}")))?;
        match parsed.balance {
            Some(coin) => coin
                .amount
                .parse()
                .map_err(|e| DashboardError::Upstream(format!("invalid amount {}: {e}", coin.amount))),
            None => Ok(0),
        }
    }
}
