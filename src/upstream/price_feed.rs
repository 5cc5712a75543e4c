//! USD prices from a CoinGecko-compatible `simple/price` endpoint.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::error::DashboardError;

/// Source of USD spot prices.
#[async_trait]
pub trait PriceSource: Send + Sync + std::fmt::Debug {
    /// Current USD price of `asset_id` (e.g. `"ethereum"`).
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Upstream`] when no price can be read.
    async fn usd_price(&self, asset_id: &str) -> Result<f64, DashboardError>;
}

/// HTTP price feed.
#[derive(Debug, Clone)]
pub struct PriceFeed {
    http: reqwest::Client,
    base_url: String,
}

impl PriceFeed {
    /// Creates a feed rooted at `base_url` (e.g. `https://api.coingecko.com/api/v3`).
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PriceSource for PriceFeed {
    async fn usd_price(&self, asset_id: &str) -> Result<f64, DashboardError> {
        let url = format!("{}/simple/price", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("ids", asset_id), ("vs_currencies", "usd")])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DashboardError::Upstream(format!("price request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DashboardError::Upstream(format!(
                "price feed answered {}",
                response.status()
            )));
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|e| DashboardError::Upstream(format!("price decode failed: {e}")))?;
        usd_from_simple_price(&parsed, asset_id).ok_or_else(|| {
            DashboardError::Upstream(format!("no USD price for {asset_id}"))
        })
    }
}

/// Reads `{ "<id>": { "usd": <price> } }`.
fn usd_from_simple_price(body: &Value, asset_id: &str) -> Option<f64> {
    body.get(asset_id)
        .and_then(|v| v.get("usd"))
        .and_then(Value::as_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_nested_usd_price() {
        let body = json!({ "ethereum": { "usd": 3120.55 } });
        assert_eq!(usd_from_simple_price(&body, "ethereum"), Some(3120.55));
    }

    #[test]
    fn missing_asset_is_none() {
        let body = json!({ "ethereum": { "usd": 3120.55 } });
        assert_eq!(usd_from_simple_price(&body, "nym"), None);
        assert_eq!(usd_from_simple_price(&json!({}), "nym"), None);
    }
}
