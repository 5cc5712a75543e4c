//! Best-effort wallet balances across both payout chains.

use std::sync::Arc;

use crate::domain::{BalanceSnapshot, WalletAddresses};
use crate::error::DashboardError;
use crate::upstream::{BalanceSource, PriceSource};
use crate::util::explorer::address_url;
use crate::util::format::round_cents;

/// Collects one [`BalanceSnapshot`] per configured wallet.
///
/// Each wallet settles on its own: a failed lookup drops that wallet's
/// entry and never fails the others. A failed price lookup only drops the
/// USD value.
#[derive(Debug, Clone)]
pub struct BalanceAggregator {
    evm: Arc<dyn BalanceSource>,
    nyx: Arc<dyn BalanceSource>,
    prices: Arc<dyn PriceSource>,
}

impl BalanceAggregator {
    /// Creates an aggregator over the two chain sources and a price feed.
    #[must_use]
    pub fn new(
        evm: Arc<dyn BalanceSource>,
        nyx: Arc<dyn BalanceSource>,
        prices: Arc<dyn PriceSource>,
    ) -> Self {
        Self { evm, nyx, prices }
    }

    /// Looks up every wallet in `wallets` concurrently.
    ///
    /// The result is ordered ETH then NYM. A wallet missing from the result
    /// means its balance is unavailable, not zero.
    pub async fn fetch_balances(&self, wallets: &WalletAddresses) -> Vec<BalanceSnapshot> {
        let eth = async {
            match wallets.eth.as_deref().filter(|a| !a.trim().is_empty()) {
                Some(address) => Some(self.lookup(self.evm.as_ref(), address).await),
                None => None,
            }
        };
        let nym = async {
            let address = wallets.nym.trim();
            if address.is_empty() {
                None
            } else {
                Some(self.lookup(self.nyx.as_ref(), address).await)
            }
        };

        let (eth, nym) = tokio::join!(eth, nym);

        let mut snapshots: Vec<BalanceSnapshot> = [eth, nym]
            .into_iter()
            .flatten()
            .filter_map(|outcome| match outcome {
                Ok(snapshot) => Some(snapshot),
                Err(err) => {
                    tracing::warn!(error = %err, "balance lookup failed; omitting wallet");
                    None
                }
            })
            .collect();
        snapshots.sort_by_key(|s| s.chain);
        snapshots
    }

    async fn lookup(
        &self,
        source: &dyn BalanceSource,
        address: &str,
    ) -> Result<BalanceSnapshot, DashboardError> {
        let chain = source.chain();
        let base_units = source.base_units(address).await.map_err(|err| {
            tracing::warn!(chain = chain.currency(), %address, error = %err, "failed to fetch balance");
            err
        })?;
        let balance = chain.to_display_units(base_units);

        let balance_usd = match self.prices.usd_price(chain.price_id()).await {
            Ok(price) => Some(round_cents(balance * price)),
            Err(err) => {
                tracing::warn!(chain = chain.currency(), error = %err, "failed to fetch price");
                None
            }
        };

        Ok(BalanceSnapshot {
            chain,
            address: address.to_string(),
            balance,
            balance_usd,
            explorer_url: address_url(address, chain.explorer()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::BalanceChain;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FixedBalance {
        chain: BalanceChain,
        base_units: Option<u128>,
    }

    #[async_trait]
    impl BalanceSource for FixedBalance {
        fn chain(&self) -> BalanceChain {
            self.chain
        }

        async fn base_units(&self, _address: &str) -> Result<u128, DashboardError> {
            self.base_units
                .ok_or_else(|| DashboardError::Upstream("node unreachable".to_string()))
        }
    }

    #[derive(Debug)]
    struct FixedPrice(Option<f64>);

    #[async_trait]
    impl PriceSource for FixedPrice {
        async fn usd_price(&self, _asset_id: &str) -> Result<f64, DashboardError> {
            self.0
                .ok_or_else(|| DashboardError::Upstream("rate limited".to_string()))
        }
    }

    fn aggregator(eth: Option<u128>, nym: Option<u128>, price: Option<f64>) -> BalanceAggregator {
        BalanceAggregator::new(
            Arc::new(FixedBalance {
                chain: BalanceChain::Eth,
                base_units: eth,
            }),
            Arc::new(FixedBalance {
                chain: BalanceChain::Nym,
                base_units: nym,
            }),
            Arc::new(FixedPrice(price)),
        )
    }

    fn wallets() -> WalletAddresses {
        WalletAddresses {
            eth: Some("0xabc".to_string()),
            nym: "n1xyz".to_string(),
        }
    }

    #[tokio::test]
    async fn both_chains_succeed() {
        let agg = aggregator(Some(2_000_000_000_000_000_000), Some(1_500_000), Some(2.0));
        let balances = agg.fetch_balances(&wallets()).await;
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].chain, BalanceChain::Eth);
        assert!((balances[0].balance - 2.0).abs() < 1e-9);
        assert_eq!(balances[0].balance_usd, Some(4.0));
        assert_eq!(balances[1].chain, BalanceChain::Nym);
        assert!((balances[1].balance - 1.5).abs() < 1e-9);
        assert_eq!(balances[1].explorer_url, "https://nym.com/explorer/account/n1xyz");
    }

    #[tokio::test]
    async fn evm_failure_keeps_nyx_snapshot() {
        let agg = aggregator(None, Some(1_000_000), Some(0.05));
        let balances = agg.fetch_balances(&wallets()).await;
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].chain, BalanceChain::Nym);
    }

    #[tokio::test]
    async fn price_failure_only_drops_usd() {
        let agg = aggregator(Some(1), Some(1), None);
        let balances = agg.fetch_balances(&wallets()).await;
        assert_eq!(balances.len(), 2);
        assert!(balances.iter().all(|b| b.balance_usd.is_none()));
    }

    #[tokio::test]
    async fn missing_evm_address_skips_evm() {
        let agg = aggregator(Some(1), Some(1_000_000), Some(1.0));
        let wallets = WalletAddresses {
            eth: None,
            nym: "n1xyz".to_string(),
        };
        let balances = agg.fetch_balances(&wallets).await;
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].chain, BalanceChain::Nym);
    }

    #[tokio::test]
    async fn everything_failing_is_empty_not_error() {
        let agg = aggregator(None, None, None);
        assert!(agg.fetch_balances(&wallets()).await.is_empty());
    }
}
