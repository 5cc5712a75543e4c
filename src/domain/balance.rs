//! Wallet balances across the two payout chains.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::util::ExplorerChain;

/// Chain a service wallet lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BalanceChain {
    /// EVM chain, balance in ETH.
    Eth,
    /// Nyx chain, balance in NYM.
    Nym,
}

impl BalanceChain {
    /// Ticker shown next to the amount.
    #[must_use]
    pub const fn currency(self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Nym => "NYM",
        }
    }

    /// Decimal places between the base unit (wei, unym) and the display unit.
    #[must_use]
    pub const fn decimals(self) -> u32 {
        match self {
            Self::Eth => 18,
            Self::Nym => 6,
        }
    }

    /// Asset identifier on the price feed.
    #[must_use]
    pub const fn price_id(self) -> &'static str {
        match self {
            Self::Eth => "ethereum",
            Self::Nym => "nym",
        }
    }

    /// Explorer family for address links.
    #[must_use]
    pub const fn explorer(self) -> ExplorerChain {
        match self {
            Self::Eth => ExplorerChain::Ethereum,
            Self::Nym => ExplorerChain::Nym,
        }
    }

    /// Converts an integer amount in base units to display units.
    #[must_use]
    pub fn to_display_units(self, base_units: u128) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let raw = base_units as f64;
        raw / 10f64.powi(self.decimals() as i32)
    }
}

/// Addresses of the service wallets, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct WalletAddresses {
    /// EVM wallet, when the deployment has one.
    #[serde(default)]
    pub eth: Option<String>,
    /// Nyx wallet.
    pub nym: String,
}

/// Balance of one wallet at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BalanceSnapshot {
    /// Chain the wallet lives on.
    pub chain: BalanceChain,
    /// Wallet address.
    pub address: String,
    /// Amount in display units.
    pub balance: f64,
    /// USD value, absent when the price feed was unavailable.
    pub balance_usd: Option<f64>,
    /// Explorer page of the wallet.
    pub explorer_url: String,
}
