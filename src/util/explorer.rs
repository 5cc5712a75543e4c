//! Block-explorer URL construction.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Chain family an explorer link points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExplorerChain {
    /// Source chain of MTM conversions.
    Solana,
    /// EVM chain of the ETH swap leg.
    Ethereum,
    /// Nyx, the Cosmos chain NYM is delivered on.
    Nym,
}

impl ExplorerChain {
    /// Display name of the explorer, as shown in "View on ..." links.
    #[must_use]
    pub const fn explorer_name(self) -> &'static str {
        match self {
            Self::Solana => "Solana Explorer",
            Self::Ethereum => "Etherscan",
            Self::Nym => "Nym Explorer",
        }
    }
}

/// URL of a transaction page.
#[must_use]
pub fn tx_url(hash: &str, chain: ExplorerChain) -> String {
    match chain {
        ExplorerChain::Solana => format!("https://explorer.solana.com/tx/{hash}"),
        ExplorerChain::Ethereum => format!("https://etherscan.io/tx/{hash}"),
        ExplorerChain::Nym => format!("https://ping.pub/nyx/tx/{hash}"),
    }
}

/// URL of an account page.
#[must_use]
pub fn address_url(address: &str, chain: ExplorerChain) -> String {
    match chain {
        ExplorerChain::Solana => format!("https://explorer.solana.com/address/{address}"),
        ExplorerChain::Ethereum => format!("https://etherscan.io/address/{address}"),
        ExplorerChain::Nym => format!("https://nym.com/explorer/account/{address}"),
    }
}
