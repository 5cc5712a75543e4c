//! Table rows of the transaction views.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::records::{ConversionRecord, ConversionStatus, SwapRecord};
use crate::util::ExplorerChain;
use crate::util::explorer::tx_url;
use crate::util::format::{format_timestamp, shorten, truncate_error};

/// Characters of an error shown inline; the rest is reachable via copy.
pub const ERROR_PREVIEW_CHARS: usize = 40;

const HASH_HEAD: usize = 12;
const HASH_TAIL: usize = 12;
const ADDRESS_EDGE: usize = 8;

/// Explorer link of one chain transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TxLink {
    /// Chain the transaction lives on.
    pub chain: ExplorerChain,
    /// Full hash.
    pub hash: String,
    /// `head...tail` form for narrow columns.
    pub short_hash: String,
    /// Explorer page.
    pub url: String,
}

impl TxLink {
    fn new(hash: &str, chain: ExplorerChain) -> Self {
        Self {
            chain,
            hash: hash.to_string(),
            short_hash: shorten(hash, HASH_HEAD, HASH_TAIL),
            url: tx_url(hash, chain),
        }
    }

    fn optional(hash: Option<&str>, chain: ExplorerChain) -> Option<Self> {
        hash.filter(|h| !h.trim().is_empty())
            .map(|h| Self::new(h, chain))
    }
}

/// Error text of a failed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RowError {
    /// First [`ERROR_PREVIEW_CHARS`] characters.
    pub preview: String,
    /// Full text, the payload of the row's copy control.
    pub full: String,
}

impl RowError {
    fn optional(error: Option<&str>) -> Option<Self> {
        error
            .filter(|e| !e.trim().is_empty())
            .map(|e| Self {
                preview: truncate_error(e, ERROR_PREVIEW_CHARS),
                full: e.to_string(),
            })
    }
}

/// Row of the MTM → NYM list.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ConversionRow {
    /// Backend identifier.
    pub id: String,
    /// Derived outcome.
    pub status: ConversionStatus,
    /// Solana leg.
    pub source: Option<TxLink>,
    /// Nyx leg, once paid out.
    pub destination: Option<TxLink>,
    /// Solana sender, shortened.
    pub from_address: String,
    /// Failure text, if any.
    pub error: Option<RowError>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Creation time, formatted.
    pub created_at_display: String,
}

impl From<&ConversionRecord> for ConversionRow {
    fn from(record: &ConversionRecord) -> Self {
        Self {
            id: record.id.clone(),
            status: record.status(),
            source: TxLink::optional(Some(&record.transaction_hash), ExplorerChain::Solana),
            destination: TxLink::optional(
                record.nym_transaction_hash.as_deref(),
                ExplorerChain::Nym,
            ),
            from_address: shorten(&record.from_address, ADDRESS_EDGE, ADDRESS_EDGE),
            error: RowError::optional(record.error.as_deref()),
            created_at: record.created_at,
            created_at_display: format_timestamp(&record.created_at),
        }
    }
}

/// Row of the ETH → NYM list: a swap paired with its bridge leg.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EthConversionRow {
    /// Swap identifier.
    pub id: u64,
    /// Outcome across both legs.
    pub status: ConversionStatus,
    /// ETH swapped.
    pub eth_amount: String,
    /// NYM bridged, once the bridge leg exists.
    pub nym_amount: Option<String>,
    /// Swap transaction.
    pub swap: Option<TxLink>,
    /// Bridge deposit transaction.
    pub bridge: Option<TxLink>,
    /// First failure across both legs.
    pub error: Option<RowError>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Creation time, formatted.
    pub created_at_display: String,
}

impl From<&SwapRecord> for EthConversionRow {
    fn from(record: &SwapRecord) -> Self {
        let bridge = record.bridge_transaction.as_ref();
        Self {
            id: record.id,
            status: record.status(),
            eth_amount: record.eth_amount.clone(),
            nym_amount: bridge.map(|b| b.nym_amount.clone()),
            swap: TxLink::optional(record.transaction_hash.as_deref(), ExplorerChain::Ethereum),
            bridge: TxLink::optional(
                bridge.and_then(|b| b.eth_transaction_hash.as_deref()),
                ExplorerChain::Ethereum,
            ),
            error: RowError::optional(record.error()),
            created_at: record.created_at,
            created_at_display: format_timestamp(&record.created_at),
        }
    }
}
