//! Records served by the MTM backend REST API.
//!
//! Field names follow the backend's camelCase wire format. Every record is
//! a read-only snapshot; nothing here is ever written back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::balance::WalletAddresses;

/// Outcome of a conversion as shown in the list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConversionStatus {
    /// Every leg landed.
    Success,
    /// Some leg reported an error.
    Failed,
    /// Neither a destination hash nor an error yet.
    Pending,
}

impl ConversionStatus {
    /// Label used in tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failed => "Failed",
            Self::Pending => "Pending",
        }
    }
}

/// One MTM → NYM conversion: a Solana transfer in, a Nyx send out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    /// Backend identifier.
    pub id: String,
    /// Solana transaction that delivered the MTM.
    pub transaction_hash: String,
    /// Solana sender.
    pub from_address: String,
    /// Nyx transaction that paid out NYM, once sent.
    #[serde(default)]
    pub nym_transaction_hash: Option<String>,
    /// Failure reason, if the conversion failed.
    #[serde(default)]
    pub error: Option<String>,
    /// When the backend first saw the conversion.
    pub created_at: DateTime<Utc>,
}

impl ConversionRecord {
    /// Derives the status from error and destination-hash presence.
    ///
    /// A record carrying both is inconsistent upstream data; it is reported
    /// as failed.
    #[must_use]
    pub fn status(&self) -> ConversionStatus {
        match (non_blank(&self.error), non_blank(&self.nym_transaction_hash)) {
            (Some(_), Some(_)) => {
                tracing::warn!(id = %self.id, "conversion has both a NYM hash and an error");
                ConversionStatus::Failed
            }
            (Some(_), None) => ConversionStatus::Failed,
            (None, Some(_)) => ConversionStatus::Success,
            (None, None) => ConversionStatus::Pending,
        }
    }
}

/// Bridge leg of an ETH → NYM conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRecord {
    /// Backend identifier.
    pub id: u64,
    /// NYM delivered, in display units as a decimal string.
    pub nym_amount: String,
    /// Bridge deposit transaction on the EVM chain.
    #[serde(default)]
    pub eth_transaction_hash: Option<String>,
    /// Failure reason.
    #[serde(default)]
    pub error: Option<String>,
}

/// Swap leg of an ETH → NYM conversion, with its bridge leg when one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapRecord {
    /// Backend identifier.
    pub id: u64,
    /// ETH swapped, as a decimal string.
    pub eth_amount: String,
    /// Swap transaction on the EVM chain.
    #[serde(default)]
    pub transaction_hash: Option<String>,
    /// Failure reason.
    #[serde(default)]
    pub error: Option<String>,
    /// When the swap was recorded.
    pub created_at: DateTime<Utc>,
    /// Matching bridge leg.
    #[serde(default)]
    pub bridge_transaction: Option<BridgeRecord>,
}

impl SwapRecord {
    /// First error across both legs, bridge first.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.bridge_transaction
            .as_ref()
            .and_then(|b| non_blank(&b.error))
            .or_else(|| non_blank(&self.error))
    }

    /// Success needs a hash and no error on both legs.
    #[must_use]
    pub fn status(&self) -> ConversionStatus {
        if self.error().is_some() {
            return ConversionStatus::Failed;
        }
        let swap_landed = non_blank(&self.transaction_hash).is_some();
        let bridge_landed = self
            .bridge_transaction
            .as_ref()
            .is_some_and(|b| non_blank(&b.eth_transaction_hash).is_some());
        if swap_landed && bridge_landed {
            ConversionStatus::Success
        } else {
            ConversionStatus::Pending
        }
    }
}

/// Per-month conversion counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyData {
    /// Month label as given by the backend (e.g. `"Aug"`).
    pub month: String,
    /// Conversions started that month.
    pub total_conversions: u64,
    /// Conversions that succeeded.
    pub successful_conversions: u64,
    /// Conversions that failed.
    pub failed_conversions: u64,
}

/// Aggregate figures for the overview page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// All MTM → NYM conversions.
    pub total_conversions: u64,
    /// Successful conversions.
    pub successful_conversions: u64,
    /// Failed conversions.
    pub failed_conversions: u64,
    /// App downloads as counted by the backend.
    pub total_downloads: u64,
    /// Time series for the trend chart.
    #[serde(default)]
    pub monthly_data: Vec<MonthlyData>,
    /// Service wallets whose balances the overview shows. Older backends
    /// leave this out.
    #[serde(default)]
    pub wallet_addresses: Option<WalletAddresses>,
}

/// Pagination block of a backend list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationEnvelope {
    /// 1-indexed page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Page count reported by the backend.
    pub total_pages: u32,
}

/// `GET /api/transactions/conversions` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsResponse {
    /// Records on this page.
    pub transactions: Vec<ConversionRecord>,
    /// Records across all pages.
    pub total_count: u64,
    /// Page position.
    pub pagination: PaginationEnvelope,
}

/// `GET /api/swaps` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapsResponse {
    /// Records on this page.
    pub swaps: Vec<SwapRecord>,
    /// Records across all pages.
    pub total_count: u64,
    /// Page position.
    pub pagination: PaginationEnvelope,
}

/// Treats `Some("")` like `None`; the backend is not consistent about it.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
