//! Assembled dashboard views, ready to render.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::balance::BalanceSnapshot;
use super::list_view::ListSnapshot;
use super::records::{DashboardStats, MonthlyData};
use super::release::ReleaseSnapshot;
use super::rows::{ConversionRow, EthConversionRow};
use crate::util::format::format_count;

/// The two independent conversion lists shown side by side.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ConversionListsView {
    /// MTM → NYM conversions.
    #[schema(value_type = Object)]
    pub mtm: ListSnapshot<ConversionRow>,
    /// ETH → NYM conversions.
    #[schema(value_type = Object)]
    pub eth: ListSnapshot<EthConversionRow>,
}

/// One headline figure on the overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatCard {
    /// Caption.
    pub name: String,
    /// Raw value.
    pub value: u64,
    /// Value with thousands separators.
    pub display: String,
}

impl StatCard {
    fn new(name: &str, value: u64) -> Self {
        Self {
            name: name.to_string(),
            value,
            display: format_count(value),
        }
    }

    /// The four overview cards, in display order.
    #[must_use]
    pub fn from_stats(stats: &DashboardStats) -> Vec<Self> {
        vec![
            Self::new("Total MTM to NYM Conversions", stats.total_conversions),
            Self::new("Successful Conversions", stats.successful_conversions),
            Self::new("Failed Conversions", stats.failed_conversions),
            Self::new("Total Downloads", stats.total_downloads),
        ]
    }
}

/// One month of the conversions trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyBar {
    /// Month label.
    pub month: String,
    /// Conversions that month.
    pub total_conversions: u64,
    /// Successful conversions.
    pub successful_conversions: u64,
    /// Failed conversions.
    pub failed_conversions: u64,
    /// Height relative to the busiest month, in `0.0..=1.0`.
    pub share: f64,
}

impl MonthlyBar {
    /// Scales every month against the busiest one.
    #[must_use]
    pub fn series(months: &[MonthlyData]) -> Vec<Self> {
        let max = months
            .iter()
            .map(|m| m.total_conversions)
            .max()
            .unwrap_or(0)
            .max(1);
        months
            .iter()
            .map(|m| {
                #[allow(clippy::cast_precision_loss)]
                let share = m.total_conversions as f64 / max as f64;
                Self {
                    month: m.month.clone(),
                    total_conversions: m.total_conversions,
                    successful_conversions: m.successful_conversions,
                    failed_conversions: m.failed_conversions,
                    share,
                }
            })
            .collect()
    }
}

/// A section of a view that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SectionError {
    /// Section name (`stats`, `recent`, ...).
    pub section: String,
    /// Upstream status, `0` when no response arrived.
    pub status: u16,
    /// Failure message.
    pub message: String,
}

/// Landing page: headline stats, trend, balances and latest conversions.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OverviewView {
    /// Headline cards, absent when stats failed.
    pub stats: Option<Vec<StatCard>>,
    /// Trend chart.
    pub monthly: Vec<MonthlyBar>,
    /// Wallet balances that could be fetched.
    pub balances: Vec<BalanceSnapshot>,
    /// Latest conversions, absent when that fetch failed.
    pub recent: Option<Vec<ConversionRow>>,
    /// Sections that failed.
    pub errors: Vec<SectionError>,
    /// Assembly time.
    pub generated_at: DateTime<Utc>,
}

/// Download statistics with a page of releases.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DownloadsView {
    /// Package downloads across all releases.
    pub total_downloads: u64,
    /// Display form of [`Self::total_downloads`].
    pub total_downloads_display: String,
    /// Releases, newest first.
    #[schema(value_type = Object)]
    pub releases: ListSnapshot<ReleaseSnapshot>,
}
