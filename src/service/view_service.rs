//! Assembles dashboard views from the backend, the chains and the release
//! host.
//!
//! Every list is driven through its own [`ListView`], and every section of a
//! composite view settles independently: one failing fetch shows up as that
//! section's error state while the rest of the view still renders.

use std::sync::Arc;

use chrono::Utc;

use super::{BalanceAggregator, DownloadsAggregator};
use crate::client::{DashboardBackend, ListQuery};
use crate::domain::records::DashboardStats;
use crate::domain::views::{MonthlyBar, SectionError, StatCard};
use crate::domain::{
    BalanceSnapshot, ConversionListsView, ConversionRecord, ConversionRow, DownloadsView,
    EthConversionRow, ListView, OverviewView, Page, ReleaseSnapshot, SwapRecord,
};
use crate::error::{ApiError, DashboardError};
use crate::util::format::format_count;

/// Conversions shown under "Recent Conversions".
pub const RECENT_CONVERSIONS: u32 = 5;

const EMPTY_MTM: &str = "No MTM to NYM conversions found.";
const EMPTY_ETH: &str = "No ETH to NYM conversions found.";
const EMPTY_FAILED: &str = "All transactions are processing successfully.";
const EMPTY_RELEASES: &str = "No releases published yet.";

/// Which of the two conversion lists a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionList {
    /// MTM → NYM.
    Mtm,
    /// ETH → NYM.
    Eth,
}

/// Builds every dashboard view.
#[derive(Debug, Clone)]
pub struct ViewService {
    backend: Arc<dyn DashboardBackend>,
    balances: BalanceAggregator,
    downloads: DownloadsAggregator,
    page_size: u32,
}

impl ViewService {
    /// Creates the service. `page_size` is fixed for every list.
    #[must_use]
    pub fn new(
        backend: Arc<dyn DashboardBackend>,
        balances: BalanceAggregator,
        downloads: DownloadsAggregator,
        page_size: u32,
    ) -> Self {
        Self {
            backend,
            balances,
            downloads,
            page_size: page_size.max(1),
        }
    }

    /// Fixed list page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Transactions view: all MTM and ETH conversions, paged independently.
    pub async fn transactions(&self, mtm_page: u32, eth_page: u32) -> ConversionListsView {
        self.conversion_lists(mtm_page, eth_page, "all", EMPTY_MTM, EMPTY_ETH)
            .await
    }

    /// Failed-transactions view: failed MTM and ETH conversions, paged
    /// independently.
    pub async fn failed(&self, mtm_page: u32, eth_page: u32) -> ConversionListsView {
        self.conversion_lists(mtm_page, eth_page, "failed", EMPTY_FAILED, EMPTY_FAILED)
            .await
    }

    /// Full error text of a failed row, the payload of its copy control.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Api`] when the page cannot be fetched and
    /// [`DashboardError::InvalidRequest`] when the row is not on that page or
    /// has no error.
    pub async fn failed_row_error(
        &self,
        list: ConversionList,
        page: u32,
        id: &str,
    ) -> Result<String, DashboardError> {
        let query = ListQuery::page(page.max(1), self.page_size).with_status("failed");
        let error = match list {
            ConversionList::Mtm => self
                .backend
                .conversions(&query)
                .await?
                .items
                .into_iter()
                .find(|r| r.id == id)
                .and_then(|r| ConversionRow::from(&r).error),
            ConversionList::Eth => self
                .backend
                .swaps(&query)
                .await?
                .items
                .into_iter()
                .find(|r| r.id.to_string() == id)
                .and_then(|r| EthConversionRow::from(&r).error),
        };
        error.map(|e| e.full).ok_or_else(|| {
            DashboardError::InvalidRequest(format!("no failed row {id} on page {page}"))
        })
    }

    /// Overview: stats and recent conversions fetched concurrently, then
    /// balances for the wallets the stats name.
    ///
    /// # Errors
    ///
    /// Returns the stats error when stats and recent conversions both fail;
    /// with any section loaded the view is returned with per-section errors.
    pub async fn overview(&self) -> Result<OverviewView, DashboardError> {
        let recent_query = ListQuery {
            limit: Some(RECENT_CONVERSIONS),
            status: Some("all".to_string()),
            ..ListQuery::default()
        };
        let (stats, recent) = futures_util::future::join(
            self.backend.stats(),
            self.backend.conversions(&recent_query),
        )
        .await;

        let mut errors = Vec::new();
        let recent = match recent {
            Ok(page) => Some(page.items.iter().map(ConversionRow::from).collect()),
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch recent transactions");
                errors.push(section_error("recent", &err));
                None
            }
        };

        let stats = match stats {
            Ok(stats) => stats,
            Err(err) if recent.is_none() => return Err(err.into()),
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch dashboard stats");
                errors.push(section_error("stats", &err));
                return Ok(OverviewView {
                    stats: None,
                    monthly: Vec::new(),
                    balances: Vec::new(),
                    recent,
                    errors,
                    generated_at: Utc::now(),
                });
            }
        };

        let balances = self.wallet_balances(&stats).await;
        Ok(OverviewView {
            stats: Some(StatCard::from_stats(&stats)),
            monthly: MonthlyBar::series(&stats.monthly_data),
            balances,
            recent,
            errors,
            generated_at: Utc::now(),
        })
    }

    /// Balances of the service wallets named by the backend.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Api`] when the backend stats cannot be
    /// fetched. Stats without wallet addresses give an empty list, and
    /// individual balance failures are not errors; those wallets are just
    /// missing from the result.
    pub async fn balances(&self) -> Result<Vec<BalanceSnapshot>, DashboardError> {
        let stats = self.backend.stats().await?;
        Ok(self.wallet_balances(&stats).await)
    }

    async fn wallet_balances(&self, stats: &DashboardStats) -> Vec<BalanceSnapshot> {
        match &stats.wallet_addresses {
            Some(wallets) => self.balances.fetch_balances(wallets).await,
            None => {
                tracing::debug!("stats carry no wallet addresses, skipping balances");
                Vec::new()
            }
        }
    }

    /// Downloads view with one page of releases.
    ///
    /// # Errors
    ///
    /// Propagates release-host failures and missing configuration from
    /// [`DownloadsAggregator::fetch_download_stats`].
    pub async fn downloads(&self, page: u32) -> Result<DownloadsView, DashboardError> {
        let stats = self.downloads.fetch_download_stats().await?;

        let mut list = ListView::new(self.page_size);
        let ticket = list.request_page(page);
        let slice = Page::from_slice(&stats.releases, ticket.page(), list.page_size());
        list.complete(ticket, Ok(slice));

        Ok(DownloadsView {
            total_downloads: stats.total_downloads,
            total_downloads_display: format_count(stats.total_downloads),
            releases: list.snapshot(ReleaseSnapshot::clone, EMPTY_RELEASES),
        })
    }

    async fn conversion_lists(
        &self,
        mtm_page: u32,
        eth_page: u32,
        status: &str,
        empty_mtm: &str,
        empty_eth: &str,
    ) -> ConversionListsView {
        let (mtm, eth) = tokio::join!(
            self.load_conversions(mtm_page, status),
            self.load_swaps(eth_page, status),
        );
        ConversionListsView {
            mtm: mtm.snapshot(|r| ConversionRow::from(r), empty_mtm),
            eth: eth.snapshot(|r| EthConversionRow::from(r), empty_eth),
        }
    }

    async fn load_conversions(&self, page: u32, status: &str) -> ListView<ConversionRecord> {
        let mut list = ListView::new(self.page_size);
        let ticket = list.request_page(page);
        let query = ListQuery::page(ticket.page(), list.page_size()).with_status(status);
        let result = self.backend.conversions(&query).await;
        log_list_failure("mtm", &result);
        list.complete(ticket, result);
        list
    }

    async fn load_swaps(&self, page: u32, status: &str) -> ListView<SwapRecord> {
        let mut list = ListView::new(self.page_size);
        let ticket = list.request_page(page);
        let query = ListQuery::page(ticket.page(), list.page_size()).with_status(status);
        let result = self.backend.swaps(&query).await;
        log_list_failure("eth", &result);
        list.complete(ticket, result);
        list
    }
}

fn section_error(section: &str, err: &ApiError) -> SectionError {
    SectionError {
        section: section.to_string(),
        status: err.status,
        message: err.message.clone(),
    }
}

fn log_list_failure<T>(list: &str, result: &Result<Page<T>, ApiError>) {
    if let Err(err) = result {
        tracing::warn!(list, status = err.status, message = %err.message, "list fetch failed");
    }
}
