//! App download statistics from the release host.

use std::sync::Arc;

use crate::domain::DownloadStats;
use crate::error::DashboardError;
use crate::upstream::UpstreamProxy;

/// Builds [`DownloadStats`] from the proxied release list.
#[derive(Debug, Clone)]
pub struct DownloadsAggregator {
    proxy: Arc<UpstreamProxy>,
}

impl DownloadsAggregator {
    /// Creates an aggregator reading through `proxy`.
    #[must_use]
    pub fn new(proxy: Arc<UpstreamProxy>) -> Self {
        Self { proxy }
    }

    /// Fetches all releases and derives per-release and total downloads.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Misconfigured`] without a release URL and
    /// [`DashboardError::Upstream`] when the host fails or answers with
    /// something that is not a release list.
    pub async fn fetch_download_stats(&self) -> Result<DownloadStats, DashboardError> {
        let releases = self.proxy.releases().await?;
        let stats = DownloadStats::from_releases(&releases);
        tracing::debug!(
            releases = stats.releases.len(),
            total_downloads = stats.total_downloads,
            "download stats assembled"
        );
        Ok(stats)
    }
}
