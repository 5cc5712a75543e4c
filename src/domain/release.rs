//! App releases and their download counts.
//!
//! The release host speaks the Gitea/GitHub releases schema. Only the
//! Android package (`.apk`) asset of each release is counted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::util::format::{extract_version_from_tag, format_file_size};

/// File extension of the installable package.
pub const PACKAGE_EXTENSION: &str = ".apk";

/// Downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    /// File name.
    pub name: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Times the file was downloaded.
    #[serde(default)]
    pub download_count: u64,
    /// Public download link.
    #[serde(default)]
    pub browser_download_url: String,
}

/// Release entry as returned by the release-listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    /// Host-assigned identifier.
    pub id: u64,
    /// Git tag the release was cut from.
    pub tag_name: String,
    /// Creation time of the release object.
    pub created_at: DateTime<Utc>,
    /// Publication time; drafts have none.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Attached files.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A release as shown on the downloads view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReleaseSnapshot {
    /// Host-assigned identifier.
    pub id: String,
    /// Version extracted from the tag.
    pub version: String,
    /// Package downloads, `0` when the release has no package.
    pub downloads: u64,
    /// Human-readable package size, `"Unknown"` without a package.
    pub file_size: String,
    /// Publication time, falling back to creation time.
    pub release_date: DateTime<Utc>,
    /// Package download link.
    pub download_url: Option<String>,
    /// Raw tag name.
    pub tag_name: String,
}

/// Download totals across all releases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DownloadStats {
    /// Sum of package downloads over `releases`.
    pub total_downloads: u64,
    /// Newest first.
    pub releases: Vec<ReleaseSnapshot>,
}

impl ReleaseSnapshot {
    /// Derives the downloads-view entry of a release.
    #[must_use]
    pub fn from_release(release: &Release) -> Self {
        let package = release
            .assets
            .iter()
            .find(|asset| asset.name.ends_with(PACKAGE_EXTENSION));

        Self {
            id: release.id.to_string(),
            version: extract_version_from_tag(&release.tag_name),
            downloads: package.map_or(0, |a| a.download_count),
            file_size: package.map_or_else(|| "Unknown".to_string(), |a| format_file_size(a.size)),
            release_date: release.published_at.unwrap_or(release.created_at),
            download_url: package
                .map(|a| a.browser_download_url.clone())
                .filter(|url| !url.is_empty()),
            tag_name: release.tag_name.clone(),
        }
    }
}

impl DownloadStats {
    /// Drops asset-less releases, derives each entry, sorts newest first and
    /// sums the downloads.
    #[must_use]
    pub fn from_releases(releases: &[Release]) -> Self {
        let mut snapshots: Vec<ReleaseSnapshot> = releases
            .iter()
            .filter(|release| !release.assets.is_empty())
            .map(ReleaseSnapshot::from_release)
            .collect();
        snapshots.sort_by(|a, b| b.release_date.cmp(&a.release_date));

        let total_downloads = snapshots.iter().map(|r| r.downloads).sum();
        Self {
            total_downloads,
            releases: snapshots,
        }
    }
}
