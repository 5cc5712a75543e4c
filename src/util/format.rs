//! Display formatting: sizes, versions, hashes, timestamps.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

const SIZE_UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

/// Release tags look like `mtm-vpn-android-v1.8.0-mtm-0.1.3`.
static VERSION_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"v?(\d+\.\d+\.\d+(?:-mtm-\d+\.\d+\.\d+)?)").ok());

/// Formats a byte count with binary prefixes.
///
/// Bytes are printed without decimals, every higher tier with one:
/// `1023` → `"1023 B"`, `1024` → `"1.0 KiB"`, `1048576` → `"1.0 MiB"`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let mut size = bytes as f64;
    let mut tier = 0usize;
    while size >= 1024.0 && tier < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        tier += 1;
    }
    let unit = SIZE_UNITS.get(tier).copied().unwrap_or("B");
    if tier == 0 {
        format!("{bytes} {unit}")
    } else {
        format!("{size:.1} {unit}")
    }
}

/// Pulls the semantic version out of a release tag.
///
/// Returns the first `X.Y.Z` run (with an optional `-mtm-X.Y.Z` build
/// suffix) without a leading `v`, or the tag unchanged when nothing matches.
#[must_use]
pub fn extract_version_from_tag(tag_name: &str) -> String {
    VERSION_PATTERN
        .as_ref()
        .and_then(|re| re.captures(tag_name))
        .and_then(|caps| caps.get(1))
        .map_or_else(|| tag_name.to_string(), |m| m.as_str().to_string())
}

/// Abbreviates a hash or address as `head...tail`.
///
/// Strings that would not get shorter are returned as-is.
#[must_use]
pub fn shorten(value: &str, head: usize, tail: usize) -> String {
    let len = value.chars().count();
    if len <= head + tail + 3 {
        return value.to_string();
    }
    let start: String = value.chars().take(head).collect();
    let end: String = value.chars().skip(len - tail).collect();
    format!("{start}...{end}")
}

/// Cuts an error message to `max` characters, marking the cut with `...`.
#[must_use]
pub fn truncate_error(message: &str, max: usize) -> String {
    if message.chars().count() <= max {
        return message.to_string();
    }
    let kept: String = message.chars().take(max).collect();
    format!("{kept}...")
}

/// `2025-08-24 10:30:00 UTC`.
#[must_use]
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Groups thousands: `1234567` → `"1,234,567"`.
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rounds a fiat amount to cents.
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
