//! A bounded slice of an ordered result set.

use serde::Serialize;

use super::records::{
    ConversionRecord, PaginationEnvelope, SwapRecord, SwapsResponse, TransactionsResponse,
};

/// One page of `T` plus the metadata needed to render pagination controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Records on this page, at most `limit`.
    pub items: Vec<T>,
    /// 1-indexed page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Records across all pages.
    pub total_count: u64,
    /// `ceil(total_count / limit)`.
    pub total_pages: u32,
}

/// `ceil(total / limit)`, `0` for an empty set.
#[must_use]
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if total == 0 || limit == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
}

impl<T> Page<T> {
    /// Builds page `page` of `all` locally.
    ///
    /// Returns records `[(page-1)*limit, min(page*limit, len))`. A page past
    /// the end is empty, not an error. `page` below 1 is treated as 1.
    #[must_use]
    pub fn from_slice(all: &[T], page: u32, limit: u32) -> Self
    where
        T: Clone,
    {
        let page = page.max(1);
        let limit = limit.max(1);
        let start = usize::try_from(u64::from(page - 1) * u64::from(limit)).unwrap_or(usize::MAX);
        let items = all
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();
        let total_count = all.len() as u64;
        Self {
            items,
            page,
            limit,
            total_count,
            total_pages: total_pages(total_count, limit),
        }
    }

    /// Whether this page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transforms every record, keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }

    /// `"1 of 3"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} of {}", self.page, self.total_pages.max(1))
    }

    /// `"Showing 1 to 5 of 12 results"`, or `None` on an empty page.
    #[must_use]
    pub fn showing(&self) -> Option<String> {
        if self.items.is_empty() {
            return None;
        }
        let first = u64::from(self.page.saturating_sub(1)) * u64::from(self.limit) + 1;
        let last = first + self.items.len() as u64 - 1;
        Some(format!(
            "Showing {first} to {last} of {} results",
            self.total_count
        ))
    }

    fn from_envelope(items: Vec<T>, total_count: u64, pagination: PaginationEnvelope) -> Self {
        let limit = pagination.limit.max(1);
        let computed = total_pages(total_count, limit);
        Self {
            items,
            page: pagination.page.max(1),
            limit,
            total_count,
            total_pages: if pagination.total_pages == 0 {
                computed
            } else {
                pagination.total_pages
            },
        }
    }
}

impl From<TransactionsResponse> for Page<ConversionRecord> {
    fn from(resp: TransactionsResponse) -> Self {
        Self::from_envelope(resp.transactions, resp.total_count, resp.pagination)
    }
}

impl From<SwapsResponse> for Page<SwapRecord> {
    fn from(resp: SwapsResponse) -> Self {
        Self::from_envelope(resp.swaps, resp.total_count, resp.pagination)
    }
}
