//! Per-list fetch state machine.
//!
//! Each list on a view owns one [`ListView`]: its own page cursor, its own
//! state and its own request generation. Only the response matching the
//! most recently issued [`FetchTicket`] is applied; anything older is a
//! stale answer to a page the user has already navigated away from.
//!
//! The generation guard only matters for a caller that keeps one view
//! alive across page changes. The HTTP views are stateless, so
//! [`ViewService`](crate::service::ViewService) builds a fresh view per
//! request and issues a single ticket; there the view is just the state
//! machine that turns a fetch result into a [`ListSnapshot`].

use serde::Serialize;

use super::page::Page;
use crate::error::ApiError;

/// Proof of a fetch issued by [`ListView::request_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    page: u32,
}

impl FetchTicket {
    /// Page this fetch was issued for.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Generation the fetch was issued under.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Lifecycle of one list: `Idle → Loading → {Loaded, Errored}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    /// Nothing requested yet.
    Idle,
    /// A fetch for `page` is in flight.
    Loading {
        /// Requested page.
        page: u32,
    },
    /// The latest fetch succeeded.
    Loaded(Page<T>),
    /// The latest fetch failed.
    Errored {
        /// Requested page.
        page: u32,
        /// Message to show in place of the rows.
        message: String,
    },
}

/// State machine and pagination cursor of a single list.
#[derive(Debug)]
pub struct ListView<T> {
    page_size: u32,
    current_page: u32,
    generation: u64,
    state: ListState<T>,
}

impl<T> ListView<T> {
    /// Creates an idle list with a fixed page size.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            generation: 0,
            state: ListState::Idle,
        }
    }

    /// Fixed page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Page the cursor points at.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ListState<T> {
        &self.state
    }

    /// Moves the cursor to `page` and enters `Loading`.
    ///
    /// Every call issues a new generation, so a page revisited later is
    /// fetched again rather than served from memory.
    pub fn request_page(&mut self, page: u32) -> FetchTicket {
        let page = page.max(1);
        self.generation += 1;
        self.current_page = page;
        self.state = ListState::Loading { page };
        FetchTicket {
            generation: self.generation,
            page,
        }
    }

    /// Applies a fetch result if `ticket` is the latest one issued.
    ///
    /// Returns `false` and leaves the state untouched for stale tickets.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Page<T>, ApiError>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                latest = self.generation,
                page = ticket.page,
                "discarding stale list response"
            );
            return false;
        }
        self.state = match result {
            Ok(page) => ListState::Loaded(page),
            Err(err) => ListState::Errored {
                page: ticket.page,
                message: err.message,
            },
        };
        true
    }

    /// Renders the current state for display.
    ///
    /// `empty_message` is shown for a successful fetch with zero records and
    /// is deliberately distinct from any error message.
    #[must_use]
    pub fn snapshot<R>(&self, render: impl FnMut(&T) -> R, empty_message: &str) -> ListSnapshot<R> {
        match &self.state {
            ListState::Idle => ListSnapshot::Idle,
            ListState::Loading { .. } => ListSnapshot::Loading {
                placeholder_rows: self.page_size,
            },
            ListState::Errored { message, .. } => ListSnapshot::Errored {
                message: message.clone(),
            },
            ListState::Loaded(page) if page.is_empty() => ListSnapshot::Empty {
                message: empty_message.to_string(),
                pagination: PaginationInfo::from_page(page),
            },
            ListState::Loaded(page) => ListSnapshot::Loaded {
                rows: page.items.iter().map(render).collect(),
                pagination: PaginationInfo::from_page(page),
            },
        }
    }
}

/// Pagination controls of a rendered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    /// Current page.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total pages.
    pub total_pages: u32,
    /// Total records.
    pub total_count: u64,
    /// `"1 of 3"`.
    pub label: String,
    /// `"Showing 1 to 5 of 12 results"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showing: Option<String>,
    /// Whether a previous page exists.
    pub has_previous: bool,
    /// Whether a next page exists.
    pub has_next: bool,
}

impl PaginationInfo {
    fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
            total_count: page.total_count,
            label: page.label(),
            showing: page.showing(),
            has_previous: page.page > 1,
            has_next: page.page < page.total_pages,
        }
    }
}

/// Display form of a [`ListView`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ListSnapshot<R> {
    /// Nothing requested.
    Idle,
    /// Placeholder rows while the fetch is in flight.
    Loading {
        /// Number of skeleton rows to draw.
        placeholder_rows: u32,
    },
    /// Fetch failed.
    Errored {
        /// Captured failure message.
        message: String,
    },
    /// Fetch succeeded with zero records.
    Empty {
        /// Empty-state text.
        message: String,
        /// Pagination of the empty page.
        pagination: PaginationInfo,
    },
    /// One row per record.
    Loaded {
        /// Rendered rows.
        rows: Vec<R>,
        /// Pagination controls.
        pagination: PaginationInfo,
    },
}

impl<R> ListSnapshot<R> {
    /// Rows, empty for every non-loaded state.
    #[must_use]
    pub fn rows(&self) -> &[R] {
        match self {
            Self::Loaded { rows, .. } => rows,
            _ => &[],
        }
    }

    /// Pagination controls, when a page was loaded.
    #[must_use]
    pub const fn pagination(&self) -> Option<&PaginationInfo> {
        match self {
            Self::Loaded { pagination, .. } | Self::Empty { pagination, .. } => Some(pagination),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn page_of(items: Vec<u32>, page: u32, total: u64) -> Page<u32> {
        Page {
            items,
            page,
            limit: 5,
            total_count: total,
            total_pages: super::super::page::total_pages(total, 5),
        }
    }

    #[test]
    fn starts_idle() {
        let view: ListView<u32> = ListView::new(5);
        assert_eq!(view.state(), &ListState::Idle);
        assert_eq!(view.snapshot(|n| *n, "none"), ListSnapshot::Idle);
    }

    #[test]
    fn loading_renders_placeholders() {
        let mut view: ListView<u32> = ListView::new(5);
        let _ticket = view.request_page(2);
        assert_eq!(view.current_page(), 2);
        assert_eq!(
            view.snapshot(|n| *n, "none"),
            ListSnapshot::Loading { placeholder_rows: 5 }
        );
    }

    #[test]
    fn loaded_page_renders_rows_and_label() {
        let mut view = ListView::new(5);
        let ticket = view.request_page(1);
        assert!(view.complete(ticket, Ok(page_of(vec![1, 2, 3, 4, 5], 1, 12))));

        let snapshot = view.snapshot(|n| n * 10, "none");
        assert_eq!(snapshot.rows(), &[10, 20, 30, 40, 50]);
        let Some(pagination) = snapshot.pagination() else {
            panic!("loaded lists carry pagination");
        };
        assert_eq!(pagination.label, "1 of 3");
        assert!(pagination.has_next);
        assert!(!pagination.has_previous);
    }

    #[test]
    fn empty_and_errored_are_distinct() {
        let mut empty = ListView::new(5);
        let ticket = empty.request_page(1);
        empty.complete(ticket, Ok(page_of(Vec::new(), 1, 0)));
        assert!(matches!(
            empty.snapshot(|n: &u32| *n, "No conversions found"),
            ListSnapshot::Empty { ref message, .. } if message == "No conversions found"
        ));

        let mut errored: ListView<u32> = ListView::new(5);
        let ticket = errored.request_page(1);
        errored.complete(ticket, Err(ApiError::transport("connection refused")));
        assert_eq!(
            errored.snapshot(|n| *n, "No conversions found"),
            ListSnapshot::Errored {
                message: "connection refused".to_string()
            }
        );
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut view = ListView::new(5);
        let first = view.request_page(1);
        let second = view.request_page(2);

        assert!(view.complete(second, Ok(page_of(vec![6, 7], 2, 7))));
        assert!(!view.complete(first, Ok(page_of(vec![1, 2, 3, 4, 5], 1, 7))));

        let ListState::Loaded(page) = view.state() else {
            panic!("second response should be applied");
        };
        assert_eq!(page.page, 2);
        assert_eq!(page.items, vec![6, 7]);
    }

    #[test]
    fn revisiting_a_page_issues_a_new_fetch() {
        let mut view: ListView<u32> = ListView::new(5);
        let a = view.request_page(1);
        let _ = view.request_page(2);
        let b = view.request_page(1);
        assert_eq!(a.page(), b.page());
        assert!(b.generation() > a.generation());
    }

    #[test]
    fn independent_lists_do_not_share_cursors() {
        let mut mtm: ListView<u32> = ListView::new(5);
        let mut eth: ListView<u32> = ListView::new(5);
        let _ = mtm.request_page(3);
        let _ = eth.request_page(1);
        assert_eq!(mtm.current_page(), 3);
        assert_eq!(eth.current_page(), 1);
    }
}
