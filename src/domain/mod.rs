//! Domain layer: records, pages, balances, releases and list state.
//!
//! Everything here is a read-only snapshot of upstream data plus the pure
//! logic that turns it into view state. No I/O happens in this module.

pub mod balance;
pub mod list_view;
pub mod page;
pub mod records;
pub mod release;
pub mod rows;
pub mod views;

pub use balance::{BalanceChain, BalanceSnapshot, WalletAddresses};
pub use list_view::{FetchTicket, ListSnapshot, ListState, ListView, PaginationInfo};
pub use page::Page;
pub use records::{
    BridgeRecord, ConversionRecord, ConversionStatus, DashboardStats, MonthlyData, SwapRecord,
};
pub use release::{DownloadStats, Release, ReleaseSnapshot};
pub use rows::{ConversionRow, EthConversionRow};
pub use views::{ConversionListsView, DownloadsView, OverviewView};
