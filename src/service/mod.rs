//! Service layer: view assembly over the backend and upstream sources.
//!
//! [`ViewService`] builds every dashboard view; it delegates wallet
//! balances to [`BalanceAggregator`] and release statistics to
//! [`DownloadsAggregator`].

pub mod balance_service;
pub mod downloads_service;
pub mod view_service;

pub use balance_service::BalanceAggregator;
pub use downloads_service::DownloadsAggregator;
pub use view_service::{ConversionList, ViewService};
