//! Outbound calls to everything that is not the backend REST API.
//!
//! - [`proxy`] forwards to the EVM JSON-RPC node and the release host.
//! - [`chain`] reads wallet balances on the EVM and Nyx chains.
//! - [`price_feed`] reads USD prices.

pub mod chain;
pub mod price_feed;
pub mod proxy;

pub use chain::{BalanceSource, EvmBalanceSource, NyxBalanceSource};
pub use price_feed::{PriceFeed, PriceSource};
pub use proxy::{UpstreamProxy, UpstreamReply};
