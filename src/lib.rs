//! # mtm-dashboard
//!
//! Backend-for-frontend of the MTM → NYM conversion admin dashboard.
//!
//! The service reads from several independent upstreams (the conversion
//! backend's REST API, an EVM JSON-RPC node, the Nyx chain's REST endpoint,
//! a price feed and a release host) and turns whatever arrives into
//! render-ready views. Any upstream may fail on its own; the views degrade
//! section by section instead of failing as a whole.
//!
//! ## Architecture
//!
//! ```text
//! Browser / dashctl
//!     │
//!     ├── REST Handlers (api/)          bearer guard, proxies, views
//!     │
//!     ├── ViewService (service/)        list state, section settlement
//!     ├── BalanceAggregator (service/)
//!     ├── DownloadsAggregator (service/)
//!     │
//!     ├── BackendClient (client/)       conversion backend REST API
//!     └── UpstreamProxy, chain sources, price feed (upstream/)
//! ```

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod service;
pub mod upstream;
pub mod util;
