//! Typed client for the MTM backend REST API.

pub mod backend;

pub use backend::{BackendClient, DashboardBackend, ListQuery};
