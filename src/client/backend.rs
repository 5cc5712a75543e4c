//! Backend REST client.
//!
//! Every failure is normalized into [`ApiError`]: a response with a
//! non-success status keeps that status (and its JSON body, when there is
//! one); anything that never produced a usable response gets status `0`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::records::{SwapsResponse, TransactionsResponse};
use crate::domain::{ConversionRecord, DashboardStats, Page, SwapRecord};
use crate::error::ApiError;

/// Query string of the list endpoints. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    /// 1-indexed page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Status filter (`all`, `success`, `failed`, `pending`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Conversion type filter.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ListQuery {
    /// Query for one page at a fixed size.
    #[must_use]
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Adds a status filter.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Read access to the backend, the seam the view service is built on.
///
/// # Errors
///
/// Every method fails with an [`ApiError`]: status `0` when no usable
/// response arrived, the server's status otherwise.
#[async_trait]
pub trait DashboardBackend: Send + Sync + std::fmt::Debug {
    /// `GET /api/dashboard/stats`.
    ///
    /// # Errors
    ///
    /// See the trait docs.
    async fn stats(&self) -> Result<DashboardStats, ApiError>;

    /// `GET /api/transactions/conversions`.
    ///
    /// # Errors
    ///
    /// See the trait docs.
    async fn conversions(&self, query: &ListQuery) -> Result<Page<ConversionRecord>, ApiError>;

    /// `GET /api/swaps`. The `type` filter does not apply and is dropped.
    ///
    /// # Errors
    ///
    /// See the trait docs.
    async fn swaps(&self, query: &ListQuery) -> Result<Page<SwapRecord>, ApiError>;
}

/// HTTP implementation of [`DashboardBackend`].
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] (status `0`) if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::transport(e.to_string()))?;
        Ok(Self::with_http(base_url, http))
    }

    /// Creates a client sharing an existing connection pool.
    #[must_use]
    pub fn with_http(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&ListQuery>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "backend request failed before a response");
            ApiError::transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let payload = response.json::<serde_json::Value>().await.ok();
            let err = ApiError::from_response(status, payload);
            tracing::warn!(%url, status = err.status, message = %err.message, "backend returned an error");
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))
    }
}

#[async_trait]
impl DashboardBackend for BackendClient {
    async fn stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_json("/api/dashboard/stats", None).await
    }

    async fn conversions(&self, query: &ListQuery) -> Result<Page<ConversionRecord>, ApiError> {
        let resp: TransactionsResponse = self
            .get_json("/api/transactions/conversions", Some(query))
            .await?;
        Ok(resp.into())
    }

    async fn swaps(&self, query: &ListQuery) -> Result<Page<SwapRecord>, ApiError> {
        let query = ListQuery {
            kind: None,
            ..query.clone()
        };
        let resp: SwapsResponse = self.get_json("/api/swaps", Some(&query)).await?;
        Ok(resp.into())
    }
}
