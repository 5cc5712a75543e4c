//! Query parameters of the view endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

/// Independent page cursors of the two conversion lists.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConversionPagesParams {
    /// Page of the MTM → NYM list (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub mtm_page: u32,
    /// Page of the ETH → NYM list (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub eth_page: u32,
}

/// Single page cursor.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

impl ConversionPagesParams {
    /// Clamps both cursors to at least 1.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            mtm_page: self.mtm_page.max(1),
            eth_page: self.eth_page.max(1),
        }
    }
}

impl PageParams {
    /// Clamps the cursor to at least 1.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
        }
    }
}
