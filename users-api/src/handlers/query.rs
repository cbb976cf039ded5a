//! Query parameters for `GET /users`
//!
//! Raw values are signed so that out-of-range input (`pageSize=0`,
//! `pageNumber=-3`) is clamped rather than rejected. Non-integer input
//! fails extraction and becomes a 400.
//!
//! ```rust
//! use users_api::config::PaginationConfig;
//! use users_api::handlers::ListQuery;
//!
//! let limits = PaginationConfig::default();
//! let query = ListQuery::new(Some(-4), Some(100));
//!
//! assert_eq!(query.page_number(), 1);
//! assert_eq!(query.page_size(&limits), 20);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

/// `pageNumber` and `pageSize` as sent by the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
}

impl ListQuery {
    #[must_use]
    pub fn new(page_number: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Page number before clamping, defaulting to 1
    #[must_use]
    pub fn requested_page(&self) -> i64 {
        self.page_number.unwrap_or(1)
    }

    /// Page number clamped to `[1, u32::MAX]`
    #[must_use]
    pub fn page_number(&self) -> u32 {
        let clamped = self.requested_page().clamp(1, i64::from(u32::MAX));
        u32::try_from(clamped).unwrap_or(u32::MAX)
    }

    /// Page size clamped to `[1, max_page_size]`, never above 20
    #[must_use]
    pub fn page_size(&self, limits: &PaginationConfig) -> u32 {
        let max = limits.effective_max_page_size();
        let requested = self
            .page_size
            .unwrap_or_else(|| i64::from(limits.default_page_size));
        let clamped = requested.clamp(1, i64::from(max));
        u32::try_from(clamped).unwrap_or(max)
    }
}
