//! Absolute links for `Location` and `X-Pagination`

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use serde::{Deserialize, Serialize};

use crate::config::LinksConfig;
use crate::ids::UserId;
use crate::repository::Page;
use crate::state::AppState;

/// Name of the pagination metadata response header
pub const PAGINATION_HEADER: &str = "x-pagination";

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Builds links under a resolved base URL
///
/// ```rust
/// use users_api::handlers::LinkBuilder;
///
/// let links = LinkBuilder::new("https://api.example.com/");
/// assert_eq!(
///     links.users_page(3, 20),
///     "https://api.example.com/users?pageNumber=3&pageSize=20"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkBuilder {
    base: String,
}

impl LinkBuilder {
    /// Links under `base`; an empty base yields path-only links
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the base from configuration, falling back to the request's
    /// `Host` and `X-Forwarded-Proto` headers
    pub fn resolve(config: &LinksConfig, headers: &HeaderMap) -> Self {
        if let Some(base) = config.public_base_url.as_deref().filter(|b| !b.is_empty()) {
            return Self::new(base);
        }

        let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
        match host {
            Some(host) => {
                let scheme = headers
                    .get(FORWARDED_PROTO)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.split(',').next())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .unwrap_or("http");
                Self::new(format!("{scheme}://{host}"))
            }
            None => Self::default(),
        }
    }

    /// `{base}/users/{id}`
    pub fn user(&self, id: &UserId) -> String {
        format!("{}/users/{id}", self.base)
    }

    /// `{base}/users?pageNumber={n}&pageSize={s}`
    pub fn users_page(&self, page_number: u32, page_size: u32) -> String {
        format!(
            "{}/users?pageNumber={page_number}&pageSize={page_size}",
            self.base
        )
    }

    /// Metadata for `page`, with sibling links only where siblings exist
    pub fn pagination_header<T>(&self, page: &Page<T>) -> PaginationHeader {
        let previous_page_link = page
            .has_previous
            .then(|| self.users_page(page.current_page - 1, page.page_size));
        let next_page_link = page
            .has_next
            .then(|| self.users_page(page.current_page + 1, page.page_size));

        PaginationHeader {
            previous_page_link,
            next_page_link,
            total_count: page.total_count,
            page_size: page.page_size,
            current_page: page.current_page,
            total_pages: page.total_pages,
        }
    }
}

impl FromRequestParts<AppState> for LinkBuilder {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::resolve(&state.config().links, &parts.headers))
    }
}

/// JSON payload of the `X-Pagination` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationHeader {
    pub previous_page_link: Option<String>,
    pub next_page_link: Option<String>,
    pub total_count: u64,
    pub page_size: u32,
    pub current_page: u32,
    pub total_pages: u32,
}
