//! Response types that honour the negotiated representation

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::links::{PaginationHeader, PAGINATION_HEADER};
use super::negotiation::Representation;
use crate::error::Error;

/// A body serialized as JSON or XML with a chosen status
///
/// `root` names the XML document element and is ignored for JSON.
#[derive(Debug)]
pub struct Negotiated<T> {
    representation: Representation,
    status: StatusCode,
    root: &'static str,
    data: T,
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl<T> Negotiated<T> {
    /// 200 OK
    pub fn ok(representation: Representation, root: &'static str, data: T) -> Self {
        Self {
            representation,
            status: StatusCode::OK,
            root,
            data,
            headers: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }
}

impl<T: Serialize> IntoResponse for Negotiated<T> {
    fn into_response(self) -> Response {
        let body = match self.representation.render(self.root, &self.data) {
            Ok(body) => body,
            Err(e) => return e.into_response(),
        };

        let mut response = (
            self.status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static(self.representation.content_type()),
            )],
            body,
        )
            .into_response();

        response.headers_mut().extend(self.headers);
        response
    }
}

/// HTTP 201 Created with a `Location` header
///
/// The body is the new resource's identifier.
#[derive(Debug)]
pub struct Created<T> {
    inner: Negotiated<T>,
    location: String,
}

impl<T> Created<T> {
    pub fn new(
        representation: Representation,
        root: &'static str,
        data: T,
        location: impl Into<String>,
    ) -> Self {
        Self {
            inner: Negotiated::ok(representation, root, data).with_status(StatusCode::CREATED),
            location: location.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        match HeaderValue::from_str(&self.location) {
            Ok(value) => self.inner.with_header(header::LOCATION, value).into_response(),
            Err(_) => {
                tracing::warn!(location = %self.location, "location is not a valid header value");
                self.inner.into_response()
            }
        }
    }
}

/// HTTP 204 No Content
#[derive(Debug, Clone, Copy)]
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// A list body with pagination metadata in `X-Pagination`
#[derive(Debug)]
pub struct Paginated<T> {
    inner: Negotiated<T>,
    pagination: PaginationHeader,
}

impl<T> Paginated<T> {
    pub fn new(inner: Negotiated<T>, pagination: PaginationHeader) -> Self {
        Self { inner, pagination }
    }
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        let value = serde_json::to_string(&self.pagination)
            .map_err(|e| Error::Internal(format!("pagination header serialization failed: {e}")))
            .and_then(|json| {
                HeaderValue::from_str(&json)
                    .map_err(|e| Error::Internal(format!("invalid pagination header: {e}")))
            });

        match value {
            Ok(value) => self
                .inner
                .with_header(HeaderName::from_static(PAGINATION_HEADER), value)
                .into_response(),
            Err(e) => e.into_response(),
        }
    }
}
