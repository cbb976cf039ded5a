//! Content negotiation between JSON and XML
//!
//! The response format is chosen from the `Accept` header; request bodies
//! are decoded according to `Content-Type`.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use serde::Serialize;

use crate::error::{Error, Result};

/// A supported wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Representation {
    #[default]
    Json,
    Xml,
}

impl Representation {
    /// Pick the response format for an `Accept` header
    ///
    /// An absent or empty header selects JSON. Entries are tried in
    /// descending quality order (ties keep header order) and `q=0` entries are
    /// ignored.
    ///
    /// # Errors
    ///
    /// [`Error::NotAcceptable`] when no listed media type can be produced.
    ///
    /// ```rust
    /// use axum::http::{header, HeaderMap, HeaderValue};
    /// use users_api::handlers::Representation;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert(
    ///     header::ACCEPT,
    ///     HeaderValue::from_static("application/json;q=0.5, text/xml"),
    /// );
    /// assert_eq!(Representation::from_accept(&headers).unwrap(), Representation::Xml);
    /// ```
    pub fn from_accept(headers: &HeaderMap) -> Result<Self> {
        let mut ranges: Vec<(String, f32)> = Vec::new();

        for value in headers.get_all(header::ACCEPT) {
            let value = value
                .to_str()
                .map_err(|_| Error::NotAcceptable("unreadable Accept header".into()))?;
            ranges.extend(value.split(',').filter_map(parse_media_range));
        }

        // An absent header and one listing no media ranges mean the same.
        if ranges.is_empty() {
            return Ok(Self::Json);
        }

        ranges.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranges
            .iter()
            .filter(|(_, quality)| *quality > 0.0)
            .find_map(|(media_type, _)| Self::for_accepted(media_type))
            .ok_or_else(|| {
                let accept = headers
                    .get(header::ACCEPT)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                Error::NotAcceptable(format!(
                    "cannot produce any of [{accept}]; supported: application/json, application/xml"
                ))
            })
    }

    /// Format of a request body, from its `Content-Type`
    ///
    /// Anything that is not an XML media type is read as JSON.
    pub fn from_content_type(headers: &HeaderMap) -> Self {
        let essence = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(media_essence)
            .unwrap_or_default();

        if essence == "application/xml" || essence == "text/xml" || essence.ends_with("+xml") {
            Self::Xml
        } else {
            Self::Json
        }
    }

    fn for_accepted(media_type: &str) -> Option<Self> {
        match media_type {
            "*/*" | "application/*" | "application/json" | "text/json" => Some(Self::Json),
            "application/xml" | "text/xml" => Some(Self::Xml),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
        }
    }

    /// Serialize `value`; `root` names the XML document element
    ///
    /// # Errors
    ///
    /// [`Error::Internal`] if the value cannot be represented.
    pub fn render<T: Serialize + ?Sized>(&self, root: &str, value: &T) -> Result<Vec<u8>> {
        match self {
            Self::Json => serde_json::to_vec(value)
                .map_err(|e| Error::Internal(format!("JSON serialization failed: {e}"))),
            Self::Xml => quick_xml::se::to_string_with_root(root, value)
                .map(String::into_bytes)
                .map_err(|e| Error::Internal(format!("XML serialization failed: {e}"))),
        }
    }
}

impl<S> FromRequestParts<S> for Representation
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Self::from_accept(&parts.headers)
    }
}

/// Lowercased `type/subtype` without parameters
fn media_essence(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// `(type/subtype, q)` for one comma-separated `Accept` entry
fn parse_media_range(entry: &str) -> Option<(String, f32)> {
    let media_type = media_essence(entry);
    if media_type.is_empty() {
        return None;
    }

    let quality = entry
        .split(';')
        .skip(1)
        .filter_map(|param| param.trim().split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
        .and_then(|(_, q)| q.trim().parse::<f32>().ok())
        .unwrap_or(1.0);

    Some((media_type, quality))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_absent_accept_is_json() {
        assert_eq!(
            Representation::from_accept(&HeaderMap::new()).unwrap(),
            Representation::Json
        );
    }

    #[test]
    fn test_empty_accept_is_json() {
        for value in ["", "  ", " , "] {
            assert_eq!(
                Representation::from_accept(&accept(value)).unwrap(),
                Representation::Json,
                "{value:?}"
            );
        }
    }

    #[test]
    fn test_wildcards_are_json() {
        for value in ["*/*", "application/*", "text/html, */*;q=0.8"] {
            assert_eq!(
                Representation::from_accept(&accept(value)).unwrap(),
                Representation::Json,
                "{value}"
            );
        }
    }

    #[test]
    fn test_xml_types() {
        for value in ["application/xml", "text/xml", "TEXT/XML"] {
            assert_eq!(
                Representation::from_accept(&accept(value)).unwrap(),
                Representation::Xml,
                "{value}"
            );
        }
    }

    #[test]
    fn test_quality_ordering() {
        let headers = accept("application/xml;q=0.4, application/json;q=0.9");
        assert_eq!(
            Representation::from_accept(&headers).unwrap(),
            Representation::Json
        );
    }

    #[test]
    fn test_zero_quality_excluded() {
        let headers = accept("application/json;q=0, application/xml");
        assert_eq!(
            Representation::from_accept(&headers).unwrap(),
            Representation::Xml
        );

        let err = Representation::from_accept(&accept("application/json;q=0")).unwrap_err();
        assert!(matches!(err, Error::NotAcceptable(_)));
    }

    #[test]
    fn test_unsupported_type_not_acceptable() {
        let err = Representation::from_accept(&accept("text/html")).unwrap_err();
        assert!(matches!(err, Error::NotAcceptable(_)));
    }

    #[test]
    fn test_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert_eq!(
            Representation::from_content_type(&headers),
            Representation::Json
        );

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/xml; charset=utf-8"),
        );
        assert_eq!(
            Representation::from_content_type(&headers),
            Representation::Xml
        );

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json-patch+json"),
        );
        assert_eq!(
            Representation::from_content_type(&headers),
            Representation::Json
        );
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        login: &'static str,
        full_name: &'static str,
    }

    #[test]
    fn test_render_xml_uses_root_and_field_names() {
        let sample = Sample {
            login: "ada",
            full_name: "Lovelace Ada",
        };
        let xml = String::from_utf8(Representation::Xml.render("user", &sample).unwrap()).unwrap();
        assert!(xml.starts_with("<user>"));
        assert!(xml.contains("<login>ada</login>"));
        assert!(xml.contains("<fullName>Lovelace Ada</fullName>"));
    }

    #[test]
    fn test_render_json() {
        let sample = Sample {
            login: "ada",
            full_name: "Lovelace Ada",
        };
        let json: serde_json::Value =
            serde_json::from_slice(&Representation::Json.render("user", &sample).unwrap())
                .unwrap();
        assert_eq!(json["fullName"], "Lovelace Ada");
    }
}
