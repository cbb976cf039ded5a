//! Request body extractor accepting JSON or XML

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use super::negotiation::Representation;
use crate::error::{Error, Result};

/// A required request body, decoded according to `Content-Type`
///
/// Unlike `axum::Json`, an empty body or a JSON `null` is rejected as a
/// malformed request, and every decoding problem maps to 400.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let format = Representation::from_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::BadRequest("request body is required".into()));
        }

        let value = match format {
            Representation::Json => serde_json::from_slice::<Option<T>>(&bytes)
                .map_err(|e| Error::BadRequest(format!("invalid JSON body: {e}")))?,
            Representation::Xml => {
                let text = std::str::from_utf8(&bytes)
                    .map_err(|e| Error::BadRequest(format!("invalid XML body: {e}")))?;
                Some(
                    quick_xml::de::from_str::<T>(text)
                        .map_err(|e| Error::BadRequest(format!("invalid XML body: {e}")))?,
                )
            }
        };

        value
            .map(Payload)
            .ok_or_else(|| Error::BadRequest("request body must not be null".into()))
    }
}
