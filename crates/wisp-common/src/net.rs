//! Document fetch utilities for the Wisp renderer.
//!
//! The pipeline itself only ever sees decoded text; these helpers are the
//! thin acquisition layer in front of it. Redirects are followed by reqwest's
//! default policy.

use base64::Engine;
use std::time::Duration;
use thiserror::Error;

/// User-Agent header sent with all requests.
const USER_AGENT: &str = concat!("wisp/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Errors produced while acquiring a document body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be built or the request failed in transit.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),
    /// A `data:` URL without the `,` separating metadata from payload.
    #[error("invalid data URL: missing comma")]
    MissingComma,
    /// The base64 payload of a `data:` URL did not decode.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded payload was not UTF-8 text.
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A `data:` URL whose payload is the document itself.
///
/// Supports `data:[<mediatype>][;base64],<data>`. Percent-encoding in the
/// plain form is left as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// The full raw `data:` URL string.
    pub raw_data: String,
}

impl DataUrl {
    /// Create a new `DataUrl` from a raw data URL string.
    #[must_use]
    pub const fn new(raw_data: String) -> Self {
        Self { raw_data }
    }

    /// Decode the payload into text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingComma`] for a malformed URL, or a decode
    /// error if a base64 payload is invalid or not UTF-8.
    pub fn decode_text(&self) -> Result<String, FetchError> {
        let data_url = self.raw_data.trim_start_matches("data:");
        let (metadata, data) = data_url.split_once(',').ok_or(FetchError::MissingComma)?;

        if metadata.ends_with(";base64") {
            let bytes = base64::engine::general_purpose::STANDARD.decode(data)?;
            Ok(String::from_utf8(bytes)?)
        } else {
            Ok(data.to_string())
        }
    }
}

/// Fetch a URL and return its body as text.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created, the request fails,
/// the response has a non-success status, or the body cannot be decoded.
pub fn fetch_text(url: &str) -> Result<String, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()?;

    let response = client.get(url).header("User-Agent", USER_AGENT).send()?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    Ok(response.text()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_data_url() {
        let url = DataUrl::new("data:text/html,<b>hi</b>".to_string());
        assert_eq!(url.decode_text().unwrap(), "<b>hi</b>");
    }

    #[test]
    fn test_base64_data_url() {
        // "<i>x</i>"
        let url = DataUrl::new("data:text/html;base64,PGk+eDwvaT4=".to_string());
        assert_eq!(url.decode_text().unwrap(), "<i>x</i>");
    }

    #[test]
    fn test_data_url_without_comma() {
        let url = DataUrl::new("data:text/html".to_string());
        assert!(matches!(url.decode_text(), Err(FetchError::MissingComma)));
    }
}
