//! Raw responses as returned by an [`HttpClient`](crate::HttpClient).
//!
//! Decoding and status classification happen one level up, so any status
//! code is a valid [`Response`].

use bytes::Bytes;
use http::HeaderMap;

/// Status, headers and fully read body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HeaderMap,
    body: B,
}

impl<B> Response<B> {
    /// Assemble a response.
    #[must_use]
    pub fn new(status: u16, headers: HeaderMap, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Take the body.
    #[must_use]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_2xx_is_success() {
        for (status, success) in [(199, false), (200, true), (204, true), (299, true), (304, false), (408, false)] {
            let response = Response::new(status, HeaderMap::new(), Bytes::new());
            assert_eq!(response.is_success(), success, "status {status}");
        }
    }

    #[test]
    fn into_body_keeps_bytes() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::CONTENT_TYPE, http::HeaderValue::from_static("application/json"));

        let response = Response::new(200, headers, Bytes::from_static(br#"{"index":"1"}"#));
        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.into_body(), Bytes::from_static(br#"{"index":"1"}"#));
    }
}
