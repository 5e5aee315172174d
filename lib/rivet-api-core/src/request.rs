//! Outgoing requests.
//!
//! A [`Request`] is what an [`HttpClient`](crate::HttpClient) receives: an
//! already resolved URL, a header map and an optional encoded body.
//!
//! # Example
//!
//! ```
//! use rivet_api_core::{Endpoint, Method, Request, header};
//! use bytes::Bytes;
//!
//! let url = Endpoint::new("/identity/events/live")
//!     .query("watch_index", Some(42))
//!     .resolve(None)
//!     .expect("valid endpoint");
//!
//! let request = Request::<Bytes>::builder(Method::Get, url)
//!     .header(header::ACCEPT, header::HeaderValue::from_static("application/json"))
//!     .build();
//! assert_eq!(request.header("accept"), Some("application/json"));
//! ```

use bytes::Bytes;
use http::header::{self, HeaderMap, HeaderName, HeaderValue};

use crate::{JSON_CONTENT_TYPE, Method};

/// A request ready to be sent.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HeaderMap,
    body: Option<B>,
}

impl<B> Request<B> {
    /// Start building a request.
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Fully resolved URL, query included.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// All headers, repeated names included.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a header, matched case-insensitively.
    ///
    /// `None` when absent or not visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Encoded body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Split into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HeaderMap, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for [`Request`].
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HeaderMap,
    body: Option<B>,
}

impl<B> RequestBuilder<B> {
    /// A request without headers or body.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Append a header value, keeping earlier values of the same name.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Merge a header map.
    ///
    /// Names present in `headers` replace the values already set for them;
    /// repeated values inside `headers` are all kept.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Set the body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Finish the request.
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl RequestBuilder<Bytes> {
    /// Encode `value` as the JSON body and set `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonSerialization`](crate::Error::JsonSerialization)
    /// if `value` cannot be encoded.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        self.headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Ok(self.body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> url::Url {
        url::Url::parse("https://api.rivet.gg/group/groups").expect("valid URL")
    }

    #[test]
    fn header_lookup_ignores_case() {
        let request = Request::<Bytes>::builder(Method::Get, url())
            .header(header::ACCEPT, HeaderValue::from_static("application/json"))
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.header("accept"), Some("application/json"));
        assert!(request.body().is_none());
    }

    #[test]
    fn repeated_header_keeps_every_value() {
        let tag = HeaderName::from_static("x-tag");
        let request = Request::<Bytes>::builder(Method::Get, url())
            .header(tag.clone(), HeaderValue::from_static("a"))
            .header(tag.clone(), HeaderValue::from_static("b"))
            .build();

        let values: Vec<_> = request.headers().get_all(&tag).iter().collect();
        assert_eq!(values, ["a", "b"]);
    }

    #[test]
    fn merged_headers_replace_same_name() {
        let mut defaults = HeaderMap::new();
        defaults.insert(header::USER_AGENT, HeaderValue::from_static("first"));
        let mut overrides = HeaderMap::new();
        overrides.insert(header::USER_AGENT, HeaderValue::from_static("second"));

        let request = Request::<Bytes>::builder(Method::Get, url())
            .headers(defaults)
            .headers(overrides)
            .build();

        assert_eq!(request.headers().get_all(header::USER_AGENT).iter().count(), 1);
        assert_eq!(request.header("user-agent"), Some("second"));
    }

    #[test]
    fn json_sets_a_single_content_type() {
        #[derive(serde::Serialize)]
        struct CreateRequest {
            display_name: String,
        }

        let request = Request::builder(Method::Post, url())
            .header(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .json(&CreateRequest {
                display_name: "Lobby".to_string(),
            })
            .expect("json")
            .build();

        assert_eq!(request.headers().get_all(header::CONTENT_TYPE).iter().count(), 1);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(
            request.body().map(|body| body.to_vec()),
            Some(br#"{"display_name":"Lobby"}"#.to_vec())
        );
    }
}
