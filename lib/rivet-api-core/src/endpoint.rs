//! Endpoint URL construction.
//!
//! An [`Endpoint`] is built per call from a [`PathTemplate`], its path
//! parameters and the endpoint's optional query parameters, then resolved
//! against the client's base URL.
//!
//! # Example
//!
//! ```
//! use rivet_api_core::Endpoint;
//!
//! let url = Endpoint::new("/group/groups/{group_id}/members")
//!     .path("7b1e")
//!     .query("anchor", None::<&str>)
//!     .query("count", Some(20))
//!     .resolve(None)
//!     .expect("valid endpoint");
//!
//! assert_eq!(url.as_str(), "https://api.rivet.gg/group/groups/7b1e/members?count=20");
//! ```

use std::fmt::Display;

use url::{Url, form_urlencoded};

use crate::{Error, PathTemplate, Result};

/// Production API URL, used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.rivet.gg";

/// Ordered optional query parameters of an endpoint.
///
/// Parameters keep their declaration order. Absent values are kept in the
/// list but never emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, Option<String>)>);

impl QueryParams {
    /// Create an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Declare a parameter; `None` values are skipped at encode time.
    pub fn push<V: Display>(&mut self, name: &'static str, value: Option<V>) {
        self.0.push((name, value.map(|v| v.to_string())));
    }

    /// Builder form of [`QueryParams::push`].
    #[must_use]
    pub fn with<V: Display>(mut self, name: &'static str, value: Option<V>) -> Self {
        self.push(name, value);
        self
    }

    /// Present parameters, in declaration order.
    pub fn present(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0
            .iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (*name, v)))
    }

    /// Returns `true` if no parameter has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Percent-encoded query string of the present parameters, or `None`
    /// when there are none.
    #[must_use]
    pub fn encode(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.present() {
            serializer.append_pair(name, value);
        }
        Some(serializer.finish())
    }
}

impl Extend<(&'static str, Option<String>)> for QueryParams {
    fn extend<I: IntoIterator<Item = (&'static str, Option<String>)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for QueryParams {
    type Item = (&'static str, Option<String>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Descriptor of a single API call target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    template: PathTemplate,
    path_params: Vec<String>,
    query: QueryParams,
}

impl Endpoint {
    /// Create an endpoint for the given path template.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self {
            template: PathTemplate::new(template),
            path_params: Vec::new(),
            query: QueryParams::new(),
        }
    }

    /// Append the next positional path parameter.
    #[must_use]
    pub fn path(mut self, value: impl Display) -> Self {
        self.path_params.push(value.to_string());
        self
    }

    /// Declare an optional query parameter.
    #[must_use]
    pub fn query<V: Display>(mut self, name: &'static str, value: Option<V>) -> Self {
        self.query.push(name, value);
        self
    }

    /// Append a group of query parameters, keeping their order.
    #[must_use]
    pub fn query_params(mut self, params: QueryParams) -> Self {
        self.query.extend(params);
        self
    }

    /// The path template.
    #[must_use]
    pub const fn template(&self) -> PathTemplate {
        self.template
    }

    /// Declared query parameters.
    #[must_use]
    pub const fn query_list(&self) -> &QueryParams {
        &self.query
    }

    /// Resolve to a full URL against `base_url`, or [`DEFAULT_BASE_URL`]
    /// when unset.
    ///
    /// The base path is kept as a prefix. The query string is replaced by the
    /// endpoint's present parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the path parameters do not fit the template or
    /// the base URL fails [`validate_base_url`].
    pub fn resolve(&self, base_url: Option<&Url>) -> Result<Url> {
        let mut url = match base_url {
            Some(base) => base.clone(),
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        validate_base_url(&url)?;

        let path = self.template.render(&self.path_params)?;
        let prefixed = format!("{}{path}", url.path().trim_end_matches('/'));
        url.set_path(&prefixed);
        url.set_query(self.query.encode().as_deref());

        Ok(url)
    }
}

/// Check that `url` can prefix endpoint paths.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] for a URL that cannot carry a path
/// (`mailto:`, `data:`) or that has a query string or fragment.
pub fn validate_base_url(url: &Url) -> Result<()> {
    if url.cannot_be_a_base() {
        return Err(Error::invalid_request(format!(
            "base URL cannot carry a path: {url}"
        )));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::invalid_request(format!(
            "base URL must not have a query or fragment: {url}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_against_default_base() {
        let url = Endpoint::new("/cloud/devices/links")
            .resolve(None)
            .expect("resolve");
        assert_eq!(url.as_str(), "https://api.rivet.gg/cloud/devices/links");
    }

    #[test]
    fn resolve_omits_absent_query_parameters() {
        let cluster_id = uuid::Uuid::new_v4();
        let url = Endpoint::new("/admin/clusters/{cluster_id}/servers")
            .path(cluster_id)
            .query("server_id", None::<uuid::Uuid>)
            .query("datacenter", None::<&str>)
            .query("pool", None::<&str>)
            .query("public_ip", None::<&str>)
            .resolve(None)
            .expect("resolve");

        assert_eq!(
            url.as_str(),
            format!("https://api.rivet.gg/admin/clusters/{cluster_id}/servers")
        );
        assert!(url.query().is_none());
    }

    #[test]
    fn resolve_keeps_declaration_order() {
        let url = Endpoint::new("/group/groups/search")
            .query("query", Some("rust devs"))
            .query("anchor", None::<&str>)
            .query("limit", Some(10))
            .resolve(None)
            .expect("resolve");

        assert_eq!(url.query(), Some("query=rust+devs&limit=10"));
    }

    #[test]
    fn resolve_keeps_base_path_prefix() {
        let base = Url::parse("http://127.0.0.1:8080/api/").expect("url");
        let url = Endpoint::new("/group/groups/{group_id}/summary")
            .path("abc")
            .resolve(Some(&base))
            .expect("resolve");

        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/api/group/groups/abc/summary"
        );
    }

    #[test]
    fn resolve_rejects_base_with_query_or_fragment() {
        for base in ["https://proxy.example/api?key=1", "https://proxy.example/api#top"] {
            let base = Url::parse(base).expect("url");
            let err = Endpoint::new("/group/groups/{group_id}/summary")
                .path("g1")
                .query("watch_index", Some(5))
                .resolve(Some(&base))
                .expect_err("base with query or fragment");
            assert!(matches!(err, Error::InvalidRequest(_)), "{base}: {err}");
        }
    }

    #[test]
    fn resolve_rejects_dot_path_parameter() {
        let err = Endpoint::new("/group/invites/{group_invite_code}/consume")
            .path("..")
            .resolve(None)
            .expect_err("dot segment");
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn validate_base_url_accepts_origin_and_prefix() {
        for base in ["https://api.rivet.gg", "http://127.0.0.1:8080/api/"] {
            validate_base_url(&Url::parse(base).expect("url")).expect("valid base");
        }
        let mailto = Url::parse("mailto:ops@rivet.gg").expect("url");
        assert!(validate_base_url(&mailto).is_err());
    }

    #[test]
    fn resolve_encodes_query_values() {
        let url = Endpoint::new("/cloud/devices/links")
            .query("device_link_token", Some("a&b=c"))
            .resolve(None)
            .expect("resolve");

        assert_eq!(url.query(), Some("device_link_token=a%26b%3Dc"));
    }

    #[test]
    fn resolve_fails_on_missing_path_param() {
        let err = Endpoint::new("/group/groups/{group_id}/leave")
            .resolve(None)
            .expect_err("missing group id");
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn query_params_group_appends_in_order() {
        let filters = QueryParams::new()
            .with("pool", Some("gg"))
            .with("public_ip", None::<&str>);
        let url = Endpoint::new("/admin/clusters/{cluster_id}/servers/taint")
            .path("c")
            .query("server_id", Some("s"))
            .query_params(filters)
            .resolve(None)
            .expect("resolve");

        assert_eq!(url.query(), Some("server_id=s&pool=gg"));
    }

    #[test]
    fn query_params_is_empty_with_only_absent_values() {
        let params = QueryParams::new().with("anchor", None::<&str>);
        assert!(params.is_empty());
        assert_eq!(params.encode(), None);
    }
}
