//! Top-level client and its builder.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::resources::{
    device_links::DeviceLinksClient, group::GroupClient, identity_events::IdentityEventsClient,
    invites::InvitesClient, namespaces::NamespacesClient, notifications::NotificationsClient,
    servers::ServersClient,
};
use crate::header::{self, HeaderMap, HeaderName, HeaderValue};
use crate::{Caller, ClientConfig, Error, HttpClient, HyperClient, Result, validate_base_url};

/// User agent sent unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("rivet-api-rust/", env!("CARGO_PKG_VERSION"));

/// Entry point to the Rivet API.
///
/// Cloning is cheap: every clone, and every resource client handed out,
/// shares the same immutable configuration.
///
/// # Example
///
/// ```ignore
/// use rivet_api::RivetClient;
/// use rivet_api::resources::servers::ServerFilter;
///
/// let client = RivetClient::builder()
///     .token(std::env::var("RIVET_TOKEN")?)
///     .build()?;
///
/// let servers = client.servers().list(cluster_id, &ServerFilter::new()).await?;
/// for server in &servers.servers {
///     println!("{} {:?}", server.server_id, server.public_ip);
/// }
/// ```
pub struct RivetClient<C = HyperClient> {
    caller: Arc<Caller<C>>,
}

impl<C> Clone for RivetClient<C> {
    fn clone(&self) -> Self {
        Self {
            caller: Arc::clone(&self.caller),
        }
    }
}

impl<C> std::fmt::Debug for RivetClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self
            .caller
            .headers()
            .keys()
            .map(HeaderName::as_str)
            .collect();
        f.debug_struct("RivetClient")
            .field("base_url", &self.caller.base_url().map(Url::as_str))
            .field("headers", &header_names)
            .finish_non_exhaustive()
    }
}

impl RivetClient {
    /// Create a builder using the default [`HyperClient`] transport.
    #[must_use]
    pub fn builder() -> RivetClientBuilder {
        RivetClientBuilder::new()
    }
}

impl<C> RivetClient<C> {
    /// The shared caller, for endpoints without a resource client.
    #[must_use]
    pub fn caller(&self) -> &Caller<C> {
        &self.caller
    }

    /// Groups.
    #[must_use]
    pub fn group(&self) -> GroupClient<C> {
        GroupClient::new(Arc::clone(&self.caller))
    }

    /// Group invites.
    #[must_use]
    pub fn invites(&self) -> InvitesClient<C> {
        InvitesClient::new(Arc::clone(&self.caller))
    }

    /// Admin cluster servers.
    #[must_use]
    pub fn servers(&self) -> ServersClient<C> {
        ServersClient::new(Arc::clone(&self.caller))
    }

    /// Push notification registration.
    #[must_use]
    pub fn notifications(&self) -> NotificationsClient<C> {
        NotificationsClient::new(Arc::clone(&self.caller))
    }

    /// Cloud device links.
    #[must_use]
    pub fn device_links(&self) -> DeviceLinksClient<C> {
        DeviceLinksClient::new(Arc::clone(&self.caller))
    }

    /// Game namespaces.
    #[must_use]
    pub fn namespaces(&self) -> NamespacesClient<C> {
        NamespacesClient::new(Arc::clone(&self.caller))
    }

    /// Live identity events.
    #[must_use]
    pub fn identity_events(&self) -> IdentityEventsClient<C> {
        IdentityEventsClient::new(Arc::clone(&self.caller))
    }
}

/// Builder for [`RivetClient`].
///
/// Every request carries `User-Agent`, `Authorization` when a token is set,
/// and the headers added with [`RivetClientBuilder::header`]. Header names
/// are case-insensitive. A custom header replaces a default of the same
/// name, and a name added more than once is sent with every value.
#[derive(Debug)]
pub struct RivetClientBuilder<C = HyperClient> {
    http: C,
    base_url: Option<String>,
    token: Option<String>,
    user_agent: String,
    headers: Vec<(String, String)>,
}

impl RivetClientBuilder {
    /// Builder with the default transport, base URL and user agent.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: HyperClient::new(),
            base_url: None,
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: Vec::new(),
        }
    }

    /// Configure the default transport.
    ///
    /// Replaces the transport, so use [`RivetClientBuilder::http_client`]
    /// with a [`HyperClient`] built by hand when middleware is needed.
    #[must_use]
    pub fn transport_config(mut self, config: ClientConfig) -> Self {
        self.http = HyperClient::with_config(config);
        self
    }

    /// Request timeout of the default transport.
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        let config = ClientConfig {
            timeout,
            ..self.http.config().clone()
        };
        self.transport_config(config)
    }

    /// Connect timeout of the default transport.
    #[must_use]
    pub fn connect_timeout(self, connect_timeout: Duration) -> Self {
        let config = ClientConfig {
            connect_timeout,
            ..self.http.config().clone()
        };
        self.transport_config(config)
    }
}

impl Default for RivetClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> RivetClientBuilder<C> {
    /// Send requests somewhere other than `https://api.rivet.gg`.
    ///
    /// A path prefix is kept; a trailing slash is ignored.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Send `Authorization: Bearer <token>` on every request.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a header sent on every request.
    ///
    /// Adding the same name again sends both values.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Use another transport.
    #[must_use]
    pub fn http_client<D: HttpClient>(self, http: D) -> RivetClientBuilder<D> {
        RivetClientBuilder {
            http,
            base_url: self.base_url,
            token: self.token,
            user_agent: self.user_agent,
            headers: self.headers,
        }
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the base URL does not parse, and
    /// [`Error::InvalidRequest`] if it cannot prefix endpoint paths or a
    /// header name or value is not valid HTTP.
    pub fn build(self) -> Result<RivetClient<C>> {
        let base_url = self.base_url.as_deref().map(parse_base_url).transpose()?;

        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, header_value(&self.user_agent)?);
        if let Some(token) = &self.token {
            let mut bearer = header_value(&format!("Bearer {token}"))?;
            bearer.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, bearer);
        }

        let mut custom = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| Error::invalid_request(format!("invalid header name {name:?}: {e}")))?;
            custom.append(name, header_value(value)?);
        }
        headers.extend(custom);

        Ok(RivetClient {
            caller: Arc::new(Caller::new(self.http, base_url, headers)),
        })
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::try_from(value)
        .map_err(|e| Error::invalid_request(format!("invalid header value for a static header: {e}")))
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    validate_base_url(&url)?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn default_builder() {
        let client = RivetClient::builder().build().expect("client");
        check!(client.caller().base_url().is_none());

        let headers = client.caller().headers();
        check!(headers.len() == 1);
        check!(headers.get(header::USER_AGENT).map(HeaderValue::as_bytes) == Some(DEFAULT_USER_AGENT.as_bytes()));
    }

    #[test]
    fn token_becomes_bearer_header() {
        let client = RivetClient::builder()
            .token("secret")
            .header("X-Rivet-Namespace", "prod")
            .build()
            .expect("client");

        let headers = client.caller().headers();
        check!(headers.len() == 3);
        check!(headers["authorization"] == "Bearer secret");
        check!(headers["authorization"].is_sensitive());
        check!(headers["x-rivet-namespace"] == "prod");
    }

    #[test]
    fn repeated_and_case_variant_names() {
        let client = RivetClient::builder()
            .token("tok")
            .header("X-Tag", "a")
            .header("x-tag", "b")
            .header("Authorization", "Bearer other")
            .build()
            .expect("client");

        let headers = client.caller().headers();
        let tags: Vec<_> = headers.get_all("x-tag").iter().collect();
        check!(tags == ["a", "b"]);

        let authorization: Vec<_> = headers.get_all(header::AUTHORIZATION).iter().collect();
        check!(authorization == ["Bearer other"]);
    }

    #[test]
    fn custom_user_agent_header_replaces_default() {
        let client = RivetClient::builder()
            .header("user-agent", "ops-dashboard/2")
            .build()
            .expect("client");

        let agents: Vec<_> = client.caller().headers().get_all(header::USER_AGENT).iter().collect();
        check!(agents == ["ops-dashboard/2"]);
    }

    #[test]
    fn invalid_headers_are_rejected() {
        let result = RivetClient::builder().header("bad name", "v").build();
        let_assert!(Err(Error::InvalidRequest(_)) = result);

        let result = RivetClient::builder().header("x-ok", "line\nbreak").build();
        let_assert!(Err(Error::InvalidRequest(_)) = result);

        let result = RivetClient::builder().token("a\r\nb").build();
        let_assert!(Err(Error::InvalidRequest(_)) = result);
    }

    #[test]
    fn debug_hides_header_values() {
        let client = RivetClient::builder().token("secret").build().expect("client");
        let debug = format!("{client:?}");
        check!(debug.contains("authorization"));
        check!(!debug.contains("secret"));
    }

    #[test]
    fn invalid_base_url() {
        let result = RivetClient::builder().base_url("not a url").build();
        let_assert!(Err(Error::InvalidUrl(_)) = result);

        let result = RivetClient::builder().base_url("mailto:ops@rivet.gg").build();
        let_assert!(Err(Error::InvalidRequest(_)) = result);
    }

    #[test]
    fn base_url_with_query_or_fragment_is_rejected() {
        for base in ["https://proxy.example/api?key=1", "https://proxy.example/api#frag"] {
            let result = RivetClient::builder().base_url(base).build();
            let_assert!(Err(Error::InvalidRequest(_)) = result);
        }
    }

    #[test]
    fn timeouts_reach_the_transport() {
        let builder = RivetClient::builder()
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(1));

        check!(builder.http.config().timeout == Duration::from_secs(5));
        check!(builder.http.config().connect_timeout == Duration::from_secs(1));
    }

    #[test]
    fn resource_clients_share_configuration() {
        let client = RivetClient::builder().build().expect("client");
        let servers = client.servers();
        let cloned = client.clone();

        check!(std::ptr::eq(client.caller(), cloned.caller()));
        check!(format!("{servers:?}").starts_with("ServersClient"));
    }
}
