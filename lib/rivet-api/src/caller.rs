//! Issues one API call: resolve the endpoint, send, classify the response.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::header::HeaderMap;
use crate::{ApiError, Endpoint, Error, HttpClient, Method, Raw, Request, Response, Result};

/// Body argument for calls that send none.
pub const NO_BODY: Option<&()> = None;

/// Per-call timeout and cancellation.
///
/// Both are optional. When either fires, the in-flight request future is
/// dropped, which aborts the network operation.
///
/// ```
/// use std::time::Duration;
/// use rivet_api::{CallOptions, CancellationToken};
///
/// let token = CancellationToken::new();
/// let options = CallOptions::new()
///     .timeout(Duration::from_secs(5))
///     .cancel_on(token.clone());
/// assert_eq!(options.timeout_duration(), Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl CallOptions {
    /// No timeout, no cancellation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: None,
            cancel: None,
        }
    }

    /// Fail with [`Error::Timeout`] if the call takes longer than `timeout`.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Fail with [`Error::Cancelled`] once `token` is cancelled.
    #[must_use]
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The per-call timeout, if any.
    #[must_use]
    pub const fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }

    /// The cancellation token, if any.
    #[must_use]
    pub const fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// Drive `call` under these options.
    ///
    /// A token that is already cancelled wins over a ready result.
    pub async fn run<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let bounded = async {
            match self.timeout {
                Some(timeout) => tokio::time::timeout(timeout, call)
                    .await
                    .map_err(|_| Error::Timeout)?,
                None => call.await,
            }
        };

        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => Err(Error::Cancelled),
                    result = bounded => result,
                }
            }
            None => bounded.await,
        }
    }
}

/// Sends requests for every resource client.
///
/// Holds the transport, the optional base URL override and the static
/// header set. Immutable once built; shared behind an `Arc` by
/// [`RivetClient`](crate::RivetClient).
#[derive(Debug)]
pub struct Caller<C> {
    http: C,
    base_url: Option<Url>,
    headers: HeaderMap,
}

impl<C> Caller<C> {
    /// Create a caller.
    ///
    /// With `base_url` unset, requests go to
    /// [`DEFAULT_BASE_URL`](crate::DEFAULT_BASE_URL).
    #[must_use]
    pub fn new(http: C, base_url: Option<Url>, headers: HeaderMap) -> Self {
        Self {
            http,
            base_url,
            headers,
        }
    }

    /// The base URL override, if one was configured.
    #[must_use]
    pub const fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Headers attached to every request.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The underlying transport.
    #[must_use]
    pub const fn http(&self) -> &C {
        &self.http
    }
}

impl<C: HttpClient> Caller<C> {
    /// Call an endpoint and decode its JSON response.
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] for any non-2xx status
    /// - [`Error::JsonDeserialization`] if a 2xx body does not decode as `T`
    /// - [`Error::Timeout`] or [`Error::Cancelled`] under `options`
    /// - transport errors from the [`HttpClient`]
    pub async fn call<T, B>(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: Option<&B>,
        options: &CallOptions,
    ) -> Result<Raw<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let response = options.run(self.send(method, &endpoint, body)).await?;
        Raw::decode(response.into_body())
    }

    /// Call an endpoint whose successful response carries no body.
    ///
    /// Any 2xx body is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`Caller::call`], minus body decoding.
    pub async fn call_empty<B>(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: Option<&B>,
        options: &CallOptions,
    ) -> Result<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        options.run(self.send(method, &endpoint, body)).await?;
        Ok(())
    }

    fn build_request<B>(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<&B>,
    ) -> Result<Request<Bytes>>
    where
        B: Serialize + ?Sized,
    {
        let url = endpoint.resolve(self.base_url.as_ref())?;
        let builder = Request::builder(method, url).headers(self.headers.clone());
        let builder = match body {
            Some(body) => builder.json(body)?,
            None => builder,
        };
        Ok(builder.build())
    }

    async fn send<B>(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<&B>,
    ) -> Result<Response<Bytes>>
    where
        B: Serialize + ?Sized + Sync,
    {
        let request = self.build_request(method, endpoint, body)?;
        debug!(%method, template = %endpoint.template(), url = %request.url(), "calling endpoint");

        let response = self.http.execute(request).await?;
        if response.is_success() {
            return Ok(response);
        }

        let status = response.status();
        debug!(%method, template = %endpoint.template(), status, "endpoint returned an error status");
        Err(ApiError::decode(status, response.body()).into())
    }
}
