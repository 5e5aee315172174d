//! Typed async client for the Rivet REST API.
//!
//! [`RivetClient`] holds the configuration (base URL, headers, transport)
//! and hands out one resource client per API group. Each resource method
//! builds an [`Endpoint`], sends it through the shared [`Caller`] and
//! returns either the decoded response wrapped in [`Raw`] or an
//! [`Error`]. Non-2xx responses become [`Error::Api`] carrying a
//! classified [`ApiError`].
//!
//! # Example
//!
//! ```ignore
//! use rivet_api::prelude::*;
//! use std::time::Duration;
//!
//! let client = RivetClient::builder()
//!     .token(token)
//!     .build()?;
//!
//! let group = client
//!     .group()
//!     .with_options(CallOptions::new().timeout(Duration::from_secs(5)))
//!     .get_summary(group_id)
//!     .await?;
//!
//! match client.invites().get_invite("abc123").await {
//!     Ok(invite) => println!("{invite}"),
//!     Err(err) if err.is_not_found() => println!("no such invite"),
//!     Err(err) => return Err(err.into()),
//! }
//! ```

mod caller;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
pub mod resources;
mod rivet_client;

pub use caller::{CallOptions, Caller, NO_BODY};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use resources::common::{Paginated, WatchResponse};
pub use rivet_client::{DEFAULT_USER_AGENT, RivetClient, RivetClientBuilder};

// Re-export tower for middleware composition
pub use tower;
pub use tokio_util::sync::CancellationToken;

pub use rivet_api_core::{
    ApiError, DEFAULT_BASE_URL, Endpoint, Error, ErrorBody, ErrorKind, HttpClient, Method,
    PathTemplate, QueryParams, Raw, Request, RequestBuilder, Response, Result, StatusCode,
    from_json, header, to_json, validate_base_url,
};
