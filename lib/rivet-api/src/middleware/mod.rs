//! Tower middleware for the Rivet transport.
//!
//! Layers wrap the boxed [`HyperClient`](crate::HyperClient) service and see
//! every request after the caller has resolved its URL and attached its
//! headers. Add them with [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer).
//!
//! ```ignore
//! use rivet_api::HyperClient;
//! use rivet_api::middleware::LoggingLayer;
//!
//! let http = HyperClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

pub use tower::{Layer, ServiceBuilder};
