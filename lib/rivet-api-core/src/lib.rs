//! Core types for the Rivet API client.
//!
//! This crate holds everything that does not need a network stack:
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] - HTTP response type
//! - [`Error`] and [`Result`] - Error handling
//! - [`ApiError`], [`ErrorKind`] and [`ErrorBody`] - Typed API errors decoded from non-2xx responses
//! - [`Endpoint`], [`PathTemplate`] and [`QueryParams`] - Endpoint URL construction
//! - [`Raw`] - Decoded JSON value that keeps the bytes it came from
//! - [`HttpClient`] - Core client trait for HTTP execution
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod api_error;
mod body;
mod client;
mod endpoint;
mod error;
mod method;
mod path_template;
pub mod prelude;
mod raw;
mod request;
mod response;

pub use api_error::{ApiError, ErrorBody, ErrorKind};
pub use body::{JSON_CONTENT_TYPE, from_json, to_json};
pub use client::HttpClient;
pub use endpoint::{DEFAULT_BASE_URL, Endpoint, QueryParams, validate_base_url};
pub use error::{Error, Result};
pub use method::Method;
pub use path_template::PathTemplate;
pub use raw::Raw;
pub use request::{Request, RequestBuilder};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
