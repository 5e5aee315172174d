//! Prelude module for convenient imports.
//!
//! ```ignore
//! use rivet_api_core::prelude::*;
//! ```

pub use crate::{
    ApiError, Endpoint, Error, ErrorBody, ErrorKind, HttpClient, Method, QueryParams, Raw,
    Request, RequestBuilder, Response, Result, from_json, to_json,
};
