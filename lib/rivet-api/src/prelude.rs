//! Prelude module for convenient imports.
//!
//! ```ignore
//! use rivet_api::prelude::*;
//! ```

pub use crate::{
    ApiError, CallOptions, CancellationToken, Error, ErrorKind, HttpClient, HyperClient,
    Paginated, Raw, Result, RivetClient, RivetClientBuilder, WatchResponse,
};
pub use uuid::Uuid;
