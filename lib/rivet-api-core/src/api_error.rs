//! Typed API errors decoded from non-2xx responses.
//!
//! Every non-2xx response first becomes an [`ApiError::Generic`] holding the
//! status code and the raw body text. If the status appears in the status
//! table and the body decodes as an [`ErrorBody`], the matching classified
//! variant is returned instead.
//!
//! | Status | Variant |
//! |---|---|
//! | 500 | [`ApiError::Internal`] |
//! | 429 | [`ApiError::RateLimit`] |
//! | 403 | [`ApiError::Forbidden`] |
//! | 408 | [`ApiError::Unauthorized`] |
//! | 404 | [`ApiError::NotFound`] |
//! | 400 | [`ApiError::BadRequest`] |
//! | other | [`ApiError::Generic`] |
//!
//! 408 maps to `Unauthorized` because the upstream API definition declares
//! it that way.

use std::fmt;

use bytes::Bytes;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Structured error payload returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g. `API_RATE_LIMIT`).
    #[serde(default)]
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Request reference for support.
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Link to the documentation for this error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Unstructured extra context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Kind of an [`ApiError`], for callers that only branch on the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// 500.
    #[display("internal error")]
    Internal,
    /// 429.
    #[display("rate limited")]
    RateLimit,
    /// 403.
    #[display("forbidden")]
    Forbidden,
    /// 408.
    #[display("unauthorized")]
    Unauthorized,
    /// 404.
    #[display("not found")]
    NotFound,
    /// 400.
    #[display("bad request")]
    BadRequest,
    /// Any other status, or a table status whose body did not decode.
    #[display("API error")]
    Generic,
}

impl ErrorKind {
    /// The kind the status table assigns to `status_code`.
    ///
    /// The actual error may still be [`ErrorKind::Generic`] if the body does
    /// not decode.
    #[must_use]
    pub fn for_status(status_code: u16) -> Self {
        STATUS_TABLE
            .iter()
            .find(|(status, ..)| *status == status_code)
            .map_or(Self::Generic, |(_, kind, _)| *kind)
    }
}

/// Error returned for a non-2xx response.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum ApiError {
    /// The server failed internally.
    #[display("internal error ({status_code}): {body}")]
    Internal {
        /// HTTP status code.
        status_code: u16,
        /// Decoded error payload.
        #[error(not(source))]
        body: ErrorBody,
    },

    /// Too many requests.
    #[display("rate limited ({status_code}): {body}")]
    RateLimit {
        /// HTTP status code.
        status_code: u16,
        /// Decoded error payload.
        #[error(not(source))]
        body: ErrorBody,
    },

    /// The token does not grant access to the resource.
    #[display("forbidden ({status_code}): {body}")]
    Forbidden {
        /// HTTP status code.
        status_code: u16,
        /// Decoded error payload.
        #[error(not(source))]
        body: ErrorBody,
    },

    /// The request was not authenticated.
    #[display("unauthorized ({status_code}): {body}")]
    Unauthorized {
        /// HTTP status code.
        status_code: u16,
        /// Decoded error payload.
        #[error(not(source))]
        body: ErrorBody,
    },

    /// The resource does not exist.
    #[display("not found ({status_code}): {body}")]
    NotFound {
        /// HTTP status code.
        status_code: u16,
        /// Decoded error payload.
        #[error(not(source))]
        body: ErrorBody,
    },

    /// The request was rejected as malformed.
    #[display("bad request ({status_code}): {body}")]
    BadRequest {
        /// HTTP status code.
        status_code: u16,
        /// Decoded error payload.
        #[error(not(source))]
        body: ErrorBody,
    },

    /// Unclassified error carrying the raw response text.
    #[display("API error ({status_code}): {body}")]
    Generic {
        /// HTTP status code.
        status_code: u16,
        /// Raw response body.
        #[error(not(source))]
        body: String,
    },
}

type Classify = fn(u16, ErrorBody) -> ApiError;

static STATUS_TABLE: [(u16, ErrorKind, Classify); 6] = [
    (500, ErrorKind::Internal, |status_code, body| {
        ApiError::Internal { status_code, body }
    }),
    (429, ErrorKind::RateLimit, |status_code, body| {
        ApiError::RateLimit { status_code, body }
    }),
    (403, ErrorKind::Forbidden, |status_code, body| {
        ApiError::Forbidden { status_code, body }
    }),
    (408, ErrorKind::Unauthorized, |status_code, body| {
        ApiError::Unauthorized { status_code, body }
    }),
    (404, ErrorKind::NotFound, |status_code, body| {
        ApiError::NotFound { status_code, body }
    }),
    (400, ErrorKind::BadRequest, |status_code, body| {
        ApiError::BadRequest { status_code, body }
    }),
];

impl ApiError {
    /// Decode a non-2xx response into a typed error.
    ///
    /// Never fails: a body that does not decode as [`ErrorBody`] yields
    /// [`ApiError::Generic`] with the body text kept verbatim.
    #[must_use]
    pub fn decode(status_code: u16, body: &Bytes) -> Self {
        let fallback = Self::generic(status_code, String::from_utf8_lossy(body));

        let Some(&(_, kind, classify)) = STATUS_TABLE
            .iter()
            .find(|(status, ..)| *status == status_code)
        else {
            return fallback;
        };

        match crate::from_json::<ErrorBody>(body) {
            Ok(error_body) => classify(status_code, error_body),
            Err(err) => {
                tracing::debug!(
                    status_code,
                    %kind,
                    error = %err,
                    "error body did not decode, falling back to generic API error"
                );
                fallback
            }
        }
    }

    /// Create a generic error from a status code and raw body text.
    #[must_use]
    pub fn generic(status_code: u16, body: impl Into<String>) -> Self {
        Self::Generic {
            status_code,
            body: body.into(),
        }
    }

    /// HTTP status code of the response.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Internal { status_code, .. }
            | Self::RateLimit { status_code, .. }
            | Self::Forbidden { status_code, .. }
            | Self::Unauthorized { status_code, .. }
            | Self::NotFound { status_code, .. }
            | Self::BadRequest { status_code, .. }
            | Self::Generic { status_code, .. } => *status_code,
        }
    }

    /// Kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Internal { .. } => ErrorKind::Internal,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::Generic { .. } => ErrorKind::Generic,
        }
    }

    /// Decoded error payload, for classified errors.
    #[must_use]
    pub const fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Internal { body, .. }
            | Self::RateLimit { body, .. }
            | Self::Forbidden { body, .. }
            | Self::Unauthorized { body, .. }
            | Self::NotFound { body, .. }
            | Self::BadRequest { body, .. } => Some(body),
            Self::Generic { .. } => None,
        }
    }

    /// Raw response text, for generic errors.
    #[must_use]
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Generic { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Message of the decoded payload, for classified errors.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body().map(|body| body.message.as_str())
    }
}
