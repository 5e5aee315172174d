//! JSON body helpers.

use bytes::Bytes;

use crate::Result;

/// MIME type of every request and response body exchanged with the API.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use rivet_api_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct CreateGroup { display_name: String }
///
/// let body = CreateGroup { display_name: "Lobby".to_string() };
/// let bytes = to_json(&body).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"display_name":"Lobby"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error names the field that failed
/// (e.g. `groups[2].group_id`).
///
/// # Errors
///
/// Returns [`crate::Error::JsonDeserialization`] if the bytes are not valid
/// JSON for `T`.
///
/// # Example
///
/// ```
/// use rivet_api_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Watch { index: String }
///
/// let watch: Watch = from_json(br#"{"index":"42"}"#).expect("deserialize");
/// assert_eq!(watch, Watch { index: "42".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Member {
        identity_id: String,
        display_name: String,
    }

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Members {
        members: Vec<Member>,
    }

    #[test]
    fn to_json_serialize() {
        let member = Member {
            identity_id: "abc".to_string(),
            display_name: "Alice".to_string(),
        };

        let bytes = to_json(&member).expect("serialize");
        assert_eq!(
            bytes.as_ref(),
            br#"{"identity_id":"abc","display_name":"Alice"}"#
        );
    }

    #[test]
    fn from_json_deserialize() {
        let members: Members =
            from_json(br#"{"members":[{"identity_id":"abc","display_name":"Alice"}]}"#)
                .expect("deserialize");
        assert_eq!(members.members.len(), 1);
    }

    #[test]
    fn from_json_reports_path() {
        let err = from_json::<Members>(br#"{"members":[{"identity_id":"abc"}]}"#)
            .expect_err("missing field");

        match err {
            crate::Error::JsonDeserialization { path, message } => {
                assert!(path.starts_with("members[0]"), "path: {path}");
                assert!(message.contains("display_name"), "message: {message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_json_rejects_garbage() {
        let err = from_json::<Members>(b"not json").expect_err("invalid json");
        assert!(matches!(err, crate::Error::JsonDeserialization { .. }));
    }
}
