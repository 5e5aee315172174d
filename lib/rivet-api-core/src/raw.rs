//! Decoded JSON values that remember their wire bytes.

use std::fmt;
use std::ops::Deref;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Result;

/// A value decoded from a JSON response together with the bytes it was
/// decoded from.
///
/// [`Display`](fmt::Display) prints the original bytes when they are valid
/// UTF-8, so debug output keeps the server's field order and formatting.
/// Without them the value is re-serialized.
///
/// The bytes and the value always describe the same object: the only way to
/// mutate the value, [`Raw::value_mut`], drops the bytes.
///
/// # Example
///
/// ```
/// use rivet_api_core::Raw;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct Watch { index: String }
///
/// let body = bytes::Bytes::from_static(br#"{ "index": "7" }"#);
/// let raw: Raw<Watch> = Raw::decode(body).expect("decode");
/// assert_eq!(raw.index, "7");
/// assert_eq!(raw.to_string(), r#"{ "index": "7" }"#);
/// ```
#[derive(Debug, Clone)]
pub struct Raw<T> {
    value: T,
    raw: Option<Bytes>,
}

impl<T> Raw<T> {
    /// Wrap a value that has no wire representation.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self { value, raw: None }
    }

    /// The original response bytes, if the value was decoded.
    #[must_use]
    pub const fn raw_bytes(&self) -> Option<&Bytes> {
        self.raw.as_ref()
    }

    /// Mutable access to the value. Drops the cached bytes.
    pub fn value_mut(&mut self) -> &mut T {
        self.raw = None;
        &mut self.value
    }

    /// Consume into the decoded value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Consume into (value, bytes).
    #[must_use]
    pub fn into_parts(self) -> (T, Option<Bytes>) {
        (self.value, self.raw)
    }
}

impl<T: DeserializeOwned> Raw<T> {
    /// Decode `bytes` as JSON, keeping the bytes alongside the value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonDeserialization`] if the bytes do not
    /// decode as `T`.
    pub fn decode(bytes: Bytes) -> Result<Self> {
        let value = crate::from_json(&bytes)?;
        Ok(Self {
            value,
            raw: Some(bytes),
        })
    }
}

impl<T> Deref for Raw<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> AsRef<T> for Raw<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T> From<T> for Raw<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Serialize> Serialize for Raw<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<T: Serialize + fmt::Debug> fmt::Display for Raw<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.raw.as_deref().and_then(|b| std::str::from_utf8(b).ok()) {
            return f.write_str(text);
        }
        match serde_json::to_string(&self.value) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        group_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bio: Option<String>,
    }

    #[test]
    fn display_prefers_original_bytes() {
        let body = Bytes::from_static(b"{\"bio\":\"hi\",  \"group_id\":\"g\"}");
        let raw: Raw<Profile> = Raw::decode(body).expect("decode");

        assert_eq!(raw.to_string(), "{\"bio\":\"hi\",  \"group_id\":\"g\"}");
        assert_eq!(raw.group_id, "g");
    }

    #[test]
    fn display_reserializes_without_bytes() {
        let raw = Raw::new(Profile {
            group_id: "g".to_string(),
            bio: None,
        });
        assert_eq!(raw.to_string(), r#"{"group_id":"g"}"#);
    }

    #[test]
    fn value_mut_drops_bytes() {
        let body = Bytes::from_static(br#"{"group_id":"g"}"#);
        let mut raw: Raw<Profile> = Raw::decode(body).expect("decode");
        assert!(raw.raw_bytes().is_some());

        raw.value_mut().bio = Some("edited".to_string());

        assert!(raw.raw_bytes().is_none());
        assert_eq!(raw.to_string(), r#"{"group_id":"g","bio":"edited"}"#);
    }

    #[test]
    fn decode_failure_is_an_error() {
        let err = Raw::<Profile>::decode(Bytes::from_static(b"[]")).expect_err("wrong shape");
        assert!(matches!(err, crate::Error::JsonDeserialization { .. }));
    }

    #[test]
    fn serializes_as_the_value() {
        let body = Bytes::from_static(br#"{ "group_id" : "g" }"#);
        let raw: Raw<Profile> = Raw::decode(body).expect("decode");
        let json = serde_json::to_string(&raw).expect("serialize");
        assert_eq!(json, r#"{"group_id":"g"}"#);
    }
}
