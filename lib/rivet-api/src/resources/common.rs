//! Types shared by several resource groups.

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A human readable name. Validated server side.
pub type DisplayName = String;

/// Returned by endpoints that support long polling.
///
/// Pass `index` back as the `watch_index` query parameter to block until
/// the resource changes past this point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchResponse {
    /// Opaque watch index.
    pub index: String,
}

impl WatchResponse {
    /// The value to send as `watch_index` on the next request.
    #[must_use]
    pub fn watch_index(&self) -> &str {
        &self.index
    }
}

/// A list response that may continue on another page.
///
/// ```ignore
/// let mut anchor = None;
/// loop {
///     let page = client.group().get_members(group_id, anchor.as_deref(), Some(32), None).await?;
///     // ...
///     if !page.has_more() { break; }
///     anchor = page.anchor().map(str::to_string);
/// }
/// ```
pub trait Paginated {
    /// Cursor for the next page, echoed back as the `anchor` query parameter.
    fn anchor(&self) -> Option<&str>;

    /// Whether another page can be requested.
    fn has_more(&self) -> bool {
        self.anchor().is_some()
    }
}

/// One failed check from a validation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Path to the offending field, one segment per element.
    pub path: Vec<String>,
}

/// Who can join a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Publicity {
    /// Anyone may join.
    #[display("open")]
    Open,
    /// Joining requires an invite or an accepted request.
    #[display("closed")]
    Closed,
}

/// Upload target handed out by the prepare-upload endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedRequest {
    /// URL the file must be `PUT` to.
    pub url: String,
}

/// Links to pages outside the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLinks {
    /// Public profile page.
    pub profile: String,
}

/// Public view of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityHandle {
    /// Identity ID.
    pub identity_id: Uuid,
    /// Display name.
    pub display_name: DisplayName,
    /// Number disambiguating identical display names.
    pub account_number: i32,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Whether the identity has a linked account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_registered: Option<bool>,
    /// External pages.
    pub external: ExternalLinks,
}

/// Public view of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupHandle {
    /// Group ID.
    pub group_id: Uuid,
    /// Display name.
    pub display_name: DisplayName,
    /// Avatar image URL, if one was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// External pages.
    pub external: ExternalLinks,
    /// Whether the group is a developer group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_developer: Option<bool>,
}

/// Group as shown in lists and suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Group ID.
    pub group_id: Uuid,
    /// Display name.
    pub display_name: DisplayName,
    /// Avatar image URL, if one was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// External pages.
    pub external: ExternalLinks,
    /// Whether the group is a developer group.
    pub is_developer: bool,
    /// Group bio.
    pub bio: String,
    /// Whether the caller is a member.
    pub is_current_identity_member: bool,
    /// Who can join.
    pub publicity: Publicity,
    /// Number of members.
    pub member_count: i32,
    /// Identity that owns the group.
    pub owner_identity_id: Uuid,
}

/// Timestamps are RFC 3339 on the wire.
pub type Timestamp = DateTime<Utc>;
