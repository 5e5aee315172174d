//! Groups: creation, profiles, membership, bans and join requests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{
    DisplayName, GroupHandle, GroupSummary, IdentityHandle, Paginated, PresignedRequest,
    Publicity, Timestamp, ValidationError, WatchResponse,
};
use super::resource_client;
use crate::caller::NO_BODY;
use crate::{Endpoint, HttpClient, Method, Raw, Result};

const GROUPS: &str = "/group/groups";
const AVATAR_UPLOAD_PREPARE: &str = "/group/groups/avatar-upload/prepare";
const PROFILE_VALIDATE: &str = "/group/groups/profile/validate";
const SEARCH: &str = "/group/groups/search";
const AVATAR_UPLOAD_COMPLETE: &str = "/group/groups/{group_id}/avatar-upload/{upload_id}/complete";
const BANS: &str = "/group/groups/{group_id}/bans";
const BAN: &str = "/group/groups/{group_id}/bans/{identity_id}";
const JOIN_REQUESTS: &str = "/group/groups/{group_id}/join-requests";
const KICK: &str = "/group/groups/{group_id}/kick/{identity_id}";
const LEAVE: &str = "/group/groups/{group_id}/leave";
const MEMBERS: &str = "/group/groups/{group_id}/members";
const PROFILE: &str = "/group/groups/{group_id}/profile";
const SUMMARY: &str = "/group/groups/{group_id}/summary";
const TRANSFER_OWNER: &str = "/group/groups/{group_id}/transfer-owner";

/// Body of [`GroupClient::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Name of the new group.
    pub display_name: DisplayName,
}

/// Result of [`GroupClient::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    /// ID of the new group.
    pub group_id: Uuid,
}

/// An identity banned from a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannedIdentity {
    /// The banned identity.
    pub identity: IdentityHandle,
    /// When the ban was issued.
    pub ban_ts: Timestamp,
}

/// A pending request to join a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    /// The requesting identity.
    pub identity: IdentityHandle,
    /// When the request was made.
    pub ts: Timestamp,
}

/// A group member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The member's identity.
    pub identity: IdentityHandle,
}

/// Full group profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Group ID.
    pub group_id: Uuid,
    /// Name shown to users.
    pub display_name: DisplayName,
    /// Avatar image, when one was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Public profile page.
    pub external: super::common::ExternalLinks,
    /// Whether the group is a developer team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_developer: Option<bool>,
    /// Free-form description.
    pub bio: String,
    /// Whether the calling identity is a member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_current_identity_member: Option<bool>,
    /// Who may join.
    pub publicity: Publicity,
    /// Total members, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<i32>,
    /// Members listed with the profile.
    pub members: Vec<Member>,
    /// Pending requests to join.
    pub join_requests: Vec<JoinRequest>,
    /// Whether the calling identity asked to join.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_current_identity_requesting_join: Option<bool>,
    /// Current owner.
    pub owner_identity_id: Uuid,
}

/// One page of [`GroupClient::get_bans`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBansResponse {
    /// Banned identities on this page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub banned_identities: Vec<BannedIdentity>,
    /// Cursor for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    /// Long-poll cursor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch: Option<WatchResponse>,
}

/// One page of [`GroupClient::get_join_requests`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetJoinRequestsResponse {
    /// Pending join requests on this page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub join_requests: Vec<JoinRequest>,
    /// Cursor for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    /// Long-poll cursor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch: Option<WatchResponse>,
}

/// One page of [`GroupClient::get_members`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMembersResponse {
    /// Members on this page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
    /// Cursor for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    /// Long-poll cursor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch: Option<WatchResponse>,
}

/// Result of [`GroupClient::get_profile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProfileResponse {
    /// The profile, absent if the group is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Profile>,
    /// Long-poll cursor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch: Option<WatchResponse>,
}

/// Result of [`GroupClient::get_summary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSummaryResponse {
    /// The summary, absent if the group is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupSummary>,
}

/// Result of [`GroupClient::list_suggested`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSuggestedResponse {
    /// Suggested groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupSummary>,
    /// Long-poll cursor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch: Option<WatchResponse>,
}

/// Result of [`GroupClient::search`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching groups.
    pub groups: Vec<GroupHandle>,
    /// Cursor for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

/// Body of [`GroupClient::prepare_avatar_upload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareAvatarUploadRequest {
    /// File name, used to infer the MIME type when `mime` is unset.
    pub path: String,
    /// MIME type of the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    /// Size of the file in bytes.
    pub content_length: i64,
}

/// Result of [`GroupClient::prepare_avatar_upload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareAvatarUploadResponse {
    /// Pass to [`GroupClient::complete_avatar_upload`] once the file is uploaded.
    pub upload_id: Uuid,
    /// Where and how to upload the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presigned_request: Option<PresignedRequest>,
}

/// Body of [`GroupClient::transfer_ownership`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOwnershipRequest {
    /// Must already be a member of the group.
    pub new_owner_identity_id: Uuid,
}

/// Body of [`GroupClient::update_profile`]. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<DisplayName>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// New join policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publicity: Option<Publicity>,
}

/// Body of [`GroupClient::validate_profile`].
pub type ValidateProfileRequest = UpdateProfileRequest;

/// Result of [`GroupClient::validate_profile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateProfileResponse {
    /// Empty when the profile is valid.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl Paginated for GetBansResponse {
    fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }
}

impl Paginated for GetJoinRequestsResponse {
    fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }
}

impl Paginated for GetMembersResponse {
    fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }
}

impl Paginated for SearchResponse {
    fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }
}

resource_client! {
    /// Endpoints under `/group/groups`.
    GroupClient
}

impl<C: HttpClient> GroupClient<C> {
    /// Suggested groups for the current identity.
    pub async fn list_suggested(&self, watch_index: Option<&str>) -> Result<Raw<ListSuggestedResponse>> {
        let endpoint = Endpoint::new(GROUPS).query("watch_index", watch_index);
        self.caller.call(Method::Get, endpoint, NO_BODY, &self.options).await
    }

    /// Create a group owned by the current identity.
    pub async fn create(&self, request: &CreateRequest) -> Result<Raw<CreateResponse>> {
        self.caller
            .call(Method::Post, Endpoint::new(GROUPS), Some(request), &self.options)
            .await
    }

    /// Start an avatar upload. Upload the file to the presigned URL, then
    /// call [`GroupClient::complete_avatar_upload`].
    pub async fn prepare_avatar_upload(
        &self,
        request: &PrepareAvatarUploadRequest,
    ) -> Result<Raw<PrepareAvatarUploadResponse>> {
        self.caller
            .call(Method::Post, Endpoint::new(AVATAR_UPLOAD_PREPARE), Some(request), &self.options)
            .await
    }

    /// Check a profile without saving it.
    pub async fn validate_profile(
        &self,
        request: &ValidateProfileRequest,
    ) -> Result<Raw<ValidateProfileResponse>> {
        self.caller
            .call(Method::Post, Endpoint::new(PROFILE_VALIDATE), Some(request), &self.options)
            .await
    }

    /// Fuzzy search by display name.
    pub async fn search(
        &self,
        query: &str,
        anchor: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Raw<SearchResponse>> {
        let endpoint = Endpoint::new(SEARCH)
            .query("query", Some(query))
            .query("anchor", anchor)
            .query("limit", limit);
        self.caller.call(Method::Get, endpoint, NO_BODY, &self.options).await
    }

    /// Finish an avatar upload started with [`GroupClient::prepare_avatar_upload`].
    pub async fn complete_avatar_upload(&self, group_id: Uuid, upload_id: Uuid) -> Result<()> {
        let endpoint = Endpoint::new(AVATAR_UPLOAD_COMPLETE).path(group_id).path(upload_id);
        self.caller
            .call_empty(Method::Post, endpoint, NO_BODY, &self.options)
            .await
    }

    /// One page of banned identities.
    pub async fn get_bans(
        &self,
        group_id: Uuid,
        anchor: Option<&str>,
        count: Option<u32>,
        watch_index: Option<&str>,
    ) -> Result<Raw<GetBansResponse>> {
        let endpoint = Endpoint::new(BANS)
            .path(group_id)
            .query("anchor", anchor)
            .query("count", count)
            .query("watch_index", watch_index);
        self.caller.call(Method::Get, endpoint, NO_BODY, &self.options).await
    }

    /// Ban an identity from the group.
    pub async fn ban_identity(&self, group_id: Uuid, identity_id: Uuid) -> Result<()> {
        let endpoint = Endpoint::new(BAN).path(group_id).path(identity_id);
        self.caller
            .call_empty(Method::Post, endpoint, NO_BODY, &self.options)
            .await
    }

    /// Lift a ban.
    pub async fn unban_identity(&self, group_id: Uuid, identity_id: Uuid) -> Result<()> {
        let endpoint = Endpoint::new(BAN).path(group_id).path(identity_id);
        self.caller
            .call_empty(Method::Delete, endpoint, NO_BODY, &self.options)
            .await
    }

    /// One page of pending join requests.
    pub async fn get_join_requests(
        &self,
        group_id: Uuid,
        anchor: Option<&str>,
        count: Option<u32>,
        watch_index: Option<&str>,
    ) -> Result<Raw<GetJoinRequestsResponse>> {
        let endpoint = Endpoint::new(JOIN_REQUESTS)
            .path(group_id)
            .query("anchor", anchor)
            .query("count", count)
            .query("watch_index", watch_index);
        self.caller.call(Method::Get, endpoint, NO_BODY, &self.options).await
    }

    /// Remove a member.
    pub async fn kick_member(&self, group_id: Uuid, identity_id: Uuid) -> Result<()> {
        let endpoint = Endpoint::new(KICK).path(group_id).path(identity_id);
        self.caller
            .call_empty(Method::Post, endpoint, NO_BODY, &self.options)
            .await
    }

    /// Leave the group as the current identity.
    pub async fn leave(&self, group_id: Uuid) -> Result<()> {
        let endpoint = Endpoint::new(LEAVE).path(group_id);
        self.caller
            .call_empty(Method::Post, endpoint, NO_BODY, &self.options)
            .await
    }

    /// One page of members.
    pub async fn get_members(
        &self,
        group_id: Uuid,
        anchor: Option<&str>,
        count: Option<u32>,
        watch_index: Option<&str>,
    ) -> Result<Raw<GetMembersResponse>> {
        let endpoint = Endpoint::new(MEMBERS)
            .path(group_id)
            .query("anchor", anchor)
            .query("count", count)
            .query("watch_index", watch_index);
        self.caller.call(Method::Get, endpoint, NO_BODY, &self.options).await
    }

    /// Full profile of a group.
    pub async fn get_profile(
        &self,
        group_id: Uuid,
        watch_index: Option<&str>,
    ) -> Result<Raw<GetProfileResponse>> {
        let endpoint = Endpoint::new(PROFILE)
            .path(group_id)
            .query("watch_index", watch_index);
        self.caller.call(Method::Get, endpoint, NO_BODY, &self.options).await
    }

    /// Update the profile. Only set fields change.
    pub async fn update_profile(&self, group_id: Uuid, request: &UpdateProfileRequest) -> Result<()> {
        let endpoint = Endpoint::new(PROFILE).path(group_id);
        self.caller
            .call_empty(Method::Post, endpoint, Some(request), &self.options)
            .await
    }

    /// Summary of a group.
    pub async fn get_summary(&self, group_id: Uuid) -> Result<Raw<GetSummaryResponse>> {
        let endpoint = Endpoint::new(SUMMARY).path(group_id);
        self.caller.call(Method::Get, endpoint, NO_BODY, &self.options).await
    }

    /// Hand the group to another member.
    pub async fn transfer_ownership(
        &self,
        group_id: Uuid,
        request: &TransferOwnershipRequest,
    ) -> Result<()> {
        let endpoint = Endpoint::new(TRANSFER_OWNER).path(group_id);
        self.caller
            .call_empty(Method::Post, endpoint, Some(request), &self.options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn members_page_round_trips() {
        let json = serde_json::json!({
            "members": [{
                "identity": {
                    "identity_id": "5d2b0a29-6f9c-4d38-9c65-0c4f7c1e0a11",
                    "display_name": "Alice",
                    "account_number": 1234,
                    "avatar_url": "https://cdn.rivet.gg/a.png",
                    "external": {"profile": "https://rivet.gg/identities/a"}
                }
            }],
            "anchor": "page-2",
            "watch": {"index": "17"}
        });

        let page: GetMembersResponse = serde_json::from_value(json.clone()).expect("decode");
        check!(page.members.len() == 1);
        check!(page.has_more());
        check!(serde_json::to_value(&page).expect("encode") == json);
    }

    #[test]
    fn last_page_has_no_more() {
        let page: GetBansResponse = serde_json::from_str("{}").expect("decode");
        check!(page.banned_identities.is_empty());
        check!(!page.has_more());
    }

    #[test]
    fn update_profile_omits_unset_fields() {
        let request = UpdateProfileRequest {
            bio: Some("hello".to_string()),
            ..UpdateProfileRequest::default()
        };
        check!(serde_json::to_string(&request).expect("encode") == r#"{"bio":"hello"}"#);
    }

    #[test]
    fn ban_timestamp_is_rfc3339() {
        let json = serde_json::json!({
            "identity": {
                "identity_id": "5d2b0a29-6f9c-4d38-9c65-0c4f7c1e0a11",
                "display_name": "Mallory",
                "account_number": 1,
                "avatar_url": "https://cdn.rivet.gg/m.png",
                "is_registered": false,
                "external": {"profile": "https://rivet.gg/identities/m"}
            },
            "ban_ts": "2024-03-01T12:00:00Z"
        });

        let ban: BannedIdentity = serde_json::from_value(json.clone()).expect("decode");
        check!(ban.ban_ts.timestamp() == 1_709_294_400);
        check!(serde_json::to_value(&ban).expect("encode") == json);
    }
}
