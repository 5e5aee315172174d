//! Group invite codes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::GroupHandle;
use super::resource_client;
use crate::caller::NO_BODY;
use crate::{Endpoint, HttpClient, Method, Raw, Result};

const INVITE: &str = "/group/invites/{group_invite_code}";
const CONSUME: &str = "/group/invites/{group_invite_code}/consume";
const CREATE: &str = "/group/groups/{group_id}/invites";

/// Result of [`InvitesClient::get_invite`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetInviteResponse {
    /// The group the code invites to.
    pub group: GroupHandle,
}

/// Result of [`InvitesClient::consume_invite`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumeInviteResponse {
    /// The group joined, absent if the code was already used up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
}

/// Body of [`InvitesClient::create_invite`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInviteRequest {
    /// Lifetime of the code in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    /// How many times the code can be used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_count: Option<u32>,
}

/// Result of [`InvitesClient::create_invite`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInviteResponse {
    /// The invite code.
    pub code: String,
}

resource_client! {
    /// Endpoints for group invite codes.
    InvitesClient
}

impl<C: HttpClient> InvitesClient<C> {
    /// Look up the group behind an invite code.
    pub async fn get_invite(&self, code: &str) -> Result<Raw<GetInviteResponse>> {
        let endpoint = Endpoint::new(INVITE).path(code);
        self.caller.call(Method::Get, endpoint, NO_BODY, &self.options).await
    }

    /// Join the group behind an invite code.
    pub async fn consume_invite(&self, code: &str) -> Result<Raw<ConsumeInviteResponse>> {
        let endpoint = Endpoint::new(CONSUME).path(code);
        self.caller.call(Method::Post, endpoint, NO_BODY, &self.options).await
    }

    /// Create an invite code for a group.
    pub async fn create_invite(
        &self,
        group_id: Uuid,
        request: &CreateInviteRequest,
    ) -> Result<Raw<CreateInviteResponse>> {
        let endpoint = Endpoint::new(CREATE).path(group_id);
        self.caller
            .call(Method::Post, endpoint, Some(request), &self.options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn empty_create_request_is_empty_object() {
        check!(serde_json::to_string(&CreateInviteRequest::default()).expect("encode") == "{}");
    }

    #[test]
    fn consumed_code_without_group() {
        let response: ConsumeInviteResponse = serde_json::from_str("{}").expect("decode");
        check!(response.group_id.is_none());
    }
}
