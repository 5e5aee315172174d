//! Linking a device to a cloud account.
//!
//! The device calls [`DeviceLinksClient::prepare`], shows the returned URL
//! to the user and long-polls [`DeviceLinksClient::get`] until a token
//! appears. The browser side calls [`DeviceLinksClient::complete`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::WatchResponse;
use super::resource_client;
use crate::caller::NO_BODY;
use crate::{Endpoint, HttpClient, Method, Raw, Result};

const LINKS: &str = "/cloud/devices/links";
const COMPLETE: &str = "/cloud/devices/links/complete";

/// Result of [`DeviceLinksClient::prepare`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareResponse {
    /// Identifies the link.
    pub device_link_id: Uuid,
    /// Secret the device polls with.
    pub device_link_token: String,
    /// Page the user opens to approve the link.
    pub device_link_url: String,
}

/// Result of [`DeviceLinksClient::get`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetResponse {
    /// Set once the link was completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_token: Option<String>,
    /// Long-poll cursor.
    pub watch: WatchResponse,
}

/// Body of [`DeviceLinksClient::complete`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteRequest {
    /// Token returned by [`DeviceLinksClient::prepare`].
    pub device_link_token: String,
    /// Game the device is linked to.
    pub game_id: Uuid,
}

resource_client! {
    /// Endpoints under `/cloud/devices/links`.
    DeviceLinksClient
}

impl<C: HttpClient> DeviceLinksClient<C> {
    /// Start a device link.
    pub async fn prepare(&self) -> Result<Raw<PrepareResponse>> {
        self.caller
            .call(Method::Post, Endpoint::new(LINKS), NO_BODY, &self.options)
            .await
    }

    /// Poll a device link. With a `watch_index` the server holds the
    /// request until the link changes.
    pub async fn get(&self, device_link_token: &str, watch_index: Option<&str>) -> Result<Raw<GetResponse>> {
        let endpoint = Endpoint::new(LINKS)
            .query("device_link_token", Some(device_link_token))
            .query("watch_index", watch_index);
        self.caller.call(Method::Get, endpoint, NO_BODY, &self.options).await
    }

    /// Approve a device link for a game.
    pub async fn complete(&self, request: &CompleteRequest) -> Result<()> {
        self.caller
            .call_empty(Method::Post, Endpoint::new(COMPLETE), Some(request), &self.options)
            .await
    }
}
