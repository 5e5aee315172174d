//! Live identity events, delivered by long polling.

use serde::{Deserialize, Serialize};

use super::common::{Timestamp, WatchResponse};
use super::resource_client;
use crate::caller::NO_BODY;
use crate::{Endpoint, HttpClient, Method, Raw, Result};

const LIVE: &str = "/identity/events/live";

/// A notification to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventNotification {
    /// Heading.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Image shown next to the text.
    pub thumbnail_url: String,
    /// Where to go when the notification is clicked.
    pub url: String,
}

/// One event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalEvent {
    /// When the event happened.
    pub ts: Timestamp,
    /// What happened. The shape depends on the event type and is kept untyped.
    pub kind: serde_json::Value,
    /// Notification to display, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<EventNotification>,
}

/// Result of [`IdentityEventsClient::watch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchEventsResponse {
    /// Events since the given watch index, oldest first.
    pub events: Vec<GlobalEvent>,
    /// Pass `watch.index` to the next call to wait for newer events.
    pub watch: WatchResponse,
}

resource_client! {
    /// Endpoints under `/identity/events`.
    IdentityEventsClient
}

impl<C: HttpClient> IdentityEventsClient<C> {
    /// Events for the current identity. Blocks server side until something
    /// newer than `watch_index` happens.
    pub async fn watch(&self, watch_index: Option<&str>) -> Result<Raw<WatchEventsResponse>> {
        let endpoint = Endpoint::new(LIVE).query("watch_index", watch_index);
        self.caller.call(Method::Get, endpoint, NO_BODY, &self.options).await
    }
}
