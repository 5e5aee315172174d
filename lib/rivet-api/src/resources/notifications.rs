//! Push notification registration.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::resource_client;
use crate::caller::NO_BODY;
use crate::{Endpoint, HttpClient, Method, Result};

const REGISTER: &str = "/portal/notifications/register";

/// Firebase Cloud Messaging registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseService {
    /// Device registration token issued by Firebase.
    pub access_key: String,
}

/// Where notifications should be delivered. Exactly one service is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterService {
    /// Firebase Cloud Messaging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firebase: Option<FirebaseService>,
}

/// Body of [`NotificationsClient::register`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Delivery target.
    pub service: RegisterService,
}

impl RegisterRequest {
    /// Register a Firebase device token.
    #[must_use]
    pub fn firebase(access_key: impl Into<String>) -> Self {
        Self {
            service: RegisterService {
                firebase: Some(FirebaseService {
                    access_key: access_key.into(),
                }),
            },
        }
    }
}

/// Service to unregister from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnregisterService {
    #[display("firebase")]
    Firebase,
}

resource_client! {
    /// Endpoints under `/portal/notifications`.
    NotificationsClient
}

impl<C: HttpClient> NotificationsClient<C> {
    /// Register the current identity for push notifications.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.caller
            .call_empty(Method::Post, Endpoint::new(REGISTER), Some(request), &self.options)
            .await
    }

    /// Stop push notifications through `service`.
    pub async fn unregister(&self, service: UnregisterService) -> Result<()> {
        let endpoint = Endpoint::new(REGISTER).query("service", Some(service));
        self.caller
            .call_empty(Method::Delete, endpoint, NO_BODY, &self.options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firebase_register_shape() {
        let body = serde_json::to_string_pretty(&RegisterRequest::firebase("fcm-token")).expect("encode");
        insta::assert_snapshot!(body, @r#"
        {
          "service": {
            "firebase": {
              "access_key": "fcm-token"
            }
          }
        }
        "#);
    }
}
