//! Game namespaces.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{DisplayName, Timestamp, ValidationError};
use super::resource_client;
use crate::caller::NO_BODY;
use crate::{Endpoint, HttpClient, Method, Raw, Result};

const NAMESPACES: &str = "/cloud/games/{game_id}/namespaces";
const VALIDATE: &str = "/cloud/games/{game_id}/namespaces/validate";
const NAMESPACE: &str = "/cloud/games/{game_id}/namespaces/{namespace_id}";
const VERSION: &str = "/cloud/games/{game_id}/namespaces/{namespace_id}/version";
const PUBLIC_TOKEN: &str = "/cloud/games/{game_id}/namespaces/{namespace_id}/tokens/public";

/// Body of [`NamespacesClient::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNamespaceRequest {
    /// Name shown in the dashboard.
    pub display_name: DisplayName,
    /// Version the namespace starts on.
    pub version_id: Uuid,
    /// URL-safe unique name within the game.
    pub name_id: String,
}

/// Result of [`NamespacesClient::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNamespaceResponse {
    /// ID of the new namespace.
    pub namespace_id: Uuid,
}

/// Body of [`NamespacesClient::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateNamespaceRequest {
    /// Name shown in the dashboard.
    pub display_name: DisplayName,
    /// Candidate URL-safe name.
    pub name_id: String,
}

/// Result of [`NamespacesClient::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateNamespaceResponse {
    /// Empty when the namespace is valid.
    pub errors: Vec<ValidationError>,
}

/// A namespace with its configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceFull {
    /// Namespace ID.
    pub namespace_id: Uuid,
    /// Creation time.
    pub create_ts: Timestamp,
    /// Name shown in the dashboard.
    pub display_name: DisplayName,
    /// Version currently served.
    pub version_id: Uuid,
    /// URL-safe unique name within the game.
    pub name_id: String,
    /// Service configuration, passed through untyped.
    pub config: serde_json::Value,
}

/// Result of [`NamespacesClient::get`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetNamespaceResponse {
    /// The namespace.
    pub namespace: NamespaceFull,
}

/// Body of [`NamespacesClient::update_version`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateVersionRequest {
    /// Version to serve.
    pub version_id: Uuid,
}

/// Result of [`NamespacesClient::create_token_public`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePublicTokenResponse {
    /// Token safe to embed in game clients.
    pub token: String,
}

resource_client! {
    /// Endpoints under `/cloud/games/{game_id}/namespaces`.
    NamespacesClient
}

impl<C: HttpClient> NamespacesClient<C> {
    /// Create a namespace.
    pub async fn create(
        &self,
        game_id: Uuid,
        request: &CreateNamespaceRequest,
    ) -> Result<Raw<CreateNamespaceResponse>> {
        let endpoint = Endpoint::new(NAMESPACES).path(game_id);
        self.caller
            .call(Method::Post, endpoint, Some(request), &self.options)
            .await
    }

    /// Check a namespace without creating it.
    pub async fn validate(
        &self,
        game_id: Uuid,
        request: &ValidateNamespaceRequest,
    ) -> Result<Raw<ValidateNamespaceResponse>> {
        let endpoint = Endpoint::new(VALIDATE).path(game_id);
        self.caller
            .call(Method::Post, endpoint, Some(request), &self.options)
            .await
    }

    /// Fetch a namespace.
    pub async fn get(&self, game_id: Uuid, namespace_id: Uuid) -> Result<Raw<GetNamespaceResponse>> {
        let endpoint = Endpoint::new(NAMESPACE).path(game_id).path(namespace_id);
        self.caller.call(Method::Get, endpoint, NO_BODY, &self.options).await
    }

    /// Point a namespace at another version.
    pub async fn update_version(
        &self,
        game_id: Uuid,
        namespace_id: Uuid,
        request: &UpdateVersionRequest,
    ) -> Result<()> {
        let endpoint = Endpoint::new(VERSION).path(game_id).path(namespace_id);
        self.caller
            .call_empty(Method::Put, endpoint, Some(request), &self.options)
            .await
    }

    /// Issue a public token for a namespace.
    pub async fn create_token_public(
        &self,
        game_id: Uuid,
        namespace_id: Uuid,
    ) -> Result<Raw<CreatePublicTokenResponse>> {
        let endpoint = Endpoint::new(PUBLIC_TOKEN).path(game_id).path(namespace_id);
        self.caller.call(Method::Post, endpoint, NO_BODY, &self.options).await
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn namespace_config_passes_through() {
        let json = serde_json::json!({
            "namespace": {
                "namespace_id": "0b0f5c8e-0e1f-4d0c-9a53-3c2f6d4f8f10",
                "create_ts": "2023-11-14T22:13:20Z",
                "display_name": "Production",
                "version_id": "6e3a4b39-1d8c-4a2e-8a0a-6c2b9b1f2e33",
                "name_id": "prod",
                "config": {"cdn": {"enable_domain_public_auth": false}, "future_field": [1, 2]}
            }
        });

        let response: GetNamespaceResponse = serde_json::from_value(json.clone()).expect("decode");
        check!(response.namespace.name_id == "prod");
        check!(serde_json::to_value(&response).expect("encode") == json);
    }
}
