//! Secrets Manager service: users of a secrets manager instance

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiResult;

/// Secrets Manager user as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Whether the user has write access to the secrets engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Operations of the secrets manager API used by the provider
#[async_trait]
pub trait SecretsManagerApi: Send + Sync {
    async fn get_user(&self, project_id: &str, instance_id: &str, user_id: &str)
    -> ApiResult<User>;
}

/// HTTP client for the secrets manager API
#[derive(Debug, Clone)]
pub struct SecretsManagerClient {
    client: ApiClient,
}

impl SecretsManagerClient {
    /// Regional endpoint template, `{region}` is substituted
    pub const DEFAULT_ENDPOINT: &'static str = "https://secretsmanager.api.{region}.stackit.cloud";

    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn default_endpoint(region: &str) -> String {
        Self::DEFAULT_ENDPOINT.replace("{region}", region)
    }
}

#[async_trait]
impl SecretsManagerApi for SecretsManagerClient {
    async fn get_user(
        &self,
        project_id: &str,
        instance_id: &str,
        user_id: &str,
    ) -> ApiResult<User> {
        self.client
            .get(&[
                "v1",
                "projects",
                project_id,
                "instances",
                instance_id,
                "users",
                user_id,
            ])
            .await
    }
}
