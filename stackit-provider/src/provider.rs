//! STACKIT provider implementation
//!
//! Builds the per-service API clients from a [`ProviderConfig`] and hands
//! them to the resources and data sources.

use std::sync::Arc;

use stackit_core::provider::{ProviderError, ProviderResult};
use stackit_sdk::ApiClient;
use stackit_sdk::observability::{ObservabilityApi, ObservabilityClient};
use stackit_sdk::secretsmanager::{SecretsManagerApi, SecretsManagerClient};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::observability::ScrapeConfigResource;
use crate::secretsmanager::UserDataSource;

/// STACKIT Provider
pub struct StackitProvider {
    observability: Arc<dyn ObservabilityApi>,
    secretsmanager: Arc<dyn SecretsManagerApi>,
}

impl StackitProvider {
    /// Create a provider talking to the endpoints in `config`
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        config.validate().map_err(|e| {
            ProviderError::new(e.to_string())
                .with_summary("Error configuring provider")
                .with_cause(e)
        })?;

        let token = config.service_account_token.clone();
        let client = |endpoint: String| {
            debug!(%endpoint, "configuring API client");
            ApiClient::new(&endpoint, token.clone()).map_err(|e| {
                ProviderError::new(format!("Creating API client for {}: {}", endpoint, e))
                    .with_summary("Error configuring provider")
                    .with_cause(e)
            })
        };

        let observability = ObservabilityClient::new(client(config.observability_endpoint())?);
        let secretsmanager = SecretsManagerClient::new(client(config.secretsmanager_endpoint())?);
        Ok(Self::with_clients(
            Arc::new(observability),
            Arc::new(secretsmanager),
        ))
    }

    /// Create a provider from existing API implementations
    pub fn with_clients(
        observability: Arc<dyn ObservabilityApi>,
        secretsmanager: Arc<dyn SecretsManagerApi>,
    ) -> Self {
        Self {
            observability,
            secretsmanager,
        }
    }

    pub fn scrape_config(&self) -> ScrapeConfigResource {
        ScrapeConfigResource::new(self.observability.clone())
    }

    pub fn secretsmanager_user(&self) -> UserDataSource {
        UserDataSource::new(self.secretsmanager.clone())
    }
}
