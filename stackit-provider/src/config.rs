//! Provider configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use stackit_sdk::observability::ObservabilityClient;
use stackit_sdk::secretsmanager::SecretsManagerClient;

pub const DEFAULT_REGION: &str = "eu01";
pub const TOKEN_ENV: &str = "STACKIT_SERVICE_ACCOUNT_TOKEN";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Settings shared by all resources and data sources of the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observability_custom_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secretsmanager_custom_endpoint: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            service_account_token: None,
            observability_custom_endpoint: None,
            secretsmanager_custom_endpoint: None,
        }
    }
}

impl ProviderConfig {
    /// Load a JSON config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.is_empty() {
            return Err(ConfigError::Invalid {
                field: "region",
                message: "must not be empty".to_string(),
            });
        }
        for (field, endpoint) in [
            ("observability_custom_endpoint", &self.observability_custom_endpoint),
            ("secretsmanager_custom_endpoint", &self.secretsmanager_custom_endpoint),
        ] {
            let Some(endpoint) = endpoint else { continue };
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    field,
                    message: format!("{:?} is not an http(s) URL", endpoint),
                });
            }
        }
        Ok(())
    }

    pub fn observability_endpoint(&self) -> String {
        self.observability_custom_endpoint
            .clone()
            .unwrap_or_else(|| ObservabilityClient::DEFAULT_ENDPOINT.to_string())
    }

    pub fn secretsmanager_endpoint(&self) -> String {
        self.secretsmanager_custom_endpoint
            .clone()
            .unwrap_or_else(|| SecretsManagerClient::default_endpoint(&self.region))
    }
}
