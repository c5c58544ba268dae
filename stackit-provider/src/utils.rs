//! Helpers shared by resources and data sources

use std::collections::HashMap;

use stackit_core::provider::ProviderError;
use stackit_core::schema::ResourceSchema;
use stackit_sdk::ApiError;
use tracing::error;

/// Convert a failed API call into a provider diagnostic
///
/// API errors carrying an HTTP status use `detail_overrides[status]` when
/// present and `default_detail` otherwise. Errors without a status (transport,
/// decoding) report the underlying error.
pub fn api_error(
    err: ApiError,
    summary: &str,
    default_detail: &str,
    detail_overrides: &HashMap<u16, String>,
) -> ProviderError {
    let detail = match err.status() {
        Some(status) => detail_overrides
            .get(&status)
            .cloned()
            .unwrap_or_else(|| default_detail.to_string()),
        None => format!("Calling API: {}", err),
    };
    error!(summary, detail = %detail, cause = %err, "API call failed");
    ProviderError::new(detail).with_summary(summary).with_cause(err)
}

/// Convert a failed create, update or delete call into a provider diagnostic
pub fn api_call_error(err: ApiError, summary: &str) -> ProviderError {
    error!(summary, cause = %err, "API call failed");
    ProviderError::new(format!("Calling API: {}", err))
        .with_summary(summary)
        .with_cause(err)
}

/// Validate identifier attributes against the schema before calling the API
pub fn validate_config(
    schema: &ResourceSchema,
    values: &[(&str, Option<&str>)],
) -> Result<(), ProviderError> {
    schema.validate_strings(values).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        ProviderError::new(messages.join("; ")).with_summary("Invalid configuration")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackit_core::schema::types;

    fn status_error(status: u16) -> ApiError {
        ApiError::Status {
            method: "GET".to_string(),
            url: "https://example.test".to_string(),
            status,
            body: String::new(),
        }
    }

    #[test]
    fn override_is_used_for_matching_status() {
        let overrides = HashMap::from([(
            403,
            "Project with ID \"pid\" not found or forbidden access".to_string(),
        )]);
        let err = api_error(status_error(403), "Reading user", "User does not exist", &overrides);
        assert_eq!(err.summary.as_deref(), Some("Reading user"));
        assert_eq!(
            err.message,
            "Project with ID \"pid\" not found or forbidden access"
        );
    }

    #[test]
    fn default_detail_for_other_status() {
        let overrides = HashMap::from([(403, "forbidden".to_string())]);
        let err = api_error(status_error(404), "Reading user", "User does not exist", &overrides);
        assert_eq!(err.message, "User does not exist");
        assert!(err.cause.is_some());
    }

    #[test]
    fn transport_errors_report_the_cause() {
        let err = api_error(
            ApiError::Transport("connection refused".to_string()),
            "Reading user",
            "User does not exist",
            &HashMap::new(),
        );
        assert_eq!(
            err.message,
            "Calling API: http transport error: connection refused"
        );
    }

    #[test]
    fn api_call_error_wraps_the_cause() {
        let err = api_call_error(status_error(500), "Error creating scrape config");
        assert_eq!(err.summary.as_deref(), Some("Error creating scrape config"));
        assert_eq!(
            err.message,
            "Calling API: GET https://example.test: status 500: "
        );
    }

    #[test]
    fn validate_config_joins_messages() {
        let schema = ResourceSchema::new("thing")
            .attribute(types::uuid_id("project_id", "Project"))
            .attribute(types::uuid_id("instance_id", "Instance"));
        let err = validate_config(
            &schema,
            &[("project_id", Some("x")), ("instance_id", None)],
        )
        .unwrap_err();
        assert_eq!(err.summary.as_deref(), Some("Invalid configuration"));
        assert_eq!(
            err.message,
            "Attribute 'project_id': 'x' is not a valid UUID; Required attribute 'instance_id' is missing"
        );
    }
}
