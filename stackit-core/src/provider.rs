//! Provider - Traits abstracting resource and data source operations
//!
//! A Provider groups the resources and data sources of one cloud vendor.
//! Resources and data sources convert their typed models into API calls and
//! map the responses back into models.

use std::future::Future;
use std::pin::Pin;

use crate::mapping::MappingError;
use crate::resource::ResourceId;
use crate::schema::ResourceSchema;

/// Error type for Provider operations
#[derive(Debug)]
pub struct ProviderError {
    /// Short diagnostic summary (e.g., "Error reading user")
    pub summary: Option<String>,
    pub message: String,
    pub resource_id: Option<ResourceId>,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref id) = self.resource_id {
            write!(f, "[{}] ", id)?;
        }
        if let Some(ref summary) = self.summary {
            write!(f, "{}: ", summary)?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            summary: None,
            message: message.into(),
            resource_id: None,
            cause: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn for_resource(mut self, id: ResourceId) -> Self {
        self.resource_id = Some(id);
        self
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

impl From<MappingError> for ProviderError {
    fn from(err: MappingError) -> Self {
        ProviderError::new(format!("Processing API payload: {}", err)).with_cause(err)
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Return type for async operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Kind of a type exposed by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Resource,
    DataSource,
}

/// Definition of a type that a Provider can handle
pub trait ResourceType: Send + Sync {
    /// Full type name (e.g., "stackit_secretsmanager_user")
    fn name(&self) -> &'static str;

    fn kind(&self) -> TypeKind {
        TypeKind::Resource
    }

    /// Attribute schema for this type
    fn schema(&self) -> ResourceSchema;
}

/// A managed resource with a full create / read / update / delete lifecycle
pub trait Resource: ResourceType {
    type Model: Send;

    /// Refresh the state of a resource
    ///
    /// Returns `Ok(None)` when the resource no longer exists upstream and
    /// must be removed from state.
    fn read(&self, state: Self::Model) -> BoxFuture<'_, ProviderResult<Option<Self::Model>>>;

    /// Create a resource from the planned model and return the resulting state
    fn create(&self, plan: Self::Model) -> BoxFuture<'_, ProviderResult<Self::Model>>;

    /// Update a resource to match the planned model and return the resulting state
    fn update(&self, plan: Self::Model) -> BoxFuture<'_, ProviderResult<Self::Model>>;

    /// Delete the resource described by the state
    fn delete(&self, state: Self::Model) -> BoxFuture<'_, ProviderResult<()>>;

    /// Build a partial model from an internal Terraform identifier
    fn import_state(&self, id: &str) -> ProviderResult<Self::Model>;
}

/// A read-only data source
pub trait DataSource: ResourceType {
    type Model: Send;

    /// Read the entity described by the configuration
    fn read(&self, config: Self::Model) -> BoxFuture<'_, ProviderResult<Self::Model>>;
}

/// Main Provider trait
pub trait Provider: Send + Sync {
    /// Name of this Provider, used as type name prefix (e.g., "stackit")
    fn name(&self) -> &'static str;

    /// List of resource and data source types this Provider can handle
    fn resource_types(&self) -> Vec<Box<dyn ResourceType>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock Resource for testing
    struct MockResource;

    impl ResourceType for MockResource {
        fn name(&self) -> &'static str {
            "mock_thing"
        }

        fn schema(&self) -> ResourceSchema {
            ResourceSchema::new(self.name())
        }
    }

    impl Resource for MockResource {
        type Model = String;

        fn read(&self, _state: String) -> BoxFuture<'_, ProviderResult<Option<String>>> {
            Box::pin(async { Ok(None) })
        }

        fn create(&self, plan: String) -> BoxFuture<'_, ProviderResult<String>> {
            Box::pin(async move { Ok(format!("{}-created", plan)) })
        }

        fn update(&self, plan: String) -> BoxFuture<'_, ProviderResult<String>> {
            Box::pin(async move { Ok(plan) })
        }

        fn delete(&self, _state: String) -> BoxFuture<'_, ProviderResult<()>> {
            Box::pin(async { Ok(()) })
        }

        fn import_state(&self, id: &str) -> ProviderResult<String> {
            Ok(id.to_string())
        }
    }

    #[tokio::test]
    async fn mock_resource_read_removes_state() {
        let resource = MockResource;
        let state = resource.read("x".to_string()).await.unwrap();
        assert!(state.is_none());
    }

    #[tokio::test]
    async fn mock_resource_create_returns_state() {
        let resource = MockResource;
        let state = resource.create("x".to_string()).await.unwrap();
        assert_eq!(state, "x-created");
        assert_eq!(resource.kind(), TypeKind::Resource);
    }

    #[test]
    fn provider_error_display() {
        let err = ProviderError::new("User does not exist")
            .with_summary("Error reading user")
            .for_resource(ResourceId::new("stackit_secretsmanager_user", "p,i,u"));
        assert_eq!(
            err.to_string(),
            "[stackit_secretsmanager_user.p,i,u] Error reading user: User does not exist"
        );
    }

    #[test]
    fn mapping_error_converts_to_provider_error() {
        let err: ProviderError = MappingError::ResponseNil.into();
        assert_eq!(err.to_string(), "Processing API payload: response input is nil");
        assert!(std::error::Error::source(&err).is_some());
    }
}
