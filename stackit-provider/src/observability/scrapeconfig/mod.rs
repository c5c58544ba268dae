//! Observability scrape config resource
//!
//! Manages the scrape configs (Prometheus jobs) of an observability instance.
//! The nested `saml2`, `basic_auth` and `targets` blocks are decomposed into
//! their own models before a request payload is built.

mod mapping;

pub use mapping::{
    DEFAULT_SAMPLE_LIMIT, DEFAULT_SCHEME, DEFAULT_SCRAPE_INTERVAL, DEFAULT_SCRAPE_TIMEOUT,
    map_fields, to_create_payload, to_update_payload,
};

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stackit_core::Attr;
use stackit_core::provider::{BoxFuture, ProviderError, ProviderResult, Resource, ResourceType};
use stackit_core::resource::{ResourceId, build_internal_terraform_id, split_internal_terraform_id};
use stackit_core::schema::{AttributeSchema, AttributeType, ResourceSchema, Validator, types};
use stackit_sdk::observability::ObservabilityApi;
use tracing::{debug, info};

use crate::utils::{api_call_error, validate_config};
use crate::wait::{self, WaitConfig};

pub const TYPE_NAME: &str = "stackit_observability_scrapeconfig";

/// Scrape config attribute model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    pub id: Attr<String>,
    pub project_id: Attr<String>,
    pub instance_id: Attr<String>,
    pub name: Attr<String>,
    pub metrics_path: Attr<String>,
    pub scheme: Attr<String>,
    pub scrape_interval: Attr<String>,
    pub scrape_timeout: Attr<String>,
    pub sample_limit: Attr<i64>,
    pub saml2: Attr<Saml2Model>,
    pub basic_auth: Attr<BasicAuthModel>,
    pub targets: Attr<Vec<TargetModel>>,
}

/// Struct corresponding to Model.saml2
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Saml2Model {
    pub enable_url_parameters: Attr<bool>,
}

/// Struct corresponding to Model.basic_auth
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicAuthModel {
    pub username: Attr<String>,
    pub password: Attr<String>,
}

/// Struct corresponding to an element of Model.targets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetModel {
    pub urls: Attr<Vec<String>>,
    pub labels: Attr<HashMap<String, String>>,
}

impl Model {
    /// The `saml2` block, empty when null or unknown
    pub fn saml2_model(&self) -> Saml2Model {
        self.saml2.to_option().unwrap_or_default()
    }

    /// The `basic_auth` block, empty when null or unknown
    pub fn basic_auth_model(&self) -> BasicAuthModel {
        self.basic_auth.to_option().unwrap_or_default()
    }

    /// The `targets` list, empty when null or unknown
    pub fn target_models(&self) -> Vec<TargetModel> {
        self.targets.to_option().unwrap_or_default()
    }

    fn resource_id(&self) -> ResourceId {
        let name = match self.id.as_option() {
            Some(id) => id.clone(),
            None => build_internal_terraform_id(&[
                self.project_id.value_str(),
                self.instance_id.value_str(),
                self.name.value_str(),
            ]),
        };
        ResourceId::new(TYPE_NAME, name)
    }
}

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(TYPE_NAME)
        .with_description("Observability scrape config resource schema.")
        .attribute(types::internal_id(
            "Terraform's internal resource ID. It is structured as \"`project_id`,`instance_id`,`name`\".",
        ))
        .attribute(types::uuid_id(
            "project_id",
            "STACKIT project ID to which the scrape config is associated.",
        ))
        .attribute(types::uuid_id(
            "instance_id",
            "Observability instance ID to which the scrape config is associated.",
        ))
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .with_description("Specifies the name of the scraping job.")
                .with_validator(Validator::NoSeparator)
                .with_validator(Validator::LengthBetween(1, 200)),
        )
        .attribute(
            AttributeSchema::new("metrics_path", AttributeType::String)
                .required()
                .with_description("Specifies the job scraping url path. E.g. `/metrics`.")
                .with_validator(Validator::LengthBetween(1, 200)),
        )
        .attribute(
            AttributeSchema::new("scheme", AttributeType::String)
                .computed()
                .with_description("Specifies the http scheme. Defaults to `http`.")
                .with_validator(Validator::OneOf(vec![
                    "http".to_string(),
                    "https".to_string(),
                ])),
        )
        .attribute(
            AttributeSchema::new("scrape_interval", AttributeType::String)
                .computed()
                .with_description(
                    "Specifies the scrape interval as duration string. Defaults to `5m`.",
                ),
        )
        .attribute(
            AttributeSchema::new("scrape_timeout", AttributeType::String)
                .computed()
                .with_description(
                    "Specifies the scrape timeout as duration string. Defaults to `2m`.",
                ),
        )
        .attribute(
            AttributeSchema::new("sample_limit", AttributeType::Int64)
                .computed()
                .with_description("Specifies the scrape sample limit. Defaults to `5000`."),
        )
        .attribute(
            AttributeSchema::new(
                "saml2",
                AttributeType::Object(vec![
                    AttributeSchema::new("enable_url_parameters", AttributeType::Bool)
                        .computed()
                        .with_description(
                            "Specifies if URL parameters are enabled. Defaults to `true`.",
                        ),
                ]),
            )
            .with_description("A SAML2 configuration block."),
        )
        .attribute(
            AttributeSchema::new(
                "basic_auth",
                AttributeType::Object(vec![
                    AttributeSchema::new("username", AttributeType::String)
                        .required()
                        .with_description("Specifies basic auth username."),
                    AttributeSchema::new("password", AttributeType::String)
                        .required()
                        .sensitive()
                        .with_description("Specifies basic auth password."),
                ]),
            )
            .with_description("A basic authentication block."),
        )
        .attribute(
            AttributeSchema::new(
                "targets",
                AttributeType::List(Box::new(AttributeType::Object(vec![
                    AttributeSchema::new("urls", types::string_list())
                        .required()
                        .with_description("Specifies target URLs."),
                    AttributeSchema::new("labels", types::string_map())
                        .with_description("Specifies labels."),
                ]))),
            )
            .required()
            .with_description("The targets list (specified by the static config)."),
        )
}

/// Scrape config resource backed by the observability API
pub struct ScrapeConfigResource {
    client: Arc<dyn ObservabilityApi>,
    wait: WaitConfig,
}

impl ScrapeConfigResource {
    pub fn new(client: Arc<dyn ObservabilityApi>) -> Self {
        Self {
            client,
            wait: WaitConfig::default(),
        }
    }

    pub fn with_wait_config(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    fn validate(&self, model: &Model) -> ProviderResult<()> {
        validate_config(
            &schema(),
            &[
                ("project_id", model.project_id.as_option().map(String::as_str)),
                ("instance_id", model.instance_id.as_option().map(String::as_str)),
                ("name", model.name.as_option().map(String::as_str)),
            ],
        )
        .map_err(|e| e.for_resource(model.resource_id()))
    }

    pub async fn read_scrape_config(&self, mut state: Model) -> ProviderResult<Option<Model>> {
        let id = state.resource_id();
        let project_id = state.project_id.value_str().to_string();
        let instance_id = state.instance_id.value_str().to_string();
        let name = state.name.value_str().to_string();
        debug!(%project_id, %instance_id, %name, "reading scrape config");

        let job = match self
            .client
            .get_scrape_config(&project_id, &instance_id, &name)
            .await
        {
            Ok(job) => job,
            Err(e) if e.is_not_found() => {
                info!(
                    %project_id,
                    %instance_id,
                    %name,
                    "scrape config not found, removing from state"
                );
                return Ok(None);
            }
            Err(e) => {
                return Err(api_call_error(e, "Error reading scrape config").for_resource(id));
            }
        };

        map_fields(Some(&job), &mut state).map_err(|e| {
            ProviderError::from(e)
                .with_summary("Error reading scrape config")
                .for_resource(id)
        })?;
        info!(%project_id, %instance_id, %name, "Scrape config read");
        Ok(Some(state))
    }

    pub async fn create_scrape_config(&self, mut plan: Model) -> ProviderResult<Model> {
        self.validate(&plan)?;
        let id = plan.resource_id();
        let project_id = plan.project_id.value_str().to_string();
        let instance_id = plan.instance_id.value_str().to_string();
        let name = plan.name.value_str().to_string();
        debug!(%project_id, %instance_id, %name, "creating scrape config");

        let payload = to_create_payload(
            Some(&plan),
            &plan.saml2_model(),
            &plan.basic_auth_model(),
            &plan.target_models(),
        )
        .map_err(|e| {
            ProviderError::new(format!("Creating API payload: {}", e))
                .with_summary("Error creating scrape config")
                .for_resource(id.clone())
        })?;

        self.client
            .create_scrape_config(&project_id, &instance_id, &payload)
            .await
            .map_err(|e| {
                api_call_error(e, "Error creating scrape config").for_resource(id.clone())
            })?;

        let job = wait::scrape_config_created(
            self.client.as_ref(),
            &project_id,
            &instance_id,
            &name,
            self.wait,
        )
        .await
        .map_err(|e| {
            ProviderError::new(format!("Scrape config creation waiting: {}", e))
                .with_summary("Error creating scrape config")
                .for_resource(id.clone())
                .with_cause(e)
        })?;

        map_fields(Some(&job), &mut plan).map_err(|e| {
            ProviderError::from(e)
                .with_summary("Error creating scrape config")
                .for_resource(id)
        })?;
        info!(%project_id, %instance_id, %name, "Scrape config created");
        Ok(plan)
    }

    pub async fn update_scrape_config(&self, mut plan: Model) -> ProviderResult<Model> {
        self.validate(&plan)?;
        let id = plan.resource_id();
        let project_id = plan.project_id.value_str().to_string();
        let instance_id = plan.instance_id.value_str().to_string();
        let name = plan.name.value_str().to_string();
        debug!(%project_id, %instance_id, %name, "updating scrape config");

        let payload = to_update_payload(
            Some(&plan),
            &plan.saml2_model(),
            &plan.basic_auth_model(),
            &plan.target_models(),
        )
        .map_err(|e| {
            ProviderError::new(format!("Creating API payload: {}", e))
                .with_summary("Error updating scrape config")
                .for_resource(id.clone())
        })?;

        self.client
            .update_scrape_config(&project_id, &instance_id, &name, &payload)
            .await
            .map_err(|e| {
                api_call_error(e, "Error updating scrape config").for_resource(id.clone())
            })?;

        // The update response carries no scrape config, fetch it again
        let job = self
            .client
            .get_scrape_config(&project_id, &instance_id, &name)
            .await
            .map_err(|e| {
                api_call_error(e, "Error updating scrape config").for_resource(id.clone())
            })?;

        map_fields(Some(&job), &mut plan).map_err(|e| {
            ProviderError::from(e)
                .with_summary("Error updating scrape config")
                .for_resource(id)
        })?;
        info!(%project_id, %instance_id, %name, "Scrape config updated");
        Ok(plan)
    }

    pub async fn delete_scrape_config(&self, state: Model) -> ProviderResult<()> {
        let id = state.resource_id();
        let project_id = state.project_id.value_str();
        let instance_id = state.instance_id.value_str();
        let name = state.name.value_str();
        debug!(project_id, instance_id, name, "deleting scrape config");

        self.client
            .delete_scrape_config(project_id, instance_id, name)
            .await
            .map_err(|e| {
                api_call_error(e, "Error deleting scrape config").for_resource(id.clone())
            })?;

        wait::scrape_config_deleted(self.client.as_ref(), project_id, instance_id, name, self.wait)
            .await
            .map_err(|e| {
                ProviderError::new(format!("Scrape config deletion waiting: {}", e))
                    .with_summary("Error deleting scrape config")
                    .for_resource(id)
                    .with_cause(e)
            })?;
        info!(project_id, instance_id, name, "Scrape config deleted");
        Ok(())
    }
}

impl ResourceType for ScrapeConfigResource {
    fn name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> ResourceSchema {
        schema()
    }
}

impl Resource for ScrapeConfigResource {
    type Model = Model;

    fn read(&self, state: Model) -> BoxFuture<'_, ProviderResult<Option<Model>>> {
        Box::pin(self.read_scrape_config(state))
    }

    fn create(&self, plan: Model) -> BoxFuture<'_, ProviderResult<Model>> {
        Box::pin(self.create_scrape_config(plan))
    }

    fn update(&self, plan: Model) -> BoxFuture<'_, ProviderResult<Model>> {
        Box::pin(self.update_scrape_config(plan))
    }

    fn delete(&self, state: Model) -> BoxFuture<'_, ProviderResult<()>> {
        Box::pin(self.delete_scrape_config(state))
    }

    /// Import with an identifier of the form `project_id,instance_id,name`
    fn import_state(&self, id: &str) -> ProviderResult<Model> {
        let parts = split_internal_terraform_id(id, 3).ok_or_else(|| {
            ProviderError::new(format!(
                "Expected import identifier with format: [project_id],[instance_id],[name]  Got: {:?}",
                id
            ))
            .with_summary("Error importing scrape config")
        })?;

        let model = Model {
            project_id: Attr::value(parts[0]),
            instance_id: Attr::value(parts[1]),
            name: Attr::value(parts[2]),
            ..Default::default()
        };
        info!(
            project_id = parts[0],
            instance_id = parts[1],
            name = parts[2],
            "Scrape config state imported"
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{INSTANCE_ID, MockObservability, PROJECT_ID};
    use std::time::Duration;

    fn resource(mock: Arc<MockObservability>) -> ScrapeConfigResource {
        ScrapeConfigResource::new(mock).with_wait_config(WaitConfig {
            interval: Duration::ZERO,
            max_attempts: 3,
        })
    }

    fn plan() -> Model {
        Model {
            project_id: Attr::value(PROJECT_ID),
            instance_id: Attr::value(INSTANCE_ID),
            name: Attr::value("job"),
            metrics_path: Attr::value("/metrics"),
            targets: Attr::Value(vec![TargetModel {
                urls: Attr::Value(vec!["url1".to_string()]),
                labels: Attr::Null,
            }]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_applies_defaults_and_maps_result() {
        let mock = Arc::new(MockObservability::default().with_pending_lists(1));
        let state = resource(mock.clone()).create(plan()).await.unwrap();

        assert_eq!(
            state.id,
            Attr::Value(format!("{},{},job", PROJECT_ID, INSTANCE_ID))
        );
        assert_eq!(state.scheme, Attr::value("http"));
        assert_eq!(state.scrape_interval, Attr::value("5m"));
        assert_eq!(state.scrape_timeout, Attr::value("2m"));
        assert_eq!(state.sample_limit, Attr::Value(5000));
        assert_eq!(
            state.saml2,
            Attr::Value(Saml2Model {
                enable_url_parameters: Attr::Value(true),
            })
        );
        assert!(state.basic_auth.is_null());
        assert_eq!(
            state.targets,
            Attr::Value(vec![TargetModel {
                urls: Attr::Value(vec!["url1".to_string()]),
                labels: Attr::Value(HashMap::new()),
            }])
        );
        assert!(mock.job("job").is_some());
    }

    #[tokio::test]
    async fn create_times_out_when_never_listed() {
        let mock = Arc::new(MockObservability::default().with_pending_lists(10));
        let err = resource(mock).create(plan()).await.unwrap_err();
        assert_eq!(err.summary.as_deref(), Some("Error creating scrape config"));
        assert!(err.message.contains("timed out after 3 attempts"));
    }

    #[tokio::test]
    async fn create_rejects_invalid_ids() {
        let mock = Arc::new(MockObservability::default());
        let mut model = plan();
        model.project_id = Attr::value("pid");
        let err = resource(mock.clone()).create(model).await.unwrap_err();
        assert_eq!(err.summary.as_deref(), Some("Invalid configuration"));
        assert!(mock.job("job").is_none());
    }

    #[tokio::test]
    async fn read_missing_scrape_config_removes_state() {
        let mock = Arc::new(MockObservability::default());
        let state = resource(mock).read(plan()).await.unwrap();
        assert!(state.is_none());
    }

    #[tokio::test]
    async fn read_reports_api_errors() {
        let mock = Arc::new(MockObservability::default().with_status(500));
        let err = resource(mock).read(plan()).await.unwrap_err();
        assert_eq!(err.summary.as_deref(), Some("Error reading scrape config"));
        assert!(err.message.starts_with("Calling API:"));
    }

    #[tokio::test]
    async fn update_then_read_round_trip() {
        let mock = Arc::new(MockObservability::default());
        let resource = resource(mock.clone());
        let created = resource.create(plan()).await.unwrap();

        let mut changed = created.clone();
        changed.saml2 = Attr::Value(Saml2Model {
            enable_url_parameters: Attr::Value(false),
        });
        changed.sample_limit = Attr::Value(100);
        let updated = resource.update(changed).await.unwrap();
        assert_eq!(updated.sample_limit, Attr::Value(100));

        let read = resource.read(updated.clone()).await.unwrap().unwrap();
        assert_eq!(read, updated);
        assert_eq!(
            read.saml2,
            Attr::Value(Saml2Model {
                enable_url_parameters: Attr::Value(false),
            })
        );
    }

    #[tokio::test]
    async fn delete_waits_until_gone() {
        let mock = Arc::new(MockObservability::default());
        let resource = resource(mock.clone());
        let created = resource.create(plan()).await.unwrap();
        resource.delete(created).await.unwrap();
        assert!(mock.job("job").is_none());
    }

    #[test]
    fn import_state_parses_identifier() {
        let resource = resource(Arc::new(MockObservability::default()));
        let model = resource.import_state("pid,iid,job").unwrap();
        assert_eq!(model.project_id, Attr::value("pid"));
        assert_eq!(model.instance_id, Attr::value("iid"));
        assert_eq!(model.name, Attr::value("job"));
        assert!(model.id.is_null());

        let err = resource.import_state("pid,iid").unwrap_err();
        assert!(err.message.contains("[project_id],[instance_id],[name]"));
    }

    #[test]
    fn decomposed_sub_models_default_when_null() {
        let model = Model::default();
        assert_eq!(model.saml2_model(), Saml2Model::default());
        assert_eq!(model.basic_auth_model(), BasicAuthModel::default());
        assert!(model.target_models().is_empty());
    }

    #[test]
    fn model_json_round_trip_keeps_nulls() {
        let json = serde_json::json!({
            "project_id": "pid",
            "instance_id": "iid",
            "name": "job",
            "targets": [{"urls": ["url1"], "labels": null}]
        });
        let model: Model = serde_json::from_value(json).unwrap();
        assert!(model.saml2.is_null());
        assert_eq!(model.target_models()[0].labels, Attr::Null);

        let back = serde_json::to_value(&model).unwrap();
        assert_eq!(back["saml2"], serde_json::Value::Null);
        assert_eq!(back["targets"][0]["urls"], serde_json::json!(["url1"]));
    }

    #[test]
    fn schema_marks_password_sensitive() {
        let schema = schema();
        let Some(AttributeSchema {
            attr_type: AttributeType::Object(fields),
            ..
        }) = schema.get("basic_auth")
        else {
            panic!("basic_auth must be an object");
        };
        assert!(fields.iter().any(|f| f.name == "password" && f.sensitive));
    }
}
