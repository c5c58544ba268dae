//! Secrets Manager user data source

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stackit_core::Attr;
use stackit_core::mapping::{MappingError, MappingResult};
use stackit_core::provider::{
    BoxFuture, DataSource, ProviderError, ProviderResult, ResourceType, TypeKind,
};
use stackit_core::resource::{ResourceId, build_internal_terraform_id};
use stackit_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};
use stackit_sdk::secretsmanager::{SecretsManagerApi, User};
use tracing::{debug, info};

use crate::utils::{api_error, validate_config};

pub const TYPE_NAME: &str = "stackit_secretsmanager_user";

/// Secrets Manager user attribute model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceModel {
    pub id: Attr<String>,
    pub user_id: Attr<String>,
    pub instance_id: Attr<String>,
    pub project_id: Attr<String>,
    pub description: Attr<String>,
    pub write_enabled: Attr<bool>,
    pub username: Attr<String>,
}

impl DataSourceModel {
    fn resource_id(&self) -> ResourceId {
        ResourceId::new(
            TYPE_NAME,
            build_internal_terraform_id(&[
                self.project_id.value_str(),
                self.instance_id.value_str(),
                self.user_id.value_str(),
            ]),
        )
    }
}

/// Map an API user onto `model`
///
/// The user id is taken from the model when set, from the response otherwise.
pub fn map_data_source_fields(
    user: Option<&User>,
    model: Option<&mut DataSourceModel>,
) -> MappingResult<()> {
    let user = user.ok_or(MappingError::ResponseNil)?;
    let model = model.ok_or(MappingError::ModelNil)?;

    let user_id = if !model.user_id.value_str().is_empty() {
        model.user_id.value_str().to_string()
    } else if let Some(id) = &user.id {
        id.clone()
    } else {
        return Err(MappingError::IdNotPresent("user id"));
    };

    model.id = Attr::Value(build_internal_terraform_id(&[
        model.project_id.value_str(),
        model.instance_id.value_str(),
        user_id.as_str(),
    ]));
    model.user_id = Attr::Value(user_id);
    model.description = user.description.clone().into();
    model.write_enabled = user.write.into();
    model.username = user.username.clone().into();
    Ok(())
}

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(TYPE_NAME)
        .with_description(
            "Secrets Manager user data source schema. Must have a `region` specified in the provider configuration.",
        )
        .attribute(types::internal_id(
            "Terraform's internal data source identifier. It is structured as \"`project_id`,`instance_id`,`user_id`\".",
        ))
        .attribute(types::uuid_id("user_id", "The user's ID."))
        .attribute(types::uuid_id("instance_id", "ID of the Secrets Manager instance."))
        .attribute(types::uuid_id(
            "project_id",
            "STACKIT Project ID to which the instance is associated.",
        ))
        .attribute(
            AttributeSchema::new("description", AttributeType::String)
                .computed()
                .with_description(
                    "A user chosen description to differentiate between multiple users. Can't be changed after creation.",
                ),
        )
        .attribute(
            AttributeSchema::new("write_enabled", AttributeType::Bool)
                .computed()
                .with_description("If true, the user has writeaccess to the secrets engine."),
        )
        .attribute(
            AttributeSchema::new("username", AttributeType::String)
                .computed()
                .with_description("An auto-generated user name."),
        )
}

/// Secrets Manager user data source
pub struct UserDataSource {
    client: Arc<dyn SecretsManagerApi>,
}

impl UserDataSource {
    pub fn new(client: Arc<dyn SecretsManagerApi>) -> Self {
        Self { client }
    }

    /// Read the user described by `config`
    ///
    /// Any failure means the data source has no state.
    pub async fn read_user(&self, mut config: DataSourceModel) -> ProviderResult<DataSourceModel> {
        let id = config.resource_id();
        validate_config(
            &schema(),
            &[
                ("project_id", config.project_id.as_option().map(String::as_str)),
                ("instance_id", config.instance_id.as_option().map(String::as_str)),
                ("user_id", config.user_id.as_option().map(String::as_str)),
            ],
        )
        .map_err(|e| e.for_resource(id.clone()))?;

        let project_id = config.project_id.value_str().to_string();
        let instance_id = config.instance_id.value_str().to_string();
        let user_id = config.user_id.value_str().to_string();
        debug!(%project_id, %instance_id, %user_id, "reading secrets manager user");

        let user = self
            .client
            .get_user(&project_id, &instance_id, &user_id)
            .await
            .map_err(|e| {
                let overrides = HashMap::from([(
                    403,
                    format!(
                        "Project with ID {:?} not found or forbidden access",
                        project_id
                    ),
                )]);
                api_error(
                    e,
                    "Reading user",
                    &format!(
                        "User with ID {:?} or instance with ID {:?} does not exist in project {:?}.",
                        user_id, instance_id, project_id
                    ),
                    &overrides,
                )
                .for_resource(id.clone())
            })?;

        map_data_source_fields(Some(&user), Some(&mut config)).map_err(|e| {
            ProviderError::from(e)
                .with_summary("Error reading user")
                .for_resource(id)
        })?;
        info!(%project_id, %instance_id, %user_id, "Secrets Manager user read");
        Ok(config)
    }
}

impl ResourceType for UserDataSource {
    fn name(&self) -> &'static str {
        TYPE_NAME
    }

    fn kind(&self) -> TypeKind {
        TypeKind::DataSource
    }

    fn schema(&self) -> ResourceSchema {
        schema()
    }
}

impl DataSource for UserDataSource {
    type Model = DataSourceModel;

    fn read(&self, config: DataSourceModel) -> BoxFuture<'_, ProviderResult<DataSourceModel>> {
        Box::pin(self.read_user(config))
    }
}
