//! Conversion between scrape config models and observability API objects

use std::collections::HashMap;

use stackit_core::Attr;
use stackit_core::mapping::{MappingError, MappingResult};
use stackit_core::resource::build_internal_terraform_id;
use stackit_sdk::observability::{
    BasicAuth, CreateScrapeConfigPayload, Job, Scheme, StaticConfigs, StaticConfigsInner,
    UpdateScrapeConfigPayload,
};

use super::{BasicAuthModel, Model, Saml2Model, TargetModel};

pub const DEFAULT_SCHEME: Scheme = Scheme::Http;
pub const DEFAULT_SCRAPE_INTERVAL: &str = "5m";
pub const DEFAULT_SCRAPE_TIMEOUT: &str = "2m";
pub const DEFAULT_SAMPLE_LIMIT: i64 = 5000;

const SAML2_PARAM: &str = "saml2";
const SAML2_ENABLED: &str = "enabled";
const SAML2_DISABLED: &str = "disabled";

/// Map an API scrape config onto `model`
///
/// `model` carries the caller-supplied project and instance ids. The job name
/// is taken from the model when set, from the response otherwise.
pub fn map_fields(job: Option<&Job>, model: &mut Model) -> MappingResult<()> {
    let job = job.ok_or(MappingError::ResponseNil)?;

    let name = if !model.name.value_str().is_empty() {
        model.name.value_str().to_string()
    } else if let Some(job_name) = &job.job_name {
        job_name.clone()
    } else {
        return Err(MappingError::IdNotPresent("scrape config name"));
    };

    model.id = Attr::Value(build_internal_terraform_id(&[
        model.project_id.value_str(),
        model.instance_id.value_str(),
        name.as_str(),
    ]));
    model.name = Attr::Value(name);
    model.metrics_path = job.metrics_path.clone().into();
    model.scheme = job.scheme.map(|s| s.to_string()).into();
    model.scrape_interval = job.scrape_interval.clone().into();
    model.scrape_timeout = job.scrape_timeout.clone().into();
    model.sample_limit = job.sample_limit.into();
    model.basic_auth = map_basic_auth(job.basic_auth.as_ref());
    model.saml2 = map_saml2(job.params.as_ref());
    model.targets = map_targets(job.static_configs.as_deref());
    Ok(())
}

fn map_basic_auth(basic_auth: Option<&BasicAuth>) -> Attr<BasicAuthModel> {
    basic_auth
        .map(|ba| BasicAuthModel {
            username: ba.username.clone().into(),
            password: ba.password.clone().into(),
        })
        .into()
}

/// URL parameters are enabled unless `saml2` is exactly `["disabled"]`
fn map_saml2(params: Option<&HashMap<String, Vec<String>>>) -> Attr<Saml2Model> {
    params
        .map(|params| {
            let disabled = params
                .get(SAML2_PARAM)
                .is_some_and(|v| v.len() == 1 && v[0] == SAML2_DISABLED);
            Saml2Model {
                enable_url_parameters: Attr::Value(!disabled),
            }
        })
        .into()
}

fn map_targets(static_configs: Option<&[StaticConfigs]>) -> Attr<Vec<TargetModel>> {
    static_configs
        .map(|configs| {
            configs
                .iter()
                .map(|sc| TargetModel {
                    urls: sc.targets.clone().into(),
                    labels: sc.labels.clone().into(),
                })
                .collect()
        })
        .into()
}

/// Build the request to create a scrape config
///
/// `saml2`, `basic_auth` and `targets` are the decomposed nested blocks of
/// `model`. Unset scheme, interval, timeout and sample limit get their
/// defaults, and an unset `enable_url_parameters` is sent as `enabled`.
pub fn to_create_payload(
    model: Option<&Model>,
    saml2: &Saml2Model,
    basic_auth: &BasicAuthModel,
    targets: &[TargetModel],
) -> MappingResult<CreateScrapeConfigPayload> {
    let model = model.ok_or(MappingError::ModelNil)?;

    Ok(CreateScrapeConfigPayload {
        job_name: model.name.to_option(),
        metrics_path: model.metrics_path.to_option(),
        scheme: Some(scheme(model)?),
        scrape_interval: Some(scrape_interval(model)),
        scrape_timeout: Some(scrape_timeout(model)),
        sample_limit: Some(sample_limit(model)),
        basic_auth: basic_auth_payload(basic_auth),
        params: saml2_params(saml2, true),
        static_configs: Some(static_configs(targets)),
    })
}

/// Build the request to update a scrape config
///
/// Same defaults as [`to_create_payload`], except that `params` is only sent
/// when `enable_url_parameters` is set.
pub fn to_update_payload(
    model: Option<&Model>,
    saml2: &Saml2Model,
    basic_auth: &BasicAuthModel,
    targets: &[TargetModel],
) -> MappingResult<UpdateScrapeConfigPayload> {
    let model = model.ok_or(MappingError::ModelNil)?;

    Ok(UpdateScrapeConfigPayload {
        metrics_path: model.metrics_path.to_option(),
        scheme: Some(scheme(model)?),
        scrape_interval: Some(scrape_interval(model)),
        scrape_timeout: Some(scrape_timeout(model)),
        sample_limit: Some(sample_limit(model)),
        basic_auth: basic_auth_payload(basic_auth),
        params: saml2_params(saml2, false),
        static_configs: Some(static_configs(targets)),
    })
}

fn scheme(model: &Model) -> MappingResult<Scheme> {
    match model.scheme.as_option() {
        Some(s) => s.parse().map_err(|message| MappingError::InvalidValue {
            attribute: "scheme",
            message,
        }),
        None => Ok(DEFAULT_SCHEME),
    }
}

fn scrape_interval(model: &Model) -> String {
    model
        .scrape_interval
        .to_option()
        .unwrap_or_else(|| DEFAULT_SCRAPE_INTERVAL.to_string())
}

fn scrape_timeout(model: &Model) -> String {
    model
        .scrape_timeout
        .to_option()
        .unwrap_or_else(|| DEFAULT_SCRAPE_TIMEOUT.to_string())
}

fn sample_limit(model: &Model) -> f64 {
    model.sample_limit.to_option().unwrap_or(DEFAULT_SAMPLE_LIMIT) as f64
}

fn basic_auth_payload(basic_auth: &BasicAuthModel) -> Option<BasicAuth> {
    if basic_auth.username.is_unset() && basic_auth.password.is_unset() {
        return None;
    }
    Some(BasicAuth {
        username: basic_auth.username.to_option(),
        password: basic_auth.password.to_option(),
    })
}

/// `saml2` URL parameter; an unset flag yields `enabled` if `default_enabled`
/// and no parameters at all otherwise
fn saml2_params(saml2: &Saml2Model, default_enabled: bool) -> Option<HashMap<String, Vec<String>>> {
    let enabled = match saml2.enable_url_parameters.as_option() {
        Some(enabled) => *enabled,
        None if default_enabled => true,
        None => return None,
    };
    let value = if enabled { SAML2_ENABLED } else { SAML2_DISABLED };
    Some(HashMap::from([(
        SAML2_PARAM.to_string(),
        vec![value.to_string()],
    )]))
}

/// Null URL lists and label maps are sent as empty collections
fn static_configs(targets: &[TargetModel]) -> Vec<StaticConfigsInner> {
    targets
        .iter()
        .map(|target| StaticConfigsInner {
            targets: Some(target.urls.to_option().unwrap_or_default()),
            labels: Some(target.labels.to_option().unwrap_or_default()),
        })
        .collect()
}
