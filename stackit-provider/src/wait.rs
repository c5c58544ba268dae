//! Wait handlers for asynchronous API operations

use std::time::Duration;

use stackit_sdk::observability::{Job, ObservabilityApi};
use stackit_sdk::ApiError;
use tracing::debug;

/// Polling behaviour of a wait handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 120,
        }
    }
}

/// Error returned by a wait handler
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    #[error("timed out after {attempts} attempts waiting for {what}")]
    Timeout { what: String, attempts: u32 },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Wait until a newly created scrape config is listed by its instance
pub async fn scrape_config_created(
    client: &dyn ObservabilityApi,
    project_id: &str,
    instance_id: &str,
    job_name: &str,
    config: WaitConfig,
) -> Result<Job, WaitError> {
    for attempt in 0..config.max_attempts {
        let jobs = client.list_scrape_configs(project_id, instance_id).await?;
        if let Some(job) = jobs
            .into_iter()
            .find(|j| j.job_name.as_deref() == Some(job_name))
        {
            return Ok(job);
        }
        debug!(job_name, attempt, "scrape config not listed yet");
        tokio::time::sleep(config.interval).await;
    }

    Err(WaitError::Timeout {
        what: format!("scrape config {} to be created", job_name),
        attempts: config.max_attempts,
    })
}

/// Wait until a deleted scrape config is no longer found
pub async fn scrape_config_deleted(
    client: &dyn ObservabilityApi,
    project_id: &str,
    instance_id: &str,
    job_name: &str,
    config: WaitConfig,
) -> Result<(), WaitError> {
    for attempt in 0..config.max_attempts {
        match client
            .get_scrape_config(project_id, instance_id, job_name)
            .await
        {
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => return Err(e.into()),
            Ok(_) => {
                debug!(job_name, attempt, "scrape config still present");
                tokio::time::sleep(config.interval).await;
            }
        }
    }

    Err(WaitError::Timeout {
        what: format!("scrape config {} to be deleted", job_name),
        attempts: config.max_attempts,
    })
}
