//! Observability service: scrape configs of an observability instance

mod model;

pub use model::*;

use async_trait::async_trait;

use crate::client::ApiClient;
use crate::error::ApiResult;

/// Operations of the observability API used by the provider
#[async_trait]
pub trait ObservabilityApi: Send + Sync {
    async fn get_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        job_name: &str,
    ) -> ApiResult<Job>;

    async fn list_scrape_configs(&self, project_id: &str, instance_id: &str) -> ApiResult<Vec<Job>>;

    /// Scrape config creation is asynchronous; the job shows up in
    /// [`list_scrape_configs`](Self::list_scrape_configs) once applied.
    async fn create_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        payload: &CreateScrapeConfigPayload,
    ) -> ApiResult<()>;

    async fn update_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        job_name: &str,
        payload: &UpdateScrapeConfigPayload,
    ) -> ApiResult<()>;

    async fn delete_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        job_name: &str,
    ) -> ApiResult<()>;
}

/// HTTP client for the observability API
#[derive(Debug, Clone)]
pub struct ObservabilityClient {
    client: ApiClient,
}

impl ObservabilityClient {
    pub const DEFAULT_ENDPOINT: &'static str = "https://observability.api.stackit.cloud";

    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObservabilityApi for ObservabilityClient {
    async fn get_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        job_name: &str,
    ) -> ApiResult<Job> {
        let response: ScrapeConfigResponse = self
            .client
            .get(&scrape_config_path(project_id, instance_id, Some(job_name)))
            .await?;
        Ok(response.data)
    }

    async fn list_scrape_configs(
        &self,
        project_id: &str,
        instance_id: &str,
    ) -> ApiResult<Vec<Job>> {
        let response: ListScrapeConfigsResponse = self
            .client
            .get(&scrape_config_path(project_id, instance_id, None))
            .await?;
        Ok(response.data)
    }

    async fn create_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        payload: &CreateScrapeConfigPayload,
    ) -> ApiResult<()> {
        self.client
            .post(&scrape_config_path(project_id, instance_id, None), payload)
            .await
    }

    async fn update_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        job_name: &str,
        payload: &UpdateScrapeConfigPayload,
    ) -> ApiResult<()> {
        self.client
            .put(
                &scrape_config_path(project_id, instance_id, Some(job_name)),
                payload,
            )
            .await
    }

    async fn delete_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        job_name: &str,
    ) -> ApiResult<()> {
        self.client
            .delete(&scrape_config_path(project_id, instance_id, Some(job_name)))
            .await
    }
}

fn scrape_config_path<'a>(
    project_id: &'a str,
    instance_id: &'a str,
    job_name: Option<&'a str>,
) -> Vec<&'a str> {
    let mut segments = vec![
        "v1",
        "projects",
        project_id,
        "instances",
        instance_id,
        "scrapeconfigs",
    ];
    if let Some(job_name) = job_name {
        segments.push(job_name);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrape_config_paths() {
        assert_eq!(
            scrape_config_path("pid", "iid", None).join("/"),
            "v1/projects/pid/instances/iid/scrapeconfigs"
        );
        assert_eq!(
            scrape_config_path("pid", "iid", Some("job")).join("/"),
            "v1/projects/pid/instances/iid/scrapeconfigs/job"
        );
    }
}
