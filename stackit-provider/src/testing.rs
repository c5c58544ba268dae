//! In-memory API implementations for tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use stackit_sdk::observability::{
    CreateScrapeConfigPayload, Job, ObservabilityApi, StaticConfigs, StaticConfigsInner,
    UpdateScrapeConfigPayload,
};
use stackit_sdk::secretsmanager::{SecretsManagerApi, User};
use stackit_sdk::{ApiError, ApiResult};

pub const PROJECT_ID: &str = "b3d1a5f8-2c4e-4b7a-9f1e-0a6c2d8e4f10";
pub const INSTANCE_ID: &str = "0f6e2c1a-7d3b-4e5f-8a9c-1b2d3e4f5a6b";
pub const USER_ID: &str = "5c4b3a29-1807-4f6e-9d5c-4b3a29180706";

fn status(status: u16) -> ApiError {
    ApiError::Status {
        method: "GET".to_string(),
        url: "mock://".to_string(),
        status,
        body: String::new(),
    }
}

fn static_configs(inner: Option<Vec<StaticConfigsInner>>) -> Option<Vec<StaticConfigs>> {
    inner.map(|configs| {
        configs
            .into_iter()
            .map(|c| StaticConfigs {
                labels: c.labels,
                targets: c.targets,
            })
            .collect()
    })
}

/// Observability API keeping scrape configs in memory, keyed by job name
#[derive(Default)]
pub struct MockObservability {
    jobs: Mutex<HashMap<String, Job>>,
    /// Number of list calls that still omit newly created jobs
    pending_lists: AtomicU32,
    /// Status every call fails with, if set
    fail_with: Option<u16>,
}

impl MockObservability {
    pub fn with_pending_lists(self, count: u32) -> Self {
        self.pending_lists.store(count, Ordering::SeqCst);
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.fail_with = Some(status);
        self
    }

    pub fn job(&self, name: &str) -> Option<Job> {
        self.jobs.lock().unwrap().get(name).cloned()
    }

    fn check(&self) -> ApiResult<()> {
        match self.fail_with {
            Some(code) => Err(status(code)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ObservabilityApi for MockObservability {
    async fn get_scrape_config(&self, _: &str, _: &str, job_name: &str) -> ApiResult<Job> {
        self.check()?;
        self.job(job_name).ok_or_else(|| status(404))
    }

    async fn list_scrape_configs(&self, _: &str, _: &str) -> ApiResult<Vec<Job>> {
        self.check()?;
        let pending = self.pending_lists.load(Ordering::SeqCst);
        if pending > 0 {
            self.pending_lists.store(pending - 1, Ordering::SeqCst);
            return Ok(vec![]);
        }
        Ok(self.jobs.lock().unwrap().values().cloned().collect())
    }

    async fn create_scrape_config(
        &self,
        _: &str,
        _: &str,
        payload: &CreateScrapeConfigPayload,
    ) -> ApiResult<()> {
        self.check()?;
        let name = payload.job_name.clone().unwrap_or_default();
        let job = Job {
            job_name: payload.job_name.clone(),
            metrics_path: payload.metrics_path.clone(),
            scheme: payload.scheme,
            scrape_interval: payload.scrape_interval.clone(),
            scrape_timeout: payload.scrape_timeout.clone(),
            sample_limit: payload.sample_limit.map(|v| v as i64),
            basic_auth: payload.basic_auth.clone(),
            params: payload.params.clone(),
            static_configs: static_configs(payload.static_configs.clone()),
        };
        self.jobs.lock().unwrap().insert(name, job);
        Ok(())
    }

    async fn update_scrape_config(
        &self,
        _: &str,
        _: &str,
        job_name: &str,
        payload: &UpdateScrapeConfigPayload,
    ) -> ApiResult<()> {
        self.check()?;
        let mut jobs = self.jobs.lock().unwrap();
        let job = jobs.get_mut(job_name).ok_or_else(|| status(404))?;
        job.metrics_path = payload.metrics_path.clone();
        job.scheme = payload.scheme;
        job.scrape_interval = payload.scrape_interval.clone();
        job.scrape_timeout = payload.scrape_timeout.clone();
        job.sample_limit = payload.sample_limit.map(|v| v as i64);
        job.basic_auth = payload.basic_auth.clone();
        if payload.params.is_some() {
            job.params = payload.params.clone();
        }
        job.static_configs = static_configs(payload.static_configs.clone());
        Ok(())
    }

    async fn delete_scrape_config(&self, _: &str, _: &str, job_name: &str) -> ApiResult<()> {
        self.check()?;
        self.jobs
            .lock()
            .unwrap()
            .remove(job_name)
            .map(|_| ())
            .ok_or_else(|| status(404))
    }
}

/// Secrets Manager API returning a fixed user
#[derive(Default)]
pub struct MockSecretsManager {
    pub user: Option<User>,
    pub fail_with: Option<u16>,
}

#[async_trait]
impl SecretsManagerApi for MockSecretsManager {
    async fn get_user(&self, _: &str, _: &str, _: &str) -> ApiResult<User> {
        if let Some(code) = self.fail_with {
            return Err(status(code));
        }
        self.user.clone().ok_or_else(|| status(404))
    }
}
