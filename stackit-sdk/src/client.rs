//! Shared HTTP client for STACKIT service APIs

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to the base URL of one service
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url`, authenticating with a bearer `token` if given
    pub fn new(base_url: &str, token: Option<String>) -> ApiResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ApiError::ClientBuilder(format!("invalid base url `{}`: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::ClientBuilder(format!(
                "invalid base url `{}`",
                base_url
            )));
        }

        let http = Client::builder()
            .use_rustls_tls()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ApiError::ClientBuilder(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Build a URL from path segments, each percent-encoded
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new(), so path_segments_mut succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let body = self
            .send(self.request(Method::GET, segments), Method::GET, segments)
            .await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn post<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> ApiResult<()> {
        let request = self.request(Method::POST, segments).json(body);
        self.send(request, Method::POST, segments).await.map(|_| ())
    }

    pub async fn put<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> ApiResult<()> {
        let request = self.request(Method::PUT, segments).json(body);
        self.send(request, Method::PUT, segments).await.map(|_| ())
    }

    pub async fn delete(&self, segments: &[&str]) -> ApiResult<()> {
        self.send(self.request(Method::DELETE, segments), Method::DELETE, segments)
            .await
            .map(|_| ())
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let request = self.http.request(method, self.url(segments));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        method: Method,
        segments: &[&str],
    ) -> ApiResult<String> {
        let url = self.url(segments);
        debug!(%method, %url, "sending request");

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!(%method, %url, status = status.as_u16(), "received response");

        if !status.is_success() {
            return Err(ApiError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_appends_encoded_segments() {
        let client = ApiClient::new("https://observability.api.stackit.cloud/", None).unwrap();
        let url = client.url(&[
            "v1",
            "projects",
            "pid",
            "instances",
            "iid",
            "scrapeconfigs",
            "a b",
        ]);
        assert_eq!(
            url.as_str(),
            "https://observability.api.stackit.cloud/v1/projects/pid/instances/iid/scrapeconfigs/a%20b"
        );
    }

    #[test]
    fn url_keeps_base_path() {
        let client = ApiClient::new("http://localhost:8080/mock", None).unwrap();
        assert_eq!(
            client.url(&["v1", "users"]).as_str(),
            "http://localhost:8080/mock/v1/users"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            ApiClient::new("not a url", None),
            Err(ApiError::ClientBuilder(_))
        ));
        assert!(matches!(
            ApiClient::new("mailto:someone@example.com", None),
            Err(ApiError::ClientBuilder(_))
        ));
    }
}
