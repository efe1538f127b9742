///! API client for the dashboard backend

use anyhow::Result;
use quotaboard_common::quota::CreateResourceQuotaRequest;
use quotaboard_common::subscription::resource_quota_path;
use quotaboard_common::{ApiError, ResourceQuotaInfo};
use serde::de::DeserializeOwned;

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(server: &str) -> Self {
        Self {
            base_url: format!("{}/api", server.trim_end_matches('/')),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET returning failures as data, for list subscriptions
    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(method = "GET", path, "API request");

        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::new(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16()));
        }

        response.json().await.map_err(|e| ApiError::new(e.to_string()))
    }

    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!(method = "POST", path, "API request");

        let response = self.client.post(self.url(path)).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("API request failed: {} - {}", status, error_text);
        }

        Ok(response.json().await?)
    }

    /// List resource quotas, cluster-wide when `namespace` is `None`
    pub async fn list_resource_quotas(
        &self,
        cluster: &str,
        namespace: Option<&str>,
    ) -> Result<Vec<ResourceQuotaInfo>, ApiError> {
        self.fetch(&resource_quota_path(cluster, namespace))
            .await
            .map_err(|e| e.in_namespace(namespace))
    }

    pub async fn create_resource_quota(
        &self,
        cluster: &str,
        request: &CreateResourceQuotaRequest,
    ) -> Result<ResourceQuotaInfo> {
        self.post(&resource_quota_path(cluster, Some(&request.namespace)), request)
            .await
    }
}
