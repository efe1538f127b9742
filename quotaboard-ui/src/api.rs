//! API client for communicating with the dashboard backend

use quotaboard_common::quota::CreateResourceQuotaRequest;
use quotaboard_common::subscription::resource_quota_path;
use quotaboard_common::{ApiError, ResourceQuotaInfo};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

const API_BASE: &str = "http://localhost:8006/api";

fn api_url(path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{}{}", API_BASE, path)
    }
}

/// Generic JSON fetch helper
pub async fn fetch_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = reqwasm::http::Request::get(&api_url(path))
        .send()
        .await
        .map_err(|e| ApiError::new(e.to_string()))?;

    if response.ok() {
        response.json().await.map_err(|e| ApiError::new(e.to_string()))
    } else {
        Err(ApiError::from_status(response.status()))
    }
}

/// POST request helper
pub async fn post_json<T: DeserializeOwned, B: Serialize>(path: &str, body: &B) -> Result<T, ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::new(e.to_string()))?;

    let response = reqwasm::http::Request::post(&api_url(path))
        .header("Content-Type", "application/json")
        .body(body)
        .send()
        .await
        .map_err(|e| ApiError::new(e.to_string()))?;

    if response.ok() {
        response.json().await.map_err(|e| ApiError::new(e.to_string()))
    } else {
        Err(ApiError::from_status(response.status()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamespaceInfo {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// List resource quotas, cluster-wide when `namespace` is `None`
///
/// Failures are tagged with the namespace they were requested for.
pub async fn list_resource_quotas(
    cluster: &str,
    namespace: Option<&str>,
) -> Result<Vec<ResourceQuotaInfo>, ApiError> {
    fetch_json(&resource_quota_path(cluster, namespace))
        .await
        .map_err(|e| e.in_namespace(namespace))
}

pub async fn create_resource_quota(
    cluster: &str,
    request: &CreateResourceQuotaRequest,
) -> Result<ResourceQuotaInfo, ApiError> {
    post_json(&resource_quota_path(cluster, Some(&request.namespace)), request).await
}

pub async fn list_namespaces(cluster: &str) -> Result<Vec<NamespaceInfo>, ApiError> {
    fetch_json(&format!("/kubernetes/{}/namespaces", urlencoding::encode(cluster))).await
}
