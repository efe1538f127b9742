//! ResourceQuota types
//!
//! [`ResourceQuotaInfo`] is what the dashboard API returns; [`ResourceQuota`] is
//! the view model the list table renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::columns::KubeObject;

const REQUESTS_PREFIX: &str = "requests.";
const LIMITS_PREFIX: &str = "limits.";

/// Bare resource names Kubernetes accounts as requests
const BARE_REQUEST_KEYS: [&str; 2] = ["cpu", "memory"];

/// ResourceQuota information, as served by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceQuotaInfo {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub hard: BTreeMap<String, String>,
    #[serde(default)]
    pub used: BTreeMap<String, String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    pub created_at: Option<String>,
}

/// Create ResourceQuota request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResourceQuotaRequest {
    pub name: String,
    pub namespace: String,
    pub hard: BTreeMap<String, String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceQuota {
    pub name: String,
    pub namespace: String,
    pub cluster: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub requests: Option<Vec<String>>,
    #[serde(default)]
    pub limits: Option<Vec<String>>,
}

impl ResourceQuota {
    pub fn from_info(info: ResourceQuotaInfo, cluster: &str) -> Self {
        let created_at = info.created_at.as_deref().and_then(|raw| {
            match DateTime::parse_from_rfc3339(raw) {
                Ok(t) => Some(t.with_timezone(&Utc)),
                Err(e) => {
                    tracing::warn!(quota = %info.name, value = raw, error = %e, "unparsable creation timestamp");
                    None
                }
            }
        });

        let requests = constraints(&info, |key| {
            key.strip_prefix(REQUESTS_PREFIX)
                .or_else(|| BARE_REQUEST_KEYS.contains(&key).then_some(key))
        });
        let limits = constraints(&info, |key| key.strip_prefix(LIMITS_PREFIX));

        Self {
            name: info.name,
            namespace: info.namespace,
            cluster: cluster.to_string(),
            created_at,
            requests: Some(requests),
            limits: Some(limits),
        }
    }

    pub fn requests(&self) -> &[String] {
        self.requests.as_deref().unwrap_or_default()
    }

    pub fn limits(&self) -> &[String] {
        self.limits.as_deref().unwrap_or_default()
    }
}

/// `"<resource>: <used>/<hard>"` for every hard key `select` maps to a resource
fn constraints<F>(info: &ResourceQuotaInfo, select: F) -> Vec<String>
where
    F: Fn(&str) -> Option<&str>,
{
    info.hard
        .iter()
        .filter_map(|(key, hard)| {
            let resource = select(key)?;
            Some(match info.used.get(key) {
                Some(used) => format!("{}: {}/{}", resource, used, hard),
                None => format!("{}: {}", resource, hard),
            })
        })
        .collect()
}

impl KubeObject for ResourceQuota {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> Option<&str> {
        Some(&self.namespace)
    }

    fn cluster(&self) -> &str {
        &self.cluster
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
