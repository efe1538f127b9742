//! Common test utilities and helpers

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use quotaboard_common::{ApiError, ResourceQuota};

pub fn create_test_quota(name: &str, namespace: &str) -> ResourceQuota {
    ResourceQuota {
        name: name.to_string(),
        namespace: namespace.to_string(),
        cluster: "main".to_string(),
        created_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()),
        requests: Some(vec!["cpu: 2".to_string(), "memory: 4Gi".to_string()]),
        limits: None,
    }
}

pub fn create_test_quotas(count: usize) -> Vec<ResourceQuota> {
    (0..count)
        .map(|i| create_test_quota(&format!("quota-{:02}", i), if i % 2 == 0 { "team-a" } else { "team-b" }))
        .collect()
}

pub fn create_test_errors() -> Vec<ApiError> {
    vec![
        ApiError::from_status(403).in_namespace(Some("restricted")),
        ApiError::new("connection reset").in_namespace(Some("team-c")),
    ]
}
