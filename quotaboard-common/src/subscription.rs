//! Namespace-scoped list subscriptions
//!
//! A list is fetched with one request per selected namespace, or a single
//! cluster-wide request when no namespace is selected. The per-request results
//! are folded into one [`ListSnapshot`].

use futures::future::join_all;
use std::future::Future;

use crate::ApiError;

/// Latest state of a list subscription
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<T> {
    /// `None` until at least one request has succeeded
    pub items: Option<Vec<T>>,
    /// `None` when every request succeeded
    pub errors: Option<Vec<ApiError>>,
}

impl<T> Default for ListSnapshot<T> {
    fn default() -> Self {
        Self::loading()
    }
}

impl<T> ListSnapshot<T> {
    pub fn loading() -> Self {
        Self {
            items: None,
            errors: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.items.is_none() && self.errors.is_none()
    }

    /// Fold per-request results, keeping request order for items and errors
    pub fn aggregate<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<Vec<T>, ApiError>>,
    {
        let mut items: Option<Vec<T>> = None;
        let mut errors = Vec::new();

        for result in results {
            match result {
                Ok(batch) => items.get_or_insert_with(Vec::new).extend(batch),
                Err(e) => errors.push(e),
            }
        }

        tracing::debug!(
            items = items.as_ref().map(Vec::len),
            errors = errors.len(),
            "aggregated list results"
        );

        Self {
            items,
            errors: if errors.is_empty() { None } else { Some(errors) },
        }
    }

    pub fn map<U, F>(self, f: F) -> ListSnapshot<U>
    where
        F: FnMut(T) -> U,
    {
        ListSnapshot {
            items: self.items.map(|items| items.into_iter().map(f).collect()),
            errors: self.errors,
        }
    }
}

/// API path listing resource quotas, cluster-wide when `namespace` is `None`
pub fn resource_quota_path(cluster: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) => format!(
            "/kubernetes/{}/namespaces/{}/resourcequotas",
            urlencoding::encode(cluster),
            urlencoding::encode(ns)
        ),
        None => format!("/kubernetes/{}/resourcequotas", urlencoding::encode(cluster)),
    }
}

/// One `(namespace, path)` request per selected namespace
pub fn list_requests(cluster: &str, namespaces: &[String]) -> Vec<(Option<String>, String)> {
    if namespaces.is_empty() {
        return vec![(None, resource_quota_path(cluster, None))];
    }

    namespaces
        .iter()
        .map(|ns| (Some(ns.clone()), resource_quota_path(cluster, Some(ns))))
        .collect()
}

/// Issue every request of a scope at once and fold the results
///
/// `fetch` receives the namespace of each request, `None` for the
/// cluster-wide one. Results are folded in request order regardless of the
/// order in which they complete.
pub async fn fetch_list<T, F, Fut>(cluster: &str, namespaces: &[String], fetch: F) -> ListSnapshot<T>
where
    F: Fn(Option<String>) -> Fut,
    Fut: Future<Output = Result<Vec<T>, ApiError>>,
{
    let requests = list_requests(cluster, namespaces);
    tracing::debug!(cluster, requests = requests.len(), "fetching list");

    let results = join_all(requests.into_iter().map(|(namespace, _)| fetch(namespace))).await;
    ListSnapshot::aggregate(results)
}
