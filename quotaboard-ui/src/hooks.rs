//! Live list subscriptions

use leptos::*;
use quotaboard_common::subscription::{fetch_list, ListSnapshot};
use quotaboard_common::ResourceQuota;
use std::time::Duration;

use crate::api;

const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Cluster and namespaces the list pages are scoped to
#[derive(Clone, Copy)]
pub struct ClusterScope {
    pub cluster: RwSignal<String>,
    /// Empty means all namespaces
    pub namespaces: RwSignal<Vec<String>>,
    /// Notified after a mutation so subscriptions reload
    pub refresh: Trigger,
}

impl ClusterScope {
    pub fn new(cluster: &str) -> Self {
        Self {
            cluster: create_rw_signal(cluster.to_string()),
            namespaces: create_rw_signal(Vec::new()),
            refresh: create_trigger(),
        }
    }
}

pub fn use_cluster_scope() -> ClusterScope {
    use_context::<ClusterScope>().unwrap_or_else(|| {
        let scope = ClusterScope::new("main");
        provide_context(scope);
        scope
    })
}

/// Subscribe to the resource quotas of the current scope
///
/// Namespace requests are issued together. The snapshot resets to loading
/// when the scope changes or a refresh is requested, and is refreshed in
/// place every 30 seconds. Responses to superseded requests are discarded.
pub fn use_resource_quota_list(scope: ClusterScope) -> ReadSignal<ListSnapshot<ResourceQuota>> {
    let (snapshot, set_snapshot) = create_signal(ListSnapshot::loading());
    let generation = store_value(0u64);

    let load = move || {
        let cluster = scope.cluster.get_untracked();
        let namespaces = scope.namespaces.get_untracked();
        generation.update_value(|g| *g += 1);
        let current = generation.get_value();

        spawn_local(async move {
            let snapshot = fetch_list(&cluster, &namespaces, |namespace| {
                let cluster = cluster.clone();
                async move {
                    let result = api::list_resource_quotas(&cluster, namespace.as_deref()).await;
                    match result {
                        Ok(infos) => Ok(infos
                            .into_iter()
                            .map(|info| ResourceQuota::from_info(info, &cluster))
                            .collect::<Vec<_>>()),
                        Err(e) => {
                            logging::warn!("Error loading resource quotas: {}", e);
                            Err(e)
                        }
                    }
                }
            })
            .await;

            if generation.try_get_value() == Some(current) {
                set_snapshot.set(snapshot);
            }
        });
    };

    create_effect(move |_| {
        scope.cluster.track();
        scope.namespaces.track();
        scope.refresh.track();
        set_snapshot.set(ListSnapshot::loading());
        load();
    });

    match set_interval_with_handle(load, REFRESH_INTERVAL) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => logging::error!("Failed to schedule refresh: {:?}", e),
    }

    snapshot
}
