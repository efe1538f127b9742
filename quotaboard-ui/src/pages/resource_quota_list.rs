use leptos::*;
use quotaboard_common::list_view::{build_view, ResourceQuotaProps, ViewContext};

use crate::components::{use_catalog, ResourceTable};
use crate::hooks::{use_cluster_scope, use_resource_quota_list};

/// Stateless renderer: props in, table out
#[component]
pub fn ResourceQuotaRenderer(#[prop(into)] props: MaybeSignal<ResourceQuotaProps>) -> impl IntoView {
    let catalog = store_value(use_catalog());

    let config = create_memo(move |_| {
        let props = props.get();
        catalog.with_value(|c| build_view(props, &ViewContext::new(c)))
    });

    view! { <ResourceTable config=Signal::from(config)/> }
}

/// Resource quota list bound to the live subscription of the current scope
#[component]
pub fn ResourceQuotaList() -> impl IntoView {
    let scope = use_cluster_scope();
    let snapshot = use_resource_quota_list(scope);

    let props = Signal::derive(move || {
        let snapshot = snapshot.get();
        ResourceQuotaProps::new(snapshot.items, snapshot.errors)
    });

    view! { <ResourceQuotaRenderer props=props/> }
}
