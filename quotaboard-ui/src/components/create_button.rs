use leptos::*;
use quotaboard_common::i18n::{translate_non_empty, DEFAULT_NAMESPACE};
use quotaboard_common::list_view::ResourceKind;
use quotaboard_common::quota::CreateResourceQuotaRequest;
use std::collections::BTreeMap;

use super::use_catalog;
use crate::api;
use crate::hooks::use_cluster_scope;
use crate::utils::parse_key_value_pairs;

#[component]
pub fn CreateResourceButton(kind: ResourceKind) -> impl IntoView {
    let scope = use_cluster_scope();
    let catalog = store_value(use_catalog());
    let tr = move |key: &str| catalog.with_value(|c| translate_non_empty(c, key, DEFAULT_NAMESPACE));

    let (show_dialog, set_show_dialog) = create_signal(false);
    let (name, set_name) = create_signal(String::new());
    let (namespace, set_namespace) = create_signal(String::new());
    let (hard, set_hard) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let open = move |_| {
        set_name.set(String::new());
        set_namespace.set(scope.namespaces.with_untracked(|ns| ns.first().cloned().unwrap_or_default()));
        set_hard.set(String::new());
        set_error.set(None);
        set_show_dialog.set(true);
    };

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let request = match kind {
            ResourceKind::ResourceQuota => CreateResourceQuotaRequest {
                name: name.get_untracked().trim().to_string(),
                namespace: namespace.get_untracked().trim().to_string(),
                hard: parse_key_value_pairs(&hard.get_untracked()),
                labels: BTreeMap::new(),
            },
        };
        if request.name.is_empty() || request.namespace.is_empty() {
            set_error.set(Some("Name and namespace are required".to_string()));
            return;
        }

        let cluster = scope.cluster.get_untracked();
        set_submitting.set(true);
        spawn_local(async move {
            match api::create_resource_quota(&cluster, &request).await {
                Ok(created) => {
                    logging::log!("Created resource quota {}/{}", created.namespace, created.name);
                    set_show_dialog.set(false);
                    scope.refresh.notify();
                }
                Err(e) => {
                    logging::log!("Error creating resource quota: {}", e);
                    set_error.set(Some(e.message));
                }
            }
            set_submitting.set(false);
        });
    };

    let title = format!("{} {}", tr("translation|Create"), tr(kind.glossary_key()));

    view! {
        <button class="btn btn-primary" on:click=open>{tr("translation|Create")}</button>

        {move || show_dialog.get().then(|| view! {
            <div class="modal">
                <div class="modal-content">
                    <h2>{title.clone()}</h2>
                    {move || error.get().map(|e| view! { <div class="alert alert-error">{e}</div> })}
                    <form on:submit=submit>
                        <label>
                            {tr("translation|Name")}
                            <input
                                type="text"
                                required
                                prop:value=move || name.get()
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                            />
                        </label>
                        <label>
                            {tr("glossary|Namespace")}
                            <input
                                type="text"
                                required
                                prop:value=move || namespace.get()
                                on:input=move |ev| set_namespace.set(event_target_value(&ev))
                            />
                        </label>
                        <label>
                            {tr("translation|Hard limits")}
                            <textarea
                                placeholder="requests.cpu=2\nlimits.memory=8Gi"
                                prop:value=move || hard.get()
                                on:input=move |ev| set_hard.set(event_target_value(&ev))
                            ></textarea>
                        </label>
                        <div class="form-actions">
                            <button
                                type="button"
                                class="btn btn-secondary"
                                on:click=move |_| set_show_dialog.set(false)
                            >{tr("translation|Cancel")}</button>
                            <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                                {tr("translation|Create")}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        })}
    }
}
