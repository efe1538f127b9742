use leptos::*;
use quotaboard_common::i18n::{translate_non_empty, DEFAULT_NAMESPACE};

use super::use_catalog;
use crate::api;
use crate::hooks::use_cluster_scope;

/// Namespace chips that narrow the scope; no selection means all namespaces
#[component]
pub fn NamespaceFilter() -> impl IntoView {
    let scope = use_cluster_scope();
    let all_label = translate_non_empty(&use_catalog(), "translation|All namespaces", DEFAULT_NAMESPACE);

    let namespaces = create_resource(
        move || scope.cluster.get(),
        |cluster| async move {
            match api::list_namespaces(&cluster).await {
                Ok(list) => list.into_iter().map(|ns| ns.name).collect::<Vec<_>>(),
                Err(e) => {
                    logging::warn!("Error loading namespaces: {}", e);
                    Vec::new()
                }
            }
        },
    );

    let toggle = move |name: String| {
        scope.namespaces.update(|selected| {
            if let Some(pos) = selected.iter().position(|n| *n == name) {
                selected.remove(pos);
            } else {
                selected.push(name);
            }
        });
    };

    view! {
        <div class="namespace-filter">
            <button
                class=move || {
                    if scope.namespaces.with(Vec::is_empty) { "chip chip-filled" } else { "chip chip-outlined" }
                }
                on:click=move |_| scope.namespaces.set(Vec::new())
            >
                {all_label}
            </button>
            <Suspense fallback=|| ()>
                {move || namespaces.get().map(|names| {
                    names.into_iter().map(|name| {
                        let selected = {
                            let name = name.clone();
                            move || scope.namespaces.with(|s| s.contains(&name))
                        };
                        let target = name.clone();
                        view! {
                            <button
                                class=move || if selected() { "chip chip-filled" } else { "chip chip-outlined" }
                                on:click=move |_| toggle(target.clone())
                            >
                                {name}
                            </button>
                        }
                    }).collect_view()
                })}
            </Suspense>
        </div>
    }
}
