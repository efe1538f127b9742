use leptos::*;
use leptos_router::{use_location, use_navigate, NavigateOptions};
use quotaboard_common::columns::{CellContent, CellError, Chip, ChipSize, ChipVariant, ColumnError, KubeObject};
use quotaboard_common::i18n::{translate_non_empty, DEFAULT_NAMESPACE};
use quotaboard_common::list_view::{TableConfig, TitleAction};
use quotaboard_common::table_state::{
    decode_query, encode_query, SortDirection, TableState, ROWS_PER_PAGE_OPTIONS,
};

use super::{use_catalog, CreateResourceButton, NamespaceFilter};

fn chip_class(chip: &Chip) -> &'static str {
    match (chip.variant, chip.size) {
        (ChipVariant::Outlined, ChipSize::Small) => "chip chip-outlined chip-small",
        (ChipVariant::Outlined, ChipSize::Medium) => "chip chip-outlined",
        (ChipVariant::Filled, ChipSize::Small) => "chip chip-filled chip-small",
        (ChipVariant::Filled, ChipSize::Medium) => "chip chip-filled",
    }
}

/// Paint one cell; a failed cell shows a placeholder carrying the error
fn cell_view(content: Result<CellContent, CellError>) -> View {
    match content {
        Ok(CellContent::Text(text)) => text.into_view(),
        Ok(CellContent::Chips(chips)) => view! {
            <div class="wrapping-box">
                {chips.into_iter().map(|chip| view! {
                    <span class=chip_class(&chip)>{chip.label}</span>
                }).collect_view()}
            </div>
        }
        .into_view(),
        Err(e) => view! { <span class="cell-error" title=e.to_string()>"-"</span> }.into_view(),
    }
}

/// Generic list table
///
/// Owns filtering, sorting and pagination. When the config carries a
/// reflection key that state lives in the URL query, otherwise in memory.
#[component]
pub fn ResourceTable<T>(#[prop(into)] config: Signal<Result<TableConfig<T>, ColumnError>>) -> impl IntoView
where
    T: KubeObject + Clone + PartialEq + 'static,
{
    let catalog = store_value(use_catalog());
    let tr = move |key: &'static str| catalog.with_value(|c| translate_non_empty(c, key, DEFAULT_NAMESPACE));

    let failure = create_memo(move |_| config.with(|r| r.as_ref().err().cloned()));
    let table_id = create_memo(move |_| config.with(|r| r.as_ref().map(|c| c.id.clone()).unwrap_or_default()));
    let title = create_memo(move |_| config.with(|r| r.as_ref().map(|c| c.title.clone()).unwrap_or_default()));
    let header = create_memo(move |_| config.with(|r| r.as_ref().ok().map(|c| c.header_props.clone())));
    let reflect_key = create_memo(move |_| {
        config.with(|r| {
            r.as_ref()
                .ok()
                .and_then(|c| c.reflect_in_url.key().map(str::to_string))
        })
    });
    let descriptors = create_memo(move |_| {
        config.with(|r| {
            r.as_ref()
                .map(|c| catalog.with_value(|t| c.descriptors(t)))
                .unwrap_or_default()
        })
    });

    let location = use_location();
    let (search, pathname) = (location.search, location.pathname);
    let navigate = store_value(use_navigate());
    let local_state = create_rw_signal(TableState::default());

    let state = Signal::derive(move || match reflect_key.get() {
        Some(key) => {
            let pairs = decode_query(&search.get());
            TableState::from_query(&key, pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        }
        None => local_state.get(),
    });

    let update_state = move |change: &dyn Fn(&mut TableState)| {
        let mut next = state.get_untracked();
        change(&mut next);

        match reflect_key.get_untracked() {
            Some(key) => {
                let existing = decode_query(&search.get_untracked());
                let query = encode_query(&next.merge_into_query(&key, &existing));
                let url = if query.is_empty() {
                    pathname.get_untracked()
                } else {
                    format!("{}?{}", pathname.get_untracked(), query)
                };
                navigate.with_value(|nav| {
                    nav(
                        &url,
                        NavigateOptions {
                            replace: true,
                            ..Default::default()
                        },
                    )
                });
            }
            None => local_state.set(next),
        }
    };

    let side_actions = move || {
        header.with(|h| {
            h.iter()
                .flat_map(|h| h.title_side_actions.iter())
                .map(|action| match action {
                    TitleAction::CreateResource(kind) => view! { <CreateResourceButton kind=*kind/> },
                })
                .collect_view()
        })
    };

    let namespace_filter = move || {
        header
            .with(|h| h.as_ref().map_or(false, |h| !h.no_namespace_filter))
            .then(|| view! { <NamespaceFilter/> })
    };

    let errors = move || {
        config.with(|r| {
            r.as_ref()
                .ok()
                .and_then(|c| c.errors.clone())
                .unwrap_or_default()
                .into_iter()
                .map(|e| view! { <div class="alert alert-error">{e.to_string()}</div> })
                .collect_view()
        })
    };

    let body = move || {
        config.with(|r| {
            let Ok(cfg) = r else {
                return ().into_view();
            };

            match cfg.data.as_deref() {
                None => view! { <p class="loading">{tr("translation|Loading…")}</p> }.into_view(),
                Some([]) => view! {
                    <div class="no-data">
                        <p>{tr("translation|No data to be shown.")}</p>
                    </div>
                }
                .into_view(),
                Some(items) => descriptors.with(|columns| {
                    let current = state.get();
                    let page = current.apply(columns, items);
                    let offset = page.page * current.rows_per_page;
                    let first = if page.rows.is_empty() { 0 } else { offset + 1 };
                    let last = offset + page.rows.len();
                    let (prev, next) = (page.page.saturating_sub(1), page.page + 1);
                    let (at_start, at_end) = (page.page == 0, page.page + 1 >= page.page_count);
                    let rows_per_page = current.rows_per_page;

                    view! {
                        <table class="resource-table">
                            <thead>
                                <tr>
                                    {columns.iter().map(|column| {
                                        let id = column.id.clone();
                                        let indicator = match &current.sort {
                                            Some(sort) if sort.column == column.id => match sort.direction {
                                                SortDirection::Ascending => " ▲",
                                                SortDirection::Descending => " ▼",
                                            },
                                            _ => "",
                                        };
                                        view! {
                                            <th
                                                class="sortable"
                                                on:click=move |_| update_state(&|s: &mut TableState| s.toggle_sort(&id))
                                            >
                                                {column.label.clone()}
                                                {indicator}
                                            </th>
                                        }
                                    }).collect_view()}
                                </tr>
                            </thead>
                            <tbody>
                                {page.rows.iter().map(|item| view! {
                                    <tr>
                                        {columns.iter().map(|column| view! {
                                            <td>{cell_view(column.render(item))}</td>
                                        }).collect_view()}
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                        <div class="pagination">
                            <label>
                                {tr("translation|Rows per page")}
                                <select on:change=move |ev| {
                                    if let Ok(rows) = event_target_value(&ev).parse::<usize>() {
                                        update_state(&|s: &mut TableState| s.set_rows_per_page(rows));
                                    }
                                }>
                                    {ROWS_PER_PAGE_OPTIONS.iter().map(|n| view! {
                                        <option value=n.to_string() selected={*n == rows_per_page}>
                                            {n.to_string()}
                                        </option>
                                    }).collect_view()}
                                </select>
                            </label>
                            <span class="page-range">
                                {format!("{}-{} / {}", first, last, page.total)}
                            </span>
                            <button
                                class="btn btn-sm"
                                disabled=at_start
                                on:click=move |_| update_state(&|s: &mut TableState| s.page = prev)
                            >{tr("translation|Previous")}</button>
                            <button
                                class="btn btn-sm"
                                disabled=at_end
                                on:click=move |_| update_state(&|s: &mut TableState| s.page = next)
                            >{tr("translation|Next")}</button>
                        </div>
                    }
                    .into_view()
                }),
            }
        })
    };

    view! {
        <div class="resource-list" id=move || table_id.get()>
            <div class="page-header">
                <h1>{move || title.get()}</h1>
                <div class="header-actions">{side_actions}</div>
                {namespace_filter}
            </div>

            {move || failure.get().map(|e| {
                logging::error!("Invalid column configuration: {}", e);
                view! { <div class="alert alert-error">{e.to_string()}</div> }
            })}

            {errors}

            <input
                type="search"
                class="table-filter"
                placeholder=tr("translation|Filter")
                prop:value=move || state.with(|s| s.filter.clone())
                on:input=move |ev| {
                    let filter = event_target_value(&ev);
                    update_state(&|s: &mut TableState| s.set_filter(filter.clone()));
                }
            />

            {body}
        </div>
    }
}
