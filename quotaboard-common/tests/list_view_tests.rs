//! Resource quota list view tests
//! Tests for column resolution, derived quota columns and the list view contract

mod common;

use common::{create_test_errors, create_test_quota, create_test_quotas};
use quotaboard_common::columns::{resolve_columns, CellContent, Chip, ColumnError, ColumnSpec, WellKnownColumn};
use quotaboard_common::i18n::{Catalog, KeyFallback};
use quotaboard_common::list_view::{build_view, resource_quota_columns, ResourceQuotaProps, ViewContext};
use quotaboard_common::subscription::ListSnapshot;
use quotaboard_common::table_state::TableState;
use quotaboard_common::{ColumnDescriptor, ResourceQuota};

const ALL_COLUMNS: [&str; 6] = ["name", "namespace", "cluster", "requests", "limits", "age"];

fn ids(columns: &[ColumnSpec<ResourceQuota>]) -> Vec<String> {
    columns.iter().map(|c| c.id().to_string()).collect()
}

fn descriptor<'a>(descriptors: &'a [ColumnDescriptor<ResourceQuota>], id: &str) -> &'a ColumnDescriptor<ResourceQuota> {
    descriptors.iter().find(|d| d.id == id).unwrap()
}

// ============== Column Resolution Tests ==============

#[test]
fn test_every_suppression_subset_preserves_order() {
    let catalog = Catalog::english();

    for mask in 0u32..(1 << ALL_COLUMNS.len()) {
        let hidden: Vec<&str> = ALL_COLUMNS
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, id)| *id)
            .collect();

        let resolved = resolve_columns(resource_quota_columns(&catalog), &hidden).unwrap();
        let expected: Vec<String> = ALL_COLUMNS
            .iter()
            .filter(|id| !hidden.contains(id))
            .map(|id| id.to_string())
            .collect();

        assert_eq!(ids(&resolved), expected, "hidden = {:?}", hidden);
    }
}

#[test]
fn test_hide_namespace() {
    let config = build_view(
        ResourceQuotaProps::new(Some(create_test_quotas(3)), None).hide_columns(["namespace"]),
        &ViewContext::new(&Catalog::english()),
    )
    .unwrap();

    assert_eq!(ids(&config.columns), vec!["name", "cluster", "requests", "limits", "age"]);
}

#[test]
fn test_custom_column_colliding_with_well_known_is_rejected() {
    let mut entries = resource_quota_columns(&KeyFallback);
    entries.push(ColumnDescriptor::text("age", "Age", |q: &ResourceQuota| Ok(q.name.clone())).into());

    let result = resolve_columns(entries, &["age"]);
    assert_eq!(result.unwrap_err(), ColumnError::DuplicateId("age".to_string()));
}

#[test]
fn test_well_known_tokens_stay_opaque() {
    let columns = resource_quota_columns(&KeyFallback);
    assert_eq!(columns[0], ColumnSpec::WellKnown(WellKnownColumn::Name));
    assert_eq!(columns[5], ColumnSpec::WellKnown(WellKnownColumn::Age));
    assert!(matches!(columns[3], ColumnSpec::Custom(_)));
}

// ============== Derived Column Tests ==============

#[test]
fn test_requests_scalar_and_chips() {
    let config = build_view(ResourceQuotaProps::new(None, None), &ViewContext::new(&KeyFallback)).unwrap();
    let descriptors = config.descriptors(&KeyFallback);
    let quota = create_test_quota("compute", "team-a");

    let requests = descriptor(&descriptors, "requests");
    assert_eq!(requests.value(&quota).unwrap(), "cpu: 2, memory: 4Gi");
    assert_eq!(
        requests.render(&quota).unwrap(),
        CellContent::Chips(vec![Chip::outlined("cpu: 2"), Chip::outlined("memory: 4Gi")])
    );
}

#[test]
fn test_absent_limits_render_empty_container() {
    let config = build_view(ResourceQuotaProps::new(None, None), &ViewContext::new(&KeyFallback)).unwrap();
    let descriptors = config.descriptors(&KeyFallback);
    let quota = create_test_quota("compute", "team-a");
    assert!(quota.limits.is_none());

    let cell = descriptor(&descriptors, "limits").cell(&quota);
    assert_eq!(cell.value, Ok(String::new()));
    assert_eq!(cell.content, Ok(CellContent::Chips(Vec::new())));
}

#[test]
fn test_age_value_is_sortable_timestamp() {
    let config = build_view(ResourceQuotaProps::new(None, None), &ViewContext::new(&KeyFallback)).unwrap();
    let descriptors = config.descriptors(&KeyFallback);
    let quota = create_test_quota("compute", "team-a");

    assert_eq!(descriptor(&descriptors, "age").value(&quota).unwrap(), "2024-03-01T09:00:00+00:00");
    assert_eq!(descriptor(&descriptors, "cluster").value(&quota).unwrap(), "main");
}

// ============== List View Contract Tests ==============

#[test]
fn test_null_collection_stays_null() {
    let config = build_view(ResourceQuotaProps::new(None, None), &ViewContext::new(&KeyFallback)).unwrap();
    assert!(config.data.is_none());
    assert!(config.errors.is_none());
    assert!(!config.title.is_empty());
}

#[test]
fn test_errors_forwarded_in_order() {
    let errors = create_test_errors();
    let config = build_view(
        ResourceQuotaProps::new(Some(create_test_quotas(2)), Some(errors.clone())),
        &ViewContext::new(&KeyFallback),
    )
    .unwrap();

    assert_eq!(config.errors, Some(errors));
    assert_eq!(config.data.map(|d| d.len()), Some(2));
}

#[test]
fn test_duplicate_errors_are_not_collapsed() {
    let errors = vec![create_test_errors()[0].clone(), create_test_errors()[0].clone()];
    let config = build_view(
        ResourceQuotaProps::new(None, Some(errors.clone())),
        &ViewContext::new(&KeyFallback),
    )
    .unwrap();

    assert_eq!(config.errors.unwrap().len(), 2);
}

#[test]
fn test_build_view_is_idempotent() {
    let catalog = Catalog::english();
    let ctx = ViewContext::new(&catalog);
    let props = ResourceQuotaProps::new(Some(create_test_quotas(4)), Some(create_test_errors()))
        .hide_columns(["cluster"])
        .no_namespace_filter(true);

    let first = build_view(props.clone(), &ctx).unwrap();
    let second = build_view(props, &ctx).unwrap();
    assert_eq!(first, second);
}

// ============== End To End Tests ==============

#[test]
fn test_snapshot_to_first_page() {
    let snapshot = ListSnapshot::aggregate(vec![
        Ok(create_test_quotas(20)),
        Err(create_test_errors().remove(0)),
    ]);
    let catalog = Catalog::english();
    let config = build_view(
        ResourceQuotaProps::new(snapshot.items, snapshot.errors),
        &ViewContext::new(&catalog),
    )
    .unwrap();

    let descriptors = config.descriptors(&catalog);
    let data = config.data.as_deref().unwrap();
    let mut state = TableState::default();
    state.toggle_sort("name");
    state.toggle_sort("name");

    let page = state.apply(&descriptors, data);
    assert_eq!(page.total, 20);
    assert_eq!(page.page_count, 2);
    assert_eq!(page.rows.len(), 15);
    assert_eq!(page.rows[0].name, "quota-19");
    assert_eq!(config.errors.map(|e| e.len()), Some(1));
}
