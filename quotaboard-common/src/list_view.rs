//! Resource quota list view
//!
//! [`build_view`] turns the props of the list page into the configuration a
//! table renderer consumes. It is a pure function: the same props and context
//! always produce an equal [`TableConfig`].

use serde::{Deserialize, Serialize};

use crate::columns::{
    chip_list_column, materialize, resolve_columns, ColumnDescriptor, ColumnError, ColumnSpec,
    KubeObject, WellKnownColumn,
};
use crate::i18n::{self, Translator};
use crate::quota::ResourceQuota;
use crate::ApiError;

/// URL key the resource quota table reflects its state under by default
pub const DEFAULT_REFLECT_KEY: &str = "resourcequotas";

/// DOM id of the resource quota table
pub const TABLE_ID: &str = "quotaboard-resourcequotas";

/// Whether, and under which key, table state is mirrored into the URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlReflection {
    Disabled,
    Key(String),
}

impl UrlReflection {
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Disabled => None,
            Self::Key(key) => Some(key),
        }
    }
}

impl Default for UrlReflection {
    fn default() -> Self {
        Self::Key(DEFAULT_REFLECT_KEY.to_string())
    }
}

impl From<bool> for UrlReflection {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::default()
        } else {
            Self::Disabled
        }
    }
}

/// Kinds of objects a title action can create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    ResourceQuota,
}

impl ResourceKind {
    pub fn glossary_key(&self) -> &'static str {
        match self {
            Self::ResourceQuota => "glossary|Resource Quota",
        }
    }
}

/// Control shown next to the table title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleAction {
    CreateResource(ResourceKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderProps {
    pub no_namespace_filter: bool,
    pub title_side_actions: Vec<TitleAction>,
}

/// Props of the resource quota list
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceQuotaProps {
    /// `None` while loading
    pub resource_quotas: Option<Vec<ResourceQuota>>,
    /// `None` when no error has been observed
    pub errors: Option<Vec<ApiError>>,
    pub hide_columns: Vec<String>,
    pub reflect_table_in_url: UrlReflection,
    pub no_namespace_filter: bool,
}

impl ResourceQuotaProps {
    pub fn new(resource_quotas: Option<Vec<ResourceQuota>>, errors: Option<Vec<ApiError>>) -> Self {
        Self {
            resource_quotas,
            errors,
            hide_columns: Vec::new(),
            reflect_table_in_url: UrlReflection::default(),
            no_namespace_filter: false,
        }
    }

    pub fn hide_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hide_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn reflect_table_in_url(mut self, reflection: impl Into<UrlReflection>) -> Self {
        self.reflect_table_in_url = reflection.into();
        self
    }

    pub fn no_namespace_filter(mut self, suppress: bool) -> Self {
        self.no_namespace_filter = suppress;
        self
    }
}

/// Explicit dependencies of [`build_view`]
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub translator: &'a dyn Translator,
}

impl<'a> ViewContext<'a> {
    pub fn new(translator: &'a dyn Translator) -> Self {
        Self { translator }
    }
}

/// Everything a table renderer needs to paint one list
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig<T> {
    pub title: String,
    pub columns: Vec<ColumnSpec<T>>,
    pub header_props: HeaderProps,
    pub errors: Option<Vec<ApiError>>,
    pub data: Option<Vec<T>>,
    pub reflect_in_url: UrlReflection,
    pub id: String,
}

impl<T: KubeObject + 'static> TableConfig<T> {
    /// Descriptors for every resolved column, built-ins expanded
    pub fn descriptors(&self, translator: &dyn Translator) -> Vec<ColumnDescriptor<T>> {
        materialize(&self.columns, translator)
    }
}

/// Column list of the resource quota table, before hiding
///
/// Identity columns come first, then requests and limits, then age.
pub fn resource_quota_columns(translator: &dyn Translator) -> Vec<ColumnSpec<ResourceQuota>> {
    let label = |key: &str| i18n::translate_non_empty(translator, key, i18n::DEFAULT_NAMESPACE);

    vec![
        WellKnownColumn::Name.into(),
        WellKnownColumn::Namespace.into(),
        WellKnownColumn::Cluster.into(),
        chip_list_column("requests", label("translation|Request"), |quota: &ResourceQuota| {
            quota.requests.as_deref()
        })
        .into(),
        chip_list_column("limits", label("translation|Limit"), |quota: &ResourceQuota| {
            quota.limits.as_deref()
        })
        .into(),
        WellKnownColumn::Age.into(),
    ]
}

pub fn build_view(
    props: ResourceQuotaProps,
    ctx: &ViewContext<'_>,
) -> Result<TableConfig<ResourceQuota>, ColumnError> {
    let ResourceQuotaProps {
        resource_quotas,
        errors,
        hide_columns,
        reflect_table_in_url,
        no_namespace_filter,
    } = props;

    let columns = resolve_columns(resource_quota_columns(ctx.translator), hide_columns.as_slice())?;
    let title = i18n::translate_non_empty(ctx.translator, "glossary|Resource Quotas", "glossary");

    tracing::debug!(
        columns = columns.len(),
        items = resource_quotas.as_ref().map(Vec::len),
        errors = errors.as_ref().map_or(0, Vec::len),
        "built resource quota view"
    );

    Ok(TableConfig {
        title,
        columns,
        header_props: HeaderProps {
            no_namespace_filter,
            title_side_actions: vec![TitleAction::CreateResource(ResourceKind::ResourceQuota)],
        },
        errors,
        data: resource_quotas,
        reflect_in_url: reflect_table_in_url,
        id: TABLE_ID.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Catalog, KeyFallback};

    fn quota(name: &str, requests: Option<&[&str]>) -> ResourceQuota {
        ResourceQuota {
            name: name.to_string(),
            namespace: "team-a".to_string(),
            cluster: "main".to_string(),
            created_at: None,
            requests: requests.map(|r| r.iter().map(|s| s.to_string()).collect()),
            limits: None,
        }
    }

    fn column_ids(config: &TableConfig<ResourceQuota>) -> Vec<&str> {
        config.columns.iter().map(ColumnSpec::id).collect()
    }

    #[test]
    fn test_default_column_order() {
        let catalog = Catalog::english();
        let config = build_view(ResourceQuotaProps::new(Some(vec![]), None), &ViewContext::new(&catalog)).unwrap();

        assert_eq!(
            column_ids(&config),
            vec!["name", "namespace", "cluster", "requests", "limits", "age"]
        );
        assert_eq!(config.title, "Resource Quotas");
        assert_eq!(config.id, TABLE_ID);
        assert_eq!(config.reflect_in_url, UrlReflection::Key("resourcequotas".to_string()));
        assert_eq!(
            config.header_props.title_side_actions,
            vec![TitleAction::CreateResource(ResourceKind::ResourceQuota)]
        );
    }

    #[test]
    fn test_hidden_columns_keep_relative_order() {
        let config = build_view(
            ResourceQuotaProps::new(None, None).hide_columns(["cluster", "requests"]),
            &ViewContext::new(&KeyFallback),
        )
        .unwrap();

        assert_eq!(column_ids(&config), vec!["name", "namespace", "limits", "age"]);
    }

    #[test]
    fn test_labels_come_from_translator() {
        let german = Catalog::from_json(
            r#"{"translation": {"Request": "Anforderung", "Limit": "Grenze"}, "glossary": {"Resource Quotas": "Kontingente"}}"#,
        )
        .unwrap();
        let config = build_view(ResourceQuotaProps::new(None, None), &ViewContext::new(&german)).unwrap();

        let labels: Vec<String> = config
            .descriptors(&german)
            .into_iter()
            .map(|d| d.label)
            .collect();
        assert_eq!(labels, vec!["Name", "Namespace", "Cluster", "Anforderung", "Grenze", "Age"]);
        assert_eq!(config.title, "Kontingente");
    }

    #[test]
    fn test_loading_is_not_empty() {
        let ctx = ViewContext::new(&KeyFallback);
        let loading = build_view(ResourceQuotaProps::new(None, None), &ctx).unwrap();
        let empty = build_view(ResourceQuotaProps::new(Some(vec![]), None), &ctx).unwrap();

        assert_eq!(loading.data, None);
        assert_eq!(empty.data, Some(vec![]));
        assert_ne!(loading, empty);
    }

    #[test]
    fn test_flags_are_forwarded() {
        let config = build_view(
            ResourceQuotaProps::new(Some(vec![quota("q", None)]), None)
                .reflect_table_in_url(false)
                .no_namespace_filter(true),
            &ViewContext::new(&KeyFallback),
        )
        .unwrap();

        assert_eq!(config.reflect_in_url, UrlReflection::Disabled);
        assert!(config.header_props.no_namespace_filter);
        assert_eq!(config.reflect_in_url.key(), None);
    }

    #[test]
    fn test_requests_column_on_quota() {
        let config = build_view(ResourceQuotaProps::new(None, None), &ViewContext::new(&KeyFallback)).unwrap();
        let descriptors = config.descriptors(&KeyFallback);
        let requests = descriptors.iter().find(|d| d.id == "requests").unwrap();

        let q = quota("q", Some(&["cpu: 2", "memory: 4Gi"][..]));
        assert_eq!(requests.value(&q).unwrap(), "cpu: 2, memory: 4Gi");
    }
}
