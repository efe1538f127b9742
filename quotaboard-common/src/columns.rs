//! Declarative table columns
//!
//! A table is described by an ordered list of [`ColumnSpec`] entries. Each entry
//! is either a well-known token (`name`, `namespace`, `cluster`, `age`) that the
//! renderer expands into a built-in descriptor, or a fully custom
//! [`ColumnDescriptor`] carrying its own accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::i18n::{self, Translator};

/// Separator used for the scalar value of list-valued columns
pub const LIST_SEPARATOR: &str = ", ";

/// Columns every Kubernetes object table knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WellKnownColumn {
    Name,
    Namespace,
    Cluster,
    Age,
}

impl WellKnownColumn {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Namespace => "namespace",
            Self::Cluster => "cluster",
            Self::Age => "age",
        }
    }

    fn label_key(&self) -> &'static str {
        match self {
            Self::Name => "translation|Name",
            Self::Namespace => "glossary|Namespace",
            Self::Cluster => "glossary|Cluster",
            Self::Age => "translation|Age",
        }
    }
}

impl fmt::Display for WellKnownColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for WellKnownColumn {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "namespace" => Ok(Self::Namespace),
            "cluster" => Ok(Self::Cluster),
            "age" => Ok(Self::Age),
            other => Err(ColumnError::UnknownWellKnown(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipVariant {
    Outlined,
    Filled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipSize {
    Small,
    Medium,
}

/// One discrete token inside a cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub label: String,
    pub variant: ChipVariant,
    pub size: ChipSize,
}

impl Chip {
    pub fn outlined(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ChipVariant::Outlined,
            size: ChipSize::Small,
        }
    }
}

/// Visual content of a cell, independent of the toolkit that paints it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellContent {
    Text(String),
    /// Chips in a wrapping container. The container is painted even when empty.
    Chips(Vec<Chip>),
}

/// Failure computing a single cell
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid value: {0}")]
    Invalid(String),
}

/// Programmer error in a column list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    #[error("duplicate column id: {0}")]
    DuplicateId(String),

    #[error("column id must not be empty")]
    EmptyId,

    #[error("unknown well-known column: {0}")]
    UnknownWellKnown(String),
}

pub type ValueFn<T> = Arc<dyn Fn(&T) -> Result<String, CellError> + Send + Sync>;
pub type RenderFn<T> = Arc<dyn Fn(&T) -> Result<CellContent, CellError> + Send + Sync>;

/// Maps an item to one cell's scalar value and visual content
///
/// Two descriptors compare equal when their id and label match; accessors are
/// not comparable.
pub struct ColumnDescriptor<T> {
    pub id: String,
    pub label: String,
    get_value: ValueFn<T>,
    render: RenderFn<T>,
}

impl<T: 'static> ColumnDescriptor<T> {
    pub fn new<V, R>(id: impl Into<String>, label: impl Into<String>, get_value: V, render: R) -> Self
    where
        V: Fn(&T) -> Result<String, CellError> + Send + Sync + 'static,
        R: Fn(&T) -> Result<CellContent, CellError> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            get_value: Arc::new(get_value),
            render: Arc::new(render),
        }
    }

    /// Column whose visual content is its scalar value as plain text
    pub fn text<V>(id: impl Into<String>, label: impl Into<String>, get_value: V) -> Self
    where
        V: Fn(&T) -> Result<String, CellError> + Send + Sync + 'static,
    {
        let get_value: ValueFn<T> = Arc::new(get_value);
        let render = {
            let get_value = Arc::clone(&get_value);
            move |item: &T| get_value(item).map(CellContent::Text)
        };
        Self {
            id: id.into(),
            label: label.into(),
            get_value,
            render: Arc::new(render),
        }
    }
}

impl<T> ColumnDescriptor<T> {
    /// Scalar representation used for sorting, filtering and export
    pub fn value(&self, item: &T) -> Result<String, CellError> {
        (self.get_value)(item)
    }

    pub fn render(&self, item: &T) -> Result<CellContent, CellError> {
        (self.render)(item)
    }

    pub fn cell(&self, item: &T) -> Cell {
        Cell {
            value: self.value(item),
            content: self.render(item),
        }
    }
}

impl<T> Clone for ColumnDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            get_value: Arc::clone(&self.get_value),
            render: Arc::clone(&self.render),
        }
    }
}

impl<T> fmt::Debug for ColumnDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<T> PartialEq for ColumnDescriptor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.label == other.label
    }
}

/// One evaluated cell. Either half may have failed independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub value: Result<String, CellError>,
    pub content: Result<CellContent, CellError>,
}

impl Cell {
    /// Scalar value, or an empty string if it failed
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

pub enum ColumnSpec<T> {
    WellKnown(WellKnownColumn),
    Custom(ColumnDescriptor<T>),
}

impl<T> ColumnSpec<T> {
    pub fn id(&self) -> &str {
        match self {
            Self::WellKnown(column) => column.id(),
            Self::Custom(descriptor) => &descriptor.id,
        }
    }
}

impl<T> Clone for ColumnSpec<T> {
    fn clone(&self) -> Self {
        match self {
            Self::WellKnown(column) => Self::WellKnown(*column),
            Self::Custom(descriptor) => Self::Custom(descriptor.clone()),
        }
    }
}

impl<T> fmt::Debug for ColumnSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WellKnown(column) => f.debug_tuple("WellKnown").field(column).finish(),
            Self::Custom(descriptor) => f.debug_tuple("Custom").field(descriptor).finish(),
        }
    }
}

impl<T> PartialEq for ColumnSpec<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::WellKnown(a), Self::WellKnown(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => a == b,
            _ => false,
        }
    }
}

impl<T> From<WellKnownColumn> for ColumnSpec<T> {
    fn from(column: WellKnownColumn) -> Self {
        Self::WellKnown(column)
    }
}

impl<T> From<ColumnDescriptor<T>> for ColumnSpec<T> {
    fn from(descriptor: ColumnDescriptor<T>) -> Self {
        Self::Custom(descriptor)
    }
}

/// Drop hidden columns from `entries`, keeping input order
///
/// Ids are validated across the whole input, hidden entries included, so a
/// custom column that shadows a well-known one is rejected even when one of
/// the two is hidden.
pub fn resolve_columns<T, S>(
    entries: Vec<ColumnSpec<T>>,
    hidden: &[S],
) -> Result<Vec<ColumnSpec<T>>, ColumnError>
where
    S: AsRef<str>,
{
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in &entries {
        let id = entry.id();
        if id.is_empty() {
            return Err(ColumnError::EmptyId);
        }
        if !seen.insert(id.to_string()) {
            return Err(ColumnError::DuplicateId(id.to_string()));
        }
    }

    let hidden: HashSet<&str> = hidden.iter().map(AsRef::as_ref).collect();
    Ok(entries
        .into_iter()
        .filter(|entry| !hidden.contains(entry.id()))
        .collect())
}

/// Column rendering a list of strings as chips
///
/// An absent list is treated as empty by both accessors.
pub fn chip_list_column<T, F>(id: impl Into<String>, label: impl Into<String>, field: F) -> ColumnDescriptor<T>
where
    T: 'static,
    F: Fn(&T) -> Option<&[String]> + Send + Sync + 'static,
{
    let field = Arc::new(field);
    let render_field = Arc::clone(&field);

    ColumnDescriptor::new(
        id,
        label,
        move |item: &T| Ok(field(item).unwrap_or_default().join(LIST_SEPARATOR)),
        move |item: &T| {
            Ok(CellContent::Chips(
                render_field(item)
                    .unwrap_or_default()
                    .iter()
                    .map(Chip::outlined)
                    .collect(),
            ))
        },
    )
}

/// Identity fields the built-in columns read
pub trait KubeObject {
    fn name(&self) -> &str;
    /// `None` for cluster-scoped objects
    fn namespace(&self) -> Option<&str>;
    fn cluster(&self) -> &str;
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

/// Expand a well-known token into its descriptor
///
/// The age column's scalar value is the RFC 3339 creation time so that it
/// sorts chronologically; its visual content is the relative age.
pub fn builtin_descriptor<T>(column: WellKnownColumn, translator: &dyn Translator) -> ColumnDescriptor<T>
where
    T: KubeObject + 'static,
{
    let label = i18n::translate_non_empty(translator, column.label_key(), i18n::DEFAULT_NAMESPACE);
    match column {
        WellKnownColumn::Name => {
            ColumnDescriptor::text(column.id(), label, |item: &T| Ok(item.name().to_string()))
        }
        WellKnownColumn::Namespace => ColumnDescriptor::text(column.id(), label, |item: &T| {
            Ok(item.namespace().unwrap_or_default().to_string())
        }),
        WellKnownColumn::Cluster => {
            ColumnDescriptor::text(column.id(), label, |item: &T| Ok(item.cluster().to_string()))
        }
        WellKnownColumn::Age => ColumnDescriptor::new(
            column.id(),
            label,
            |item: &T| {
                item.created_at()
                    .map(|t| t.to_rfc3339())
                    .ok_or(CellError::MissingField("metadata.creationTimestamp"))
            },
            |item: &T| {
                item.created_at()
                    .map(|t| CellContent::Text(format_age(t, Utc::now())))
                    .ok_or(CellError::MissingField("metadata.creationTimestamp"))
            },
        ),
    }
}

/// Expand every entry of a resolved column list into a descriptor
pub fn materialize<T>(columns: &[ColumnSpec<T>], translator: &dyn Translator) -> Vec<ColumnDescriptor<T>>
where
    T: KubeObject + 'static,
{
    columns
        .iter()
        .map(|spec| match spec {
            ColumnSpec::WellKnown(column) => builtin_descriptor(*column, translator),
            ColumnSpec::Custom(descriptor) => descriptor.clone(),
        })
        .collect()
}

/// Compact age such as `45s`, `12m`, `3h`, `2d5h` or `400d`
pub fn format_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - created).num_seconds().max(0);

    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        let days = secs / 86400;
        let hours = (secs % 86400) / 3600;
        if days < 10 && hours > 0 {
            format!("{}d{}h", days, hours)
        } else {
            format!("{}d", days)
        }
    }
}
