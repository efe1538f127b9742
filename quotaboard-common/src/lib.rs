//! Common types and utilities shared between quotaboard-ui and quotaboard-cli
//!
//! Everything in this crate is pure: no I/O, no global state. The front end and
//! the command line both build their resource quota table from [`list_view::build_view`]
//! and paint it with whatever renderer they own.

pub mod columns;
pub mod i18n;
pub mod list_view;
pub mod quota;
pub mod subscription;
pub mod table_state;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use columns::{
    resolve_columns, Cell, CellContent, CellError, Chip, ColumnDescriptor, ColumnError,
    ColumnSpec, KubeObject, WellKnownColumn,
};
pub use i18n::{Catalog, Translator};
pub use list_view::{build_view, ResourceQuotaProps, TableConfig, UrlReflection, ViewContext};
pub use quota::{ResourceQuota, ResourceQuotaInfo};
pub use subscription::ListSnapshot;
pub use table_state::TableState;

/// Error reported by the dashboard API for a single list request
///
/// These are data, not control flow: the list view forwards them to the table
/// renderer, which shows them next to whatever items did load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    /// HTTP status, when the failure came from a response
    #[serde(default)]
    pub status: Option<u16>,
    /// Namespace whose request failed, `None` for cluster-wide requests
    #[serde(default)]
    pub namespace: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            namespace: None,
        }
    }

    pub fn from_status(status: u16) -> Self {
        Self {
            message: format!("HTTP {}", status),
            status: Some(status),
            namespace: None,
        }
    }

    pub fn in_namespace(mut self, namespace: Option<&str>) -> Self {
        self.namespace = namespace.map(str::to_string);
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}: {}", ns, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}
