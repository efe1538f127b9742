pub mod create_button;
pub mod namespace_filter;
pub mod resource_table;

pub use create_button::CreateResourceButton;
pub use namespace_filter::NamespaceFilter;
pub use resource_table::ResourceTable;

use leptos::*;
use quotaboard_common::Catalog;

/// Catalog provided by the app, English when none is
pub fn use_catalog() -> Catalog {
    use_context::<Catalog>().unwrap_or_else(Catalog::english)
}
