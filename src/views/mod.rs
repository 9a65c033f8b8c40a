//! Per-resource list definitions: columns, filters, sorting and quick search.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::auth::Scoped;
use crate::domain::resource::Resource;
use crate::listing::filters::FilterField;
use crate::listing::query::SortSpec;
use crate::listing::table::Column;

pub mod billing;
pub mod fleet;
pub mod format;
pub mod workshop;

/// Filter key used by quick search on every resource.
pub const SEARCH_KEY: &str = "q";

pub const ACTIVE_OPTIONS: &[(&str, &str)] = &[("true", "Activo"), ("false", "Inactivo")];

/// An entity that can be browsed through the generic list page.
pub trait ListView: Serialize + DeserializeOwned + Scoped + 'static {
    const RESOURCE: Resource;

    fn id(&self) -> i32;

    /// Short human label used in search results and detail headings.
    fn title(&self) -> String;

    fn columns() -> Vec<Column<Self>>;

    fn filters() -> &'static [FilterField] {
        &[]
    }

    /// Column keys the backend accepts as sort fields.
    fn sortable() -> &'static [&'static str] {
        &[]
    }

    fn default_sort() -> Option<SortSpec> {
        None
    }
}

/// Resources with a create form in the console.
pub fn has_create_form(resource: Resource) -> bool {
    matches!(
        resource,
        Resource::Vehiculos | Resource::Talleres | Resource::Mantenimientos
    )
}

/// Resources whose records can be edited through a form.
pub fn has_edit_form(resource: Resource) -> bool {
    matches!(resource, Resource::Vehiculos | Resource::Talleres)
}
