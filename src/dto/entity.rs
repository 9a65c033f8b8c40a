//! DTOs used by detail and form pages.

use serde::Serialize;

use crate::domain::maintenance::Maintenance;
use crate::listing::table::Cell;

/// A labelled value on a detail page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub cell: Cell,
}

/// Data required to render a generic detail page.
#[derive(Debug, Serialize)]
pub struct EntityPageData {
    pub path: &'static str,
    pub resource_title: &'static str,
    pub id: i32,
    pub title: String,
    pub fields: Vec<DetailField>,
    pub edit_href: Option<String>,
    pub delete_href: Option<String>,
}

/// A workflow button on the maintenance page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransitionButton {
    pub code: &'static str,
    pub label: &'static str,
    pub style: &'static str,
    pub enabled: bool,
}

/// Data required to render the maintenance detail page.
#[derive(Debug, Serialize)]
pub struct MaintenancePageData {
    pub record: Maintenance,
    pub fields: Vec<DetailField>,
    pub transitions: Vec<TransitionButton>,
    /// Seconds already spent on the job, when work has started.
    pub elapsed_seconds: Option<i64>,
    pub elapsed: Option<String>,
    /// Whether the elapsed clock keeps ticking in the browser.
    pub running: bool,
}

/// Form page data: current values for edit forms, empty for create forms.
#[derive(Debug, Serialize)]
pub struct FormPageData<T> {
    pub action: String,
    pub title: String,
    pub values: Option<T>,
}
