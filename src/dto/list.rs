//! DTOs used by the generic list page.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::listing::controller::ListStatus;
use crate::listing::filters::FilterField;
use crate::listing::table::TableView;

/// Data required to render a list page.
#[derive(Debug, Serialize)]
pub struct ListPageData {
    pub path: &'static str,
    pub title: &'static str,
    pub table: TableView,
    pub filters: &'static [FilterField],
    /// Current filter panel values keyed by filter key.
    pub filter_values: BTreeMap<String, String>,
    pub search_term: String,
    pub status: ListStatus,
    pub total_elements: u64,
    pub page_size: u32,
    /// Current sort as transmitted, e.g. `placa,asc`.
    pub sort: Option<String>,
    /// Create form URL when the user may create records here.
    pub create_href: Option<String>,
}
