//! Paginated list controller.
//!
//! Every mutation goes through [`ListController::on_query_changed`], which
//! moves the controller to [`ListStatus::Loading`] and marks the query dirty.
//! [`ListController::sync`] then performs at most one fetch for however many
//! mutations preceded it.

use std::fmt::Display;

use async_trait::async_trait;
use serde::Serialize;

use crate::listing::filters::{FilterMap, FilterValue};
use crate::listing::query::{DEFAULT_PAGE_SIZE, PageEnvelope, PageQuery, SortSpec};

/// Source of pages for a single collection.
#[async_trait(?Send)]
pub trait PageSource<T> {
    type Error: Display;

    async fn fetch_page(&self, query: &PageQuery) -> Result<PageEnvelope<T>, Self::Error>;
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

/// Sink for transient, non-blocking user notifications.
#[cfg_attr(any(test, feature = "test-mocks"), mockall::automock)]
pub trait Notifier {
    fn notify(&self, message: &str, kind: NotificationKind);
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListStatus {
    Idle,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug)]
pub struct ListController<T> {
    page: u32,
    page_size: u32,
    sort: Option<SortSpec>,
    filters: FilterMap,
    items: Vec<T>,
    total_pages: u32,
    total_elements: u64,
    status: ListStatus,
    dirty: bool,
    error_message: String,
}

impl<T> Default for ListController<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> ListController<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            sort: None,
            filters: FilterMap::default(),
            items: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            status: ListStatus::Idle,
            dirty: false,
            error_message: "No se pudo cargar la lista.".to_string(),
        }
    }

    /// Rebuilds a controller from a query carried in a URL and schedules
    /// the initial fetch.
    pub fn restore(query: PageQuery) -> Self {
        let mut controller = Self::new(query.size);
        controller.page = query.page;
        controller.sort = query.sort;
        controller.filters = query.filters;
        controller.on_query_changed();
        controller
    }

    /// Message shown to the user when a fetch fails.
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
        self.on_query_changed();
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.total_pages {
            self.set_page(self.page + 1);
        }
    }

    pub fn previous_page(&mut self) {
        if self.page > 0 {
            self.set_page(self.page - 1);
        }
    }

    /// Changes the page size and always returns to the first page.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 0;
        self.on_query_changed();
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
        self.on_query_changed();
    }

    /// Replaces the filter set with the submitted one and returns to the
    /// first page.
    pub fn apply_filters<I, K>(&mut self, partial: I)
    where
        I: IntoIterator<Item = (K, FilterValue)>,
        K: Into<String>,
    {
        self.replace_filters(FilterMap::apply(partial));
    }

    /// Replaces the filter set with an already sanitized map.
    pub fn replace_filters(&mut self, filters: FilterMap) {
        self.filters = filters;
        self.page = 0;
        self.on_query_changed();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 0;
        self.on_query_changed();
    }

    /// Sets one free-text filter and returns to the first page.
    pub fn quick_search(&mut self, key: &str, term: &str) {
        let filters = std::mem::take(&mut self.filters);
        self.replace_filters(filters.with(key, FilterValue::text(term)));
    }

    /// Re-issues the current query, e.g. after an error.
    pub fn reload(&mut self) {
        self.on_query_changed();
    }

    fn on_query_changed(&mut self) {
        self.status = ListStatus::Loading;
        self.dirty = true;
    }

    /// Query the next fetch will transmit.
    pub fn query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            size: self.page_size,
            sort: self.sort.clone(),
            filters: self.filters.clone(),
        }
    }

    /// Performs the pending fetch, if any. Returns whether a fetch happened.
    ///
    /// On failure the previous items stay in place, the controller moves to
    /// [`ListStatus::Error`] and the notifier is called once.
    pub async fn sync<S, N>(&mut self, source: &S, notifier: &N) -> bool
    where
        S: PageSource<T> + ?Sized,
        N: Notifier + ?Sized,
    {
        if !self.dirty {
            return false;
        }
        self.dirty = false;

        let query = self.query();
        match source.fetch_page(&query).await {
            Ok(envelope) => {
                self.items = envelope.content;
                self.total_pages = envelope.total_pages;
                self.total_elements = envelope.total_elements;
                self.status = ListStatus::Loaded;
            }
            Err(err) => {
                log::error!("Failed to fetch page {}: {err}", query.page);
                self.status = ListStatus::Error;
                notifier.notify(&self.error_message, NotificationKind::Error);
            }
        }
        true
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == ListStatus::Loading
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn sort_spec(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
