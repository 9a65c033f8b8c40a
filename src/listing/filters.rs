//! Filter state shared by list pages.
//!
//! An absent key means "unconstrained". Empty values never make it into the
//! map, so they are never transmitted.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

/// Query keys owned by pagination and sorting.
pub const RESERVED_KEYS: [&str; 3] = ["page", "size", "sort"];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Text(String),
    Number(i64),
    Date(NaiveDate),
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text(value.into())
    }

    /// Blank text counts as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(value) => value.trim().is_empty(),
            FilterValue::Number(_) | FilterValue::Date(_) => false,
        }
    }

    pub fn to_param(&self) -> String {
        match self {
            FilterValue::Text(value) => value.trim().to_string(),
            FilterValue::Number(value) => value.to_string(),
            FilterValue::Date(value) => value.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Input widget used for a filter in the filter panel.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "type", content = "options", rename_all = "lowercase")]
pub enum FilterKind {
    Text,
    Number,
    Date,
    /// Fixed `(value, label)` choices.
    Select(&'static [(&'static str, &'static str)]),
}

impl FilterKind {
    fn parse(self, raw: &str) -> Option<FilterValue> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match self {
            FilterKind::Text => Some(FilterValue::text(raw)),
            FilterKind::Number => raw.parse().ok().map(FilterValue::Number),
            FilterKind::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .map(FilterValue::Date),
            FilterKind::Select(options) => options
                .iter()
                .any(|(value, _)| *value == raw)
                .then(|| FilterValue::text(raw)),
        }
    }
}

/// A filter declared by a list view.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FilterKind,
}

impl FilterField {
    pub const fn new(key: &'static str, label: &'static str, kind: FilterKind) -> Self {
        Self { key, label, kind }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterMap(BTreeMap<String, FilterValue>);

impl FilterMap {
    /// Builds the filter set submitted by a filter panel.
    ///
    /// The submission replaces any previous filters wholesale; empty values
    /// and reserved keys are dropped.
    pub fn apply<I, K>(partial: I) -> Self
    where
        I: IntoIterator<Item = (K, FilterValue)>,
        K: Into<String>,
    {
        partial
            .into_iter()
            .fold(Self::default(), |map, (key, value)| map.with(key, value))
    }

    /// Parses raw query parameters against the declared filter fields.
    ///
    /// Undeclared keys are ignored and unparsable values are dropped.
    pub fn from_params(fields: &[FilterField], params: &HashMap<String, String>) -> Self {
        let mut map = Self::default();
        for field in fields {
            let Some(raw) = params.get(field.key) else {
                continue;
            };
            match field.kind.parse(raw) {
                Some(value) => map = map.with(field.key, value),
                None if !raw.trim().is_empty() => {
                    log::warn!("Dropping invalid value for filter {}: {raw:?}", field.key);
                }
                None => {}
            }
        }
        map
    }

    /// Sets a single key, removing it when the value is empty.
    pub fn with(mut self, key: impl Into<String>, value: FilterValue) -> Self {
        let key = key.into();
        let key = key.trim();
        if key.is_empty() || RESERVED_KEYS.contains(&key) {
            return self;
        }
        if value.is_empty() {
            self.0.remove(key);
        } else {
            self.0.insert(key.to_string(), value);
        }
        self
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Key/value pairs ready for a query string, in key order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), value.to_param()))
            .collect()
    }

    /// Current values keyed by filter name, used to refill the filter panel.
    pub fn form_values(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), value.to_param()))
            .collect()
    }
}
