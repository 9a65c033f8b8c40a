//! Query-string parameters of the generic list page.

use std::collections::HashMap;

use crate::listing::filters::RESERVED_KEYS;
use crate::listing::query::SortSpec;

/// Raw list parameters: `page`, `size` and `sort` are typed, every other
/// key is kept as a filter candidate.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListParams {
    pub page: u32,
    pub size: Option<u32>,
    pub sort: Option<SortSpec>,
    pub filters: HashMap<String, String>,
}

impl ListParams {
    pub fn from_query(mut raw: HashMap<String, String>) -> Self {
        let page = raw
            .remove("page")
            .and_then(|page| page.trim().parse().ok())
            .unwrap_or(0);
        let size = raw.remove("size").and_then(|size| size.trim().parse().ok());
        let sort = raw
            .remove("sort")
            .filter(|sort| !sort.trim().is_empty())
            .and_then(|sort| match sort.parse::<SortSpec>() {
                Ok(spec) => Some(spec),
                Err(err) => {
                    log::warn!("Ignoring sort parameter: {err}");
                    None
                }
            });
        raw.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));

        Self {
            page,
            size,
            sort,
            filters: raw,
        }
    }

    /// Free-text quick-search term, if any.
    pub fn search_term(&self, key: &str) -> Option<&str> {
        self.filters
            .get(key)
            .map(|term| term.trim())
            .filter(|term| !term.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reserved_keys_are_typed() {
        let params = ListParams::from_query(raw(&[
            ("page", "3"),
            ("size", "25"),
            ("sort", "placa,desc"),
            ("marca", "Toyota"),
        ]));

        assert_eq!(params.page, 3);
        assert_eq!(params.size, Some(25));
        assert_eq!(params.sort, Some(SortSpec::desc("placa")));
        assert_eq!(params.filters, raw(&[("marca", "Toyota")]));
    }

    #[test]
    fn malformed_values_fall_back() {
        let params =
            ListParams::from_query(raw(&[("page", "-1"), ("size", "many"), ("sort", "placa,up")]));

        assert_eq!(params, ListParams::default());
    }

    #[test]
    fn blank_search_term_is_absent() {
        let params = ListParams::from_query(raw(&[("q", "   ")]));
        assert_eq!(params.search_term("q"), None);

        let params = ListParams::from_query(raw(&[("q", " abc ")]));
        assert_eq!(params.search_term("q"), Some("abc"));
    }
}
