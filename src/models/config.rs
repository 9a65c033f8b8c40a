//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::listing::pagination::PAGE_SIZE_OPTIONS;
use crate::listing::query::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    /// Workshop REST backend, e.g. `http://localhost:8080/api`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<u32>,
    #[serde(default = "default_quick_search_debounce_ms")]
    pub quick_search_debounce_ms: u64,
}

impl ServerConfig {
    pub fn quick_search_debounce(&self) -> Duration {
        Duration::from_millis(self.quick_search_debounce_ms)
    }

    /// Page size to use for a requested value: allowed options pass through,
    /// anything else falls back to the default.
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        match requested {
            Some(size) if self.page_size_options.contains(&size) => size,
            _ => self.default_page_size.max(1),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_page_size_options() -> Vec<u32> {
    PAGE_SIZE_OPTIONS.to_vec()
}

fn default_quick_search_debounce_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> ServerConfig {
        serde_json::from_value(serde_json::json!({
            "domain": "localhost",
            "address": "127.0.0.1",
            "port": 8000,
            "templates_dir": "templates/**/*",
            "secret": "secret"
        }))
        .unwrap()
    }

    #[test]
    fn missing_api_url_falls_back_to_local_default() {
        let config = minimal();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.quick_search_debounce(), Duration::from_millis(500));
        assert_eq!(config.page_size_options, vec![10, 25, 50, 100]);
    }

    #[test]
    fn page_size_accepts_only_listed_options() {
        let config = minimal();
        assert_eq!(config.page_size(Some(50)), 50);
        assert_eq!(config.page_size(Some(7)), DEFAULT_PAGE_SIZE);
        assert_eq!(config.page_size(None), DEFAULT_PAGE_SIZE);
    }
}
