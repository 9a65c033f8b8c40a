use serde::Serialize;

/// One quick-search suggestion.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchHit {
    pub id: i32,
    pub title: String,
    pub href: String,
}

/// JSON body returned by the quick-search endpoint.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub term: String,
    pub hits: Vec<SearchHit>,
    pub total_elements: u64,
    /// Message shown when the backend could not be queried.
    pub error: Option<String>,
}
