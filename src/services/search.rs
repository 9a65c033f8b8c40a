//! Quick search behind the list pages' search box.

use crate::domain::auth::{AuthenticatedUser, can_view};
use crate::dto::search::{SearchHit, SearchResults};
use crate::listing::controller::{ListController, ListStatus, PageSource};
use crate::listing::query::PageQuery;
use crate::notifications::AlertCollector;
use crate::services::list::scoped_query;
use crate::services::{ServiceError, ServiceResult};
use crate::views::{ListView, SEARCH_KEY};

/// Suggestions returned per keystroke.
pub const SEARCH_LIMIT: u32 = 8;

/// Debounce key for one user's searches on one resource.
pub fn debounce_key<V: ListView>(user: &AuthenticatedUser) -> String {
    format!("{}:{}", user.sub, V::RESOURCE.path())
}

/// Runs a quick search for `term`. A blank term returns no hits without
/// calling the backend.
pub async fn quick_search<V, S>(
    source: &S,
    user: &AuthenticatedUser,
    term: &str,
) -> ServiceResult<SearchResults>
where
    V: ListView,
    S: PageSource<V> + ?Sized,
{
    if !can_view(user, V::RESOURCE) {
        return Err(ServiceError::Unauthorized);
    }

    let term = term.trim();
    if term.is_empty() {
        return Ok(SearchResults {
            term: String::new(),
            hits: Vec::new(),
            total_elements: 0,
            error: None,
        });
    }

    let base = PageQuery::new(0, SEARCH_LIMIT);
    let base = match V::default_sort() {
        Some(sort) => base.sort(sort),
        None => base,
    };
    let mut controller = ListController::restore(scoped_query(user, V::RESOURCE, base));
    controller.quick_search(SEARCH_KEY, term);

    let collector = AlertCollector::new();
    controller.sync(source, &collector).await;

    let error = match controller.status() {
        ListStatus::Error => collector.into_alerts().into_iter().next().map(|a| a.message),
        _ => None,
    };

    let path = V::RESOURCE.path();
    Ok(SearchResults {
        term: term.to_string(),
        total_elements: controller.total_elements(),
        hits: controller
            .items()
            .iter()
            .map(|item| SearchHit {
                id: item.id(),
                title: item.title(),
                href: format!("/{path}/{}", item.id()),
            })
            .collect(),
        error,
    })
}
