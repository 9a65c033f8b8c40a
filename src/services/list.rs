//! Generic list page: query restoration, scoping, fetch and table assembly.

use crate::domain::auth::{AuthenticatedUser, can_create, can_edit, can_view, scope_filters};
use crate::domain::resource::Resource;
use crate::dto::list::ListPageData;
use crate::forms::list::ListParams;
use crate::listing::controller::{ListController, Notifier, PageSource};
use crate::listing::filters::{FilterMap, FilterValue};
use crate::listing::pagination::PaginationFooter;
use crate::listing::query::{PageQuery, SortSpec};
use crate::listing::table::{RowAction, Table};
use crate::models::config::ServerConfig;
use crate::services::{ServiceError, ServiceResult};
use crate::views::{ListView, SEARCH_KEY, has_create_form, has_edit_form};

/// Console URL of a list page showing `query`.
pub fn list_href(resource: Resource, query: &PageQuery) -> String {
    match serde_html_form::to_string(query.to_pairs()) {
        Ok(encoded) => format!("/{}?{encoded}", resource.path()),
        Err(err) => {
            log::error!("Failed to encode list query: {err}");
            format!("/{}", resource.path())
        }
    }
}

/// Query the user asked for: declared filters, quick search, a page size
/// from the allowed options and a sort on a sortable column.
pub fn visible_query<V: ListView>(params: &ListParams, config: &ServerConfig) -> PageQuery {
    let mut filters = FilterMap::from_params(V::filters(), &params.filters);
    if let Some(term) = params.search_term(SEARCH_KEY) {
        filters = filters.with(SEARCH_KEY, FilterValue::text(term));
    }

    let sort = params
        .sort
        .clone()
        .filter(|sort| V::sortable().contains(&sort.field.as_str()))
        .or_else(V::default_sort);

    let query = PageQuery::new(params.page, config.page_size(params.size)).filters(filters);
    match sort {
        Some(sort) => query.sort(sort),
        None => query,
    }
}

/// Forces the user's scope keys into `query`, overriding typed values.
pub fn scoped_query(user: &AuthenticatedUser, resource: Resource, query: PageQuery) -> PageQuery {
    let filters = scope_filters(user, resource)
        .into_iter()
        .fold(query.filters.clone(), |filters, (key, value)| {
            filters.with(key, FilterValue::text(value))
        });
    query.filters(filters)
}

/// Actions offered on a row: view always, edit and delete when allowed.
pub fn row_actions<V: ListView>(user: &AuthenticatedUser, row: &V) -> Vec<RowAction> {
    let base = format!("/{}/{}", V::RESOURCE.path(), row.id());
    let mut actions = vec![RowAction::link("Ver", base.clone())];

    if can_edit(user, row) {
        if has_edit_form(V::RESOURCE) {
            actions.push(RowAction::link("Editar", format!("{base}/editar")).style("outline-secondary"));
        }
        actions.push(
            RowAction::post("Eliminar", format!("{base}/delete"))
                .style("outline-danger")
                .confirm("¿Eliminar este registro?"),
        );
    }
    actions
}

fn toggled_sort(current: Option<&SortSpec>, field: &str) -> SortSpec {
    match current {
        Some(sort) if sort.field == field => SortSpec::new(field, sort.direction.reversed()),
        _ => SortSpec::asc(field),
    }
}

/// Loads one page of `V` for the user and assembles the page data.
///
/// Fetch failures are reported through `notifier` and still yield a page.
pub async fn load_list_page<V, S, N>(
    source: &S,
    notifier: &N,
    user: &AuthenticatedUser,
    params: &ListParams,
    config: &ServerConfig,
) -> ServiceResult<ListPageData>
where
    V: ListView,
    S: PageSource<V> + ?Sized,
    N: Notifier + ?Sized,
{
    let resource = V::RESOURCE;
    if !can_view(user, resource) {
        return Err(ServiceError::Unauthorized);
    }

    let visible = visible_query::<V>(params, config);
    let mut controller = ListController::restore(scoped_query(user, resource, visible.clone()))
        .error_message(format!(
            "No se pudo cargar {}.",
            resource.title().to_lowercase()
        ));
    controller.sync(source, notifier).await;

    let current_sort = visible
        .sort
        .as_ref()
        .map(|sort| (sort.field.as_str(), sort.direction.as_str()));

    let table = Table::new(V::columns())
        .actions(|row: &V| row_actions(user, row))
        .render(controller.items())
        .sortable(V::sortable(), current_sort, |field| {
            let sort = toggled_sort(visible.sort.as_ref(), field);
            list_href(resource, &visible.with_page(0).sort(sort))
        })
        .footer(PaginationFooter::build(
            &visible,
            controller.total_pages(),
            controller.total_elements(),
            &config.page_size_options,
            |query| list_href(resource, query),
        ));

    Ok(ListPageData {
        path: resource.path(),
        title: resource.title(),
        table,
        filters: V::filters(),
        filter_values: visible.filters.form_values(),
        search_term: params.search_term(SEARCH_KEY).unwrap_or_default().to_string(),
        status: controller.status(),
        total_elements: controller.total_elements(),
        page_size: visible.size,
        sort: visible.sort.as_ref().map(ToString::to_string),
        create_href: (has_create_form(resource) && can_create(user, resource))
            .then(|| format!("/{}/nuevo", resource.path())),
    })
}
