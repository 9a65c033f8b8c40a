//! Detail pages and deletion for any listed resource.

use serde_json::Value;

use crate::api::store::EntityStore;
use crate::domain::auth::{AuthenticatedUser, can_create, can_edit, can_view, in_scope};
use crate::domain::resource::Resource;
use crate::dto::entity::{DetailField, EntityPageData};
use crate::listing::table::{RowView, Table};
use crate::services::{ServiceError, ServiceResult};
use crate::views::{ListView, has_edit_form};

/// Fetches one record of `V` with its raw backend body and checks it lies
/// inside the user's scope, the same workshop or client the list queries are
/// narrowed to.
async fn fetch_scoped<V, R>(store: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<(V, Value)>
where
    V: ListView,
    R: EntityStore + ?Sized,
{
    if !can_view(user, V::RESOURCE) {
        return Err(ServiceError::Unauthorized);
    }
    let value = store.get_value(V::RESOURCE, id).await?;
    let entity: V = serde_json::from_value(value.clone())?;
    if !in_scope(user, V::RESOURCE, &entity) {
        log::warn!("{} tried to open {}/{id} outside their scope", user.email, V::RESOURCE);
        return Err(ServiceError::Unauthorized);
    }
    Ok((entity, value))
}

pub async fn fetch_entity<V, R>(store: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<V>
where
    V: ListView,
    R: EntityStore + ?Sized,
{
    let (entity, _) = fetch_scoped(store, user, id).await?;
    Ok(entity)
}

pub fn ensure_can_create(user: &AuthenticatedUser, resource: Resource) -> ServiceResult<()> {
    if can_create(user, resource) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Fetches a record the user is about to edit.
pub async fn fetch_for_edit<V, R>(store: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<V>
where
    V: ListView,
    R: EntityStore + ?Sized,
{
    let entity: V = fetch_entity(store, user, id).await?;
    if can_edit(user, &entity) {
        Ok(entity)
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Writes `payload` over the stored record. Fields the payload does not
/// carry keep their backend values.
pub async fn update_entity<V, R>(
    store: &R,
    user: &AuthenticatedUser,
    id: i32,
    payload: Value,
) -> ServiceResult<()>
where
    V: ListView,
    R: EntityStore + ?Sized,
{
    let (entity, current) = fetch_scoped::<V, R>(store, user, id).await?;
    if !can_edit(user, &entity) {
        return Err(ServiceError::Unauthorized);
    }

    let merged = match (current, payload) {
        (Value::Object(mut stored), Value::Object(fields)) => {
            stored.extend(fields);
            Value::Object(stored)
        }
        (_, payload) => payload,
    };
    store.update_value(V::RESOURCE, id, merged).await?;
    log::info!("{} updated {}/{id}", user.email, V::RESOURCE);
    Ok(())
}

/// Renders `entity` through its list columns as label/value pairs.
pub fn detail_fields<V: ListView>(entity: &V) -> Vec<DetailField> {
    let columns = V::columns();
    let labels: Vec<&'static str> = columns.iter().map(|column| column.header).collect();
    match Table::new(columns).render(std::slice::from_ref(entity)).rows.pop() {
        Some(RowView::Data { cells, .. }) => labels
            .into_iter()
            .zip(cells)
            .map(|(label, cell)| DetailField { label, cell })
            .collect(),
        _ => Vec::new(),
    }
}

pub async fn load_entity_page<V, R>(
    store: &R,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<EntityPageData>
where
    V: ListView,
    R: EntityStore + ?Sized,
{
    let entity: V = fetch_entity(store, user, id).await?;
    let path = V::RESOURCE.path();
    let editable = can_edit(user, &entity);

    Ok(EntityPageData {
        path,
        resource_title: V::RESOURCE.title(),
        id: entity.id(),
        title: entity.title(),
        fields: detail_fields(&entity),
        edit_href: (editable && has_edit_form(V::RESOURCE))
            .then(|| format!("/{path}/{id}/editar")),
        delete_href: editable.then(|| format!("/{path}/{id}/delete")),
    })
}

/// Deletes a record after checking ownership.
pub async fn delete_entity<V, R>(store: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    V: ListView,
    R: EntityStore + ?Sized,
{
    fetch_for_edit::<V, R>(store, user, id).await?;
    store.delete_entity(V::RESOURCE, id).await?;
    log::info!("{} deleted {}/{id}", user.email, V::RESOURCE);
    Ok(())
}
