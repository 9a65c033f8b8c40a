//! Workshop create and edit workflows.

use crate::api::store::EntityStore;
use crate::domain::auth::{AuthenticatedUser, can_create};
use crate::domain::resource::Resource;
use crate::domain::workshop::{NewWorkshop, Workshop};
use crate::forms::workshop::WorkshopForm;
use crate::services::entity::update_entity;
use crate::services::{ServiceError, ServiceResult};

pub async fn create_workshop<R>(
    store: &R,
    user: &AuthenticatedUser,
    form: WorkshopForm,
) -> ServiceResult<i32>
where
    R: EntityStore + ?Sized,
{
    if !can_create(user, Resource::Talleres) {
        return Err(ServiceError::Unauthorized);
    }

    let payload = NewWorkshop::try_from(form)?;
    let saved = store
        .create_value(Resource::Talleres, serde_json::to_value(&payload)?)
        .await?;
    let saved: Workshop = serde_json::from_value(saved)?;
    Ok(saved.id.get())
}

pub async fn update_workshop<R>(
    store: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: WorkshopForm,
) -> ServiceResult<()>
where
    R: EntityStore + ?Sized,
{
    let payload = NewWorkshop::try_from(form)?;
    update_entity::<Workshop, R>(store, user, id, serde_json::to_value(&payload)?).await
}
