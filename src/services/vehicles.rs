//! Vehicle create and edit workflows.

use serde_json::Value;

use crate::api::store::EntityStore;
use crate::domain::auth::{AuthenticatedUser, Role, can_create};
use crate::domain::resource::Resource;
use crate::domain::vehicle::{NewVehicle, Vehicle};
use crate::forms::vehicle::VehicleForm;
use crate::services::entity::update_entity;
use crate::services::{ServiceError, ServiceResult};

/// Applies the session's scope to the payload: workshop staff always
/// register vehicles in their own workshop, clients always own them.
fn scoped_payload(user: &AuthenticatedUser, mut payload: NewVehicle) -> NewVehicle {
    match user.role {
        Role::AdminTaller | Role::Trabajador => payload.taller_id = user.workshop_id,
        Role::Cliente => payload.cliente_id = user.client_id,
        Role::Admin => {}
    }
    payload
}

fn saved_id(value: &Value) -> ServiceResult<i32> {
    let saved: Vehicle = serde_json::from_value(value.clone())?;
    Ok(saved.id.get())
}

/// Creates a vehicle and returns its id.
pub async fn create_vehicle<R>(
    store: &R,
    user: &AuthenticatedUser,
    form: VehicleForm,
) -> ServiceResult<i32>
where
    R: EntityStore + ?Sized,
{
    if !can_create(user, Resource::Vehiculos) {
        return Err(ServiceError::Unauthorized);
    }

    let payload = scoped_payload(user, NewVehicle::try_from(form)?);
    let saved = store
        .create_value(Resource::Vehiculos, serde_json::to_value(&payload)?)
        .await?;
    saved_id(&saved)
}

/// Updates a vehicle the user may edit.
pub async fn update_vehicle<R>(
    store: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: VehicleForm,
) -> ServiceResult<()>
where
    R: EntityStore + ?Sized,
{
    let payload = scoped_payload(user, NewVehicle::try_from(form)?);
    update_entity::<Vehicle, R>(store, user, id, serde_json::to_value(&payload)?).await
}

#[cfg(test)]
mod tests {
    use mockall::predicate::{always, eq};
    use serde_json::json;

    use super::*;
    use crate::api::mock::MockBackend;
    use crate::domain::auth::fixtures::user;

    fn form(body: &str) -> VehicleForm {
        serde_html_form::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn workshop_admin_creates_in_own_workshop() {
        let mut backend = MockBackend::new();
        backend
            .expect_create_value()
            .withf(|resource, body| {
                *resource == Resource::Vehiculos
                    && body["tallerId"] == json!(3)
                    && body["placa"] == json!("ABC123")
            })
            .times(1)
            .returning(|_, _| {
                Ok(json!({"id": 11, "placa": "ABC123", "marca": "Kia", "modelo": "Rio"}))
            });

        let id = create_vehicle(
            &backend,
            &user(Role::AdminTaller, Some(3), None),
            form("placa=abc+123&marca=Kia&modelo=Rio&taller_id=9"),
        )
        .await
        .unwrap();

        assert_eq!(id, 11);
    }

    #[tokio::test]
    async fn workers_cannot_create() {
        let mut backend = MockBackend::new();
        backend.expect_create_value().never();

        let result = create_vehicle(
            &backend,
            &user(Role::Trabajador, Some(3), None),
            form("placa=ABC123&marca=Kia&modelo=Rio"),
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_backend() {
        let mut backend = MockBackend::new();
        backend.expect_create_value().never();

        let result = create_vehicle(
            &backend,
            &user(Role::Admin, None, None),
            form("placa=AB&marca=Kia&modelo=Rio"),
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[tokio::test]
    async fn update_refuses_foreign_vehicles() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_value()
            .with(eq(Resource::Vehiculos), eq(4))
            .returning(|_, _| {
                Ok(json!({
                    "id": 4, "placa": "ABC123", "marca": "Kia", "modelo": "Rio",
                    "cliente": {"id": 10, "nombre": "Otro"}
                }))
            });
        backend
            .expect_update_value()
            .with(always(), always(), always())
            .never();

        let result = update_vehicle(
            &backend,
            &user(Role::Cliente, None, Some(9)),
            4,
            form("placa=ABC123&marca=Kia&modelo=Rio"),
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[tokio::test]
    async fn update_keeps_fields_the_form_does_not_edit() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_value()
            .with(eq(Resource::Vehiculos), eq(4))
            .returning(|_, _| {
                Ok(json!({
                    "id": 4, "placa": "ABC123", "marca": "Kia", "modelo": "Rio",
                    "tallerId": 3, "fechaRegistro": "2023-02-10", "vin": "KNADN512345"
                }))
            });
        backend
            .expect_update_value()
            .withf(|resource, id, body| {
                *resource == Resource::Vehiculos
                    && *id == 4
                    && body["modelo"] == json!("Picanto")
                    && body["tallerId"] == json!(3)
                    && body["fechaRegistro"] == json!("2023-02-10")
                    && body["vin"] == json!("KNADN512345")
            })
            .times(1)
            .returning(|_, _, body| Ok(body));

        update_vehicle(
            &backend,
            &user(Role::AdminTaller, Some(3), None),
            4,
            form("placa=ABC123&marca=Kia&modelo=Picanto"),
        )
        .await
        .unwrap();
    }
}
