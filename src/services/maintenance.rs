//! Maintenance requests and the status workflow.

use chrono::NaiveDateTime;

use crate::api::store::EntityStore;
use crate::domain::auth::{AuthenticatedUser, Role, can_create, can_edit};
use crate::domain::maintenance::{
    Maintenance, MaintenanceStatus, NewMaintenance, can_change_status, format_elapsed,
};
use crate::domain::resource::Resource;
use crate::domain::vehicle::Vehicle;
use crate::dto::entity::{MaintenancePageData, TransitionButton};
use crate::forms::maintenance::{MaintenanceRequestForm, MaintenanceRequestPayload};
use crate::services::entity::{detail_fields, fetch_entity};
use crate::services::{ServiceError, ServiceResult};

/// Files a new maintenance request in status `SOLICITADO`.
pub async fn create_request<R>(
    store: &R,
    user: &AuthenticatedUser,
    form: MaintenanceRequestForm,
) -> ServiceResult<i32>
where
    R: EntityStore + ?Sized,
{
    if !can_create(user, Resource::Mantenimientos) {
        return Err(ServiceError::Unauthorized);
    }

    let payload = MaintenanceRequestPayload::try_from(form)?;
    let vehicle: Vehicle = fetch_entity(store, user, payload.vehiculo_id.get()).await?;
    if !can_edit(user, &vehicle) {
        return Err(ServiceError::Unauthorized);
    }

    let staff_workshop = match user.role {
        Role::AdminTaller | Role::Trabajador => user.workshop_id,
        Role::Admin | Role::Cliente => None,
    };
    let taller_id = staff_workshop
        .or(payload.taller_id)
        .or(vehicle.taller_id)
        .ok_or_else(|| ServiceError::Form("Seleccione un taller.".to_string()))?;

    let request = NewMaintenance {
        vehiculo_id: payload.vehiculo_id,
        taller_id,
        descripcion: payload.descripcion,
        fecha_programada: payload.fecha_programada,
        estado: MaintenanceStatus::Solicitado,
    };
    let saved = store
        .create_value(Resource::Mantenimientos, serde_json::to_value(&request)?)
        .await?;
    let saved: Maintenance = serde_json::from_value(saved)?;
    Ok(saved.id.get())
}

fn transition_buttons(user: &AuthenticatedUser, record: &Maintenance) -> Vec<TransitionButton> {
    MaintenanceStatus::ALL
        .into_iter()
        .filter(|status| *status != record.estado)
        .map(|status| TransitionButton {
            code: status.code(),
            label: status.label(),
            style: status.badge(),
            enabled: record.estado.can_transition_to(status)
                && can_change_status(user, record, status),
        })
        .collect()
}

pub async fn load_maintenance_page<R>(
    store: &R,
    user: &AuthenticatedUser,
    id: i32,
    now: NaiveDateTime,
) -> ServiceResult<MaintenancePageData>
where
    R: EntityStore + ?Sized,
{
    let record: Maintenance = fetch_entity(store, user, id).await?;
    let elapsed = record.elapsed(now);

    Ok(MaintenancePageData {
        fields: detail_fields(&record),
        transitions: transition_buttons(user, &record),
        elapsed_seconds: elapsed.map(|delta| delta.num_seconds()),
        elapsed: elapsed.map(format_elapsed),
        running: record.estado == MaintenanceStatus::EnProceso && elapsed.is_some(),
        record,
    })
}

/// Moves a record to `target` after checking the workflow table and the
/// user's rights. The stored record is sent back with only `estado` changed.
pub async fn change_status<R>(
    store: &R,
    user: &AuthenticatedUser,
    id: i32,
    target: MaintenanceStatus,
) -> ServiceResult<MaintenanceStatus>
where
    R: EntityStore + ?Sized,
{
    let mut value = store.get_value(Resource::Mantenimientos, id).await?;
    let record: Maintenance = serde_json::from_value(value.clone())?;

    if !record.estado.can_transition_to(target) {
        return Err(ServiceError::InvalidTransition {
            from: record.estado,
            to: target,
        });
    }
    if !can_change_status(user, &record, target) {
        return Err(ServiceError::Unauthorized);
    }

    let Some(fields) = value.as_object_mut() else {
        return Err(ServiceError::NotFound);
    };
    fields.insert("estado".to_string(), target.code().into());
    store
        .update_value(Resource::Mantenimientos, id, value)
        .await?;
    log::info!(
        "{} moved maintenance {id} from {} to {}",
        user.email,
        record.estado.code(),
        target.code()
    );
    Ok(target)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mockall::predicate::eq;
    use serde_json::json;

    use super::*;
    use crate::api::mock::MockBackend;
    use crate::domain::auth::fixtures::user;

    fn record(estado: &str) -> serde_json::Value {
        json!({
            "id": 12,
            "vehiculo": {"id": 4, "placa": "ABC123"},
            "descripcion": "Frenos",
            "estado": estado,
            "fechaInicio": "2024-05-01T08:00:00",
            "tallerId": 3,
            "clienteId": 9,
            "notasInternas": "cliente frecuente"
        })
    }

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[tokio::test]
    async fn transition_keeps_unknown_fields() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_value()
            .with(eq(Resource::Mantenimientos), eq(12))
            .returning(|_, _| Ok(record("PENDIENTE")));
        backend
            .expect_update_value()
            .withf(|_, id, body| {
                *id == 12
                    && body["estado"] == json!("EN_PROCESO")
                    && body["notasInternas"] == json!("cliente frecuente")
            })
            .times(1)
            .returning(|_, _, body| Ok(body));

        let status = change_status(
            &backend,
            &user(Role::Trabajador, Some(3), None),
            12,
            MaintenanceStatus::EnProceso,
        )
        .await
        .unwrap();

        assert_eq!(status, MaintenanceStatus::EnProceso);
    }

    #[tokio::test]
    async fn transitions_outside_the_table_are_rejected() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_value()
            .returning(|_, _| Ok(record("COMPLETADO")));
        backend.expect_update_value().never();

        let result = change_status(
            &backend,
            &user(Role::Admin, None, None),
            12,
            MaintenanceStatus::Cancelado,
        )
        .await;

        assert!(matches!(
            result,
            Err(ServiceError::InvalidTransition {
                from: MaintenanceStatus::Completado,
                to: MaintenanceStatus::Cancelado,
            })
        ));
    }

    #[tokio::test]
    async fn page_enables_only_allowed_buttons_and_ticks_while_running() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_value()
            .returning(|_, _| Ok(record("EN_PROCESO")));

        let page = load_maintenance_page(
            &backend,
            &user(Role::AdminTaller, Some(3), None),
            12,
            at(9, 1, 5),
        )
        .await
        .unwrap();

        let enabled: Vec<&str> = page
            .transitions
            .iter()
            .filter(|button| button.enabled)
            .map(|button| button.code)
            .collect();
        assert_eq!(enabled, vec!["COMPLETADO", "CANCELADO"]);
        assert_eq!(page.transitions.len(), 4);
        assert_eq!(page.elapsed.as_deref(), Some("01:01:05"));
        assert_eq!(page.elapsed_seconds, Some(3665));
        assert!(page.running);
    }

    #[tokio::test]
    async fn request_uses_vehicle_workshop_for_clients() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_value()
            .with(eq(Resource::Vehiculos), eq(4))
            .returning(|_, _| {
                Ok(json!({
                    "id": 4, "placa": "ABC123", "marca": "Kia", "modelo": "Rio",
                    "cliente": {"id": 9, "nombre": "Ana"}, "tallerId": 3
                }))
            });
        backend
            .expect_create_value()
            .withf(|resource, body| {
                *resource == Resource::Mantenimientos
                    && body["tallerId"] == json!(3)
                    && body["estado"] == json!("SOLICITADO")
            })
            .times(1)
            .returning(|_, _| Ok(record("SOLICITADO")));

        let form: MaintenanceRequestForm =
            serde_html_form::from_str("vehiculo_id=4&descripcion=Ruido+en+frenos").unwrap();
        let id = create_request(&backend, &user(Role::Cliente, None, Some(9)), form)
            .await
            .unwrap();

        assert_eq!(id, 12);
    }

    #[tokio::test]
    async fn clients_cannot_request_for_foreign_vehicles() {
        let mut backend = MockBackend::new();
        backend.expect_get_value().returning(|_, _| {
            Ok(json!({
                "id": 4, "placa": "ABC123", "marca": "Kia", "modelo": "Rio",
                "cliente": {"id": 10, "nombre": "Otro"}
            }))
        });
        backend.expect_create_value().never();

        let form: MaintenanceRequestForm =
            serde_html_form::from_str("vehiculo_id=4&descripcion=Ruido+en+frenos").unwrap();
        let result = create_request(&backend, &user(Role::Cliente, None, Some(9)), form).await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
