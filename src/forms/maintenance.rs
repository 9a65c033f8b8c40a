use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::maintenance::MaintenanceStatus;
use crate::domain::types::{VehicleId, WorkshopId};
use crate::forms::{FormError, blank_as_none};

#[derive(Deserialize, Validate)]
/// Form data for requesting maintenance on a vehicle.
pub struct MaintenanceRequestForm {
    pub vehiculo_id: i32,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub taller_id: Option<i32>,
    #[validate(length(min = 5, max = 1000))]
    pub descripcion: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub fecha_programada: Option<NaiveDate>,
}

/// Validated maintenance request. The workshop is resolved by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRequestPayload {
    pub vehiculo_id: VehicleId,
    pub taller_id: Option<WorkshopId>,
    pub descripcion: String,
    pub fecha_programada: Option<NaiveDate>,
}

impl TryFrom<MaintenanceRequestForm> for MaintenanceRequestPayload {
    type Error = FormError;

    fn try_from(form: MaintenanceRequestForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            vehiculo_id: VehicleId::new(form.vehiculo_id)
                .map_err(|_| FormError::InvalidVehicleId)?,
            taller_id: form
                .taller_id
                .map(WorkshopId::new)
                .transpose()
                .map_err(|_| FormError::InvalidWorkshopId)?,
            descripcion: form.descripcion.trim().to_string(),
            fecha_programada: form.fecha_programada,
        })
    }
}

#[derive(Deserialize)]
/// Target status posted by a workflow button.
pub struct StatusForm {
    pub estado: String,
}

impl TryFrom<StatusForm> for MaintenanceStatus {
    type Error = FormError;

    fn try_from(form: StatusForm) -> Result<Self, Self::Error> {
        form.estado
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidStatus(form.estado.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_optional_date() {
        let form: MaintenanceRequestForm = serde_html_form::from_str(
            "vehiculo_id=4&taller_id=&descripcion=Cambio+de+frenos&fecha_programada=2024-06-01",
        )
        .unwrap();
        let payload = MaintenanceRequestPayload::try_from(form).unwrap();

        assert_eq!(payload.vehiculo_id, VehicleId::new(4).unwrap());
        assert_eq!(payload.taller_id, None);
        assert_eq!(payload.fecha_programada, NaiveDate::from_ymd_opt(2024, 6, 1));
    }

    #[test]
    fn short_description_is_rejected() {
        let form: MaintenanceRequestForm =
            serde_html_form::from_str("vehiculo_id=4&descripcion=x").unwrap();
        assert!(matches!(
            MaintenanceRequestPayload::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn status_codes_are_parsed() {
        let status = MaintenanceStatus::try_from(StatusForm {
            estado: "EN_PROCESO".to_string(),
        });
        assert_eq!(status.ok(), Some(MaintenanceStatus::EnProceso));

        assert!(matches!(
            MaintenanceStatus::try_from(StatusForm {
                estado: "ARCHIVADO".to_string()
            }),
            Err(FormError::InvalidStatus(_))
        ));
    }
}
