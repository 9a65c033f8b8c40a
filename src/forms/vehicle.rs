use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{ClientId, LicensePlate, WorkshopId};
use crate::domain::vehicle::NewVehicle;
use crate::forms::{FormError, blank_as_none, non_blank};

#[derive(Deserialize, Validate)]
/// Form data for creating or editing a vehicle.
pub struct VehicleForm {
    #[validate(length(min = 5, max = 12))]
    pub placa: String,
    #[validate(length(min = 1, max = 60))]
    pub marca: String,
    #[validate(length(min = 1, max = 60))]
    pub modelo: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(range(min = 1950, max = 2100))]
    pub anio: Option<i32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(range(max = 2_000_000))]
    pub kilometraje: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cliente_id: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub taller_id: Option<i32>,
}

impl TryFrom<VehicleForm> for NewVehicle {
    type Error = FormError;

    fn try_from(form: VehicleForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewVehicle {
            placa: LicensePlate::new(&form.placa).map_err(|_| FormError::InvalidPlate)?,
            marca: form.marca.trim().to_string(),
            modelo: form.modelo.trim().to_string(),
            anio: form.anio,
            color: non_blank(form.color),
            kilometraje: form.kilometraje,
            cliente_id: form
                .cliente_id
                .map(ClientId::new)
                .transpose()
                .map_err(|_| FormError::InvalidClientId)?,
            taller_id: form
                .taller_id
                .map(WorkshopId::new)
                .transpose()
                .map_err(|_| FormError::InvalidWorkshopId)?,
        })
    }
}
