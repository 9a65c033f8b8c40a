use serde::{Deserialize, Serialize};

use crate::domain::auth::Scoped;
use crate::domain::client::ClientRef;
use crate::domain::types::{ClientId, LicensePlate, VehicleId, WorkshopId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub placa: LicensePlate,
    pub marca: String,
    pub modelo: String,
    #[serde(default)]
    pub anio: Option<i32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub kilometraje: Option<u32>,
    #[serde(default)]
    pub cliente: Option<ClientRef>,
    #[serde(default)]
    pub taller_id: Option<WorkshopId>,
}

impl Vehicle {
    /// Short label such as `ABC123 · Toyota Corolla`.
    pub fn label(&self) -> String {
        format!("{} · {} {}", self.placa, self.marca, self.modelo)
    }
}

impl Scoped for Vehicle {
    fn workshop_id(&self) -> Option<WorkshopId> {
        self.taller_id
    }

    fn client_id(&self) -> Option<ClientId> {
        self.cliente.as_ref().map(|cliente| cliente.id)
    }
}

/// Compact vehicle reference embedded in maintenance records.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRef {
    pub id: VehicleId,
    #[serde(default)]
    pub placa: Option<String>,
}

/// Payload sent when creating or updating a vehicle.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub placa: LicensePlate,
    pub marca: String,
    pub modelo: String,
    pub anio: Option<i32>,
    pub color: Option<String>,
    pub kilometraje: Option<u32>,
    pub cliente_id: Option<ClientId>,
    pub taller_id: Option<WorkshopId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_payload() {
        let vehicle: Vehicle = serde_json::from_value(serde_json::json!({
            "id": 4,
            "placa": "abc-123",
            "marca": "Toyota",
            "modelo": "Corolla",
            "anio": 2018,
            "cliente": {"id": 9, "nombre": "Ana"},
            "tallerId": 3
        }))
        .unwrap();

        assert_eq!(vehicle.label(), "ABC123 · Toyota Corolla");
        assert_eq!(vehicle.client_id(), ClientId::new(9).ok());
        assert_eq!(vehicle.workshop_id(), WorkshopId::new(3).ok());
    }
}
