use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::auth::Scoped;
use crate::domain::types::{AlertId, ClientId, VehicleId, WorkshopId};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    Info,
    Advertencia,
    Critica,
}

impl AlertLevel {
    pub const fn label(self) -> &'static str {
        match self {
            AlertLevel::Info => "Información",
            AlertLevel::Advertencia => "Advertencia",
            AlertLevel::Critica => "Crítica",
        }
    }

    /// Bootstrap contextual class used for the badge.
    pub const fn badge(self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Advertencia => "warning",
            AlertLevel::Critica => "danger",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: AlertId,
    pub titulo: String,
    #[serde(default)]
    pub mensaje: Option<String>,
    pub nivel: AlertLevel,
    #[serde(default)]
    pub leida: bool,
    #[serde(default)]
    pub vehiculo_id: Option<VehicleId>,
    #[serde(default)]
    pub taller_id: Option<WorkshopId>,
    #[serde(default)]
    pub cliente_id: Option<ClientId>,
    #[serde(default)]
    pub fecha_creacion: Option<NaiveDateTime>,
}

impl Scoped for Alert {
    fn workshop_id(&self) -> Option<WorkshopId> {
        self.taller_id
    }

    fn client_id(&self) -> Option<ClientId> {
        self.cliente_id
    }
}
