use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::auth::Scoped;
use crate::domain::types::{WorkerId, WorkshopId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    pub id: WorkshopId,
    pub nombre: String,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_active")]
    pub activo: bool,
    #[serde(default)]
    pub fecha_creacion: Option<NaiveDateTime>,
}

impl Scoped for Workshop {
    fn workshop_id(&self) -> Option<WorkshopId> {
        Some(self.id)
    }
}

/// Payload sent when creating or updating a workshop.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkshop {
    pub nombre: String,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub activo: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: WorkerId,
    pub nombre: String,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub especialidad: Option<String>,
    #[serde(default)]
    pub taller_id: Option<WorkshopId>,
    #[serde(default = "default_active")]
    pub activo: bool,
}

impl Scoped for Worker {
    fn workshop_id(&self) -> Option<WorkshopId> {
        self.taller_id
    }
}

/// Compact worker reference embedded in maintenance records.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRef {
    pub id: WorkerId,
    #[serde(default)]
    pub nombre: String,
}

fn default_active() -> bool {
    true
}
