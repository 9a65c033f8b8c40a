use serde::{Deserialize, Serialize};

use crate::domain::auth::Scoped;
use crate::domain::types::{ClientId, WorkshopId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub nombre: String,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub taller_id: Option<WorkshopId>,
}

impl Client {
    pub fn full_name(&self) -> String {
        match self.apellido.as_deref().map(str::trim) {
            Some(apellido) if !apellido.is_empty() => format!("{} {}", self.nombre, apellido),
            _ => self.nombre.clone(),
        }
    }
}

impl Scoped for Client {
    fn workshop_id(&self) -> Option<WorkshopId> {
        self.taller_id
    }

    fn client_id(&self) -> Option<ClientId> {
        Some(self.id)
    }
}

/// Compact client reference embedded in other entities.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    pub id: ClientId,
    #[serde(default)]
    pub nombre: String,
}
