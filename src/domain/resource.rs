//! REST resources exposed by the backend and browsed by the console.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Clientes,
    Talleres,
    Trabajadores,
    Productos,
    Servicios,
    Mantenimientos,
    Facturas,
    Vehiculos,
    Alertas,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::Talleres,
        Resource::Clientes,
        Resource::Vehiculos,
        Resource::Mantenimientos,
        Resource::Trabajadores,
        Resource::Servicios,
        Resource::Productos,
        Resource::Facturas,
        Resource::Alertas,
    ];

    /// Path segment used both by the backend and by console URLs.
    pub const fn path(self) -> &'static str {
        match self {
            Resource::Clientes => "clientes",
            Resource::Talleres => "talleres",
            Resource::Trabajadores => "trabajadores",
            Resource::Productos => "productos",
            Resource::Servicios => "servicios",
            Resource::Mantenimientos => "mantenimientos",
            Resource::Facturas => "facturas",
            Resource::Vehiculos => "vehiculos",
            Resource::Alertas => "alertas",
        }
    }

    /// Human readable title for navigation and page headers.
    pub const fn title(self) -> &'static str {
        match self {
            Resource::Clientes => "Clientes",
            Resource::Talleres => "Talleres",
            Resource::Trabajadores => "Trabajadores",
            Resource::Productos => "Productos",
            Resource::Servicios => "Servicios",
            Resource::Mantenimientos => "Mantenimientos",
            Resource::Facturas => "Facturas",
            Resource::Vehiculos => "Vehículos",
            Resource::Alertas => "Alertas",
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Resource {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.path() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(s.to_string()))
    }
}
