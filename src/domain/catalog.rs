//! Products and services offered by workshops.

use serde::{Deserialize, Serialize};

use crate::domain::auth::Scoped;
use crate::domain::types::{ProductId, ServiceId, WorkshopId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub precio: f64,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub stock_minimo: i32,
    #[serde(default)]
    pub taller_id: Option<WorkshopId>,
}

impl Product {
    /// Stock at or below the configured minimum.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.stock_minimo
    }
}

impl Scoped for Product {
    fn workshop_id(&self) -> Option<WorkshopId> {
        self.taller_id
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ServiceId,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub precio: f64,
    /// Estimated duration in minutes.
    #[serde(default)]
    pub duracion_estimada: Option<u32>,
    #[serde(default)]
    pub taller_id: Option<WorkshopId>,
}

impl Scoped for Service {
    fn workshop_id(&self) -> Option<WorkshopId> {
        self.taller_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_stock_includes_the_minimum() {
        let mut product: Product = serde_json::from_value(serde_json::json!({
            "id": 1,
            "nombre": "Filtro de aceite",
            "precio": 12.5,
            "stock": 3,
            "stockMinimo": 3
        }))
        .unwrap();
        assert!(product.is_low_stock());

        product.stock = 4;
        assert!(!product.is_low_stock());
    }
}
