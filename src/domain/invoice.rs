//! Invoices as issued by the backend.
//!
//! Totals are computed server-side and shown unchanged; the line sum is only
//! used to flag inconsistent documents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::auth::Scoped;
use crate::domain::client::ClientRef;
use crate::domain::types::{ClientId, InvoiceId, MaintenanceId, WorkshopId};

const CENT: f64 = 0.01;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Pendiente,
    Pagada,
    Anulada,
}

impl InvoiceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Pendiente => "Pendiente",
            InvoiceStatus::Pagada => "Pagada",
            InvoiceStatus::Anulada => "Anulada",
        }
    }

    pub const fn badge(self) -> &'static str {
        match self {
            InvoiceStatus::Pendiente => "warning",
            InvoiceStatus::Pagada => "success",
            InvoiceStatus::Anulada => "secondary",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub descripcion: String,
    pub cantidad: f64,
    pub precio_unitario: f64,
}

impl InvoiceLine {
    pub fn amount(&self) -> f64 {
        self.cantidad * self.precio_unitario
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub numero: String,
    #[serde(default)]
    pub cliente: Option<ClientRef>,
    #[serde(default)]
    pub taller_id: Option<WorkshopId>,
    #[serde(default)]
    pub mantenimiento_id: Option<MaintenanceId>,
    #[serde(default)]
    pub fecha_emision: Option<NaiveDate>,
    pub subtotal: f64,
    #[serde(default)]
    pub impuesto: f64,
    pub total: f64,
    pub estado: InvoiceStatus,
    #[serde(default)]
    pub detalles: Vec<InvoiceLine>,
}

impl Invoice {
    pub fn lines_total(&self) -> f64 {
        self.detalles.iter().map(InvoiceLine::amount).sum()
    }

    /// Whether the line items disagree with the backend subtotal.
    ///
    /// Invoices without line items are never flagged.
    pub fn has_line_mismatch(&self) -> bool {
        !self.detalles.is_empty() && (self.lines_total() - self.subtotal).abs() > CENT
    }
}

impl Scoped for Invoice {
    fn workshop_id(&self) -> Option<WorkshopId> {
        self.taller_id
    }

    fn client_id(&self) -> Option<ClientId> {
        self.cliente.as_ref().map(|cliente| cliente.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(subtotal: f64, lines: &[(f64, f64)]) -> Invoice {
        Invoice {
            id: InvoiceId::new(1).unwrap(),
            numero: "F-0001".to_string(),
            cliente: None,
            taller_id: None,
            mantenimiento_id: None,
            fecha_emision: None,
            subtotal,
            impuesto: subtotal * 0.19,
            total: subtotal * 1.19,
            estado: InvoiceStatus::Pendiente,
            detalles: lines
                .iter()
                .map(|&(cantidad, precio_unitario)| InvoiceLine {
                    descripcion: "Repuesto".to_string(),
                    cantidad,
                    precio_unitario,
                })
                .collect(),
        }
    }

    #[test]
    fn consistent_lines_are_not_flagged() {
        let invoice = invoice(125.0, &[(2.0, 50.0), (1.0, 25.0)]);
        assert_eq!(invoice.lines_total(), 125.0);
        assert!(!invoice.has_line_mismatch());
    }

    #[test]
    fn mismatch_is_flagged_beyond_a_cent() {
        assert!(invoice(130.0, &[(2.0, 50.0), (1.0, 25.0)]).has_line_mismatch());
        assert!(!invoice(125.005, &[(2.0, 50.0), (1.0, 25.0)]).has_line_mismatch());
    }

    #[test]
    fn invoices_without_lines_are_trusted() {
        assert!(!invoice(99.0, &[]).has_line_mismatch());
    }
}
