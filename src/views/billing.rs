//! Clients and invoices.

use crate::domain::client::Client;
use crate::domain::invoice::Invoice;
use crate::domain::resource::Resource;
use crate::listing::filters::{FilterField, FilterKind};
use crate::listing::query::SortSpec;
use crate::listing::table::{Cell, Column};
use crate::views::ListView;
use crate::views::format::{format_currency, format_date};

pub const INVOICE_STATUS_OPTIONS: &[(&str, &str)] = &[
    ("PENDIENTE", "Pendiente"),
    ("PAGADA", "Pagada"),
    ("ANULADA", "Anulada"),
];

impl ListView for Client {
    const RESOURCE: Resource = Resource::Clientes;

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn title(&self) -> String {
        self.full_name()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::computed("nombre", "Nombre", |c: &Client| {
                Cell::link(c.full_name(), format!("/clientes/{}", c.id))
            }),
            Column::new("email", "Email"),
            Column::new("telefono", "Teléfono"),
        ]
    }

    fn filters() -> &'static [FilterField] {
        const FILTERS: &[FilterField] = &[
            FilterField::new("nombre", "Nombre", FilterKind::Text),
            FilterField::new("email", "Email", FilterKind::Text),
        ];
        FILTERS
    }

    fn sortable() -> &'static [&'static str] {
        &["nombre", "email"]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("nombre"))
    }
}

impl ListView for Invoice {
    const RESOURCE: Resource = Resource::Facturas;

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn title(&self) -> String {
        self.numero.clone()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::computed("numero", "Número", |i: &Invoice| {
                Cell::link(&i.numero, format!("/facturas/{}", i.id))
            }),
            Column::new("cliente.nombre", "Cliente"),
            Column::computed("fechaEmision", "Emisión", |i: &Invoice| {
                Cell::text(format_date(i.fecha_emision))
            }),
            Column::computed("total", "Total", |i: &Invoice| {
                if i.has_line_mismatch() {
                    Cell::badge(format_currency(i.total), "warning")
                } else {
                    Cell::text(format_currency(i.total))
                }
            }),
            Column::computed("estado", "Estado", |i: &Invoice| {
                Cell::badge(i.estado.label(), i.estado.badge())
            }),
        ]
    }

    fn filters() -> &'static [FilterField] {
        const FILTERS: &[FilterField] = &[
            FilterField::new("estado", "Estado", FilterKind::Select(INVOICE_STATUS_OPTIONS)),
            FilterField::new("numero", "Número", FilterKind::Text),
            FilterField::new("fechaDesde", "Desde", FilterKind::Date),
            FilterField::new("fechaHasta", "Hasta", FilterKind::Date),
        ];
        FILTERS
    }

    fn sortable() -> &'static [&'static str] {
        &["numero", "fechaEmision", "total"]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::desc("fechaEmision"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::listing::table::{RowView, Table};

    #[test]
    fn inconsistent_invoices_are_marked() {
        let invoices: Vec<Invoice> = serde_json::from_value(json!([{
            "id": 8,
            "numero": "F-0008",
            "cliente": {"id": 2, "nombre": "Ana"},
            "fechaEmision": "2024-03-02",
            "subtotal": 100.0,
            "total": 119.0,
            "estado": "PAGADA",
            "detalles": [{"descripcion": "Aceite", "cantidad": 1.0, "precioUnitario": 90.0}]
        }]))
        .unwrap();

        let view = Table::new(Invoice::columns()).render(&invoices);

        let RowView::Data { cells, .. } = &view.rows[0] else {
            panic!("expected a data row");
        };
        assert_eq!(cells[1].text, "Ana");
        assert_eq!(cells[2].text, "02/03/2024");
        assert_eq!(cells[3].text, "$ 119,00");
        assert_eq!(cells[3].badge.as_deref(), Some("warning"));
        assert_eq!(cells[4].text, "Pagada");
    }
}
