//! Vehicles, maintenance records and alerts.

use crate::domain::alert::Alert;
use crate::domain::maintenance::{Maintenance, MaintenanceStatus};
use crate::domain::resource::Resource;
use crate::domain::vehicle::Vehicle;
use crate::listing::filters::{FilterField, FilterKind};
use crate::listing::query::SortSpec;
use crate::listing::table::{Cell, Column};
use crate::views::ListView;
use crate::views::format::{format_datetime, format_km};

pub const MAINTENANCE_STATUS_OPTIONS: &[(&str, &str)] = &[
    ("SOLICITADO", "Solicitado"),
    ("PENDIENTE", "Pendiente"),
    ("EN_PROCESO", "En proceso"),
    ("COMPLETADO", "Completado"),
    ("CANCELADO", "Cancelado"),
];

pub const ALERT_LEVEL_OPTIONS: &[(&str, &str)] = &[
    ("INFO", "Información"),
    ("ADVERTENCIA", "Advertencia"),
    ("CRITICA", "Crítica"),
];

const READ_OPTIONS: &[(&str, &str)] = &[("false", "No leídas"), ("true", "Leídas")];

impl ListView for Vehicle {
    const RESOURCE: Resource = Resource::Vehiculos;

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn title(&self) -> String {
        self.label()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::computed("placa", "Placa", |v: &Vehicle| {
                Cell::link(v.placa.as_str(), format!("/vehiculos/{}", v.id))
            }),
            Column::new("marca", "Marca"),
            Column::new("modelo", "Modelo"),
            Column::new("anio", "Año"),
            Column::new("cliente.nombre", "Cliente"),
            Column::computed("kilometraje", "Kilometraje", |v: &Vehicle| {
                Cell::text(format_km(v.kilometraje))
            }),
        ]
    }

    fn filters() -> &'static [FilterField] {
        const FILTERS: &[FilterField] = &[
            FilterField::new("placa", "Placa", FilterKind::Text),
            FilterField::new("marca", "Marca", FilterKind::Text),
            FilterField::new("anio", "Año", FilterKind::Number),
        ];
        FILTERS
    }

    fn sortable() -> &'static [&'static str] {
        &["placa", "marca", "anio", "kilometraje"]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("placa"))
    }
}

/// Badge cell for a maintenance status.
pub fn status_cell(status: MaintenanceStatus) -> Cell {
    Cell::badge(status.label(), status.badge())
}

impl ListView for Maintenance {
    const RESOURCE: Resource = Resource::Mantenimientos;

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn title(&self) -> String {
        match self.vehiculo.as_ref().and_then(|v| v.placa.as_deref()) {
            Some(placa) => format!("#{} · {placa}", self.id),
            None => format!("#{}", self.id),
        }
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::computed("id", "#", |m: &Maintenance| {
                Cell::link(m.id.to_string(), format!("/mantenimientos/{}", m.id))
            }),
            Column::new("vehiculo.placa", "Vehículo"),
            Column::new("descripcion", "Descripción"),
            Column::computed("estado", "Estado", |m: &Maintenance| status_cell(m.estado)),
            Column::new("trabajador.nombre", "Responsable"),
            Column::computed("fechaCreacion", "Solicitado", |m: &Maintenance| {
                Cell::text(format_datetime(m.fecha_creacion))
            }),
        ]
    }

    fn filters() -> &'static [FilterField] {
        const FILTERS: &[FilterField] = &[
            FilterField::new(
                "estado",
                "Estado",
                FilterKind::Select(MAINTENANCE_STATUS_OPTIONS),
            ),
            FilterField::new("placa", "Placa", FilterKind::Text),
            FilterField::new("fechaDesde", "Desde", FilterKind::Date),
            FilterField::new("fechaHasta", "Hasta", FilterKind::Date),
        ];
        FILTERS
    }

    fn sortable() -> &'static [&'static str] {
        &["id", "estado", "fechaCreacion"]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::desc("fechaCreacion"))
    }
}

impl ListView for Alert {
    const RESOURCE: Resource = Resource::Alertas;

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn title(&self) -> String {
        self.titulo.clone()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("titulo", "Título"),
            Column::new("mensaje", "Mensaje"),
            Column::computed("nivel", "Nivel", |a: &Alert| {
                Cell::badge(a.nivel.label(), a.nivel.badge())
            }),
            Column::computed("leida", "Estado", |a: &Alert| {
                if a.leida {
                    Cell::badge("Leída", "light")
                } else {
                    Cell::badge("Nueva", "primary")
                }
            }),
            Column::computed("fechaCreacion", "Fecha", |a: &Alert| {
                Cell::text(format_datetime(a.fecha_creacion))
            }),
        ]
    }

    fn filters() -> &'static [FilterField] {
        const FILTERS: &[FilterField] = &[
            FilterField::new("nivel", "Nivel", FilterKind::Select(ALERT_LEVEL_OPTIONS)),
            FilterField::new("leida", "Lectura", FilterKind::Select(READ_OPTIONS)),
        ];
        FILTERS
    }

    fn sortable() -> &'static [&'static str] {
        &["nivel", "fechaCreacion"]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::desc("fechaCreacion"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::listing::table::{RowView, Table};

    #[test]
    fn maintenance_rows_render_badges_and_nested_fields() {
        let record: Maintenance = serde_json::from_value(json!({
            "id": 12,
            "vehiculo": {"id": 4, "placa": "ABC123"},
            "descripcion": "Frenos",
            "estado": "EN_PROCESO",
            "fechaCreacion": "2024-05-01T08:30:00"
        }))
        .unwrap();

        let view = Table::new(Maintenance::columns()).render(&[record]);

        let RowView::Data { cells, .. } = &view.rows[0] else {
            panic!("expected a data row");
        };
        assert_eq!(cells[0].href.as_deref(), Some("/mantenimientos/12"));
        assert_eq!(cells[1].text, "ABC123");
        assert_eq!(cells[3].text, "En proceso");
        assert_eq!(cells[3].badge.as_deref(), Some("primary"));
        assert_eq!(cells[4].text, "");
        assert_eq!(cells[5].text, "01/05/2024 08:30");
    }

    #[test]
    fn status_options_cover_every_status() {
        for status in MaintenanceStatus::ALL {
            assert!(
                MAINTENANCE_STATUS_OPTIONS
                    .iter()
                    .any(|(code, label)| *code == status.code() && *label == status.label())
            );
        }
    }

    #[test]
    fn sortable_keys_are_columns() {
        let keys: Vec<&str> = Vehicle::columns().iter().map(|c| c.key).collect();
        for key in Vehicle::sortable() {
            assert!(keys.contains(key));
        }
    }
}
