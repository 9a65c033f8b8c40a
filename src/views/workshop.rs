//! Workshops, their staff and their catalog.

use crate::domain::catalog::{Product, Service};
use crate::domain::resource::Resource;
use crate::domain::workshop::{Worker, Workshop};
use crate::listing::filters::{FilterField, FilterKind};
use crate::listing::query::SortSpec;
use crate::listing::table::{Cell, Column};
use crate::views::format::format_currency;
use crate::views::{ACTIVE_OPTIONS, ListView};

fn active_cell(active: bool) -> Cell {
    if active {
        Cell::badge("Activo", "success")
    } else {
        Cell::badge("Inactivo", "secondary")
    }
}

impl ListView for Workshop {
    const RESOURCE: Resource = Resource::Talleres;

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn title(&self) -> String {
        self.nombre.clone()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::computed("nombre", "Nombre", |w: &Workshop| {
                Cell::link(&w.nombre, format!("/talleres/{}", w.id))
            }),
            Column::new("direccion", "Dirección"),
            Column::new("telefono", "Teléfono"),
            Column::new("email", "Email"),
            Column::computed("activo", "Estado", |w: &Workshop| active_cell(w.activo)),
        ]
    }

    fn filters() -> &'static [FilterField] {
        const FILTERS: &[FilterField] = &[
            FilterField::new("nombre", "Nombre", FilterKind::Text),
            FilterField::new("activo", "Estado", FilterKind::Select(ACTIVE_OPTIONS)),
        ];
        FILTERS
    }

    fn sortable() -> &'static [&'static str] {
        &["nombre"]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("nombre"))
    }
}

impl ListView for Worker {
    const RESOURCE: Resource = Resource::Trabajadores;

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn title(&self) -> String {
        match self.apellido.as_deref() {
            Some(apellido) if !apellido.is_empty() => format!("{} {apellido}", self.nombre),
            _ => self.nombre.clone(),
        }
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::computed("nombre", "Nombre", |w: &Worker| {
                Cell::link(w.title(), format!("/trabajadores/{}", w.id))
            }),
            Column::new("especialidad", "Especialidad"),
            Column::computed("activo", "Estado", |w: &Worker| active_cell(w.activo)),
        ]
    }

    fn filters() -> &'static [FilterField] {
        const FILTERS: &[FilterField] = &[
            FilterField::new("nombre", "Nombre", FilterKind::Text),
            FilterField::new("especialidad", "Especialidad", FilterKind::Text),
        ];
        FILTERS
    }

    fn sortable() -> &'static [&'static str] {
        &["nombre", "especialidad"]
    }
}

impl ListView for Product {
    const RESOURCE: Resource = Resource::Productos;

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn title(&self) -> String {
        self.nombre.clone()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::computed("nombre", "Producto", |p: &Product| {
                Cell::link(&p.nombre, format!("/productos/{}", p.id))
            }),
            Column::computed("precio", "Precio", |p: &Product| {
                Cell::text(format_currency(p.precio))
            }),
            Column::computed("stock", "Stock", |p: &Product| {
                if p.is_low_stock() {
                    Cell::badge(p.stock.to_string(), "danger")
                } else {
                    Cell::text(p.stock.to_string())
                }
            }),
            Column::new("stockMinimo", "Mínimo"),
        ]
    }

    fn filters() -> &'static [FilterField] {
        const FILTERS: &[FilterField] = &[
            FilterField::new("nombre", "Nombre", FilterKind::Text),
            FilterField::new("precioMax", "Precio máximo", FilterKind::Number),
        ];
        FILTERS
    }

    fn sortable() -> &'static [&'static str] {
        &["nombre", "precio", "stock"]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("nombre"))
    }
}

impl ListView for Service {
    const RESOURCE: Resource = Resource::Servicios;

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn title(&self) -> String {
        self.nombre.clone()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::computed("nombre", "Servicio", |s: &Service| {
                Cell::link(&s.nombre, format!("/servicios/{}", s.id))
            }),
            Column::new("descripcion", "Descripción"),
            Column::computed("precio", "Precio", |s: &Service| {
                Cell::text(format_currency(s.precio))
            }),
            Column::computed("duracionEstimada", "Duración", |s: &Service| {
                Cell::text(
                    s.duracion_estimada
                        .map(|minutes| format!("{minutes} min"))
                        .unwrap_or_default(),
                )
            }),
        ]
    }

    fn filters() -> &'static [FilterField] {
        const FILTERS: &[FilterField] = &[FilterField::new("nombre", "Nombre", FilterKind::Text)];
        FILTERS
    }

    fn sortable() -> &'static [&'static str] {
        &["nombre", "precio"]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::listing::table::{RowView, Table};

    #[test]
    fn low_stock_is_highlighted() {
        let products: Vec<Product> = serde_json::from_value(json!([
            {"id": 1, "nombre": "Filtro", "precio": 1250.0, "stock": 2, "stockMinimo": 5},
            {"id": 2, "nombre": "Bujía", "precio": 300.0, "stock": 40, "stockMinimo": 5}
        ]))
        .unwrap();

        let view = Table::new(Product::columns()).render(&products);

        let badges: Vec<Option<String>> = view
            .rows
            .iter()
            .map(|row| match row {
                RowView::Data { cells, .. } => cells[2].badge.clone(),
                RowView::Empty { .. } => panic!("expected data rows"),
            })
            .collect();
        assert_eq!(badges, vec![Some("danger".to_string()), None]);
    }

    #[test]
    fn worker_title_joins_surname() {
        let worker: Worker = serde_json::from_value(json!({
            "id": 3, "nombre": "Luis", "apellido": "Pérez"
        }))
        .unwrap();
        assert_eq!(worker.title(), "Luis Pérez");
        assert!(worker.activo);
    }
}
