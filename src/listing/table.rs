//! Generic presentation table.
//!
//! A column either reads `row[key]` from the row's serialized form (dotted
//! keys reach nested objects) or calls its own renderer. Row actions are
//! opaque to the table: it only adds an actions column when a renderer is
//! supplied.

use serde::Serialize;
use serde_json::Value;

use crate::listing::pagination::PaginationFooter;

pub const NO_RESULTS: &str = "Sin resultados";

/// One rendered cell.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    /// Bootstrap contextual class; the cell renders as a badge when set.
    pub badge: Option<String>,
    pub href: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn badge(text: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            badge: Some(class.into()),
            href: None,
        }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            badge: None,
            href: Some(href.into()),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionMethod {
    Get,
    Post,
}

/// A per-row action produced by the caller's action renderer.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RowAction {
    pub label: String,
    pub href: String,
    pub method: ActionMethod,
    pub style: String,
    /// Confirmation prompt shown before submitting.
    pub confirm: Option<String>,
}

impl RowAction {
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            method: ActionMethod::Get,
            style: "outline-primary".to_string(),
            confirm: None,
        }
    }

    pub fn post(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            method: ActionMethod::Post,
            ..Self::link(label, href)
        }
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn confirm(mut self, prompt: impl Into<String>) -> Self {
        self.confirm = Some(prompt.into());
        self
    }
}

type CellRenderer<T> = Box<dyn Fn(&T) -> Cell>;
type ActionRenderer<'a, T> = Box<dyn Fn(&T) -> Vec<RowAction> + 'a>;

pub struct Column<T> {
    pub key: &'static str,
    pub header: &'static str,
    render: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    /// Column reading `row[key]` directly.
    pub fn new(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            render: None,
        }
    }

    /// Column computed from the whole row.
    pub fn computed<F>(key: &'static str, header: &'static str, render: F) -> Self
    where
        F: Fn(&T) -> Cell + 'static,
    {
        Self {
            key,
            header,
            render: Some(Box::new(render)),
        }
    }
}

impl<T: Serialize> Column<T> {
    fn cell(&self, row: &T, serialized: &Value) -> Cell {
        match &self.render {
            Some(render) => render(row),
            None => Cell::text(display_value(lookup(serialized, self.key))),
        }
    }
}

/// Resolves a dotted key such as `cliente.nombre`.
fn lookup<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    key.split('.').try_fold(value, |current, part| current.get(part))
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(true)) => "Sí".to_string(),
        Some(Value::Bool(false)) => "No".to_string(),
        Some(other) => other.to_string(),
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RowView {
    Data {
        cells: Vec<Cell>,
        actions: Vec<RowAction>,
    },
    Empty {
        colspan: usize,
        message: String,
    },
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HeaderView {
    pub key: String,
    pub title: String,
    /// Link that sorts by this column, when sortable.
    pub sort_href: Option<String>,
    /// `asc`/`desc` when the list is currently sorted by this column.
    pub sorted: Option<String>,
}

/// Template-ready table.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<HeaderView>,
    pub has_actions: bool,
    pub rows: Vec<RowView>,
    pub footer: Option<PaginationFooter>,
}

pub struct Table<'a, T> {
    columns: Vec<Column<T>>,
    actions: Option<ActionRenderer<'a, T>>,
    empty_message: String,
}

impl<'a, T: Serialize> Table<'a, T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            actions: None,
            empty_message: NO_RESULTS.to_string(),
        }
    }

    pub fn actions<F>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> Vec<RowAction> + 'a,
    {
        self.actions = Some(Box::new(render));
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn column_count(&self) -> usize {
        self.columns.len() + usize::from(self.actions.is_some())
    }

    /// Renders headers and rows. An empty `rows` yields exactly one
    /// [`RowView::Empty`] spanning every column.
    pub fn render(&self, rows: &[T]) -> TableView {
        let headers = self
            .columns
            .iter()
            .map(|column| HeaderView {
                key: column.key.to_string(),
                title: column.header.to_string(),
                sort_href: None,
                sorted: None,
            })
            .collect();

        let rows = if rows.is_empty() {
            vec![RowView::Empty {
                colspan: self.column_count(),
                message: self.empty_message.clone(),
            }]
        } else {
            rows.iter().map(|row| self.render_row(row)).collect()
        };

        TableView {
            headers,
            has_actions: self.actions.is_some(),
            rows,
            footer: None,
        }
    }

    fn render_row(&self, row: &T) -> RowView {
        let serialized = serde_json::to_value(row).unwrap_or_else(|err| {
            log::error!("Failed to serialize table row: {err}");
            Value::Null
        });

        RowView::Data {
            cells: self
                .columns
                .iter()
                .map(|column| column.cell(row, &serialized))
                .collect(),
            actions: self
                .actions
                .as_ref()
                .map(|render| render(row))
                .unwrap_or_default(),
        }
    }
}

impl TableView {
    pub fn footer(mut self, footer: Option<PaginationFooter>) -> Self {
        self.footer = footer;
        self
    }

    /// Attaches sort links to the headers listed in `sortable`.
    pub fn sortable<F>(mut self, sortable: &[&str], current: Option<(&str, &str)>, href: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        for header in &mut self.headers {
            if sortable.contains(&header.key.as_str()) {
                header.sort_href = Some(href(&header.key));
                header.sorted = current
                    .filter(|(field, _)| *field == header.key)
                    .map(|(_, direction)| direction.to_string());
            }
        }
        self
    }

    pub fn data_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, RowView::Data { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: u32,
        placa: &'static str,
        cliente: Option<Owner>,
        activo: bool,
    }

    #[derive(Serialize)]
    struct Owner {
        nombre: &'static str,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: 1,
                placa: "ABC123",
                cliente: Some(Owner { nombre: "Ana" }),
                activo: true,
            },
            Row {
                id: 2,
                placa: "XYZ987",
                cliente: None,
                activo: false,
            },
        ]
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("placa", "Placa"),
            Column::new("cliente.nombre", "Cliente"),
            Column::new("activo", "Activo"),
            Column::computed("estado", "Estado", |row: &Row| {
                Cell::badge(format!("#{}", row.id), "info")
            }),
        ]
    }

    fn texts(row: &RowView) -> Vec<String> {
        match row {
            RowView::Data { cells, .. } => cells.iter().map(|cell| cell.text.clone()).collect(),
            RowView::Empty { .. } => panic!("unexpected empty row"),
        }
    }

    #[test]
    fn cells_read_keys_and_renderers() {
        let view = Table::new(columns()).render(&rows());

        assert_eq!(view.data_rows(), 2);
        assert_eq!(texts(&view.rows[0]), vec!["ABC123", "Ana", "Sí", "#1"]);
        assert_eq!(texts(&view.rows[1]), vec!["XYZ987", "", "No", "#2"]);
    }

    #[test]
    fn empty_rows_render_a_single_spanning_row() {
        let view = Table::new(columns()).render(&[]);

        assert_eq!(
            view.rows,
            vec![RowView::Empty {
                colspan: 4,
                message: NO_RESULTS.to_string()
            }]
        );
        assert_eq!(view.data_rows(), 0);
    }

    #[test]
    fn actions_column_only_when_renderer_supplied() {
        let plain = Table::new(columns()).render(&rows());
        assert!(!plain.has_actions);

        let with_actions = Table::new(columns())
            .actions(|row: &Row| vec![RowAction::link("Ver", format!("/vehiculos/{}", row.id))])
            .render(&rows());
        assert!(with_actions.has_actions);
        match &with_actions.rows[1] {
            RowView::Data { actions, .. } => assert_eq!(actions[0].href, "/vehiculos/2"),
            RowView::Empty { .. } => panic!("unexpected empty row"),
        }

        let empty = Table::new(columns())
            .actions(|_: &Row| Vec::new())
            .render(&[]);
        assert!(matches!(empty.rows[0], RowView::Empty { colspan: 5, .. }));
    }

    #[test]
    fn sortable_headers_get_links() {
        let view = Table::new(columns()).render(&rows()).sortable(
            &["placa"],
            Some(("placa", "desc")),
            |key| format!("?sort={key},asc"),
        );

        assert_eq!(view.headers[0].sort_href.as_deref(), Some("?sort=placa,asc"));
        assert_eq!(view.headers[0].sorted.as_deref(), Some("desc"));
        assert!(view.headers[1].sort_href.is_none());
    }

    #[test]
    fn rows_serialize_with_kind_tag() {
        let view = Table::new(columns()).render(&[]);
        let encoded = serde_json::to_value(&view.rows[0]).unwrap();
        assert_eq!(
            encoded,
            json!({"kind": "empty", "colspan": 4, "message": NO_RESULTS})
        );
    }
}
