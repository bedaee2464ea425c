//! Plain-text table rendering from column descriptors.
//!
//! A [`Column`] names a field, a header and an accessor producing the cell
//! text; the renderer pads and aligns. Selection mode prefixes a 1-based row
//! index so multi-select prompts can reference rows. Sorting itself lives in
//! the list state; the renderer only marks the sorted column.

use crate::resource::SortDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// One column of a table: field key, header, cell accessor.
pub struct Column<T> {
    pub key: &'static str,
    pub header: &'static str,
    pub accessor: fn(&T) -> String,
    pub align: Align,
    pub sortable: bool,
}

impl<T> Column<T> {
    pub fn new(key: &'static str, header: &'static str, accessor: fn(&T) -> String) -> Self {
        Self {
            key,
            header,
            accessor,
            align: Align::Left,
            sortable: false,
        }
    }

    pub fn right_aligned(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// Header suffix marking the sort state of a column.
pub fn sort_indicator(current: Option<(&str, SortDir)>, key: &str, sortable: bool) -> &'static str {
    if !sortable {
        return "";
    }
    match current {
        Some((field, SortDir::Asc)) if field == key => " ^",
        Some((field, SortDir::Desc)) if field == key => " v",
        _ => " *",
    }
}

pub struct Table<'a, T> {
    columns: &'a [Column<T>],
    empty_message: &'a str,
    selectable: bool,
    sort: Option<(&'a str, SortDir)>,
}

impl<'a, T> Table<'a, T> {
    pub fn new(columns: &'a [Column<T>]) -> Self {
        Self {
            columns,
            empty_message: "No hay registros.",
            selectable: false,
            sort: None,
        }
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    /// Prefix rows with a 1-based index column for selection prompts.
    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    pub fn sorted_by(mut self, sort: Option<(&'a str, SortDir)>) -> Self {
        self.sort = sort;
        self
    }

    pub fn render(&self, items: &[T]) -> String {
        if items.is_empty() {
            return format!("{}\n", self.empty_message);
        }

        let mut headers: Vec<String> = Vec::new();
        if self.selectable {
            headers.push("#".to_string());
        }
        for column in self.columns {
            headers.push(format!(
                "{}{}",
                column.header,
                sort_indicator(self.sort, column.key, column.sortable)
            ));
        }

        let mut rows: Vec<Vec<String>> = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let mut row = Vec::new();
            if self.selectable {
                row.push((index + 1).to_string());
            }
            for column in self.columns {
                row.push((column.accessor)(item));
            }
            rows.push(row);
        }

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let aligns: Vec<Align> = {
            let mut aligns = Vec::new();
            if self.selectable {
                aligns.push(Align::Right);
            }
            aligns.extend(self.columns.iter().map(|c| c.align));
            aligns
        };

        let render_row = |cells: &[String]| -> String {
            let parts: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let pad = widths[i].saturating_sub(cell.chars().count());
                    match aligns[i] {
                        Align::Left => format!("{}{}", cell, " ".repeat(pad)),
                        Align::Right => format!("{}{}", " ".repeat(pad), cell),
                    }
                })
                .collect();
            parts.join("  ").trim_end().to_string()
        };

        let mut out = String::new();
        out.push_str(&render_row(&headers));
        out.push('\n');
        let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
        out.push_str(&"-".repeat(rule_len));
        out.push('\n');
        for row in &rows {
            out.push_str(&render_row(row));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn columns() -> Vec<Column<Value>> {
        vec![
            Column::new("nombre", "Nombre", |v: &Value| {
                v["nombre"].as_str().unwrap_or("").to_string()
            })
            .sortable(),
            Column::new("cupo_maximo", "Cupo", |v: &Value| {
                v["cupo_maximo"].to_string()
            })
            .right_aligned(),
        ]
    }

    #[test]
    fn test_empty_state_renders_message_only() {
        let cols = columns();
        let table = Table::new(&cols).empty_message("No hay grupos registrados.");
        let out = table.render(&[]);
        assert_eq!(out, "No hay grupos registrados.\n");
        assert!(!out.contains("Nombre"));
    }

    #[test]
    fn test_rows_are_aligned() {
        let cols = columns();
        let items = vec![
            json!({"nombre": "10A", "cupo_maximo": 40}),
            json!({"nombre": "Aceleración", "cupo_maximo": 8}),
        ];
        let out = Table::new(&cols).render(&items);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Nombre"));
        // Right-aligned numeric column
        assert!(lines[2].ends_with("40"));
        assert!(lines[3].ends_with(" 8"));
    }

    #[test]
    fn test_selection_mode_adds_index_column() {
        let cols = columns();
        let items = vec![json!({"nombre": "10A", "cupo_maximo": 40})];
        let out = Table::new(&cols).selectable().render(&items);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("#"));
        assert!(lines[2].starts_with("1"));
    }

    #[test]
    fn test_sort_indicator_marks_active_column() {
        assert_eq!(sort_indicator(Some(("nombre", SortDir::Asc)), "nombre", true), " ^");
        assert_eq!(sort_indicator(Some(("nombre", SortDir::Desc)), "nombre", true), " v");
        assert_eq!(sort_indicator(Some(("otro", SortDir::Asc)), "nombre", true), " *");
        assert_eq!(sort_indicator(None, "nombre", false), "");
    }
}
