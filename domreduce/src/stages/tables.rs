//! Table stages
//!
//! - tables-to-text: native `<table>` → pipe grid in `<pre data-table="1">`
//! - css-tables-to-text: `display: table` layouts → pipe grid in `<pre data-csstable="1">`
//! - drop-large-table-row-ids: strip `id` noise from rows of large tables
//!
//! Rows belong to their nearest enclosing table, so a nested table never leaks its
//! rows into the outer grid. A nested table's text still shows up in the outer cell
//! that contains it.

use crate::dom::{style, Document, NodeId};
use crate::options::{HeaderSeparator, ReducerOptions};
use crate::stage::Stage;
use crate::stages::replace_with_text_block;
use tracing::debug;

/// Render rows as a pipe-delimited grid.
///
/// Rows are padded with empty cells to the widest row. With `header`, a `| --- |`
/// separator follows the first row. Returns `None` when there is nothing to render.
pub fn render_grid(rows: &[Vec<String>], header: bool) -> Option<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return None;
    }

    let line = |cells: &[String]| {
        let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
        padded.resize(columns, "");
        format!("| {} |", padded.join(" | "))
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (index, row) in rows.iter().enumerate() {
        lines.push(line(row));
        if index == 0 && header {
            lines.push(format!("| {} |", vec!["---"; columns].join(" | ")));
        }
    }
    Some(lines.join("\n"))
}

/// `tr` elements whose nearest enclosing table is `table`
fn owned_rows(doc: &Document, table: NodeId) -> Vec<NodeId> {
    doc.descendants_by_tag(table, &["tr"])
        .into_iter()
        .filter(|tr| doc.closest_ancestor(*tr, &["table"]) == Some(table))
        .collect()
}

fn has_style(doc: &Document, id: NodeId, test: fn(&str) -> bool) -> bool {
    doc.attr(id, "style").is_some_and(test)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TablesToText {
    pub header_separator: HeaderSeparator,
}

impl TablesToText {
    pub fn new(header_separator: HeaderSeparator) -> Self {
        TablesToText { header_separator }
    }

    fn has_marked_header(doc: &Document, first_row: NodeId) -> bool {
        doc.element_children(first_row)
            .any(|cell| doc.has_tag(cell, &["th"]))
            || doc
                .closest_ancestor(first_row, &["thead", "table"])
                .is_some_and(|section| doc.has_tag(section, &["thead"]))
    }
}

impl Stage for TablesToText {
    fn name(&self) -> &str {
        "tables-to-text"
    }

    fn description(&self) -> &str {
        "Replace <table> elements with a pipe-delimited text grid"
    }

    fn aliases(&self) -> &[&str] {
        &["preserve_tables_as_markdown"]
    }

    fn apply(&self, doc: &mut Document) {
        let mut converted = 0;
        for table in doc.elements_by_tag(&["table"]) {
            if !doc.is_attached(table) {
                continue;
            }
            let rows = owned_rows(doc, table);
            let Some(&first) = rows.first() else {
                continue;
            };
            let data: Vec<Vec<String>> = rows
                .iter()
                .map(|tr| {
                    doc.element_children(*tr)
                        .filter(|cell| doc.has_tag(*cell, &["th", "td"]))
                        .map(|cell| doc.normalized_text(cell))
                        .collect::<Vec<_>>()
                })
                .collect();
            let header = match self.header_separator {
                HeaderSeparator::Always => true,
                HeaderSeparator::Marked => Self::has_marked_header(doc, first),
            };
            if let Some(grid) = render_grid(&data, header) {
                replace_with_text_block(doc, table, "data-table", &grid);
                converted += 1;
            }
        }
        debug!(converted, "converted tables to text");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CssTablesToText {
    pub header_separator: HeaderSeparator,
}

impl CssTablesToText {
    pub fn new(header_separator: HeaderSeparator) -> Self {
        CssTablesToText { header_separator }
    }
}

impl Stage for CssTablesToText {
    fn name(&self) -> &str {
        "css-tables-to-text"
    }

    fn description(&self) -> &str {
        "Replace display:table layouts with a pipe-delimited text grid"
    }

    fn aliases(&self) -> &[&str] {
        &["preserve_css_tables_as_markdown"]
    }

    fn apply(&self, doc: &mut Document) {
        let is_table = |doc: &Document, id: NodeId| has_style(doc, id, style::is_display_table);

        let mut converted = 0;
        for table in doc.elements() {
            if !is_table(doc, table) || !doc.is_attached(table) {
                continue;
            }
            let rows: Vec<NodeId> = doc
                .descendants(table)
                .into_iter()
                .filter(|row| has_style(doc, *row, style::is_display_table_row))
                .filter(|row| doc.ancestors(*row).find(|a| is_table(doc, *a)) == Some(table))
                .collect();
            if rows.is_empty() {
                continue;
            }
            let cells_of = |row: NodeId| -> Vec<NodeId> {
                doc.element_children(row)
                    .filter(|cell| has_style(doc, *cell, style::is_display_table_cell))
                    .collect()
            };
            let data: Vec<Vec<String>> = rows
                .iter()
                .map(|row| {
                    cells_of(*row)
                        .into_iter()
                        .map(|cell| doc.normalized_text(cell))
                        .collect::<Vec<_>>()
                })
                .collect();
            let header = match self.header_separator {
                HeaderSeparator::Always => true,
                HeaderSeparator::Marked => cells_of(rows[0])
                    .into_iter()
                    .any(|cell| doc.has_tag(cell, &["th"])),
            };
            if let Some(grid) = render_grid(&data, header) {
                replace_with_text_block(doc, table, "data-csstable", &grid);
                converted += 1;
            }
        }
        debug!(converted, "converted css tables to text");
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DropLargeTableRowIds {
    /// Tables with more rows than this lose their row ids
    pub max_rows: usize,
}

impl DropLargeTableRowIds {
    pub fn new(max_rows: usize) -> Self {
        DropLargeTableRowIds { max_rows }
    }
}

impl Default for DropLargeTableRowIds {
    fn default() -> Self {
        Self::new(ReducerOptions::default().large_table_rows)
    }
}

impl Stage for DropLargeTableRowIds {
    fn name(&self) -> &str {
        "drop-large-table-row-ids"
    }

    fn description(&self) -> &str {
        "Remove id attributes from the rows (and their contents) of large tables"
    }

    fn aliases(&self) -> &[&str] {
        &["drop_row_ids_inside_large_tables"]
    }

    fn apply(&self, doc: &mut Document) {
        let mut dropped = 0;
        for table in doc.elements_by_tag(&["table"]) {
            let rows = owned_rows(doc, table);
            if rows.len() <= self.max_rows {
                continue;
            }
            for row in rows {
                let mut targets = doc.descendants(row);
                targets.push(row);
                for id in targets {
                    if doc.remove_attr(id, "id").is_some() {
                        dropped += 1;
                    }
                }
            }
        }
        debug!(dropped, "dropped row ids in large tables");
    }
}
