//! Drops spreadsheet section headers and blank rows.

use tracing::info;

use crate::columns::ColumnMap;
use crate::table::{Cell, Table};

pub fn is_blank(cell: &Cell) -> bool {
    cell.as_deref().is_none_or(|s| s.trim().is_empty())
}

/// Rows that survived plus a count of what was dropped.
#[derive(Debug, Default)]
pub struct Filtered {
    pub rows: Vec<Vec<Cell>>,
    pub dropped: usize,
}

/// Keeps rows with at least one non-blank identifier. With no identifier
/// columns in the export, every row is kept.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn filter_device_rows(table: Table, columns: &ColumnMap) -> Filtered {
    let identifiers = columns.identifier_indices();
    let before = table.len();

    let rows: Vec<_> = if identifiers.is_empty() {
        table.rows
    } else {
        table
            .rows
            .into_iter()
            .filter(|row| identifiers.iter().any(|&i| !is_blank(&row[i])))
            .collect()
    };

    let dropped = before - rows.len();
    info!(dropped, kept = rows.len(), "Filtered out non-unit header rows");
    Filtered { rows, dropped }
}
