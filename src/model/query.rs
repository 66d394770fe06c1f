//! Search, filter, sort and page selection over table rows
//!
//! Used by the widget in client-side mode and by the catalog when it serves
//! pages, so both sides agree on what a given `TableState` selects.

use super::column::ColumnDef;
use super::table_state::{SortDirection, TableState};

/// Indices of the rows matching search and filters, in sorted order
pub fn matching_rows<R>(rows: &[R], columns: &[ColumnDef<R>], state: &TableState) -> Vec<usize> {
    let needle = state.search().map(str::to_lowercase);

    let mut indices: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| passes_filters(*row, columns, &state.filters))
        .filter(|(_, row)| match &needle {
            Some(needle) => matches_search(*row, columns, needle),
            None => true,
        })
        .map(|(i, _)| i)
        .collect();

    if let Some(sort) = state.sort {
        if let Some(column) = columns.get(sort.column) {
            // Stable sort keeps provider order among equal keys
            indices.sort_by(|&a, &b| {
                let ord = (column.value)(&rows[a]).sort_cmp(&(column.value)(&rows[b]));
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
    }

    indices
}

/// The slice of `indices` that falls on the state's page
pub fn page_slice<'a>(indices: &'a [usize], state: &TableState) -> &'a [usize] {
    let per_page = state.rows_per_page.max(1);
    let start = state.page.saturating_mul(per_page).min(indices.len());
    let end = start.saturating_add(per_page).min(indices.len());
    &indices[start..end]
}

fn matches_search<R>(row: &R, columns: &[ColumnDef<R>], needle: &str) -> bool {
    columns
        .iter()
        .filter(|c| c.options.searchable)
        .any(|c| c.display(row).to_lowercase().contains(needle))
}

fn passes_filters<R>(row: &R, columns: &[ColumnDef<R>], filters: &[Vec<String>]) -> bool {
    columns
        .iter()
        .zip(filters)
        .filter(|(_, values)| !values.is_empty())
        .all(|(column, values)| {
            let shown = column.display(row);
            values.iter().any(|v| *v == shown)
        })
}
