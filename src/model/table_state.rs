//! Table state and change notifications
//!
//! `TableState` is the widget's view of page, sort, search and filters.
//! Every user-driven change is described by a `TableChange` which is what
//! an external data provider receives.

use serde::Serialize;
use std::fmt;

/// Sort direction of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Active sort: column index and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortOrder {
    pub column: usize,
    pub direction: SortDirection,
}

/// Next sort after the user toggles sorting on `column`
///
/// A different column starts ascending. The same column goes asc → desc,
/// then either back to asc or, with `third_click_reset`, to unsorted.
pub fn next_sort(current: Option<SortOrder>, column: usize, third_click_reset: bool) -> Option<SortOrder> {
    match current {
        Some(SortOrder {
            column: c,
            direction,
        }) if c == column => match direction {
            SortDirection::Asc => Some(SortOrder {
                column,
                direction: SortDirection::Desc,
            }),
            SortDirection::Desc if third_click_reset => None,
            SortDirection::Desc => Some(SortOrder {
                column,
                direction: SortDirection::Asc,
            }),
        },
        _ => Some(SortOrder {
            column,
            direction: SortDirection::Asc,
        }),
    }
}

/// Page, sort, search and filter state of a table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    /// Current page, 0-based
    pub page: usize,
    pub rows_per_page: usize,
    pub sort: Option<SortOrder>,
    pub search_text: Option<String>,
    /// Filter values per column index; an empty list means no filter
    pub filters: Vec<Vec<String>>,
}

impl TableState {
    pub fn new(column_count: usize, page: usize, rows_per_page: usize) -> Self {
        Self {
            page,
            rows_per_page: rows_per_page.max(1),
            sort: None,
            search_text: None,
            filters: vec![Vec::new(); column_count],
        }
    }

    /// Search text when non-empty
    pub fn search(&self) -> Option<&str> {
        self.search_text.as_deref().filter(|s| !s.is_empty())
    }

    pub fn has_filters(&self) -> bool {
        self.filters.iter().any(|f| !f.is_empty())
    }

    /// Number of pages needed for `total` rows, never less than one
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.rows_per_page.max(1)).max(1)
    }

    /// Clamp the page so it addresses an existing page
    pub fn clamp_page(&mut self, total: usize) {
        self.page = self.page.min(self.page_count(total) - 1);
    }
}

/// Kind of user action that changed the table state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TableAction {
    ChangePage,
    ChangeRowsPerPage,
    Sort,
    Search,
    FilterChange,
    ResetFilters,
}

impl fmt::Display for TableAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableAction::ChangePage => "changePage",
            TableAction::ChangeRowsPerPage => "changeRowsPerPage",
            TableAction::Sort => "sort",
            TableAction::Search => "search",
            TableAction::FilterChange => "filterChange",
            TableAction::ResetFilters => "resetFilters",
        };
        write!(f, "{}", name)
    }
}

/// Description of a table state change, handed to the change hook
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableChange {
    pub action: TableAction,
    pub state: TableState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_cycle_with_third_click_reset() {
        let first = next_sort(None, 3, true);
        assert_eq!(
            first,
            Some(SortOrder {
                column: 3,
                direction: SortDirection::Asc
            })
        );
        let second = next_sort(first, 3, true);
        assert_eq!(second.map(|s| s.direction), Some(SortDirection::Desc));
        let third = next_sort(second, 3, true);
        assert_eq!(third, None);
    }

    #[test]
    fn test_sort_cycle_without_reset_alternates() {
        let first = next_sort(None, 0, false);
        let second = next_sort(first, 0, false);
        let third = next_sort(second, 0, false);
        assert_eq!(third.map(|s| s.direction), Some(SortDirection::Asc));
    }

    #[test]
    fn test_sorting_other_column_starts_ascending() {
        let current = Some(SortOrder {
            column: 2,
            direction: SortDirection::Desc,
        });
        assert_eq!(
            next_sort(current, 5, true),
            Some(SortOrder {
                column: 5,
                direction: SortDirection::Asc
            })
        );
    }

    #[test]
    fn test_page_count_and_clamp() {
        let mut state = TableState::new(12, 7, 10);
        assert_eq!(state.page_count(0), 1);
        assert_eq!(state.page_count(10), 1);
        assert_eq!(state.page_count(11), 2);
        state.clamp_page(25);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_rows_per_page_is_at_least_one() {
        let state = TableState::new(12, 0, 0);
        assert_eq!(state.rows_per_page, 1);
    }

    #[test]
    fn test_empty_search_is_none() {
        let mut state = TableState::new(2, 0, 10);
        state.search_text = Some(String::new());
        assert_eq!(state.search(), None);
        state.search_text = Some("ngc".to_string());
        assert_eq!(state.search(), Some("ngc"));
    }

    #[test]
    fn test_change_serializes_with_camel_case_keys() {
        let change = TableChange {
            action: TableAction::ChangeRowsPerPage,
            state: TableState::new(1, 0, 25),
        };
        let json = serde_json::to_value(&change).expect("serializable");
        assert_eq!(json["action"], "changeRowsPerPage");
        assert_eq!(json["state"]["rowsPerPage"], 25);
        assert_eq!(json["state"]["searchText"], serde_json::Value::Null);
    }
}
