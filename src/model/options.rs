//! Options handed to the data table widget

/// Page-size choices offered by the rows-per-page picker
pub const ROWS_PER_PAGE_OPTIONS: [usize; 5] = [2, 10, 25, 50, 100];

/// Widget-level options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Whether the search box is available
    pub search: bool,
    /// Whether rows can be selected with a cursor
    pub selectable_rows: bool,
    /// Border weight; 0 draws a flat border
    pub elevation: u8,
    /// Current page, 0-based
    pub page: usize,
    pub rows_per_page: usize,
    pub rows_per_page_options: Vec<usize>,
    pub jump_to_page: bool,
    /// Rows are already paged, sorted and searched by the data provider
    pub server_side: bool,
    pub pagination: bool,
    /// Total row count across all pages (server side)
    pub count: usize,
}
