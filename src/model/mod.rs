//! Model layer
//!
//! - `galaxy` - catalog records and the galaxy column table
//! - `column` / `format` - column definitions and value formatting
//! - `table_state` / `options` / `query` - table widget state and row selection
//! - `modal` - modal overlay management

pub mod column;
pub mod format;
pub mod galaxy;
pub mod modal;
pub mod options;
pub mod query;
pub mod table_state;

pub use column::ColumnDef;
pub use galaxy::{GalaxyRecord, GALAXY_COLUMNS};
pub use options::{TableOptions, ROWS_PER_PAGE_OPTIONS};
pub use table_state::{TableAction, TableChange, TableState};
