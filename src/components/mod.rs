//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod data_table;
pub mod filter_dialog;
pub mod galaxy_table;
pub mod help_dialog;
pub mod jump_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod rows_per_page_dialog;

pub use data_table::DataTable;
pub use filter_dialog::FilterDialog;
pub use galaxy_table::{
    draw_galaxy_view, render_galaxy_table, ChangeHandler, GalaxyTableProps, GalaxyView,
};
pub use help_dialog::HelpDialog;
pub use jump_dialog::JumpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use rows_per_page_dialog::RowsPerPageDialog;
