//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// User events addressed to the data table widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Jump to a 0-based page
    JumpToPage(usize),
    ChangeRowsPerPage(usize),
    FocusNextColumn,
    FocusPrevColumn,
    /// Toggle sorting on the focused column
    ToggleSort,
    EnterSearch,
    ExitSearch,
    SearchInput(char),
    SearchBackspace,
    ClearSearch,
    AddFilter { column: usize, value: String },
    ResetFilters,
    ScrollDown,
    ScrollUp,
}

impl fmt::Display for TableEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableEvent::JumpToPage(page) => write!(f, "JumpToPage({})", page),
            TableEvent::ChangeRowsPerPage(n) => write!(f, "ChangeRowsPerPage({})", n),
            TableEvent::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            TableEvent::AddFilter { column, value } => {
                write!(f, "AddFilter({}, {})", column, value)
            }
            other => write!(f, "{:?}", other),
        }
    }
}

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for polling background work
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Open the jump-to-page dialog
    OpenJumpToPage,
    /// Open the rows-per-page picker
    OpenRowsPerPage,
    /// Open the column filter editor
    OpenFilter,
    /// Close the current modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Table
    // ─────────────────────────────────────────────────────────────────────────
    /// Forward an event to the table widget
    Table(TableEvent),
    /// Clear search and filters and go back to the first page
    ResetQuery,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenJumpToPage => write!(f, "OpenJumpToPage"),
            Action::OpenRowsPerPage => write!(f, "OpenRowsPerPage"),
            Action::OpenFilter => write!(f, "OpenFilter"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::Table(event) => write!(f, "Table({})", event),
            Action::ResetQuery => write!(f, "ResetQuery"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Action::Resize(80, 24).to_string(), "Resize(80, 24)");
        assert_eq!(
            Action::Table(TableEvent::JumpToPage(3)).to_string(),
            "Table(JumpToPage(3))"
        );
        assert_eq!(
            Action::Table(TableEvent::NextPage).to_string(),
            "Table(NextPage)"
        );
    }
}
