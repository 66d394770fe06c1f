//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub table: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let popup_x = area.x + (area.width - width) / 2;
    let popup_y = area.y + (area.height - height) / 2;

    Rect::new(popup_x, popup_y, width, height)
}

/// Calculate main screen layout
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    // Table + (optional status line) + help bar
    if has_status {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area);
        MainLayout {
            table: chunks[0],
            status: Some(chunks[1]),
            help: chunks[2],
        }
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);
        MainLayout {
            table: chunks[0],
            status: None,
            help: chunks[1],
        }
    }
}
