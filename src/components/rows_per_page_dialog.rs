//! Rows-per-page picker dialog component

use crate::action::{Action, TableEvent};
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// Picker over the table's page-size choices
pub struct RowsPerPageDialog {
    pub choices: Vec<usize>,
    /// Page size in effect when the dialog opened
    pub current: usize,
    pub list_state: ListState,
}

impl Default for RowsPerPageDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl RowsPerPageDialog {
    pub fn new() -> Self {
        Self {
            choices: Vec::new(),
            current: 0,
            list_state: ListState::default(),
        }
    }

    /// Load the choices and preselect the current page size
    pub fn open(&mut self, choices: &[usize], current: usize) {
        self.choices = choices.to_vec();
        self.current = current;
        let selected = self.choices.iter().position(|&c| c == current).unwrap_or(0);
        self.list_state.select(Some(selected));
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state
            .selected()
            .and_then(|i| self.choices.get(i))
            .copied()
    }

    fn select_next(&mut self) {
        let next = self.list_state.selected().map_or(0, |i| i + 1);
        if next < self.choices.len() {
            self.list_state.select(Some(next));
        }
    }

    fn select_prev(&mut self) {
        let prev = self.list_state.selected().unwrap_or(0).saturating_sub(1);
        self.list_state.select(Some(prev));
    }
}

impl Component for RowsPerPageDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('r') => Some(Action::CloseModal),
            KeyCode::Enter => self
                .selected()
                .map(|rows| Action::Table(TableEvent::ChangeRowsPerPage(rows))),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 30, self.choices.len() as u16 + 4);
        frame.render_widget(Clear, popup_area);

        let items: Vec<ListItem> = self
            .choices
            .iter()
            .map(|&choice| {
                let is_current = choice == self.current;
                ListItem::new(Line::from(vec![
                    Span::styled(
                        if is_current { "● " } else { "  " },
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(format!("{} rows", choice), Style::default().fg(Color::White)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Rows per Page ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, popup_area, &mut self.list_state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ROWS_PER_PAGE_OPTIONS;

    #[test]
    fn test_open_preselects_current() {
        let mut dialog = RowsPerPageDialog::new();
        dialog.open(&ROWS_PER_PAGE_OPTIONS, 25);
        assert_eq!(dialog.selected(), Some(25));

        dialog.open(&ROWS_PER_PAGE_OPTIONS, 7);
        assert_eq!(dialog.selected(), Some(2));
    }

    #[test]
    fn test_navigate_and_confirm() {
        let mut dialog = RowsPerPageDialog::new();
        dialog.open(&ROWS_PER_PAGE_OPTIONS, 10);

        dialog.handle_key_event(KeyEvent::from(KeyCode::Down)).unwrap();
        dialog.handle_key_event(KeyEvent::from(KeyCode::Down)).unwrap();
        let action = dialog.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::Table(TableEvent::ChangeRowsPerPage(50))));
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut dialog = RowsPerPageDialog::new();
        dialog.open(&ROWS_PER_PAGE_OPTIONS, 100);
        dialog.handle_key_event(KeyEvent::from(KeyCode::Down)).unwrap();
        assert_eq!(dialog.selected(), Some(100));

        dialog.open(&ROWS_PER_PAGE_OPTIONS, 2);
        dialog.handle_key_event(KeyEvent::from(KeyCode::Up)).unwrap();
        assert_eq!(dialog.selected(), Some(2));
    }
}
