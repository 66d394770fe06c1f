//! Column filter dialog component
//!
//! Picks a filterable column and a value to match exactly against the
//! column's displayed text.

use crate::action::{Action, TableEvent};
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::ColumnDef;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// A column the user can filter on
#[derive(Debug, Clone, PartialEq)]
pub struct FilterColumn {
    /// Index into the table's columns
    pub index: usize,
    pub label: &'static str,
    /// Values already filtered on
    pub active: Vec<String>,
}

/// Filter editor
#[derive(Debug, Default)]
pub struct FilterDialog {
    pub columns: Vec<FilterColumn>,
    pub selected: usize,
    pub input: String,
}

impl FilterDialog {
    /// Load the filterable columns and their active values
    pub fn open<R>(&mut self, columns: &[ColumnDef<R>], filters: &[Vec<String>]) {
        self.columns = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.options.filter)
            .map(|(index, c)| FilterColumn {
                index,
                label: c.label,
                active: filters.get(index).cloned().unwrap_or_default(),
            })
            .collect();
        self.selected = self.selected.min(self.columns.len().saturating_sub(1));
        self.input.clear();
    }

    pub fn selected_column(&self) -> Option<&FilterColumn> {
        self.columns.get(self.selected)
    }

    fn cycle(&mut self, forward: bool) {
        if self.columns.is_empty() {
            return;
        }
        let len = self.columns.len();
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }

    fn submit(&self) -> Option<Action> {
        let value = self.input.trim();
        if value.is_empty() {
            return None;
        }
        self.selected_column().map(|column| {
            Action::Table(TableEvent::AddFilter {
                column: column.index,
                value: value.to_string(),
            })
        })
    }
}

impl Component for FilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.cycle(true);
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.cycle(false);
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 56, 12);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Column
                Constraint::Min(3),    // Value + active filters
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let column_label = self
            .selected_column()
            .map_or("(no filterable columns)", |c| c.label);
        let header = Paragraph::new(Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                column_label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filter ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, chunks[0]);

        let active = self
            .selected_column()
            .filter(|c| !c.active.is_empty())
            .map_or_else(|| "none".to_string(), |c| c.active.join(", "));
        let body = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Value: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{}█", self.input),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(vec![
                Span::styled("Active: ", Style::default().fg(Color::DarkGray)),
                Span::styled(active, Style::default().fg(Color::Green)),
            ]),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(body, chunks[1]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Add  "),
            Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
            Span::raw("Column  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Close"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GALAXY_COLUMNS;

    fn type_text(dialog: &mut FilterDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_key_event(KeyEvent::from(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_open_lists_only_filterable_columns() {
        let mut dialog = FilterDialog::default();
        let filters = vec![Vec::new(); GALAXY_COLUMNS.len()];
        dialog.open(&GALAXY_COLUMNS, &filters);

        let expected: Vec<usize> = GALAXY_COLUMNS
            .iter()
            .enumerate()
            .filter(|(_, c)| c.options.filter)
            .map(|(i, _)| i)
            .collect();
        let listed: Vec<usize> = dialog.columns.iter().map(|c| c.index).collect();
        assert_eq!(listed, expected);
    }

    #[test]
    fn test_submit_emits_filter_for_selected_column() {
        let mut dialog = FilterDialog::default();
        let filters = vec![Vec::new(); GALAXY_COLUMNS.len()];
        dialog.open(&GALAXY_COLUMNS, &filters);
        dialog.handle_key_event(KeyEvent::from(KeyCode::Tab)).unwrap();
        let column = dialog.columns[1].index;

        type_text(&mut dialog, " M31 ");
        let action = dialog.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();
        assert_eq!(
            action,
            Some(Action::Table(TableEvent::AddFilter {
                column,
                value: "M31".to_string()
            }))
        );
    }

    #[test]
    fn test_empty_value_is_not_submitted() {
        let mut dialog = FilterDialog::default();
        dialog.open(&GALAXY_COLUMNS, &[]);
        type_text(&mut dialog, "  ");
        assert_eq!(
            dialog.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap(),
            None
        );
    }

    #[test]
    fn test_column_cycling_wraps() {
        let mut dialog = FilterDialog::default();
        dialog.open(&GALAXY_COLUMNS, &[]);
        let len = dialog.columns.len();
        dialog.handle_key_event(KeyEvent::from(KeyCode::BackTab)).unwrap();
        assert_eq!(dialog.selected, len - 1);
        dialog.handle_key_event(KeyEvent::from(KeyCode::Tab)).unwrap();
        assert_eq!(dialog.selected, 0);
    }
}
