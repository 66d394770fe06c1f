//! Jump-to-page dialog component
//!
//! Reads a 1-based page number and turns it into a table page jump.

use crate::action::{Action, TableEvent};
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Page number entry dialog
#[derive(Debug, Default)]
pub struct JumpDialog {
    /// Digits typed so far
    pub input: String,
    /// Number of pages available
    pub page_count: usize,
    /// Validation message for the last submit
    pub error: Option<String>,
}

impl JumpDialog {
    /// Prepare the dialog for a table with `page_count` pages
    pub fn open(&mut self, current_page: usize, page_count: usize) {
        self.input = current_page.to_string();
        self.page_count = page_count.max(1);
        self.error = None;
    }

    /// Parse the input as a 1-based page and return it 0-based
    fn target_page(&self) -> Result<usize, String> {
        let page: usize = self
            .input
            .trim()
            .parse()
            .map_err(|_| format!("Enter a page number between 1 and {}", self.page_count))?;
        if page == 0 || page > self.page_count {
            return Err(format!("Page must be between 1 and {}", self.page_count));
        }
        Ok(page - 1)
    }
}

impl Component for JumpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => match self.target_page() {
                Ok(page) => Some(Action::Table(TableEvent::JumpToPage(page))),
                Err(message) => {
                    self.error = Some(message);
                    None
                }
            },
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
                None
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.input.push(c);
                self.error = None;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 40, 8);
        frame.render_widget(Clear, popup_area);

        let mut content = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Page (1-", Style::default().fg(Color::DarkGray)),
                Span::styled(self.page_count.to_string(), Style::default().fg(Color::DarkGray)),
                Span::styled("): ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{}█", self.input),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];
        if let Some(ref error) = self.error {
            content.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        content.push(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Green)),
            Span::raw("Go  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]));

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Jump to Page ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
