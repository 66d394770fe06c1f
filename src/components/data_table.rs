//! Data table widget
//!
//! A generic data grid: header with sort indicators, search and filter
//! toolbar, paged body and pagination footer. In server-side mode it shows
//! the rows it is given and only reports state changes; in client-side mode
//! it searches, filters, sorts and pages the rows itself.

use crate::action::{Action, TableEvent};
use crate::component::Component;
use crate::model::query::{matching_rows, page_slice};
use crate::model::table_state::next_sort;
use crate::model::{ColumnDef, TableAction, TableChange, TableOptions, TableState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use std::marker::PhantomData;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// Widest a column is allowed to grow
const MAX_COLUMN_WIDTH: usize = 32;
const COLUMN_SPACING: u16 = 2;

/// Everything the widget needs for one render
pub struct TableModel<'a, R> {
    /// Heading text; empty hides the heading
    pub title: &'a str,
    pub columns: &'a [ColumnDef<R>],
    pub rows: &'a [R],
    pub options: TableOptions,
    /// Hook invoked with every state change
    pub on_change: Option<&'a dyn Fn(&TableChange)>,
}

/// A widget able to render a table model
pub trait TableWidget<R> {
    fn render(&mut self, frame: &mut Frame, area: Rect, model: &TableModel<'_, R>) -> Result<()>;
}

/// Paging summary for the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-based index of the first row shown, 0 when nothing is shown
    pub from: usize,
    /// 1-based index of the last row shown
    pub to: usize,
    pub total: usize,
    /// 1-based current page
    pub page: usize,
    pub page_count: usize,
}

/// Stateful data grid over rows of type `R`
pub struct DataTable<R> {
    state: TableState,
    /// Options seen at the last sync; page and page size follow them when they change
    last_options: Option<TableOptions>,
    search_mode: bool,
    focused_column: usize,
    /// First column drawn when the table is wider than the screen
    column_offset: usize,
    /// Row offset within the page (or cursor when rows are selectable)
    scroll: usize,
    _rows: PhantomData<fn(&R)>,
}

impl<R> Default for DataTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> DataTable<R> {
    pub fn new() -> Self {
        Self {
            state: TableState::new(0, 0, 10),
            last_options: None,
            search_mode: false,
            focused_column: 0,
            column_offset: 0,
            scroll: 0,
            _rows: PhantomData,
        }
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn is_searching(&self) -> bool {
        self.search_mode
    }

    /// Forget search, filters and sort and return to the first page
    ///
    /// Returns the fresh state so a data provider can be asked for it.
    pub fn reset(&mut self) -> TableState {
        self.state.page = 0;
        self.state.sort = None;
        self.state.search_text = None;
        self.state.filters.iter_mut().for_each(Vec::clear);
        self.search_mode = false;
        self.scroll = 0;
        self.state.clone()
    }

    /// Adopt the model's options when they changed since the last render
    fn sync(&mut self, model: &TableModel<'_, R>) {
        if self.state.filters.len() != model.columns.len() {
            self.state.filters.resize(model.columns.len(), Vec::new());
        }
        if self.focused_column >= model.columns.len() {
            self.focused_column = model.columns.len().saturating_sub(1);
        }

        let options = &model.options;
        let changed = match &self.last_options {
            Some(last) => last.page != options.page || last.rows_per_page != options.rows_per_page,
            None => true,
        };
        if changed {
            self.state.page = options.page;
            self.state.rows_per_page = options.rows_per_page.max(1);
            self.scroll = 0;
        }
        if !options.search {
            self.search_mode = false;
        }
        self.last_options = Some(options.clone());
    }

    /// Total rows across all pages
    pub fn total(&self, model: &TableModel<'_, R>) -> usize {
        if model.options.server_side {
            model.options.count
        } else {
            matching_rows(model.rows, model.columns, &self.state).len()
        }
    }

    /// Total rows and the indices into `model.rows` shown on the current page
    fn selection(&self, model: &TableModel<'_, R>) -> (usize, Vec<usize>) {
        if model.options.server_side {
            return (model.options.count, (0..model.rows.len()).collect());
        }

        let indices = matching_rows(model.rows, model.columns, &self.state);
        let total = indices.len();
        if model.options.pagination {
            (total, page_slice(&indices, &self.state).to_vec())
        } else {
            (total, indices)
        }
    }

    /// Rows shown on the current page
    pub fn visible_rows<'m>(&self, model: &TableModel<'m, R>) -> Vec<&'m R> {
        let (_, shown) = self.selection(model);
        shown.into_iter().map(|i| &model.rows[i]).collect()
    }

    pub fn page_info(&self, model: &TableModel<'_, R>) -> PageInfo {
        let (total, shown) = self.selection(model);
        self.page_info_from(total, shown.len())
    }

    fn page_info_from(&self, total: usize, shown: usize) -> PageInfo {
        let first = self.state.page * self.state.rows_per_page;
        PageInfo {
            from: if shown == 0 { 0 } else { first + 1 },
            to: first + shown,
            total,
            page: self.state.page + 1,
            page_count: self.state.page_count(total),
        }
    }

    /// Apply a user event; report the resulting change to the model's hook
    pub fn apply(&mut self, event: TableEvent, model: &TableModel<'_, R>) -> Option<TableChange> {
        self.sync(model);
        let options = &model.options;
        let total = self.total(model);
        let last_page = self.state.page_count(total) - 1;
        let page_before = self.state.page;

        let action = match event {
            TableEvent::NextPage if self.state.page < last_page => {
                self.state.page += 1;
                Some(TableAction::ChangePage)
            }
            TableEvent::PrevPage if self.state.page > 0 => {
                self.state.page -= 1;
                Some(TableAction::ChangePage)
            }
            TableEvent::FirstPage if self.state.page != 0 => {
                self.state.page = 0;
                Some(TableAction::ChangePage)
            }
            TableEvent::LastPage if self.state.page != last_page => {
                self.state.page = last_page;
                Some(TableAction::ChangePage)
            }
            TableEvent::JumpToPage(page) if options.jump_to_page => {
                let target = page.min(last_page);
                if target != self.state.page {
                    self.state.page = target;
                    Some(TableAction::ChangePage)
                } else {
                    None
                }
            }
            TableEvent::ChangeRowsPerPage(rows) if rows > 0 && rows != self.state.rows_per_page => {
                self.state.rows_per_page = rows;
                self.state.clamp_page(total);
                Some(TableAction::ChangeRowsPerPage)
            }
            TableEvent::FocusNextColumn => {
                if self.focused_column + 1 < model.columns.len() {
                    self.focused_column += 1;
                }
                None
            }
            TableEvent::FocusPrevColumn => {
                self.focused_column = self.focused_column.saturating_sub(1);
                None
            }
            TableEvent::ToggleSort => match model.columns.get(self.focused_column) {
                Some(column) if column.options.sort => {
                    self.state.sort = next_sort(
                        self.state.sort,
                        self.focused_column,
                        column.options.sort_third_click_reset,
                    );
                    debug!(column = column.name, sort = ?self.state.sort, "sort toggled");
                    Some(TableAction::Sort)
                }
                _ => None,
            },
            TableEvent::EnterSearch => {
                self.search_mode = options.search;
                None
            }
            TableEvent::ExitSearch => {
                self.search_mode = false;
                None
            }
            TableEvent::SearchInput(c) if options.search => {
                self.state.search_text.get_or_insert_with(String::new).push(c);
                self.state.page = 0;
                Some(TableAction::Search)
            }
            TableEvent::SearchBackspace => match self.state.search_text.as_mut() {
                Some(text) if !text.is_empty() => {
                    text.pop();
                    self.state.page = 0;
                    Some(TableAction::Search)
                }
                _ => None,
            },
            TableEvent::ClearSearch if self.state.search_text.is_some() => {
                self.state.search_text = None;
                self.search_mode = false;
                self.state.page = 0;
                Some(TableAction::Search)
            }
            TableEvent::AddFilter { column, value } => {
                let filterable = model
                    .columns
                    .get(column)
                    .is_some_and(|c| c.options.filter);
                match self.state.filters.get_mut(column) {
                    Some(values) if filterable && !values.contains(&value) => {
                        values.push(value);
                        self.state.page = 0;
                        Some(TableAction::FilterChange)
                    }
                    _ => None,
                }
            }
            TableEvent::ResetFilters if self.state.has_filters() => {
                self.state.filters.iter_mut().for_each(Vec::clear);
                self.state.page = 0;
                Some(TableAction::ResetFilters)
            }
            TableEvent::ScrollDown => {
                let shown = self.visible_rows(model).len();
                if self.scroll + 1 < shown {
                    self.scroll += 1;
                }
                None
            }
            TableEvent::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            _ => None,
        };

        if self.state.page != page_before {
            self.scroll = 0;
        }

        let action = action?;
        let change = TableChange {
            action,
            state: self.state.clone(),
        };
        debug!(action = %change.action, page = change.state.page, "table state changed");

        if let Some(on_change) = model.on_change {
            on_change(&change);
        }
        Some(change)
    }

    /// Keep the focused column on screen given the column widths
    fn scroll_columns_into_view(&mut self, widths: &[u16], available: u16) {
        if self.focused_column < self.column_offset {
            self.column_offset = self.focused_column;
        }
        let span = |from: usize, to: usize| -> u32 {
            widths[from..=to].iter().map(|w| u32::from(*w) + u32::from(COLUMN_SPACING)).sum()
        };
        while self.column_offset < self.focused_column
            && span(self.column_offset, self.focused_column) > u32::from(available)
        {
            self.column_offset += 1;
        }
    }

    fn toolbar_line(&self, model: &TableModel<'_, R>) -> Line<'static> {
        let mut spans = Vec::new();

        if self.search_mode || self.state.search().is_some() {
            let cursor = if self.search_mode { "█" } else { "" };
            spans.push(Span::styled(" Search: ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                format!("{}{}", self.state.search().unwrap_or_default(), cursor),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::raw("  "));
        }

        for (column, values) in model.columns.iter().zip(&self.state.filters) {
            if values.is_empty() {
                continue;
            }
            spans.push(Span::styled(
                format!(" {}: {} ", column.label, values.join(", ")),
                Style::default().fg(Color::Black).bg(Color::Magenta),
            ));
            spans.push(Span::raw(" "));
        }

        Line::from(spans)
    }

    fn footer_line(&self, info: &PageInfo, options: &TableOptions) -> Line<'static> {
        let key = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let mut spans = vec![
            Span::styled(" Rows per page: ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.state.rows_per_page.to_string(), key),
            Span::raw("   "),
            Span::styled(
                format!("{}-{} of {}", info.from, info.to, info.total),
                Style::default().fg(Color::White),
            ),
            Span::raw("   "),
            Span::styled(
                format!("Page {}/{}", info.page, info.page_count),
                Style::default().fg(Color::Cyan),
            ),
        ];
        if options.jump_to_page && info.page_count > 1 {
            spans.push(Span::styled("   J jump", Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    }
}

impl<R> TableWidget<R> for DataTable<R> {
    fn render(&mut self, frame: &mut Frame, area: Rect, model: &TableModel<'_, R>) -> Result<()> {
        self.sync(model);
        let options = &model.options;

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(if options.elevation == 0 {
                BorderType::Plain
            } else {
                BorderType::Thick
            })
            .border_style(Style::default().fg(Color::DarkGray));
        if !model.title.is_empty() {
            block = block.title(format!(" {} ", model.title)).title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(if options.pagination { 1 } else { 0 }),
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(self.toolbar_line(model)), chunks[0]);

        let (total, shown) = self.selection(model);
        let cells: Vec<Vec<String>> = shown
            .iter()
            .map(|&i| {
                let row = &model.rows[i];
                model.columns.iter().map(|c| c.display(row)).collect()
            })
            .collect();

        let headers: Vec<String> = model
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| match self.state.sort {
                Some(sort) if sort.column == i => format!("{} {}", c.label, sort.direction.arrow()),
                _ => c.label.to_string(),
            })
            .collect();

        // Column widths from header and cell content
        let widths: Vec<u16> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let content = cells.iter().map(|row| row[i].width()).max().unwrap_or(0);
                header.width().max(content).min(MAX_COLUMN_WIDTH) as u16
            })
            .collect();

        self.scroll_columns_into_view(&widths, chunks[1].width);
        let first = self.column_offset.min(widths.len());

        let header = Row::new(headers.iter().enumerate().skip(first).map(|(i, h)| {
            let mut style = Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD);
            if i == self.focused_column {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Cell::from(h.clone()).style(style)
        }));

        let body: Vec<Row> = cells
            .into_iter()
            .map(|row| Row::new(row.into_iter().skip(first).map(Cell::from)))
            .collect();

        let table = Table::new(body, widths.iter().skip(first).map(|w| Constraint::Length(*w)))
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD));

        self.scroll = self.scroll.min(shown.len().saturating_sub(1));
        let mut table_state = ratatui::widgets::TableState::default().with_offset(self.scroll);
        if options.selectable_rows {
            table_state = table_state.with_selected(Some(self.scroll));
        }
        frame.render_stateful_widget(table, chunks[1], &mut table_state);

        if options.pagination {
            let info = self.page_info_from(total, shown.len());
            frame.render_widget(Paragraph::new(self.footer_line(&info, options)), chunks[2]);
        }

        Ok(())
    }
}

/// Input mapping only. Drawing needs the rows and columns of a `TableModel`,
/// so it goes through `TableWidget::render`.
impl<R> Component for DataTable<R> {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search_mode {
            let event = match key.code {
                KeyCode::Esc | KeyCode::Enter => Some(TableEvent::ExitSearch),
                KeyCode::Backspace => Some(TableEvent::SearchBackspace),
                KeyCode::Char(c) => Some(TableEvent::SearchInput(c)),
                _ => None,
            };
            return Ok(event.map(Action::Table));
        }

        let jump_enabled = self.last_options.as_ref().is_some_and(|o| o.jump_to_page);
        let search_enabled = self.last_options.as_ref().is_some_and(|o| o.search);

        let action = match key.code {
            // Paging
            KeyCode::Char('n') | KeyCode::PageDown => Some(Action::Table(TableEvent::NextPage)),
            KeyCode::Char('p') | KeyCode::PageUp => Some(Action::Table(TableEvent::PrevPage)),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::Table(TableEvent::FirstPage)),
            KeyCode::Char('G') | KeyCode::End => Some(Action::Table(TableEvent::LastPage)),
            KeyCode::Char('J') if jump_enabled => Some(Action::OpenJumpToPage),
            KeyCode::Char('r') => Some(Action::OpenRowsPerPage),

            // Rows
            KeyCode::Char('j') | KeyCode::Down => Some(Action::Table(TableEvent::ScrollDown)),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::Table(TableEvent::ScrollUp)),

            // Columns and sorting
            KeyCode::Char('l') | KeyCode::Right => Some(Action::Table(TableEvent::FocusNextColumn)),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::Table(TableEvent::FocusPrevColumn)),
            KeyCode::Char('s') => Some(Action::Table(TableEvent::ToggleSort)),

            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }

            // Search and filters
            KeyCode::Char('/') if search_enabled => Some(Action::Table(TableEvent::EnterSearch)),
            KeyCode::Char('c') => Some(Action::Table(TableEvent::ClearSearch)),
            KeyCode::Char('f') => Some(Action::OpenFilter),
            KeyCode::Char('x') => Some(Action::Table(TableEvent::ResetFilters)),
            KeyCode::Esc if self.state.search().is_some() => {
                Some(Action::Table(TableEvent::ClearSearch))
            }

            // App
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let event = match mouse.kind {
            MouseEventKind::ScrollDown => Some(TableEvent::ScrollDown),
            MouseEventKind::ScrollUp => Some(TableEvent::ScrollUp),
            _ => None,
        };
        Ok(event.map(Action::Table))
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        Ok(())
    }
}
