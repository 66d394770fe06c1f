//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components. It also
//! plays the data provider for the galaxy table: in server-side mode table
//! changes come back over a channel and are turned into page fetches.

use crate::action::{Action, TableEvent};
use crate::component::Component;
use crate::components::{
    calculate_main_layout, draw_galaxy_view, render_galaxy_table, ChangeHandler, DataTable,
    FilterDialog, GalaxyTableProps, GalaxyView, HelpDialog, JumpDialog, QuitDialog,
    RowsPerPageDialog,
};
use crate::model::modal::{Modal, ModalStack};
use crate::model::{GalaxyRecord, TableChange, TableState, GALAXY_COLUMNS};
use crate::services::{GalaxyCatalog, GalaxyPage, PageFetcher};
use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Startup settings, merged from the config file and the command line
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub server_side: bool,
    pub hide_title: bool,
    /// First page to show, 1-based
    pub page_number: usize,
    pub num_per_page: usize,
    /// Artificial delay for server-side fetches
    pub latency: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            server_side: true,
            hide_title: false,
            page_number: 1,
            num_per_page: 10,
            latency: Duration::ZERO,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table Feed
// ═══════════════════════════════════════════════════════════════════════════════

/// The inputs the galaxy table is rendered from
pub struct TableFeed {
    pub catalog: Arc<GalaxyCatalog>,
    /// Latest page served in server-side mode
    pub page: Option<GalaxyPage>,
    /// Current page, 1-based
    pub page_number: usize,
    pub num_per_page: usize,
    pub server_side: bool,
    pub hide_title: bool,
}

impl TableFeed {
    pub fn props<'a>(&'a self, handler: &'a ChangeHandler) -> GalaxyTableProps<'a> {
        let (galaxies, total_matches) = if self.server_side {
            match &self.page {
                Some(page) => (Some(page.galaxies.as_slice()), page.total_matches),
                None => (None, 0),
            }
        } else {
            (Some(self.catalog.records()), self.catalog.len())
        };

        GalaxyTableProps {
            total_matches,
            page_number: self.page_number,
            num_per_page: self.num_per_page,
            server_side: self.server_side,
            hide_title: self.hide_title,
            ..GalaxyTableProps::new(galaxies, handler)
        }
    }

    /// Follow a change reported by the table
    fn follow(&mut self, state: &TableState) {
        self.page_number = state.page + 1;
        self.num_per_page = state.rows_per_page;
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    pub feed: TableFeed,

    /// Wired into the table in server-side mode
    change_handler: ChangeHandler,

    /// Changes reported through `change_handler`
    changes: Option<Receiver<TableChange>>,

    fetcher: PageFetcher,

    /// When the last page arrived
    pub last_fetch: Option<DateTime<Local>>,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub data_table: DataTable<GalaxyRecord>,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub jump_dialog: JumpDialog,
    pub rows_per_page_dialog: RowsPerPageDialog,
    pub filter_dialog: FilterDialog,
}

impl App {
    pub fn new(catalog: GalaxyCatalog, settings: AppSettings) -> App {
        let catalog = Arc::new(catalog);
        let fetcher = PageFetcher::new(Arc::clone(&catalog)).with_latency(settings.latency);

        let (change_handler, changes) = if settings.server_side {
            let (tx, rx) = mpsc::channel();
            let handler = ChangeHandler::callback(move |change: &TableChange| {
                // The receiver lives as long as the app
                let _ = tx.send(change.clone());
            });
            (handler, Some(rx))
        } else {
            (ChangeHandler::None, None)
        };

        App {
            feed: TableFeed {
                catalog,
                page: None,
                page_number: settings.page_number.max(1),
                num_per_page: settings.num_per_page.max(1),
                server_side: settings.server_side,
                hide_title: settings.hide_title,
            },
            change_handler,
            changes,
            fetcher,
            last_fetch: None,
            modals: ModalStack::new(),
            should_quit: false,
            status_message: None,
            data_table: DataTable::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
            jump_dialog: JumpDialog::default(),
            rows_per_page_dialog: RowsPerPageDialog::new(),
            filter_dialog: FilterDialog::default(),
        }
    }

    /// Whether the table currently shows its placeholder
    pub fn showing_placeholder(&self) -> bool {
        let props = self.feed.props(&self.change_handler);
        matches!(render_galaxy_table(&props), GalaxyView::Placeholder(_))
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.is_loading()
    }

    fn request_page(&mut self, state: TableState) {
        if self.feed.server_side {
            self.fetcher.request(state);
        }
    }

    /// Turn reported table changes into page requests
    fn drain_changes(&mut self) {
        let Some(ref changes) = self.changes else {
            return;
        };
        let pending: Vec<TableChange> = changes.try_iter().collect();
        for change in pending {
            debug!(action = %change.action, page = change.state.page, "table change");
            self.feed.follow(&change.state);
            self.fetcher.request(change.state);
        }
    }

    fn apply_table_event(&mut self, event: TableEvent) {
        let props = self.feed.props(&self.change_handler);
        if let GalaxyView::Table(model) = render_galaxy_table(&props) {
            if let Some(change) = self.data_table.apply(event, &model) {
                if !self.feed.server_side {
                    trace!(action = %change.action, "client-side table change");
                }
            }
        }
        self.drain_changes();
    }

    fn reset_query(&mut self) {
        let mut state = self.data_table.reset();
        state.rows_per_page = self.feed.num_per_page;
        self.feed.follow(&state);
        self.status_message = Some("Search and filters cleared".to_string());
        info!("resetting search and filters");
        self.request_page(state);
    }

    fn open_jump_dialog(&mut self) {
        let props = self.feed.props(&self.change_handler);
        if let GalaxyView::Table(model) = render_galaxy_table(&props) {
            let info = self.data_table.page_info(&model);
            self.jump_dialog.open(info.page, info.page_count);
            self.modals.push(Modal::JumpToPage);
        }
    }

    fn open_rows_per_page_dialog(&mut self) {
        let props = self.feed.props(&self.change_handler);
        if let GalaxyView::Table(model) = render_galaxy_table(&props) {
            self.rows_per_page_dialog.open(
                &model.options.rows_per_page_options,
                self.data_table.state().rows_per_page,
            );
            self.modals.push(Modal::RowsPerPage);
        }
    }

    fn open_filter_dialog(&mut self) {
        self.filter_dialog
            .open(&GALAXY_COLUMNS, &self.data_table.state().filters);
        self.modals.push(Modal::Filter);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        info!(
            records = self.feed.catalog.len(),
            server_side = self.feed.server_side,
            "starting galaxy table"
        );
        let state = TableState::new(
            GALAXY_COLUMNS.len(),
            self.feed.page_number - 1,
            self.feed.num_per_page,
        );
        self.request_page(state);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top() {
            return self.handle_modal_key_event(modal, key);
        }

        if self.showing_placeholder() {
            return Ok(self.handle_placeholder_key_event(key));
        }

        self.data_table.handle_key_event(key)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.modals.is_empty() {
            self.data_table.handle_mouse_event(mouse)
        } else {
            Ok(None)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            trace!(%action, "update");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.drain_changes();
                if let Some(page) = self.fetcher.poll() {
                    self.feed.page = Some(page);
                    self.last_fetch = Some(Local::now());
                }
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenJumpToPage => self.open_jump_dialog(),
            Action::OpenRowsPerPage => self.open_rows_per_page_dialog(),
            Action::OpenFilter => self.open_filter_dialog(),
            Action::CloseModal => {
                self.modals.pop();
            }

            // ─────────────────────────────────────────────────────────────────
            // Table
            // ─────────────────────────────────────────────────────────────────
            Action::Table(event) => {
                // Dialogs only emit table events on submit
                if !self.modals.is_empty() {
                    self.modals.pop();
                }
                self.status_message = None;
                self.apply_table_event(event);
            }
            Action::ResetQuery => self.reset_query(),
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_main_layout(area, true);

        let props = self.feed.props(&self.change_handler);
        let view = render_galaxy_table(&props);
        let placeholder = matches!(view, GalaxyView::Placeholder(_));
        draw_galaxy_view(frame, layout.table, &view, &mut self.data_table)?;

        if let Some(status_area) = layout.status {
            self.render_status_bar(frame, status_area, props.total_matches);
        }
        self.render_help_bar(frame, layout.help, placeholder);

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top() {
            self.draw_modal(frame, area, modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::JumpToPage => self.jump_dialog.handle_key_event(key),
            Modal::RowsPerPage => self.rows_per_page_dialog.handle_key_event(key),
            Modal::Filter => self.filter_dialog.handle_key_event(key),
        }
    }

    /// Keys while the placeholder is shown; the table itself is not on screen
    fn handle_placeholder_key_event(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('x') | KeyCode::Esc => Some(Action::ResetQuery),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            _ => None,
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
            Modal::JumpToPage => self.jump_dialog.draw(frame, area),
            Modal::RowsPerPage => self.rows_per_page_dialog.draw(frame, area),
            Modal::Filter => self.filter_dialog.draw(frame, area),
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, total_matches: usize) {
        let mut spans = vec![];

        let mode = if self.feed.server_side { "server" } else { "client" };
        spans.push(Span::styled(
            format!(" {} ", mode),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));

        if let Some(path) = self.feed.catalog.source() {
            spans.push(Span::styled(
                format!("{} ", path.display()),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let total = if self.feed.server_side {
            total_matches
        } else {
            self.feed.catalog.len()
        };
        spans.push(Span::styled(
            format!("{} galaxies", total),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));

        if self.is_loading() {
            spans.push(Span::styled(" loading…", Style::default().fg(Color::Yellow)));
        } else if let Some(fetched) = self.last_fetch {
            spans.push(Span::styled(
                format!(" fetched {}", fetched.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }

        if let Some(ref status) = self.status_message {
            spans.push(Span::styled(
                format!("  {} ", status),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help_bar(&self, frame: &mut Frame, area: Rect, placeholder: bool) {
        let help_spans = if placeholder {
            vec![
                key_hint(" x ", Color::Yellow),
                Span::raw("Reset search & filters  "),
                key_hint(" ? ", Color::Cyan),
                Span::raw("Help  "),
                key_hint(" q ", Color::Red),
                Span::raw("Quit"),
            ]
        } else if self.data_table.is_searching() {
            vec![
                key_hint(" Esc ", Color::Yellow),
                Span::raw("Done  "),
                key_hint(" Enter ", Color::Green),
                Span::raw("Done  "),
                Span::styled(
                    format!("Search: {}", self.data_table.state().search().unwrap_or_default()),
                    Style::default().fg(Color::Cyan),
                ),
            ]
        } else {
            vec![
                key_hint(" n/p ", Color::Green),
                Span::raw("Page  "),
                key_hint(" J ", Color::Green),
                Span::raw("Jump  "),
                key_hint(" r ", Color::Green),
                Span::raw("Rows  "),
                key_hint(" ←/→ ", Color::Cyan),
                Span::raw("Column  "),
                key_hint(" s ", Color::Cyan),
                Span::raw("Sort  "),
                key_hint(" / ", Color::Magenta),
                Span::raw("Search  "),
                key_hint(" f ", Color::Magenta),
                Span::raw("Filter  "),
                key_hint(" x ", Color::Magenta),
                Span::raw("Reset  "),
                key_hint(" ? ", Color::Blue),
                Span::raw("Help  "),
                key_hint(" q ", Color::Red),
                Span::raw("Quit"),
            ]
        };

        let paragraph = Paragraph::new(Line::from(help_spans))
            .alignment(ratatui::layout::Alignment::Left);
        frame.render_widget(paragraph, area);
    }
}

fn key_hint(key: &'static str, color: Color) -> Span<'static> {
    Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD))
}
