//! Galaxy table
//!
//! Maps galaxy table props onto a data table model: fixed columns with
//! per-column formatting, fixed widget options, and the optional change
//! handler. Rendering is a pure function of the props.

use crate::components::data_table::{TableModel, TableWidget};
use crate::model::{GalaxyRecord, TableChange, TableOptions, GALAXY_COLUMNS, ROWS_PER_PAGE_OPTIONS};
use anyhow::Result;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Text shown instead of the table when there are no rows
pub const NO_GALAXIES: &str = "No galaxies available...";

const TITLE: &str = "Galaxies";

/// Receiver of table state changes
#[derive(Default)]
pub enum ChangeHandler {
    /// No receiver; the widget manages its own state
    #[default]
    None,
    Callback(Box<dyn Fn(&TableChange)>),
}

impl ChangeHandler {
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&TableChange) + 'static,
    {
        ChangeHandler::Callback(Box::new(f))
    }

    /// The hook to wire into the widget, if any
    pub fn hook(&self) -> Option<&dyn Fn(&TableChange)> {
        match self {
            ChangeHandler::None => None,
            ChangeHandler::Callback(f) => Some(f.as_ref()),
        }
    }
}

impl std::fmt::Debug for ChangeHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeHandler::None => write!(f, "ChangeHandler::None"),
            ChangeHandler::Callback(_) => write!(f, "ChangeHandler::Callback(..)"),
        }
    }
}

/// Inputs of the galaxy table
#[derive(Debug)]
pub struct GalaxyTableProps<'a> {
    /// Rows to show; `None` while nothing has been supplied yet
    pub galaxies: Option<&'a [GalaxyRecord]>,
    /// Total rows across all pages, used in server-side mode
    pub total_matches: usize,
    pub on_state_change: &'a ChangeHandler,
    /// Current page, 1-based
    pub page_number: usize,
    pub num_per_page: usize,
    pub server_side: bool,
    pub hide_title: bool,
}

impl<'a> GalaxyTableProps<'a> {
    /// Props with the default paging and display settings
    pub fn new(galaxies: Option<&'a [GalaxyRecord]>, on_state_change: &'a ChangeHandler) -> Self {
        Self {
            galaxies,
            total_matches: 0,
            on_state_change,
            page_number: 1,
            num_per_page: 10,
            server_side: true,
            hide_title: false,
        }
    }
}

/// What the galaxy table renders to
pub enum GalaxyView<'a> {
    Placeholder(&'static str),
    Table(TableModel<'a, GalaxyRecord>),
}

/// Build the view for a set of props
pub fn render_galaxy_table<'a>(props: &GalaxyTableProps<'a>) -> GalaxyView<'a> {
    let galaxies = match props.galaxies {
        Some(galaxies) if !galaxies.is_empty() => galaxies,
        _ => return GalaxyView::Placeholder(NO_GALAXIES),
    };

    let options = TableOptions {
        search: true,
        selectable_rows: false,
        elevation: 0,
        page: props.page_number.saturating_sub(1),
        rows_per_page: props.num_per_page,
        rows_per_page_options: ROWS_PER_PAGE_OPTIONS.to_vec(),
        jump_to_page: true,
        server_side: props.server_side,
        pagination: true,
        count: props.total_matches,
    };

    GalaxyView::Table(TableModel {
        title: if props.hide_title { "" } else { TITLE },
        columns: &GALAXY_COLUMNS,
        rows: galaxies,
        options,
        on_change: props.on_state_change.hook(),
    })
}

/// Draw a view, delegating tables to the given widget
pub fn draw_galaxy_view<W>(
    frame: &mut Frame,
    area: Rect,
    view: &GalaxyView<'_>,
    widget: &mut W,
) -> Result<()>
where
    W: TableWidget<GalaxyRecord>,
{
    match view {
        GalaxyView::Table(model) => widget.render(frame, area, model),
        GalaxyView::Placeholder(text) => {
            let paragraph = Paragraph::new(*text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                );
            frame.render_widget(paragraph, area);
            Ok(())
        }
    }
}
