//! galaxy-table - A terminal viewer for galaxy catalogs
//!
//! This is the main entry point for the galaxy-table application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::{App, AppSettings};
use crate::component::Component;
use crate::config::Config;
use crate::services::GalaxyCatalog;
use crate::tui::{Tui, TuiEvent};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "galaxy-table", about = "Browse a galaxy catalog in the terminal")]
struct Args {
    /// Catalog file (.json or .csv). Falls back to the saved config.
    #[arg(value_name = "CATALOG")]
    catalog: Option<PathBuf>,

    /// Page to open, 1-based
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page
    #[arg(long, value_name = "N")]
    rows_per_page: Option<usize>,

    /// Page, sort and search in the table instead of fetching pages
    #[arg(long)]
    client_side: bool,

    /// Hide the table title
    #[arg(long)]
    hide_title: bool,

    /// Delay every page fetch by this many milliseconds
    #[arg(long, value_name = "MS")]
    latency_ms: Option<u64>,

    /// Log file. Default: ~/.galaxy-table/galaxy-table.log
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Write the effective settings to the config file
    #[arg(long)]
    save_config: bool,
}

/// Overlay command line values on the saved config
fn resolve(args: &Args, mut config: Config) -> (Config, AppSettings) {
    if let Some(ref catalog) = args.catalog {
        config.catalog_path = Some(catalog.display().to_string());
    }
    if let Some(rows) = args.rows_per_page {
        config.rows_per_page = rows;
    }
    if args.client_side {
        config.server_side = false;
    }
    if args.hide_title {
        config.hide_title = true;
    }
    if let Some(latency) = args.latency_ms {
        config.latency_ms = latency;
    }

    let settings = AppSettings {
        server_side: config.server_side,
        hide_title: config.hide_title,
        page_number: args.page.max(1),
        num_per_page: config.rows_per_page.max(1),
        latency: Duration::from_millis(config.latency_ms),
    };
    (config, settings)
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(path: Option<PathBuf>, verbose: u8, quiet: bool) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("galaxy_table={}", level)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (config, settings) = resolve(&args, Config::load().unwrap_or_default());

    init_logging(
        args.log_file.clone().or_else(Config::log_path),
        args.verbose,
        args.quiet,
    )?;

    if args.save_config {
        config.save()?;
        info!("saved config");
    }

    let Some(ref catalog_path) = config.catalog_path else {
        bail!("No catalog given. Pass a .json or .csv file, or save one with --save-config.");
    };
    let catalog = GalaxyCatalog::load(catalog_path)
        .with_context(|| format!("Failed to open catalog {}", catalog_path))?;
    if catalog.is_empty() {
        warn!(path = %catalog_path, "catalog has no records");
    }

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(50));
    tui.enter()?;

    let mut app = App::new(catalog, settings);
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        error!(error = %err, "galaxy-table exited with an error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!(error = %e, "draw failed");
            }
        })?;

        let action = match tui.next_event()? {
            TuiEvent::Tick => Some(Action::Tick),
            TuiEvent::Key(key) => app.handle_key_event(key)?,
            TuiEvent::Mouse(mouse) => app.handle_mouse_event(mouse)?,
            TuiEvent::Resize(w, h) => Some(Action::Resize(w, h)),
        };

        // Action might produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            current_action = app.update(a)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let saved = Config {
            catalog_path: Some("saved.json".to_string()),
            rows_per_page: 50,
            server_side: true,
            hide_title: false,
            latency_ms: 0,
        };
        let args = Args::parse_from([
            "galaxy-table",
            "local.csv",
            "--page",
            "4",
            "--rows-per-page",
            "25",
            "--client-side",
            "--latency-ms",
            "200",
        ]);

        let (config, settings) = resolve(&args, saved);
        assert_eq!(config.catalog_path.as_deref(), Some("local.csv"));
        assert_eq!(config.rows_per_page, 25);
        assert!(!config.server_side);
        assert_eq!(
            settings,
            AppSettings {
                server_side: false,
                hide_title: false,
                page_number: 4,
                num_per_page: 25,
                latency: Duration::from_millis(200),
            }
        );
    }

    #[test]
    fn test_config_used_when_flags_absent() {
        let saved = Config {
            catalog_path: Some("saved.json".to_string()),
            hide_title: true,
            ..Config::default()
        };
        let args = Args::parse_from(["galaxy-table"]);
        let (config, settings) = resolve(&args, saved.clone());
        assert_eq!(config, saved);
        assert!(settings.hide_title);
        assert!(settings.server_side);
        assert_eq!(settings.page_number, 1);
        assert_eq!(settings.num_per_page, 10);
    }

    #[test]
    fn test_page_zero_is_treated_as_first() {
        let args = Args::parse_from(["galaxy-table", "--page", "0"]);
        let (_, settings) = resolve(&args, Config::default());
        assert_eq!(settings.page_number, 1);
    }
}
