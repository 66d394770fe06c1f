//! Terminal User Interface management
//!
//! Owns raw mode and the alternate screen, and turns crossterm input into
//! ticks, key presses, mouse events and resizes.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEvent,
    },
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    ops::{Deref, DerefMut},
    time::Duration,
};

/// Input as seen by the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Nothing arrived within the tick rate
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

impl TuiEvent {
    /// Classify a raw crossterm event, dropping the ones the app ignores
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            // Key release/repeat events are reported on Windows
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(TuiEvent::Key(key)),
            Event::Mouse(mouse) => Some(TuiEvent::Mouse(mouse)),
            Event::Resize(w, h) => Some(TuiEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Terminal wrapper for managing the TUI lifecycle
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Polling timeout for events
    pub tick_rate: Duration,
    entered: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(100),
            entered: false,
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Enter the alternate screen and enable raw mode
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        self.entered = true;
        self.terminal.clear()?;
        Ok(())
    }

    /// Restore the terminal. Also runs on Drop.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        terminal::disable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )?;
        Ok(())
    }

    /// Wait up to one tick for input
    pub fn next_event(&self) -> Result<TuiEvent> {
        if event::poll(self.tick_rate)? {
            Ok(TuiEvent::from_crossterm(event::read()?).unwrap_or(TuiEvent::Tick))
        } else {
            Ok(TuiEvent::Tick)
        }
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Deref for Tui {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        KeyCode, KeyEventState, KeyModifiers, MouseEventKind,
    };

    #[test]
    fn test_key_presses_pass_and_releases_drop() {
        let press = KeyEvent::from(KeyCode::Char('n'));
        assert_eq!(
            TuiEvent::from_crossterm(Event::Key(press)),
            Some(TuiEvent::Key(press))
        );

        let release = KeyEvent {
            code: KeyCode::Char('n'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(TuiEvent::from_crossterm(Event::Key(release)), None);
    }

    #[test]
    fn test_mouse_and_resize_events() {
        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            TuiEvent::from_crossterm(Event::Mouse(scroll)),
            Some(TuiEvent::Mouse(scroll))
        );
        assert_eq!(
            TuiEvent::from_crossterm(Event::Resize(120, 40)),
            Some(TuiEvent::Resize(120, 40))
        );
        assert_eq!(TuiEvent::from_crossterm(Event::FocusGained), None);
    }
}
