//! Terminal ownership for full-screen ratatui views.

pub mod status_footer;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

/// Raw-mode alternate-screen terminal driven by ratatui. Restores the
/// terminal on drop.
pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    active: bool,
}

impl App {
    /// Take over the terminal. `tick_rate` bounds how long
    /// [`App::next_event`] blocks.
    pub fn new(tick_rate: Duration) -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = terminal::disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;
        Ok(Self {
            terminal,
            tick_rate,
            active: true,
        })
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render).context("Failed to draw")?;
        Ok(())
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        let size = self.terminal.size().context("Failed to get terminal size")?;
        Ok((size.width, size.height))
    }

    /// Wait up to one tick for an event.
    pub fn next_event(&self) -> Result<Option<Event>> {
        if event::poll(self.tick_rate)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
        terminal::disable_raw_mode().context("Failed to disable raw mode")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
