//! Terminal display sink.
//!
//! Writes whole canvases to the real terminal on the alternate screen.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, terminal};

use super::ansi::attr_to_sgr;
use super::Display;
use crate::canvas::{Canvas, Size};

/// Encode a canvas as one escape-coded string.
///
/// Every row starts with an absolute cursor move, and attribute codes are
/// only emitted where the attribute changes, keeping the output small.
pub fn canvas_to_ansi(canvas: &Canvas) -> String {
    // Build output string to minimize syscalls
    let mut output = String::with_capacity(canvas.size().area() * 2);

    for y in 0..canvas.rows() {
        let Some(row) = canvas.row(y) else {
            break;
        };
        output.push_str(&format!("\x1b[{};1H", y + 1));
        let mut current = None;
        for cell in row {
            if current != Some(cell.attr) {
                attr_to_sgr(&cell.attr, &mut output);
                current = Some(cell.attr);
            }
            output.push(cell.ch);
        }
    }
    output.push_str("\x1b[0m");
    output
}

/// Raw-mode alternate-screen terminal. Restores the terminal on drop.
pub struct TerminalDisplay {
    stdout: io::Stdout,
    size: Size,
    active: bool,
}

impl TerminalDisplay {
    pub fn new() -> Result<Self> {
        let (cols, rows) = terminal::size().context("Failed to get terminal size")?;
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }
        Ok(Self {
            stdout,
            size: Size::from((cols, rows)),
            active: true,
        })
    }

    /// Leave the alternate screen and raw mode.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal::disable_raw_mode().context("Failed to disable raw mode")?;
        Ok(())
    }
}

impl Display for TerminalDisplay {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn show(&mut self, canvas: &Canvas) -> Result<()> {
        let output = canvas_to_ansi(canvas);
        self.stdout.write_all(output.as_bytes())?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
