//! Colors for the presenter console and plain CLI output.
//!
//! Provides both ratatui styles (for the console) and ANSI escape codes
//! (for `check`, `remote` and `config show`).

use ratatui::style::{Color, Modifier, Style};

/// Console color set.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Slide list and notes
    pub text_primary: Color,
    /// Hints and inactive borders
    pub text_secondary: Color,
    /// Borders of the focused pane and keybindings
    pub accent: Color,
    /// Footer with position and timer
    pub status: Color,
    pub error: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Light text on the terminal's own background.
    pub fn dark() -> Self {
        Self {
            text_primary: Color::Gray,
            text_secondary: Color::DarkGray,
            accent: Color::Cyan,
            status: Color::LightRed,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Dark text for white terminals.
    pub fn light() -> Self {
        Self {
            text_primary: Color::Black,
            text_secondary: Color::Gray,
            accent: Color::Blue,
            status: Color::Red,
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn select(light: bool) -> Self {
        if light {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status)
    }

    /// The current slide in the list.
    pub fn highlight_style(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    // ANSI color helpers for CLI output

    pub fn accent_text(&self, text: &str) -> String {
        paint(self.accent, text)
    }

    pub fn primary_text(&self, text: &str) -> String {
        paint(self.text_primary, text)
    }

    pub fn secondary_text(&self, text: &str) -> String {
        paint(self.text_secondary, text)
    }

    pub fn error_text(&self, text: &str) -> String {
        paint(self.error, text)
    }

    pub fn success_text(&self, text: &str) -> String {
        paint(self.success, text)
    }
}

const ANSI_RESET: &str = "\x1b[0m";

fn paint(color: Color, text: &str) -> String {
    match sgr_foreground(color) {
        Some(code) => format!("\x1b[{}m{}{}", code, text, ANSI_RESET),
        None => format!("{}{}", text, ANSI_RESET),
    }
}

/// SGR foreground code for the named 16 colors. `Reset` maps to 0;
/// RGB and indexed colors have no fixed code.
fn sgr_foreground(color: Color) -> Option<u8> {
    let code = match color {
        Color::Reset => 0,
        Color::Black => 30,
        Color::Red => 31,
        Color::Green => 32,
        Color::Yellow => 33,
        Color::Blue => 34,
        Color::Magenta => 35,
        Color::Cyan => 36,
        Color::Gray => 37,
        Color::DarkGray => 90,
        Color::LightRed => 91,
        Color::LightGreen => 92,
        Color::LightYellow => 93,
        Color::LightBlue => 94,
        Color::LightMagenta => 95,
        Color::LightCyan => 96,
        Color::White => 97,
        _ => return None,
    };
    Some(code)
}

/// Theme for CLI output.
pub fn current_theme() -> Theme {
    Theme::default()
}
