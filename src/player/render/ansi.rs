//! ANSI escape code conversion utilities.
//!
//! Converts cell attributes to SGR escape sequences for rendering.

use crate::terminal::palette::rgb8_to_xterm256;
use crate::terminal::{Attr, Color};

/// SGR parameter for a color, relative to `base`: 30 for foreground,
/// 40 for background.
fn color_code(color: Color, base: u8, buf: &mut String) -> bool {
    match color {
        Color::Default => false,
        Color::Indexed(n) if n < 8 => {
            buf.push_str(&format!("\x1b[{}m", base + n));
            true
        }
        Color::Indexed(n) => {
            // bright slots: 90-97 / 100-107
            buf.push_str(&format!("\x1b[{}m", base + 60 + (n & 0x07)));
            true
        }
        rgb => match rgb.to_rgb8() {
            Some(rgb) => {
                buf.push_str(&format!("\x1b[{};5;{}m", base + 8, rgb8_to_xterm256(rgb)));
                true
            }
            None => false,
        },
    }
}

/// Append the foreground color code to `buf`.
///
/// # Returns
/// `true` if a code was appended, `false` if the color is default
pub fn attr_to_ansi_fg(attr: &Attr, buf: &mut String) -> bool {
    color_code(attr.fg, 30, buf)
}

/// Append the background color code to `buf`.
///
/// # Returns
/// `true` if a code was appended, `false` if the color is default
pub fn attr_to_ansi_bg(attr: &Attr, buf: &mut String) -> bool {
    color_code(attr.bg, 40, buf)
}

/// Append codes for style flags (bold, underline, blink, standout).
pub fn attr_to_ansi_flags(attr: &Attr, buf: &mut String) {
    if attr.flags.bold {
        buf.push_str("\x1b[1m");
    }
    if attr.flags.underline {
        buf.push_str("\x1b[4m");
    }
    if attr.flags.blink {
        buf.push_str("\x1b[5m");
    }
    if attr.flags.standout {
        buf.push_str("\x1b[7m");
    }
}

/// Reset followed by every code needed for `attr`.
pub fn attr_to_sgr(attr: &Attr, buf: &mut String) {
    buf.push_str("\x1b[0m");
    attr_to_ansi_fg(attr, buf);
    attr_to_ansi_bg(attr, buf);
    attr_to_ansi_flags(attr, buf);
}
