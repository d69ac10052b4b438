//! Draws a slide canvas into a ratatui buffer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color as TuiColor, Modifier, Style},
    widgets::Widget,
};

use crate::canvas::Canvas;
use crate::terminal::{Attr, Color};

/// Map a cell color onto the console's terminal palette.
pub fn to_ratatui_color(color: Color) -> TuiColor {
    match color {
        Color::Default => TuiColor::Reset,
        Color::Indexed(n) => TuiColor::Indexed(n & 0x0f),
        other => match other.to_rgb8() {
            Some([r, g, b]) => TuiColor::Rgb(r, g, b),
            None => TuiColor::Reset,
        },
    }
}

pub fn to_ratatui_style(attr: &Attr) -> Style {
    let mut style = Style::default()
        .fg(to_ratatui_color(attr.fg))
        .bg(to_ratatui_color(attr.bg));
    if attr.flags.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if attr.flags.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if attr.flags.standout {
        style = style.add_modifier(Modifier::REVERSED);
    }
    if attr.flags.blink {
        style = style.add_modifier(Modifier::SLOW_BLINK);
    }
    style
}

/// A canvas clipped to the widget area, anchored top-left.
pub struct CanvasView<'a> {
    canvas: &'a Canvas,
}

impl<'a> CanvasView<'a> {
    pub fn new(canvas: &'a Canvas) -> Self {
        Self { canvas }
    }
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = self.canvas.cols().min(area.width as usize);
        let rows = self.canvas.rows().min(area.height as usize);
        for y in 0..rows {
            for x in 0..cols {
                let cell = self.canvas.cell(x, y);
                if let Some(target) = buf.cell_mut((area.x + x as u16, area.y + y as u16)) {
                    target.set_char(cell.ch).set_style(to_ratatui_style(&cell.attr));
                }
            }
        }
    }
}
