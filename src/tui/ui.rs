//! Layout helpers for the console.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Split the console into the slide list column, the preview column and
/// the footer row. The preview column is sized to the player's screen
/// plus borders, but never takes more than two thirds of the width.
pub fn console_layout(area: Rect, preview_cols: u16) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let body = rows[0];

    let preview = preview_cols.saturating_add(2).min(body.width.saturating_mul(2) / 3);
    let list = Rect::new(body.x, body.y, body.width - preview, body.height);
    let preview = Rect::new(body.x + list.width, body.y, preview, body.height);

    (list, preview, rows[1])
}
