//! Footer rendering shared by console views.
//!
//! The status bar carries the deck position on the left and the timer on
//! the right; the hint line lists keybindings.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme::Theme;

/// Render the status bar: `left` flush left, `right` flush right and an
/// optional message centered between them.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    left: &str,
    message: Option<&str>,
    right: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(left.chars().count() as u16),
            Constraint::Min(0),
            Constraint::Length(right.chars().count() as u16),
        ])
        .split(area);

    let style = theme.status_style();
    frame.render_widget(Paragraph::new(left.to_string()).style(style), chunks[0]);
    if let Some(message) = message {
        frame.render_widget(
            Paragraph::new(message.to_string())
                .style(Style::default().fg(theme.error))
                .alignment(Alignment::Center),
            chunks[1],
        );
    }
    frame.render_widget(
        Paragraph::new(right.to_string())
            .style(style)
            .alignment(Alignment::Right),
        chunks[2],
    );
}

/// Render a centered footer with keybinding hints.
///
/// Example: `&[("q", "quit"), ("?", "help")]` renders as `"q: quit | ?: help"`.
pub fn render_footer(frame: &mut Frame, area: Rect, theme: &Theme, keys: &[(&str, &str)]) {
    let footer = Paragraph::new(Line::from(build_footer_spans(keys, theme)))
        .style(theme.text_secondary_style())
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

fn build_footer_spans(keys: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ".to_string(), theme.text_secondary_style()));
        }
        spans.push(Span::styled(key.to_string(), theme.accent_style()));
        spans.push(Span::styled(format!(": {}", desc), theme.text_secondary_style()));
    }
    spans
}
