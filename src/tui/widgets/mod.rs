//! Widgets for the presenter console.

pub mod canvas_view;

pub use canvas_view::{to_ratatui_color, to_ratatui_style, CanvasView};
