//! Error dialog component

use super::base::{key_hint, render_dialog, DialogConfig, DialogLine};
use ratatui::{style::Color, Frame};

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str) {
    render_dialog(
        frame,
        DialogConfig {
            title: "Error",
            title_color: Color::Red,
            border_color: Color::Red,
            body: vec![DialogLine::Text(error_message)],
            hint: Some(key_hint(&["Enter", "Esc"], "dismiss")),
            max_width: 60,
        },
    );
}
