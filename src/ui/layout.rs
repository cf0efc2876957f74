//! Screen layout and status bar

use crate::app::App;
use crate::platform::{COPY_SHORTCUT, QUIT_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::FormPhase;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the form area and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    (chunks[0], chunks[1])
}

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![phase_indicator(app.state.session.phase())];

    spans.push(Span::styled(
        hints(app.state.show_summary),
        Style::default().fg(Color::Gray),
    ));

    // Copy message
    if let Some(msg) = &app.copy_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Render quit hint on the right
    let quit_hint = format!(" {QUIT_SHORTCUT}:quit ");
    let quit_width = quit_hint.len() as u16;
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_width),
        width: quit_width.min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

fn phase_indicator(phase: FormPhase) -> Span<'static> {
    let (symbol, color) = match phase {
        FormPhase::Empty => (" ○ new ", Color::Gray),
        FormPhase::Editing => (" ● editing ", Color::Yellow),
        FormPhase::ValidatedSuccess => (" ● valid ", Color::Green),
        FormPhase::ValidatedFailure => (" ● errors ", Color::Red),
    };
    Span::styled(symbol, Style::default().fg(color))
}

/// Keyboard hints for the current screen
fn hints(summary_open: bool) -> String {
    if summary_open {
        format!("{COPY_SHORTCUT}:copy  n:new intake  Esc:close")
    } else {
        format!("Tab/S-Tab:field  ↑/↓:move  Space:toggle  ←/→:choose  {SUBMIT_SHORTCUT}:submit")
    }
}
