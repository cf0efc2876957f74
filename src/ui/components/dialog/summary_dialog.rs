//! Summary dialog shown after an intake is accepted

use super::base::{render_dialog, DialogConfig, DialogLine};
use crate::platform::COPY_SHORTCUT;
use crate::submit::SubmissionReceipt;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the validated intake as label/value rows
pub fn render_summary_dialog(frame: &mut Frame, receipt: &SubmissionReceipt) {
    let rows = receipt.intake.summary();
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let label_style = Style::default().fg(Color::DarkGray);
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut body = vec![
        DialogLine::Styled(Line::from(vec![
            Span::styled("Receipt ", label_style),
            Span::raw(receipt.id.to_string()),
        ])),
        DialogLine::Styled(Line::from(vec![
            Span::styled("Validated ", label_style),
            Span::raw(receipt.validated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        ])),
        DialogLine::Styled(Line::from("")),
    ];
    body.extend(rows.into_iter().map(|(label, value)| {
        DialogLine::Styled(Line::from(vec![
            Span::styled(format!("{label:<label_width$}  "), label_style),
            Span::raw(value),
        ]))
    }));

    let hint = vec![
        Span::styled(COPY_SHORTCUT, key_style),
        Span::raw(" copy JSON  "),
        Span::styled("N", key_style),
        Span::raw(" new intake  "),
        Span::styled("Esc", key_style),
        Span::raw(" close"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Intake Accepted",
            title_color: Color::Green,
            border_color: Color::Green,
            body,
            hint: Some(hint),
            max_width: 90,
        },
    );
}
