//! Intake form page: sectioned fields, error panel and submit button

use super::field_renderer::{draw_field, draw_field_error};
use crate::app::App;
use crate::state::{Form, SECTIONS};
use crate::ui::components::{render_button, wrap_text, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SUBMIT_LABEL: &str = "Submit for Intake";
const ERRORS_TITLE: &str = " Intake Errors ";
const ERRORS_PROMPT: &str = "Please correct the following errors prior to submitting the form:";

/// Rows kept for the field area when the error panel grows
const MIN_FIELDS_HEIGHT: u16 = 3;
const BULLET: &str = "  • ";
const BULLET_INDENT: &str = "    ";

/// One row group in the scrolling form body
enum Item {
    Heading {
        title: &'static str,
        subtitle: &'static str,
    },
    Field(usize),
}

/// Draw the intake form
pub fn draw_intake_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Donor Organ Intake ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let errors = app.state.session.errors();
    let error_lines = if errors.is_empty() {
        Vec::new()
    } else {
        error_panel_lines(errors.messages(), inner.width.saturating_sub(2))
    };
    let errors_height = if error_lines.is_empty() {
        0
    } else {
        (error_lines.len() as u16 + 2)
            .min(inner.height.saturating_sub(BUTTON_HEIGHT + MIN_FIELDS_HEIGHT))
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(errors_height),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .split(inner);

    draw_fields(frame, chunks[0], app);
    if errors_height > 0 {
        draw_errors_panel(frame, chunks[1], error_lines);
    }
    render_button(
        frame,
        chunks[2],
        SUBMIT_LABEL,
        app.state.form.is_submit_active(),
    );
}

/// Prompt and one bullet per message, pre-wrapped to `width`
fn error_panel_lines<'a>(messages: impl Iterator<Item = &'a str>, width: u16) -> Vec<String> {
    let width = usize::from(width.max(8));
    let mut lines = wrap_text(ERRORS_PROMPT, width);
    for message in messages {
        for (i, line) in wrap_text(message, width - BULLET_INDENT.len())
            .into_iter()
            .enumerate()
        {
            let prefix = if i == 0 { BULLET } else { BULLET_INDENT };
            lines.push(format!("{prefix}{line}"));
        }
    }
    lines
}

fn draw_fields(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let values = app.state.session.form();
    let errors = app.state.session.errors();

    let mut items = Vec::new();
    let mut index = 0;
    for section in SECTIONS.iter() {
        items.push(Item::Heading {
            title: section.title,
            subtitle: section.subtitle,
        });
        for _ in section.fields {
            items.push(Item::Field(index));
            index += 1;
        }
    }

    let heights: Vec<u16> = items
        .iter()
        .map(|item| match item {
            Item::Heading { .. } => 2,
            Item::Field(i) => {
                let field = &form.fields[*i];
                field.height() + u16::from(errors.contains(field.field))
            }
        })
        .collect();

    let active = items
        .iter()
        .position(|item| matches!(item, Item::Field(i) if *i == form.active_field()));
    let offset = scroll_offset(&heights, active, area.height);

    let mut y: u16 = 0;
    for (item, height) in items.iter().zip(&heights) {
        let top = y;
        y += height;
        if top < offset || top >= offset + area.height {
            continue;
        }
        // Items running past the bottom edge are clipped
        let visible = (*height).min(offset + area.height - top);
        let rect = Rect {
            x: area.x,
            y: area.y + (top - offset),
            width: area.width,
            height: visible,
        };

        match item {
            Item::Heading { title, subtitle } => {
                let heading = vec![
                    Line::from(Span::styled(
                        *title,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(*subtitle, Style::default().fg(Color::Gray))),
                ];
                frame.render_widget(Paragraph::new(heading), rect);
            }
            Item::Field(i) => {
                let field = &form.fields[*i];
                let error = errors.get(field.field);
                let control_area = Rect {
                    height: field.height().min(visible),
                    ..rect
                };
                draw_field(
                    frame,
                    control_area,
                    field,
                    values,
                    form.active_field_id() == Some(field.field),
                    error,
                );
                if let Some(message) = error.filter(|_| field.height() < visible) {
                    let error_area = Rect {
                        y: rect.y + field.height(),
                        height: 1,
                        ..rect
                    };
                    draw_field_error(frame, error_area, message);
                }
            }
        }
    }
}

fn draw_errors_panel(frame: &mut Frame, area: Rect, lines: Vec<String>) {
    let block = Block::default()
        .title(ERRORS_TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let lines: Vec<Line> = lines.into_iter().map(Line::from).collect();
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(Color::Red))
            .block(block),
        area,
    );
}

/// Top row of the window so that the active item is fully visible.
///
/// With no active item (the submit button has focus) the window is scrolled
/// to the end.
fn scroll_offset(heights: &[u16], active: Option<usize>, viewport: u16) -> u16 {
    let total: u16 = heights.iter().sum();
    let Some(active) = active else {
        return total.saturating_sub(viewport);
    };

    let top: u16 = heights[..active].iter().sum();
    let bottom = top + heights[active];
    if bottom <= viewport {
        0
    } else if heights[active] >= viewport {
        top
    } else {
        bottom - viewport
    }
}
