//! Field rendering utilities for forms

use crate::catalog::CatalogOption;
use crate::intake::IntakeFormState;
use crate::state::{Control, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw a form field using FormField from the domain layer
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    form: &IntakeFormState,
    is_active: bool,
    error: Option<&str>,
) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else if error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let lines = match &field.control {
        Control::Checkboxes {
            options,
            cursor,
            columns,
        } => {
            let inner_width = area.width.saturating_sub(2) as usize;
            checkbox_lines(field, form, options, *cursor, *columns, inner_width, is_active)
        }
        Control::Radio { options } => vec![radio_line(field, form, options, is_active)],
        Control::Select { .. } => vec![select_line(field, form, is_active)],
        Control::Date { .. } | Control::Time | Control::Text { .. } => {
            vec![input_line(field, form, is_active)]
        }
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Inline validation message drawn under a field
pub fn draw_field_error(frame: &mut Frame, area: Rect, message: &str) {
    let line = Line::from(Span::styled(
        format!(" {message}"),
        Style::default().fg(Color::Red),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn value_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn cursor_span(is_active: bool) -> Span<'static> {
    let cursor = if is_active { "▌" } else { "" };
    Span::styled(cursor, Style::default().fg(Color::Cyan))
}

fn input_line<'a>(field: &FormField, form: &IntakeFormState, is_active: bool) -> Line<'a> {
    let value = field.display_value(form);
    let value = if value.is_empty() {
        Span::styled(field.placeholder(), placeholder_style())
    } else {
        Span::styled(value, value_style(is_active))
    };
    Line::from(vec![value, cursor_span(is_active)])
}

fn select_line<'a>(field: &FormField, form: &IntakeFormState, is_active: bool) -> Line<'a> {
    let value = field.display_value(form);
    let value = if value.is_empty() {
        Span::styled(field.placeholder(), placeholder_style())
    } else {
        Span::styled(value, value_style(is_active))
    };
    if is_active {
        Line::from(vec![
            Span::styled("◂ ", placeholder_style()),
            value,
            Span::styled(" ▸", placeholder_style()),
        ])
    } else {
        Line::from(value)
    }
}

fn radio_line<'a>(
    field: &FormField,
    form: &IntakeFormState,
    options: &[CatalogOption],
    is_active: bool,
) -> Line<'a> {
    let selected = form.text(field.field);
    let mut spans = Vec::new();
    for option in options {
        let checked = selected == Some(option.value);
        let mark = if checked { "(•) " } else { "( ) " };
        let style = if checked {
            value_style(is_active).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!("{mark}{}", option.label), style));
        spans.push(Span::raw("   "));
    }
    Line::from(spans)
}

fn checkbox_lines<'a>(
    field: &FormField,
    form: &IntakeFormState,
    options: &[CatalogOption],
    cursor: usize,
    columns: usize,
    inner_width: usize,
    is_active: bool,
) -> Vec<Line<'a>> {
    let checked = form.tokens(field.field);
    let column_width = inner_width / columns.max(1);

    checkbox_grid(options.len(), columns)
        .into_iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|index| {
                    let option = &options[index];
                    let is_checked = checked.is_some_and(|set| set.contains(option.value));
                    let mark = if is_checked { "[x]" } else { "[ ]" };
                    let text = format!(
                        "{mark} {:<width$}",
                        option.label,
                        width = column_width.saturating_sub(4)
                    );
                    let style = if is_active && index == cursor {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::REVERSED)
                    } else if is_checked {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Span::styled(text, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Option indexes per row, filled column by column
pub fn checkbox_grid(len: usize, columns: usize) -> Vec<Vec<usize>> {
    let columns = columns.max(1);
    let per_column = len.div_ceil(columns);
    (0..per_column)
        .map(|row| {
            (0..columns)
                .map(|col| col * per_column + row)
                .filter(|index| *index < len)
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_two_columns() {
        let grid = checkbox_grid(11, 2);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0], vec![0, 6]);
        assert_eq!(grid[4], vec![4, 10]);
        assert_eq!(grid[5], vec![5]);
    }

    #[test]
    fn test_grid_single_column() {
        let grid = checkbox_grid(3, 1);
        assert_eq!(grid, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_grid_zero_columns_treated_as_one() {
        assert_eq!(checkbox_grid(2, 0), vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_grid_empty() {
        assert!(checkbox_grid(0, 2).is_empty());
    }
}
