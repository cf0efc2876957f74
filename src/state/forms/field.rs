//! Form field controls
//!
//! Controls are driven by the current form state: they read the stored
//! value, turn a keystroke into a [`FieldChange`], and keep only UI-local
//! state (option cursor, partially typed date).

use crate::catalog::{label_for, options_for, CatalogOption, FieldId, FieldKind};
use crate::intake::time_input::{self, TIME_PLACEHOLDER};
use crate::intake::{FieldChange, FieldValue, IntakeFormState};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Placeholder shown by select controls with nothing chosen
pub const SELECT_PLACEHOLDER: &str = "-- select an option --";

/// Placeholder shown by date controls
pub const DATE_PLACEHOLDER: &str = "YYYY-MM-DD";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A key as seen by a control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Char(char),
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

/// Control-specific UI state
#[derive(Debug, Clone)]
pub enum Control {
    Checkboxes {
        options: &'static [CatalogOption],
        cursor: usize,
        columns: usize,
    },
    Select {
        options: &'static [CatalogOption],
    },
    Radio {
        options: &'static [CatalogOption],
    },
    Date {
        buffer: String,
    },
    Time,
    Text {
        placeholder: &'static str,
    },
}

/// A single labeled control bound to one intake field
#[derive(Debug, Clone)]
pub struct FormField {
    pub field: FieldId,
    pub label: &'static str,
    pub control: Control,
}

impl FormField {
    /// Build the control matching the field's kind
    pub fn for_field(field: FieldId, checkbox_columns: usize) -> Self {
        let options = options_for(field);
        let control = match field.kind() {
            FieldKind::MultiSelect => Control::Checkboxes {
                options,
                cursor: 0,
                columns: checkbox_columns.max(1),
            },
            FieldKind::Select => Control::Select { options },
            FieldKind::Radio => Control::Radio { options },
            FieldKind::Date => Control::Date {
                buffer: String::new(),
            },
            FieldKind::Time => Control::Time,
            FieldKind::Text => Control::Text {
                placeholder: match field {
                    FieldId::EmailAddress => "name@example.com",
                    FieldId::PhoneNumber => "123-456-7890",
                    _ => "",
                },
            },
        };

        Self {
            field,
            label: field.label(),
            control,
        }
    }

    /// Rows needed to draw the control, borders included
    pub fn height(&self) -> u16 {
        match &self.control {
            Control::Checkboxes {
                options, columns, ..
            } => options.len().div_ceil(*columns) as u16 + 2,
            _ => 3,
        }
    }

    /// Translate a key into an edit of the stored value
    pub fn handle_key(&mut self, key: FieldKey, form: &IntakeFormState) -> Option<FieldChange> {
        let field = self.field;
        match &mut self.control {
            Control::Checkboxes {
                options,
                cursor,
                columns,
            } => {
                let per_column = options.len().div_ceil(*columns);
                match key {
                    FieldKey::Up => *cursor = cursor.saturating_sub(1),
                    FieldKey::Down => *cursor = (*cursor + 1).min(options.len() - 1),
                    FieldKey::Left => *cursor = cursor.saturating_sub(per_column),
                    FieldKey::Right => {
                        if *cursor + per_column < options.len() {
                            *cursor += per_column;
                        }
                    }
                    FieldKey::Char(' ') => {
                        let token = options[*cursor].value.to_string();
                        let mut checked: BTreeSet<String> =
                            form.tokens(field).cloned().unwrap_or_default();
                        if !checked.remove(&token) {
                            checked.insert(token);
                        }
                        return Some(FieldChange::Set(field, FieldValue::Tokens(checked)));
                    }
                    _ => {}
                }
                None
            }
            Control::Select { options } | Control::Radio { options } => {
                let current = form
                    .text(field)
                    .and_then(|t| options.iter().position(|o| o.value == t));
                let next = match (key, current) {
                    (FieldKey::Right | FieldKey::Down | FieldKey::Char(' '), None) => 0,
                    (FieldKey::Right | FieldKey::Down, Some(i)) => (i + 1) % options.len(),
                    (FieldKey::Left | FieldKey::Up, None) => options.len() - 1,
                    (FieldKey::Left | FieldKey::Up, Some(i)) => {
                        (i + options.len() - 1) % options.len()
                    }
                    _ => return None,
                };
                Some(FieldChange::Set(
                    field,
                    FieldValue::Token(options[next].value.to_string()),
                ))
            }
            Control::Date { buffer } => {
                match key {
                    FieldKey::Char(c) if (c.is_ascii_digit() || c == '-') && buffer.len() < 10 => {
                        buffer.push(c)
                    }
                    FieldKey::Backspace => {
                        buffer.pop();
                    }
                    _ => return None,
                }
                Some(match NaiveDate::parse_from_str(buffer, DATE_FORMAT) {
                    Ok(date) => FieldChange::Set(field, FieldValue::Date(date)),
                    Err(_) => FieldChange::Clear(field),
                })
            }
            Control::Time => {
                let current = form.text(field).unwrap_or_default();
                let next = match key {
                    FieldKey::Char(c) => time_input::push_time_char(current, c),
                    FieldKey::Backspace => time_input::pop_time_char(current),
                    _ => return None,
                };
                if next == current {
                    return None;
                }
                Some(FieldChange::Set(field, FieldValue::Text(next)))
            }
            Control::Text { .. } => {
                let mut value = form.text(field).unwrap_or_default().to_string();
                match key {
                    FieldKey::Char(c) => value.push(c),
                    FieldKey::Backspace => {
                        value.pop()?;
                    }
                    _ => return None,
                }
                Some(FieldChange::Set(field, FieldValue::Text(value)))
            }
        }
    }

    /// Text shown inside a single-line control
    pub fn display_value(&self, form: &IntakeFormState) -> String {
        match &self.control {
            Control::Checkboxes { options, .. } => {
                let checked = form.tokens(self.field);
                options
                    .iter()
                    .filter(|o| checked.is_some_and(|set| set.contains(o.value)))
                    .map(|o| o.label)
                    .collect::<Vec<_>>()
                    .join(", ")
            }
            Control::Select { .. } | Control::Radio { .. } => form
                .text(self.field)
                .and_then(|token| label_for(self.field, token))
                .unwrap_or_default()
                .to_string(),
            Control::Date { buffer } => buffer.clone(),
            Control::Time => time_input::format_time(form.text(self.field).unwrap_or_default()),
            Control::Text { .. } => form.text(self.field).unwrap_or_default().to_string(),
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match &self.control {
            Control::Select { .. } => SELECT_PLACEHOLDER,
            Control::Date { .. } => DATE_PLACEHOLDER,
            Control::Time => TIME_PLACEHOLDER,
            Control::Text { placeholder } => *placeholder,
            Control::Checkboxes { .. } | Control::Radio { .. } => "",
        }
    }

    /// Forget UI-local state (used when the form is reset)
    pub fn clear(&mut self) {
        match &mut self.control {
            Control::Checkboxes { cursor, .. } => *cursor = 0,
            Control::Date { buffer } => buffer.clear(),
            _ => {}
        }
    }
}
