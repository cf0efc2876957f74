//! Time-of-day input: stored as digits, displayed as `HH:MM`

/// Maximum number of digits kept for a time of day
pub const MAX_TIME_DIGITS: usize = 4;

/// Placeholder shown while the time input is empty
pub const TIME_PLACEHOLDER: &str = "00:00";

/// Format stored digits for display.
///
/// Values shorter than 3 characters are shown as-is; otherwise a colon is
/// inserted after the second digit.
pub fn format_time(value: &str) -> String {
    if value.chars().count() < 3 {
        return value.to_string();
    }
    let hours: String = value.chars().take(2).collect();
    let minutes: String = value.chars().skip(2).take(2).collect();
    format!("{hours}:{minutes}")
}

/// Apply an edit of the displayed text to the stored digits.
///
/// Colons are stripped before storage. An edit that would leave anything
/// but digits, or more than [`MAX_TIME_DIGITS`] of them, is rejected and the
/// current value is returned unchanged.
pub fn apply_time_edit(current: &str, edited: &str) -> String {
    let stripped: String = edited.chars().filter(|c| *c != ':').collect();
    let numeric = stripped.chars().all(|c| c.is_ascii_digit());
    if !numeric || stripped.chars().count() > MAX_TIME_DIGITS {
        return current.to_string();
    }
    stripped
}

/// Type one character at the end of the displayed value
pub fn push_time_char(current: &str, c: char) -> String {
    let mut edited = format_time(current);
    edited.push(c);
    apply_time_edit(current, &edited)
}

/// Delete the last stored digit
pub fn pop_time_char(current: &str) -> String {
    let mut digits = current.to_string();
    digits.pop();
    digits
}
