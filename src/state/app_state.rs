//! Application state definitions

use super::forms::IntakeForm;
use super::intake_session::IntakeSession;
use crate::config::IntakeConfig;
use crate::submit::SubmissionReceipt;
use std::collections::VecDeque;

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// Field values, validation errors and lifecycle
    pub session: IntakeSession,
    /// Widget state and focus
    pub form: IntakeForm,
    /// Receipt of the last accepted intake
    pub receipt: Option<SubmissionReceipt>,
    /// Whether the success summary dialog is open
    pub show_summary: bool,
    /// Queued messages for the error dialog
    error_queue: VecDeque<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&IntakeConfig::default())
    }
}

impl AppState {
    pub fn new(config: &IntakeConfig) -> Self {
        Self {
            session: IntakeSession::new(config.revalidate_on_change()),
            form: IntakeForm::new(config.checkbox_columns()),
            receipt: None,
            show_summary: false,
            error_queue: VecDeque::new(),
        }
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// Message currently shown by the error dialog
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    /// Close the error dialog, revealing the next queued message
    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    /// Start a fresh intake
    pub fn reset_form(&mut self) {
        self.session.reset();
        self.form.reset();
        self.receipt = None;
        self.show_summary = false;
    }
}
