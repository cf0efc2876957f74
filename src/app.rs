//! Application state and core logic

use crate::config::IntakeConfig;
use crate::platform::COPY_MODIFIER;
use crate::state::{AppState, Control, FieldKey, Form};
use crate::submit::{ReceiptHandler, SubmitHandler};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Receives validated intakes
    handler: Box<dyn SubmitHandler>,
    /// Whether the app should quit
    quit: bool,
    /// Copy feedback message
    pub copy_message: Option<String>,
}

impl App {
    /// Create a new App instance with the default submit handler
    pub fn new(config: &IntakeConfig) -> Self {
        Self::with_handler(config, Box::new(ReceiptHandler))
    }

    pub fn with_handler(config: &IntakeConfig, handler: Box<dyn SubmitHandler>) -> Self {
        Self {
            state: AppState::new(config),
            handler,
            quit: false,
            copy_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.quit = true;
            return Ok(());
        }

        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.copy_message = None;

        if key.modifiers.contains(COPY_MODIFIER) && key.code == KeyCode::Char('y') {
            return self.copy_intake();
        }

        if self.state.show_summary {
            self.handle_summary_key(key);
            return Ok(());
        }

        if ctrl {
            if key.code == KeyCode::Char('s') {
                self.submit()?;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            KeyCode::Enter => {
                if self.state.form.is_submit_active() {
                    self.submit()?;
                } else {
                    self.state.form.next_field();
                }
            }
            KeyCode::Up | KeyCode::Down if self.active_control_is_line() => {
                if key.code == KeyCode::Up {
                    self.state.form.prev_field();
                } else {
                    self.state.form.next_field();
                }
            }
            code => {
                if let Some(field_key) = to_field_key(code) {
                    self.edit_active_field(field_key)?;
                }
            }
        }

        Ok(())
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.state.show_summary = false,
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.state.reset_form();
                tracing::info!("Started new intake");
            }
            _ => {}
        }
    }

    /// Text-like controls use Up/Down for field navigation
    fn active_control_is_line(&self) -> bool {
        match self.state.form.get_field(self.state.form.active_field()) {
            Some(field) => matches!(
                field.control,
                Control::Text { .. } | Control::Date { .. } | Control::Time
            ),
            None => true,
        }
    }

    fn edit_active_field(&mut self, key: FieldKey) -> Result<()> {
        let state = &mut self.state;
        if let Some(change) = state.form.handle_key(key, state.session.form()) {
            state.session.apply(change)?;
        }
        Ok(())
    }

    /// Validate the form; on success hand the record to the submit handler
    pub fn submit(&mut self) -> Result<()> {
        match self.state.session.submit()? {
            Some(intake) => match self.handler.on_validated(&intake) {
                Ok(receipt) => {
                    self.state.receipt = Some(receipt);
                    self.state.show_summary = true;
                }
                Err(e) => self.push_error(format!("Failed to submit intake: {e}")),
            },
            None => {
                if let Some(first) = self.state.session.errors().fields().next() {
                    self.state.form.focus(first);
                }
            }
        }
        Ok(())
    }

    /// Copy the last validated intake as JSON
    fn copy_intake(&mut self) -> Result<()> {
        let Some(receipt) = &self.state.receipt else {
            self.copy_message = Some("Nothing to copy yet".to_string());
            return Ok(());
        };

        let json = serde_json::to_string_pretty(&receipt.intake)?;
        match self.copy_to_clipboard(&json) {
            Ok(()) => self.copy_message = Some("Copied intake to clipboard".to_string()),
            Err(e) => self.push_error(format!("Failed to copy: {e}")),
        }
        Ok(())
    }

    /// Copy text to system clipboard
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

fn to_field_key(code: KeyCode) -> Option<FieldKey> {
    match code {
        KeyCode::Char(c) => Some(FieldKey::Char(c)),
        KeyCode::Backspace => Some(FieldKey::Backspace),
        KeyCode::Up => Some(FieldKey::Up),
        KeyCode::Down => Some(FieldKey::Down),
        KeyCode::Left => Some(FieldKey::Left),
        KeyCode::Right => Some(FieldKey::Right),
        _ => None,
    }
}
