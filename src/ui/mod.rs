//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use components::{render_error_dialog, render_summary_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    forms::draw_intake_form(frame, main_area, app);
    layout::draw_status_bar(frame, status_area, app);

    if app.state.show_summary {
        if let Some(receipt) = &app.state.receipt {
            render_summary_dialog(frame, receipt);
        }
    }

    // Error dialog sits above everything else
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldId;
    use crate::config::IntakeConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_fresh_form_shows_first_section_and_button() {
        let app = App::new(&IntakeConfig::default());
        let screen = render(&app, 100, 40);
        assert!(screen.contains("Basic Intake Information"));
        assert!(screen.contains("Organ Type(s)"));
        assert!(screen.contains("Submit for Intake"));
        assert!(!screen.contains("Intake Errors"));
    }

    #[test]
    fn test_failed_submit_shows_error_panel() {
        let mut app = App::new(&IntakeConfig::default());
        app.submit().unwrap();
        let screen = render(&app, 100, 60);
        assert!(screen.contains("Intake Errors"));
        assert!(screen.contains("Please correct the following errors"));
    }

    #[test]
    fn test_error_panel_lists_every_message_on_small_terminal() {
        let mut app = App::new(&IntakeConfig::default());
        app.submit().unwrap();
        let screen = render(&app, 80, 24);
        let messages: Vec<_> = app.state.session.errors().messages().collect();
        assert_eq!(messages.len(), 12);
        for message in messages {
            assert!(screen.contains(message), "missing from panel: {message}");
        }
        assert!(screen.contains("Submit for Intake"));
    }

    #[test]
    fn test_section_subtitle_rendered() {
        let app = App::new(&IntakeConfig::default());
        let screen = render(&app, 100, 40);
        assert!(screen.contains("Basic information about the donor and donor organ(s)."));
    }

    #[test]
    fn test_scrolls_to_living_donor_section() {
        let mut app = App::new(&IntakeConfig::default());
        app.state.form.focus(FieldId::AbleToBeContacted);
        let screen = render(&app, 100, 30);
        assert!(screen.contains("Is the donor able to be contacted?"));
    }

    #[test]
    fn test_error_dialog_rendered() {
        let mut app = App::new(&IntakeConfig::default());
        app.push_error("Failed to copy: no clipboard");
        let screen = render(&app, 100, 40);
        assert!(screen.contains("no clipboard"));
    }
}
