//! Footer rendering module for the SplitPay TUI.
//!
//! Shows the keys that work in the current input context.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    widgets::Paragraph,
};

use crate::commands::InputContext;
use crate::state::App;

use super::helpers::key_hints_line;

// ============================================================================
// Footer Rendering
// ============================================================================

/// Renders the footer bar with keyboard shortcuts.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let hints = hints_for(app.get_input_context(), app.transfer.is_busy());
    let footer = Paragraph::new(key_hints_line(hints)).alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

/// Key hints per input context.
#[must_use]
pub fn hints_for(context: InputContext, busy: bool) -> &'static [(&'static str, &'static str)] {
    match context {
        InputContext::Form if busy => &[("^R", "Balance"), ("F1", "Help"), ("Esc", "Quit")],
        InputContext::Form => &[
            ("Tab", "Field"),
            ("↑↓", "Row"),
            ("^A", "Add"),
            ("^D", "Remove"),
            ("^S", "Split"),
            ("Enter", "Preview"),
            ("F1", "Help"),
            ("Esc", "Quit"),
        ],
        InputContext::ConfirmTransfer => &[("y/Enter", "Send"), ("n/Esc", "Cancel")],
        InputContext::ConfirmQuit => &[("y", "Quit"), ("n/Esc", "Stay")],
        InputContext::MessagePopup => &[("Esc/Enter", "Close")],
        InputContext::HelpPopup => &[("↑↓", "Scroll"), ("Esc/F1", "Close")],
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{AppMother, buffer_text};
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_footer_shows_form_shortcuts() {
        let app = AppMother::connected();
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();

        terminal
            .draw(|frame| render(frame, frame.area(), &app))
            .unwrap();

        let content = buffer_text(&terminal);
        for shortcut in ["Tab:Field", "^A:Add", "^S:Split", "Enter:Preview", "Esc:Quit"] {
            assert!(
                content.contains(shortcut),
                "Footer should contain '{shortcut}', got: {content}"
            );
        }
    }

    #[test]
    fn test_footer_follows_context() {
        let mut app = AppMother::connected();
        app.ui.open_confirm_quit();
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();

        terminal
            .draw(|frame| render(frame, frame.area(), &app))
            .unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains("y:Quit"));
        assert!(!content.contains("^A:Add"));
    }

    #[test]
    fn test_busy_form_hides_editing_keys() {
        let hints = hints_for(InputContext::Form, true);
        assert!(hints.iter().all(|(key, _)| *key != "^A"));
    }

    #[test]
    fn test_footer_zero_height_does_not_panic() {
        let app = AppMother::disconnected();
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|frame| render(frame, Rect::new(0, 0, 80, 0), &app))
            .unwrap();
    }
}
