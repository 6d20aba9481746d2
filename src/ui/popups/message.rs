//! Message popup rendering.
//!
//! A generic popup for wallet notices and transfer failures.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::ui::helpers::{create_popup_block, key_hints_line};
use crate::ui::layout::centered_popup_area;

// ============================================================================
// Public API
// ============================================================================

/// Renders a message popup sized to its content.
///
/// The width follows the longest line (at most 80% of the screen); long
/// lines wrap.
pub fn render(frame: &mut Frame, area: Rect, message: &str) {
    let (popup_width, popup_height) = popup_size(area, message);
    let popup_area = centered_popup_area(area, popup_width, popup_height);

    let popup_block = create_popup_block("Message");
    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup_block.clone(), popup_area);

    let inner_area = popup_block.inner(popup_area);
    let message_area = Rect::new(
        inner_area.x + 1,
        inner_area.y,
        inner_area.width.saturating_sub(2),
        inner_area.height.saturating_sub(2),
    );

    let prompt = Paragraph::new(message)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(prompt, message_area);

    if popup_area.height < 4 {
        return;
    }

    let separator = "─".repeat(usize::from(popup_area.width.saturating_sub(2)));
    let separator_area = Rect::new(
        popup_area.x + 1,
        popup_area.y + popup_area.height - 3,
        popup_area.width - 2,
        1,
    );
    frame.render_widget(
        Paragraph::new(separator).style(Style::default().fg(Color::DarkGray)),
        separator_area,
    );

    let help_area = Rect::new(
        popup_area.x,
        popup_area.y + popup_area.height - 2,
        popup_area.width,
        1,
    );
    frame.render_widget(
        Paragraph::new(key_hints_line(&[("Esc/Enter", "Close")])).alignment(Alignment::Center),
        help_area,
    );
}

/// Width and height for `message`, before clamping to the screen.
fn popup_size(area: Rect, message: &str) -> (u16, u16) {
    let longest_line = message
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let longest_line = u16::try_from(longest_line).unwrap_or(u16::MAX);

    let width = longest_line
        .saturating_add(6)
        .max(40)
        .min(area.width * 8 / 10);

    // Lines wider than the popup wrap onto extra rows.
    let text_width = usize::from(width.saturating_sub(4).max(1));
    let rows: usize = message
        .lines()
        .map(|line| line.chars().count().div_ceil(text_width).max(1))
        .sum();
    let rows = u16::try_from(rows.max(1)).unwrap_or(u16::MAX);

    (width, rows.saturating_add(4).max(6))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, test_terminal_80x24};
    use ratatui::{Terminal, backend::TestBackend};
    use rstest::rstest;

    #[rstest]
    fn test_multiline_message(mut test_terminal_80x24: Terminal<TestBackend>) {
        let message = "Transfer failed:\n\nRPC error -32002: Transaction simulation failed";

        test_terminal_80x24
            .draw(|frame| render(frame, frame.area(), message))
            .unwrap();

        let text = buffer_text(&test_terminal_80x24);
        assert!(text.contains("Transfer failed:"));
        assert!(text.contains("RPC error -32002: Transaction simulation failed"));
        assert!(text.contains("Esc/Enter:Close"));
    }

    #[rstest]
    fn test_empty_message_does_not_panic(mut test_terminal_80x24: Terminal<TestBackend>) {
        test_terminal_80x24
            .draw(|frame| render(frame, frame.area(), ""))
            .unwrap();
        assert!(buffer_text(&test_terminal_80x24).contains(" Message "));
    }

    #[rstest]
    #[case::short("Done", Rect::new(0, 0, 80, 24), (40, 6))]
    #[case::three_lines("a\nb\nc", Rect::new(0, 0, 80, 24), (40, 7))]
    #[case::wraps(&"x".repeat(100), Rect::new(0, 0, 80, 24), (64, 6))]
    fn test_popup_size(#[case] message: &str, #[case] area: Rect, #[case] expected: (u16, u16)) {
        assert_eq!(popup_size(area, message), expected);
    }
}
