//! Toast notification component.
//!
//! A non-blocking overlay in the bottom-right corner. Messages prefixed with
//! `[+]` or `[x]` are shown as success or error with a matching icon; the
//! prefix itself is not displayed.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::theme::{ERROR_COLOR, SUCCESS_COLOR};

// ============================================================================
// Constants
// ============================================================================

/// Minimum width for toast notifications.
const MIN_TOAST_WIDTH: u16 = 20;

/// Height of toast notifications.
const TOAST_HEIGHT: u16 = 3;

/// Horizontal padding from the right edge.
const TOAST_PADDING_RIGHT: u16 = 2;

/// Vertical padding from the bottom edge; keeps the footer visible.
const TOAST_PADDING_BOTTOM: u16 = 2;

/// Borders, icon and spacing around the message.
const TOAST_WIDTH_PADDING: u16 = 6;

// ============================================================================
// Toast Kind
// ============================================================================

/// Kind of notification, decided by the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    /// Splits a toast message into its kind and the text to display.
    #[must_use]
    pub fn parse(message: &str) -> (Self, &str) {
        if let Some(rest) = message.strip_prefix("[+]") {
            (Self::Success, rest.trim_start())
        } else if let Some(rest) = message.strip_prefix("[x]") {
            (Self::Error, rest.trim_start())
        } else {
            (Self::Info, message)
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✗",
            Self::Info => "•",
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Success => SUCCESS_COLOR,
            Self::Error => ERROR_COLOR,
            Self::Info => Color::White,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Renders a toast notification in the bottom-right corner of `area`.
pub fn render_toast(frame: &mut Frame, area: Rect, message: &str) {
    let (kind, text) = ToastKind::parse(message);
    let toast_area = calculate_toast_position(area, text);

    frame.render_widget(Clear, toast_area);

    let toast_block = create_toast_block();
    frame.render_widget(toast_block.clone(), toast_area);

    let style = Style::default().fg(kind.color());
    let line = Line::from(vec![
        Span::styled(format!("{} ", kind.icon()), style),
        Span::styled(text, style),
    ]);

    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        toast_block.inner(toast_area),
    );
}

// ============================================================================
// Internal Helpers
// ============================================================================

#[must_use]
fn calculate_toast_position(area: Rect, text: &str) -> Rect {
    let text_len = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    let toast_width = text_len
        .saturating_add(TOAST_WIDTH_PADDING)
        .min(area.width / 2)
        .max(MIN_TOAST_WIDTH)
        .min(area.width);

    let toast_x = area.x + area.width.saturating_sub(toast_width + TOAST_PADDING_RIGHT);
    let toast_y = area.y
        + area
            .height
            .saturating_sub(TOAST_HEIGHT + TOAST_PADDING_BOTTOM);

    Rect::new(toast_x, toast_y, toast_width, TOAST_HEIGHT.min(area.height))
}

#[must_use]
fn create_toast_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::DarkGray))
        .style(Style::default().bg(Color::Black))
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
    #[case("[+] Address copied to clipboard", ToastKind::Success, "Address copied to clipboard")]
    #[case("[x] Recipient limit reached", ToastKind::Error, "Recipient limit reached")]
    #[case("Transfer cancelled", ToastKind::Info, "Transfer cancelled")]
    #[case("", ToastKind::Info, "")]
    fn test_parse(#[case] message: &str, #[case] kind: ToastKind, #[case] text: &str) {
        assert_eq!(ToastKind::parse(message), (kind, text));
    }

    #[rstest]
    #[case::short("Hi", Rect::new(0, 0, 100, 50))]
    #[case::long(
        "This is a very long message that should be constrained to half the screen",
        Rect::new(0, 0, 100, 50)
    )]
    #[case::small_area("Copied", Rect::new(0, 0, 30, 10))]
    fn test_toast_stays_inside_area(#[case] text: &str, #[case] area: Rect) {
        let toast = calculate_toast_position(area, text);

        assert_eq!(toast.height, TOAST_HEIGHT);
        assert!(toast.width >= MIN_TOAST_WIDTH);
        assert!(toast.right() <= area.right());
        assert!(toast.bottom() <= area.bottom());
    }

    #[rstest]
    fn test_render_strips_prefix(mut test_terminal_80x24: Terminal<TestBackend>) {
        test_terminal_80x24
            .draw(|frame| render_toast(frame, frame.area(), "[+] Sent 5VERv8...kQUW"))
            .unwrap();

        let text = buffer_text(&test_terminal_80x24);
        assert!(text.contains("✓ Sent 5VERv8...kQUW"));
        assert!(!text.contains("[+]"));
    }
}
