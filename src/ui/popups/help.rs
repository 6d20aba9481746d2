//! Help popup showing all keybindings organized by context.
//!
//! Opened and closed with F1; scrolls with the arrow keys or j/k.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::theme::ACCENT_COLOR;
use crate::ui::layout::centered_popup_area;

// ============================================================================
// Keybinding Data
// ============================================================================

const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Editing",
        &[
            ("Tab", "Next field"),
            ("Shift+Tab", "Previous field"),
            ("↑ / ↓", "Previous / next recipient"),
            ("Backspace", "Delete character"),
            ("Ctrl+U", "Clear field"),
            ("Paste", "Insert clipboard text"),
        ],
    ),
    (
        "Recipients",
        &[
            ("Ctrl+A", "Add recipient"),
            ("Ctrl+D", "Remove selected recipient"),
            ("Ctrl+S", "Toggle even split"),
        ],
    ),
    (
        "Transfer",
        &[
            ("Enter", "Preview transfer"),
            ("y / Enter", "Send previewed transfer"),
            ("n / Esc", "Cancel preview"),
            ("Ctrl+O", "Open last transfer in explorer"),
            ("Ctrl+L", "Copy last signature"),
        ],
    ),
    (
        "Account",
        &[
            ("Ctrl+Y", "Copy wallet address"),
            ("Ctrl+R", "Refresh balance"),
        ],
    ),
    (
        "Application",
        &[
            ("F1", "Toggle help"),
            ("Esc / Ctrl+Q", "Quit"),
        ],
    ),
];

// ============================================================================
// Public API
// ============================================================================

/// Renders the help popup with keybindings organized by section.
///
/// # Arguments
///
/// * `frame` - The Ratatui frame to render to
/// * `area` - The terminal area to render within
/// * `scroll_offset` - The current scroll position (in lines)
pub fn render(frame: &mut Frame, area: Rect, scroll_offset: u16) {
    let width = (area.width * 7 / 10).max(50).min(area.width);
    let height = (area.height * 8 / 10).max(20).min(area.height);
    let popup_area = centered_popup_area(area, width, height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help (F1 to close) ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT_COLOR));

    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let lines = help_lines(inner.width);
    let total_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_scroll = total_lines.saturating_sub(inner.height);
    let clamped_scroll = scroll_offset.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((clamped_scroll, 0));
    frame.render_widget(paragraph, inner);

    if max_scroll > 0 {
        render_scroll_indicator(frame, popup_area, clamped_scroll, max_scroll);
    }
}

// ============================================================================
// Internal Helpers
// ============================================================================

fn help_lines(width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (section_title, bindings) in HELP_SECTIONS {
        lines.push(Line::from(Span::styled(
            *section_title,
            Style::default()
                .fg(ACCENT_COLOR)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(
            "─".repeat(usize::from(width.saturating_sub(2))),
        ));

        for (key, description) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("{key:<14}"), Style::default().fg(ACCENT_COLOR)),
                Span::raw(*description),
            ]));
        }

        lines.push(Line::raw(""));
    }
    lines
}

/// Renders a scroll indicator at the bottom right of the popup.
fn render_scroll_indicator(frame: &mut Frame, popup_area: Rect, scroll: u16, max_scroll: u16) {
    let indicator = if scroll >= max_scroll {
        "━"
    } else if scroll == 0 {
        "┯"
    } else {
        "╂"
    };

    let indicator_area = Rect::new(
        popup_area.x + popup_area.width.saturating_sub(2),
        popup_area.y + popup_area.height.saturating_sub(1),
        1,
        1,
    );

    frame.render_widget(
        Paragraph::new(indicator).style(Style::default().fg(Color::DarkGray)),
        indicator_area,
    );
}

// ============================================================================
// Tests
// ============================================================================
