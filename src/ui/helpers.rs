//! UI helper functions for creating styled blocks and widgets.
//!
//! Shared by the panels and popups so that borders, input fields and key
//! hints look the same everywhere.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders},
};

use crate::theme::{
    ACTIVE_INPUT_STYLE, BORDER_STYLE, FOCUSED_BORDER_STYLE, FOCUSED_TITLE_STYLE, MUTED_COLOR,
    PRIMARY_COLOR,
};

/// Cursor drawn after the text of the field being edited.
pub const CURSOR: &str = "▏";

// ============================================================================
// Border Block Helpers
// ============================================================================

/// Creates a bordered block with proper styling based on focus state.
///
/// # Arguments
///
/// * `title` - The title text to display in the block border
/// * `focused` - Whether the block should be styled as focused/active
#[must_use]
pub fn create_border_block(title: &str, focused: bool) -> Block<'_> {
    let (border_style, border_set, title_style, display_title) = if focused {
        (
            FOCUSED_BORDER_STYLE,
            border::DOUBLE,
            FOCUSED_TITLE_STYLE,
            if title.is_empty() {
                String::new()
            } else {
                format!(" ● {title} ")
            },
        )
    } else {
        (
            BORDER_STYLE,
            border::ROUNDED,
            Style::new()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            if title.is_empty() {
                String::new()
            } else {
                format!(" {title} ")
            },
        )
    };

    Block::default()
        .borders(Borders::ALL)
        .title(display_title)
        .title_style(title_style)
        .border_set(border_set)
        .border_style(border_style)
}

/// Creates a popup-style block with centered title and rounded borders.
#[must_use]
pub fn create_popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(BORDER_STYLE)
}

// ============================================================================
// Text Helpers
// ============================================================================

/// Renders an input field's text.
///
/// Empty fields show `placeholder` in the muted color. The active field gets
/// the input highlight and a trailing cursor.
#[must_use]
pub fn input_span<'a>(text: &'a str, placeholder: &'a str, active: bool, style: Style) -> Span<'a> {
    match (text.is_empty(), active) {
        (true, false) => Span::styled(placeholder, Style::default().fg(MUTED_COLOR)),
        (true, true) => Span::styled(CURSOR, ACTIVE_INPUT_STYLE),
        (false, false) => Span::styled(text, style),
        (false, true) => Span::styled(format!("{text}{CURSOR}"), style.patch(ACTIVE_INPUT_STYLE)),
    }
}

/// Builds a `key:Action  key:Action` hint line with highlighted keys.
#[must_use]
pub fn key_hints_line(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(PRIMARY_COLOR)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(MUTED_COLOR);

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, action)) in hints.iter().enumerate() {
        let separator = if i + 1 == hints.len() { "" } else { "  " };
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(":{action}{separator}"), text_style));
    }
    Line::from(spans)
}

// ============================================================================
// Tests
// ============================================================================
