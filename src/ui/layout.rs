//! Layout calculations for the SplitPay TUI
//!
//! This module provides layout structs and helper functions for
//! calculating UI element positions and sizes.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::constants::{
    FOOTER_HEIGHT, HEADER_HEIGHT, NARROW_LAYOUT_WIDTH, RECIPIENT_ROW_HEIGHT, SUMMARY_WIDTH,
};

/// Height of the summary panel when stacked under the recipients.
pub const STACKED_SUMMARY_HEIGHT: u16 = 10;

// ============================================================================
// Layout Structs
// ============================================================================

/// Main application layout areas
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    /// Header area (title, cluster, account)
    pub header: Rect,
    /// Main content area (panels)
    pub main: Rect,
    /// Footer area (keybinding hints)
    pub footer: Rect,
}

/// Recipients and summary panels
#[derive(Debug, Clone, Copy)]
pub struct PanelLayout {
    pub recipients: Rect,
    pub summary: Rect,
}

// ============================================================================
// Layout Functions
// ============================================================================

/// Calculate the main application layout from the terminal area
#[must_use]
pub fn calculate_app_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    AppLayout {
        header: chunks[0],
        main: chunks[1],
        footer: chunks[2],
    }
}

/// Side by side on wide terminals, summary below the list on narrow ones.
#[must_use]
pub fn calculate_panel_layout(area: Rect) -> PanelLayout {
    let chunks = if area.width < NARROW_LAYOUT_WIDTH {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(RECIPIENT_ROW_HEIGHT + 2),
                Constraint::Length(STACKED_SUMMARY_HEIGHT),
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(SUMMARY_WIDTH)])
            .split(area)
    };

    PanelLayout {
        recipients: chunks[0],
        summary: chunks[1],
    }
}

/// Calculate a centered popup area within a parent area
///
/// # Arguments
/// * `parent` - The parent area to center within
/// * `width` - Desired popup width in columns
/// * `height` - Desired popup height in rows
#[must_use]
pub fn centered_popup_area(parent: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(parent.width.saturating_sub(4));
    let popup_height = height.min(parent.height.saturating_sub(4));

    let popup_x = parent.x + (parent.width.saturating_sub(popup_width)) / 2;
    let popup_y = parent.y + (parent.height.saturating_sub(popup_height)) / 2;

    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// First row to draw so that `selected` stays inside a window of `visible`
/// rows out of `len`.
#[must_use]
pub fn window_start(selected: usize, visible: usize, len: usize) -> usize {
    if visible == 0 || len <= visible {
        return 0;
    }
    let last_start = len - visible;
    selected.saturating_sub(visible - 1).min(last_start)
}

// ============================================================================
// Tests
// ============================================================================
