//! UI rendering module for the SplitPay TUI.
//!
//! This module provides the main rendering entry point and orchestrates
//! rendering of all UI components including panels, popups, and overlays.
//!
//! # Module Structure
//!
//! - `panels` - Recipients and summary panels
//! - `popups` - Modal dialogs (transfer confirmation, quit, messages, help)
//! - `components` - Reusable UI components (toast notifications)
//! - `layout` - Layout calculations and structs
//! - `header` - Header bar rendering
//! - `footer` - Footer bar rendering
//! - `helpers` - Shared helper functions for creating styled blocks

pub mod components;
pub mod footer;
pub mod header;
pub mod helpers;
pub mod layout;
pub mod panels;
pub mod popups;

use ratatui::{Frame, layout::Rect};

use crate::state::{App, PopupState};

// ============================================================================
// Main Render Entry Point
// ============================================================================

/// Main render function that orchestrates all UI rendering.
///
/// Draws, in order: header, panels and footer; then the active popup (or
/// the transfer preview); then help; and the toast on top of everything.
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();
    let app_layout = layout::calculate_app_layout(size);

    header::render(frame, app_layout.header, app);
    render_main_content(app, frame, app_layout.main);
    footer::render(frame, app_layout.footer, app);

    render_popups(app, frame, size);

    if app.ui.show_help {
        popups::render_help(frame, size, app.ui.help_scroll_offset);
    }

    if let Some((message, _)) = &app.ui.toast {
        components::render_toast(frame, size, message);
    }
}

// ============================================================================
// Internal Rendering Functions
// ============================================================================

fn render_main_content(app: &App, frame: &mut Frame, area: Rect) {
    let panel_layout = layout::calculate_panel_layout(area);

    panels::render_recipients(app, frame, panel_layout.recipients);
    panels::render_summary(app, frame, panel_layout.summary);
}

/// The preview popup is derived from the transfer flow; the others from
/// [`PopupState`], which takes precedence.
fn render_popups(app: &App, frame: &mut Frame, area: Rect) {
    match &app.ui.popup_state {
        PopupState::Message(message) => popups::render_message_popup(frame, area, message),
        PopupState::ConfirmQuit => popups::render_quit_confirm(frame, area),
        PopupState::None => {
            if let Some(preview) = app.transfer.preview() {
                popups::render_transfer_confirm(frame, area, preview, app.cluster());
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
