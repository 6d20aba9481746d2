//! UI state management for the SplitPay TUI.
//!
//! This module manages presentation concerns that are not part of the form
//! or the transfer flow:
//! - Popup/modal state
//! - Toast notifications
//! - The "copied" indicator next to the connected address
//! - The help overlay

mod popups;

pub use popups::PopupState;

// ============================================================================
// UI State
// ============================================================================

/// UI state: popups, toast and transient indicators.
///
/// Timers count main-loop ticks rather than wall time, so they freeze while
/// the loop is blocked and tests can drive them deterministically.
///
/// # Example
///
/// ```ignore
/// use crate::state::UiState;
///
/// let mut ui = UiState::new();
/// ui.show_toast("Operation completed!", 20);
/// ```
#[derive(Debug, Default)]
pub struct UiState {
    // === Popup State ===
    /// Current popup/modal state.
    pub popup_state: PopupState,

    // === Toast Notifications ===
    /// Toast notification message and remaining ticks (non-blocking overlay).
    pub toast: Option<(String, u16)>,

    // === Copied Indicator ===
    /// Remaining ticks of the "copied" indicator, if shown.
    pub copied_ticks: Option<u16>,

    // === Help Popup ===
    /// Whether the help popup is visible.
    pub show_help: bool,
    /// Scroll offset for help popup content.
    pub help_scroll_offset: u16,
}

impl UiState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Popup Management
    // ========================================================================

    /// Returns `true` if the popup is active.
    #[must_use]
    pub fn has_active_popup(&self) -> bool {
        self.popup_state.is_active()
    }

    /// Dismisses the current popup.
    pub fn dismiss_popup(&mut self) {
        self.popup_state = PopupState::None;
    }

    /// Shows a message popup.
    pub fn show_message(&mut self, message: impl Into<String>) {
        self.popup_state = PopupState::Message(message.into());
    }

    /// Opens the quit confirmation popup.
    pub fn open_confirm_quit(&mut self) {
        self.popup_state = PopupState::ConfirmQuit;
    }

    // ========================================================================
    // Toast Notifications
    // ========================================================================

    /// Shows a toast notification (non-blocking overlay that auto-dismisses).
    ///
    /// Duration is in ticks; a new toast replaces the current one.
    pub fn show_toast(&mut self, message: impl Into<String>, ticks: u16) {
        self.toast = Some((message.into(), ticks));
    }

    /// Decrements the toast countdown.
    ///
    /// # Returns
    ///
    /// `true` if the toast was removed (countdown reached zero).
    pub fn tick_toast(&mut self) -> bool {
        match &mut self.toast {
            Some((_, ticks)) if *ticks > 1 => {
                *ticks -= 1;
                false
            }
            Some(_) => {
                self.toast = None;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Copied Indicator
    // ========================================================================

    /// Shows the "copied" indicator for `ticks` ticks.
    ///
    /// A copy while the indicator is still visible restarts the countdown
    /// instead of stacking a second timer.
    pub fn start_copied_indicator(&mut self, ticks: u16) {
        self.copied_ticks = Some(ticks.max(1));
    }

    /// Returns `true` while the "copied" indicator is visible.
    #[must_use]
    pub fn is_copied(&self) -> bool {
        self.copied_ticks.is_some()
    }

    /// Decrements the copied-indicator countdown.
    pub fn tick_copied_indicator(&mut self) {
        self.copied_ticks = match self.copied_ticks {
            Some(ticks) if ticks > 1 => Some(ticks - 1),
            _ => None,
        };
    }

    // ========================================================================
    // Help Popup
    // ========================================================================

    /// Toggles the help popup visibility.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if !self.show_help {
            self.help_scroll_offset = 0;
        }
    }

    /// Scrolls help popup up by one line.
    pub fn scroll_help_up(&mut self) {
        self.help_scroll_offset = self.help_scroll_offset.saturating_sub(1);
    }

    /// Scrolls help popup down by one line.
    pub fn scroll_help_down(&mut self) {
        self.help_scroll_offset = self.help_scroll_offset.saturating_add(1);
    }

    /// Advances every tick-based timer by one tick.
    pub fn tick(&mut self) {
        self.tick_toast();
        self.tick_copied_indicator();
    }
}

// ============================================================================
// Tests
// ============================================================================
