//! Popup state types for the SplitPay TUI.
//!
//! The transfer confirmation is not a popup state: it is shown whenever the
//! transfer flow holds a preview, so the two can never disagree.

// ============================================================================
// Popup State
// ============================================================================

/// Represents the current popup/modal state.
///
/// Only one popup can be active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopupState {
    /// No popup is displayed.
    #[default]
    None,
    /// Message/notification popup, e.g. a failed preview or send.
    Message(String),
    /// Quit confirmation popup.
    ConfirmQuit,
}

impl PopupState {
    /// Returns `true` if there is an active popup.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// The message text if a message popup is shown.
    #[must_use]
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => Some(message),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
