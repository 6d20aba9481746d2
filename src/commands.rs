//! Command pattern for key event handling in the TUI application.
//!
//! Key input is translated into [`AppCommand`]s by [`KeyMapper`] according
//! to the current [`InputContext`], so keybindings can be tested without an
//! `App`.
//!
//! # Example
//!
//! ```ignore
//! let context = app.get_input_context();
//! let command = map_key(key_event, &context);
//! app.execute_command(command);
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ============================================================================
// Input Context
// ============================================================================

/// Represents the current input context for key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Editing the recipient form.
    Form,
    /// A quoted transfer waits for confirmation.
    ConfirmTransfer,
    /// Quit confirmation popup is open.
    ConfirmQuit,
    /// Viewing a message/notification popup.
    MessagePopup,
    /// Help overlay is open.
    HelpPopup,
}

impl InputContext {
    /// Returns `true` if this context represents a popup/overlay state.
    #[must_use]
    pub const fn is_popup(&self) -> bool {
        !matches!(self, Self::Form)
    }

    /// Returns `true` if this context accepts text input.
    #[must_use]
    pub const fn accepts_text_input(&self) -> bool {
        matches!(self, Self::Form)
    }
}

// ============================================================================
// App Commands
// ============================================================================

/// All possible commands the application can execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    // === Application Control ===
    /// Ask before exiting.
    RequestQuit,
    /// Exit the application.
    ConfirmQuit,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Close the current popup.
    Dismiss,

    // === Form Navigation ===
    NextField,
    PrevField,
    NextRecipient,
    PrevRecipient,

    // === Form Editing ===
    /// Type a character into the focused field.
    TypeChar(char),
    /// Delete the last character of the focused field.
    Backspace,
    /// Clear the focused field.
    ClearField,
    AddRecipient,
    RemoveRecipient,
    ToggleSplit,

    // === Transfer ===
    /// Validate and quote the batch.
    Submit,
    /// Send the previewed batch.
    ConfirmTransfer,
    /// Discard the preview.
    CancelTransfer,

    // === Account & Results ===
    /// Copy the connected address to the clipboard.
    CopyAddress,
    /// Copy the last transaction signature to the clipboard.
    CopySignature,
    /// Open the last transaction in the block explorer.
    OpenExplorer,
    /// Fetch the balance again.
    RefreshBalance,

    // === Help Popup ===
    ScrollHelpUp,
    ScrollHelpDown,

    // === No Operation ===
    /// No action to perform (unhandled key).
    Noop,
}

impl AppCommand {
    /// Returns `true` if this command would exit the application.
    #[must_use]
    pub const fn is_exit(&self) -> bool {
        matches!(self, Self::ConfirmQuit)
    }

    /// Returns `true` if this command changes form content.
    #[must_use]
    pub const fn edits_form(&self) -> bool {
        matches!(
            self,
            Self::TypeChar(_)
                | Self::Backspace
                | Self::ClearField
                | Self::AddRecipient
                | Self::RemoveRecipient
                | Self::ToggleSplit
        )
    }
}

// ============================================================================
// Key Mapper
// ============================================================================

/// Maps key events to application commands based on the current input context.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyMapper;

impl KeyMapper {
    /// Maps a key event to an application command based on the current context.
    #[must_use]
    pub fn map_key(key: KeyEvent, context: &InputContext) -> AppCommand {
        match context {
            InputContext::Form => Self::map_form_keys(key),
            InputContext::ConfirmTransfer => Self::map_confirm_transfer_keys(key),
            InputContext::ConfirmQuit => Self::map_confirm_quit_keys(key),
            InputContext::MessagePopup => Self::map_message_popup_keys(key),
            InputContext::HelpPopup => Self::map_help_popup_keys(key),
        }
    }

    /// Maps keys while editing the form.
    ///
    /// Plain characters are text; commands live on Ctrl chords and function
    /// keys so that every printable key can be typed into a field.
    fn map_form_keys(key: KeyEvent) -> AppCommand {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c' | 'q') => AppCommand::RequestQuit,
                KeyCode::Char('a') => AppCommand::AddRecipient,
                KeyCode::Char('d') => AppCommand::RemoveRecipient,
                KeyCode::Char('s') => AppCommand::ToggleSplit,
                KeyCode::Char('u') => AppCommand::ClearField,
                KeyCode::Char('y') => AppCommand::CopyAddress,
                KeyCode::Char('l') => AppCommand::CopySignature,
                KeyCode::Char('o') => AppCommand::OpenExplorer,
                KeyCode::Char('r') => AppCommand::RefreshBalance,
                _ => AppCommand::Noop,
            };
        }

        match key.code {
            KeyCode::Esc => AppCommand::RequestQuit,
            KeyCode::F(1) => AppCommand::ToggleHelp,
            KeyCode::Tab => AppCommand::NextField,
            KeyCode::BackTab => AppCommand::PrevField,
            KeyCode::Down => AppCommand::NextRecipient,
            KeyCode::Up => AppCommand::PrevRecipient,
            KeyCode::Enter => AppCommand::Submit,
            KeyCode::Backspace => AppCommand::Backspace,
            KeyCode::Char(c) => AppCommand::TypeChar(c),
            _ => AppCommand::Noop,
        }
    }

    /// Maps keys in the transfer confirmation popup.
    fn map_confirm_transfer_keys(key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => AppCommand::ConfirmTransfer,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => AppCommand::CancelTransfer,
            _ => AppCommand::Noop,
        }
    }

    /// Maps keys in the quit confirmation popup.
    fn map_confirm_quit_keys(key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('y' | 'Y' | 'q') | KeyCode::Enter => AppCommand::ConfirmQuit,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => AppCommand::Dismiss,
            _ => AppCommand::Noop,
        }
    }

    /// Maps keys in the message popup.
    fn map_message_popup_keys(key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => AppCommand::Dismiss,
            _ => AppCommand::Noop,
        }
    }

    /// Maps keys in the help popup.
    fn map_help_popup_keys(key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') => AppCommand::ToggleHelp,
            KeyCode::Up | KeyCode::Char('k') => AppCommand::ScrollHelpUp,
            KeyCode::Down | KeyCode::Char('j') => AppCommand::ScrollHelpDown,
            _ => AppCommand::Noop,
        }
    }
}

/// Maps a key event to a command; shorthand for [`KeyMapper::map_key`].
#[must_use]
pub fn map_key(key: KeyEvent, context: &InputContext) -> AppCommand {
    KeyMapper::map_key(key, context)
}

// ============================================================================
// Tests
// ============================================================================
