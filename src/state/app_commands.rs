//! Command execution and input handling for the SplitPay application.
//!
//! This module maps keyboard input to commands and executes those commands
//! to update application state.

use crossterm::event::KeyEvent;

use super::{App, PopupState};
use crate::commands::{AppCommand, InputContext, map_key};

impl App {
    pub(crate) fn handle_key_event(&mut self, key_event: KeyEvent) {
        let context = self.get_input_context();
        let command = map_key(key_event, &context);
        self.execute_command(command);
    }

    /// Inserts pasted text into the focused field.
    ///
    /// Pastes are ignored while a popup or preview is shown, and refused
    /// like any other edit while a transfer is in flight.
    pub(crate) fn handle_paste(&mut self, text: &str) {
        if !self.get_input_context().accepts_text_input() {
            return;
        }
        if !self.transfer.is_editing() {
            self.show_form_locked();
            return;
        }
        self.form.paste(text);
    }

    fn show_form_locked(&mut self) {
        self.ui
            .show_toast("[x] Form is locked while a transfer is in progress", self.toast_ticks());
    }

    /// Determines the current input context based on application state.
    #[must_use]
    pub fn get_input_context(&self) -> InputContext {
        if self.ui.show_help {
            return InputContext::HelpPopup;
        }

        match &self.ui.popup_state {
            PopupState::ConfirmQuit => InputContext::ConfirmQuit,
            PopupState::Message(_) => InputContext::MessagePopup,
            PopupState::None => {
                if self.transfer.preview().is_some() {
                    InputContext::ConfirmTransfer
                } else {
                    InputContext::Form
                }
            }
        }
    }

    /// Executes an application command.
    pub(crate) fn execute_command(&mut self, command: AppCommand) {
        if command.edits_form() && !self.transfer.is_editing() {
            self.show_form_locked();
            return;
        }

        match command {
            // === Application Control ===
            AppCommand::RequestQuit => {
                self.ui.open_confirm_quit();
            }
            AppCommand::ConfirmQuit => {
                self.exit = true;
            }
            AppCommand::ToggleHelp => {
                self.ui.toggle_help();
            }
            AppCommand::Dismiss => {
                self.ui.dismiss_popup();
            }

            // === Form Navigation ===
            AppCommand::NextField => {
                self.form.next_field();
            }
            AppCommand::PrevField => {
                self.form.prev_field();
            }
            AppCommand::NextRecipient => {
                self.form.select_next();
            }
            AppCommand::PrevRecipient => {
                self.form.select_prev();
            }

            // === Form Editing ===
            AppCommand::TypeChar(c) => {
                self.form.push_char(c);
            }
            AppCommand::Backspace => {
                self.form.backspace();
            }
            AppCommand::ClearField => {
                self.form.clear_field();
            }
            AppCommand::AddRecipient => {
                self.add_recipient();
            }
            AppCommand::RemoveRecipient => {
                self.remove_recipient();
            }
            AppCommand::ToggleSplit => {
                self.form.toggle_split();
            }

            // === Transfer ===
            AppCommand::Submit => {
                self.submit();
            }
            AppCommand::ConfirmTransfer => {
                self.confirm_transfer();
            }
            AppCommand::CancelTransfer => {
                if self.transfer.cancel() {
                    self.ui.show_toast("Transfer cancelled", self.toast_ticks());
                }
            }

            // === Account & Results ===
            AppCommand::CopyAddress => {
                self.copy_address();
            }
            AppCommand::CopySignature => {
                self.copy_signature();
            }
            AppCommand::OpenExplorer => {
                self.open_explorer();
            }
            AppCommand::RefreshBalance => {
                self.refresh_balance();
            }

            // === Help Popup ===
            AppCommand::ScrollHelpUp => {
                self.ui.scroll_help_up();
            }
            AppCommand::ScrollHelpDown => {
                self.ui.scroll_help_down();
            }

            AppCommand::Noop => {}
        }
    }
}
