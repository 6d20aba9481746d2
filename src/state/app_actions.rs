//! User actions: submit, confirm, clipboard and browser.
//!
//! Network work is spawned onto the runtime and reported back through
//! [`AppMessage`]; these methods only start it and update local state.

use super::platform::ClipboardManager;
use super::{App, AppMessage, BalanceState};
use crate::client::LedgerClient;
use crate::constants::{ADDRESS_LEADING_CHARS, ADDRESS_TRAILING_CHARS};
use crate::domain::truncate_address;
use crate::state::transfer::{execute_transfer, quote_transfer};

impl App {
    /// Toast lifetime from the configuration.
    pub(crate) fn toast_ticks(&self) -> u16 {
        self.config.toast_ticks()
    }

    // ========================================================================
    // Recipients
    // ========================================================================

    pub(crate) fn add_recipient(&mut self) {
        if self.form.add_recipient().is_none() {
            self.ui
                .show_toast("[x] Recipient limit reached", self.toast_ticks());
        }
    }

    pub(crate) fn remove_recipient(&mut self) {
        if !self.form.remove_selected() {
            self.ui
                .show_toast("[x] At least one recipient is required", self.toast_ticks());
        }
    }

    // ========================================================================
    // Transfer
    // ========================================================================

    /// Validates the form and starts quoting the batch.
    ///
    /// Declined unless the flow is editing, the form is valid and an account
    /// is connected.
    pub(crate) fn submit(&mut self) {
        if !self.transfer.is_editing() {
            tracing::debug!(phase = self.transfer.phase().label(), "submit while busy");
            self.ui
                .show_toast("[x] A transfer is already in progress", self.toast_ticks());
            return;
        }

        let validation = self.form.validate();
        if !validation.is_valid() {
            let messages = validation.messages(self.form.recipients());
            for message in &messages {
                tracing::debug!(%message, "submit blocked");
            }
            let noun = if messages.len() == 1 { "error" } else { "errors" };
            self.ui.show_toast(
                format!("[x] Fix {} field {noun} before sending", messages.len()),
                self.toast_ticks(),
            );
            return;
        }

        let Some(payer) = self.wallet.payer() else {
            tracing::debug!("submit without wallet");
            self.ui.show_toast("[x] No wallet connected", self.toast_ticks());
            return;
        };

        let instructions = match self.form.build_instructions(payer) {
            Ok(instructions) => instructions,
            Err(e) => {
                tracing::debug!(error = %e, "submit blocked");
                self.ui.show_toast(format!("[x] {e}"), self.toast_ticks());
                return;
            }
        };

        if !self.transfer.begin_quote() {
            return;
        }

        let client = self.client.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let message = match quote_transfer(&client, payer, instructions).await {
                Ok(preview) => AppMessage::PreviewReady(Box::new(preview)),
                Err(e) => AppMessage::PreviewFailed(e.to_string()),
            };
            let _ = message_tx.send(message);
        });
    }

    /// Sends the previewed batch.
    pub(crate) fn confirm_transfer(&mut self) {
        let Some(signer) = self.wallet.signer() else {
            self.transfer.cancel();
            self.ui.show_toast("[x] No wallet connected", self.toast_ticks());
            return;
        };
        let Some(preview) = self.transfer.confirm() else {
            return;
        };

        let client = self.client.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = execute_transfer(&client, signer.as_ref(), &preview)
                .await
                .map_err(|e| e.to_string());
            let _ = message_tx.send(AppMessage::TransferSettled(result));
        });
    }

    /// Fetches the connected account's balance in the background.
    pub(crate) fn refresh_balance(&mut self) {
        let Some(payer) = self.wallet.payer() else {
            self.balance = BalanceState::Unknown;
            return;
        };
        self.balance = BalanceState::Loading;

        let client = self.client.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = client.get_balance(&payer).await.map_err(|e| e.to_string());
            let _ = message_tx.send(AppMessage::BalanceUpdated(result));
        });
    }

    // ========================================================================
    // Clipboard
    // ========================================================================

    /// Copies the connected address and shows the "copied" indicator.
    pub(crate) fn copy_address(&mut self) {
        let Some(payer) = self.wallet.payer() else {
            self.ui.show_toast("[x] No wallet connected", self.toast_ticks());
            return;
        };

        match ClipboardManager::new().copy_text(&payer.to_string()) {
            Ok(()) => {
                self.ui
                    .start_copied_indicator(self.config.copied_indicator_ticks());
                self.ui
                    .show_toast("[+] Address copied to clipboard", self.toast_ticks());
            }
            Err(e) => {
                tracing::warn!(error = %e, "copy address failed");
                self.ui.show_toast(format!("[x] {e}"), self.toast_ticks());
            }
        }
    }

    /// Copies the signature of the last successful transfer.
    pub(crate) fn copy_signature(&mut self) {
        let Some(signature) = self.transfer.last_signature().map(str::to_string) else {
            self.ui
                .show_toast("[x] No transfer sent yet", self.toast_ticks());
            return;
        };

        match ClipboardManager::new().copy_text(&signature) {
            Ok(()) => self
                .ui
                .show_toast("[+] Signature copied to clipboard", self.toast_ticks()),
            Err(e) => self.ui.show_toast(format!("[x] {e}"), self.toast_ticks()),
        }
    }

    // ========================================================================
    // Browser
    // ========================================================================

    /// Opens the last successful transfer in the block explorer.
    pub(crate) fn open_explorer(&mut self) {
        let Some(url) = self
            .transfer
            .last_outcome()
            .and_then(|outcome| outcome.explorer_url())
            .map(str::to_string)
        else {
            self.ui
                .show_toast("[x] Explorer link unavailable", self.toast_ticks());
            return;
        };

        match open::that(&url) {
            Ok(()) => {
                self.ui.show_toast("[+] Opened in browser", self.toast_ticks());
            }
            Err(e) => {
                self.ui
                    .show_toast(format!("[x] Failed to open browser: {e}"), self.toast_ticks());
            }
        }
    }

    /// Short form of a signature or address for toasts.
    pub(crate) fn short(text: &str) -> String {
        truncate_address(text, ADDRESS_LEADING_CHARS, ADDRESS_TRAILING_CHARS)
    }
}
