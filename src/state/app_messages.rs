//! Message processing for the SplitPay application.
//!
//! Drains results of background tasks and applies them to the transfer
//! flow, balance and UI.

use super::{App, AppMessage, BalanceState, TransferOutcome};

impl App {
    pub(crate) fn process_messages(&mut self) {
        while let Ok(message) = self.message_rx.try_recv() {
            self.handle_message(message);
        }
    }

    pub(crate) fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::PreviewReady(preview) => {
                self.transfer.preview_ready(*preview);
            }
            AppMessage::PreviewFailed(error) => {
                if self.transfer.preview_failed() {
                    tracing::warn!(%error, "preview failed");
                    self.ui
                        .show_message(format!("Could not prepare the transfer:\n\n{error}"));
                    self.ui.show_toast("[x] Preview failed", self.toast_ticks());
                }
            }
            AppMessage::TransferSettled(result) => {
                let outcome = TransferOutcome::from_result(result, self.cluster());
                if self.transfer.settle(outcome.clone()) {
                    self.announce_outcome(&outcome);
                }
            }
            AppMessage::BalanceUpdated(Ok(lamports)) => {
                self.balance = BalanceState::Loaded(lamports);
            }
            AppMessage::BalanceUpdated(Err(error)) => {
                tracing::warn!(%error, "balance fetch failed");
                self.balance = BalanceState::Failed(error);
            }
        }
    }

    fn announce_outcome(&mut self, outcome: &TransferOutcome) {
        match outcome {
            TransferOutcome::Success { signature, .. } => {
                self.ui.show_toast(
                    format!("[+] Sent {}", Self::short(signature)),
                    self.toast_ticks(),
                );
                self.refresh_balance();
            }
            TransferOutcome::Failure { message } => {
                tracing::warn!(%message, "transfer failed");
                self.ui.show_message(format!("Transfer failed:\n\n{message}"));
                self.ui.show_toast("[x] Transfer failed", self.toast_ticks());
            }
        }
    }
}
