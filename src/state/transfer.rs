//! Preview and confirm state machine for batch transfers.
//!
//! ```text
//! Editing --begin_quote--> Quoting --preview_ready--> Previewing --confirm--> Sending
//!    ^                        |                           |                     |
//!    +-----preview_failed-----+----------cancel-----------+--------settle-------+
//! ```
//!
//! The network side lives in [`quote_transfer`] and [`execute_transfer`],
//! which the app runs on background tasks and reports back through
//! [`AppMessage`](super::AppMessage).

use crate::client::{LedgerClient, TransactionSigner};
use crate::domain::{
    Cluster, Message, Pubkey, TransferError, TransferInstruction, TransferPreview,
};

// ============================================================================
// Phases
// ============================================================================

/// Where the transfer flow currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransferPhase {
    /// The form is editable and no preview exists.
    #[default]
    Editing,
    /// Blockhash and fee quote are in flight.
    Quoting,
    /// A quoted preview waits for the user's decision.
    Previewing(Box<TransferPreview>),
    /// The confirmed preview is being signed and sent.
    Sending(Box<TransferPreview>),
}

impl TransferPhase {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Editing => "Editing",
            Self::Quoting => "Quoting",
            Self::Previewing(_) => "Previewing",
            Self::Sending(_) => "Sending",
        }
    }
}

/// Result of the last send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Success {
        signature: String,
        explorer_url: String,
    },
    Failure {
        message: String,
    },
}

impl TransferOutcome {
    /// Outcome of a send on `cluster`.
    #[must_use]
    pub fn from_result(result: Result<String, String>, cluster: Cluster) -> Self {
        match result {
            Ok(signature) => Self::Success {
                explorer_url: cluster.explorer_tx_url(&signature),
                signature,
            },
            Err(message) => Self::Failure { message },
        }
    }

    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        match self {
            Self::Success { signature, .. } => Some(signature),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn explorer_url(&self) -> Option<&str> {
        match self {
            Self::Success { explorer_url, .. } => Some(explorer_url),
            Self::Failure { .. } => None,
        }
    }
}

// ============================================================================
// Transfer Flow
// ============================================================================

/// The transfer state machine.
///
/// Transitions requested from the wrong phase leave the state untouched and
/// return `false` (or `None`).
#[derive(Debug, Clone, Default)]
pub struct TransferFlow {
    phase: TransferPhase,
    last_outcome: Option<TransferOutcome>,
}

impl TransferFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> &TransferPhase {
        &self.phase
    }

    /// Returns `true` while the form may be submitted.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.phase, TransferPhase::Editing)
    }

    /// Returns `true` while a quote or send is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            TransferPhase::Quoting | TransferPhase::Sending(_)
        )
    }

    /// The preview awaiting confirmation, if any.
    #[must_use]
    pub fn preview(&self) -> Option<&TransferPreview> {
        match &self.phase {
            TransferPhase::Previewing(preview) => Some(preview),
            _ => None,
        }
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<&TransferOutcome> {
        self.last_outcome.as_ref()
    }

    /// Signature of the last successful send.
    #[must_use]
    pub fn last_signature(&self) -> Option<&str> {
        self.last_outcome.as_ref().and_then(TransferOutcome::signature)
    }

    /// Editing -> Quoting.
    pub fn begin_quote(&mut self) -> bool {
        if !self.is_editing() {
            tracing::debug!(phase = self.phase.label(), "submit ignored");
            return false;
        }
        self.phase = TransferPhase::Quoting;
        true
    }

    /// Quoting -> Previewing.
    pub fn preview_ready(&mut self, preview: TransferPreview) -> bool {
        if self.phase != TransferPhase::Quoting {
            tracing::debug!(phase = self.phase.label(), "stale preview dropped");
            return false;
        }
        self.phase = TransferPhase::Previewing(Box::new(preview));
        true
    }

    /// Quoting -> Editing.
    pub fn preview_failed(&mut self) -> bool {
        if self.phase != TransferPhase::Quoting {
            tracing::debug!(phase = self.phase.label(), "stale preview failure dropped");
            return false;
        }
        self.phase = TransferPhase::Editing;
        true
    }

    /// Previewing -> Editing, discarding the preview.
    pub fn cancel(&mut self) -> bool {
        if self.preview().is_none() {
            tracing::debug!(phase = self.phase.label(), "cancel without preview");
            return false;
        }
        self.phase = TransferPhase::Editing;
        true
    }

    /// Previewing -> Sending. Returns the frozen preview to send.
    pub fn confirm(&mut self) -> Option<TransferPreview> {
        match std::mem::take(&mut self.phase) {
            TransferPhase::Previewing(preview) => {
                let frozen = (*preview).clone();
                self.phase = TransferPhase::Sending(preview);
                Some(frozen)
            }
            other => {
                tracing::debug!(phase = other.label(), "confirm without preview");
                self.phase = other;
                None
            }
        }
    }

    /// Sending -> Editing, recording the outcome.
    pub fn settle(&mut self, outcome: TransferOutcome) -> bool {
        if !matches!(self.phase, TransferPhase::Sending(_)) {
            tracing::debug!(phase = self.phase.label(), "settle outside send");
            return false;
        }
        self.phase = TransferPhase::Editing;
        self.last_outcome = Some(outcome);
        true
    }
}

// ============================================================================
// Async Flows
// ============================================================================

/// Compiles the instructions against a fresh blockhash and quotes the fee.
///
/// A fee the node cannot price counts as zero.
///
/// # Errors
///
/// Returns the ledger error of the blockhash or fee call, or
/// [`TransferError::InvalidInput`] if the message cannot be compiled.
pub async fn quote_transfer<L: LedgerClient>(
    ledger: &L,
    payer: Pubkey,
    instructions: Vec<TransferInstruction>,
) -> Result<TransferPreview, TransferError> {
    let blockhash = ledger.get_latest_blockhash().await?;
    let message = Message::new(payer, &instructions, blockhash)?;
    let fee = ledger.get_fee_for_message(&message).await?.unwrap_or_else(|| {
        tracing::warn!("fee quote unavailable, assuming zero");
        0
    });

    let preview = TransferPreview::new(payer, instructions, fee)?;
    tracing::info!(
        recipients = preview.recipient_count(),
        total = preview.total_lamports,
        fee,
        "transfer quoted"
    );
    Ok(preview)
}

/// Signs and sends the frozen instructions of `preview`.
///
/// The blockhash of the quote may have expired while the user decided, so a
/// new one is fetched before signing.
///
/// # Errors
///
/// Returns the first failing ledger, compile or signing error.
pub async fn execute_transfer<L, S>(
    ledger: &L,
    signer: &S,
    preview: &TransferPreview,
) -> Result<String, TransferError>
where
    L: LedgerClient,
    S: TransactionSigner + ?Sized,
{
    if signer.pubkey() != preview.payer {
        return Err(TransferError::signing(
            "connected account does not match the previewed payer",
        ));
    }

    let blockhash = ledger.get_latest_blockhash().await?;
    let message = Message::new(preview.payer, &preview.instructions, blockhash)?;
    let transaction = signer.sign_transaction(message)?;
    let signature = ledger.send_transaction(&transaction).await?;

    tracing::info!(%signature, recipients = preview.recipient_count(), "transfer sent");
    Ok(signature)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::KeypairSigner;
    use crate::test_utils::{
        BlockhashMother, MockLedger, PreviewMother, PubkeyMother, SignerMother,
    };

    // ------------------------------------------------------------------------
    // State machine
    // ------------------------------------------------------------------------

    #[test]
    fn test_happy_path() {
        let mut flow = TransferFlow::new();
        assert!(flow.begin_quote());
        assert!(flow.is_busy());
        assert!(flow.preview_ready(PreviewMother::two_transfers()));
        assert!(flow.preview().is_some());

        let frozen = flow.confirm().unwrap();
        assert_eq!(frozen, PreviewMother::two_transfers());
        assert!(matches!(flow.phase(), TransferPhase::Sending(_)));

        let outcome = TransferOutcome::from_result(Ok("sig".into()), Cluster::Devnet);
        assert!(flow.settle(outcome));
        assert!(flow.is_editing());
        assert_eq!(flow.last_signature(), Some("sig"));
    }

    #[test]
    fn test_confirm_without_preview_is_noop() {
        let mut flow = TransferFlow::new();
        assert!(flow.confirm().is_none());
        assert!(flow.is_editing());

        flow.begin_quote();
        assert!(flow.confirm().is_none());
        assert_eq!(flow.phase(), &TransferPhase::Quoting);
    }

    #[test]
    fn test_submit_refused_while_busy() {
        let mut flow = TransferFlow::new();
        assert!(flow.begin_quote());
        assert!(!flow.begin_quote());

        flow.preview_ready(PreviewMother::two_transfers());
        assert!(!flow.begin_quote());

        flow.confirm();
        assert!(!flow.begin_quote());
    }

    #[test]
    fn test_cancel_discards_preview() {
        let mut flow = TransferFlow::new();
        assert!(!flow.cancel());

        flow.begin_quote();
        flow.preview_ready(PreviewMother::two_transfers());
        assert!(flow.cancel());
        assert!(flow.is_editing());
        assert!(flow.preview().is_none());
        assert!(flow.last_outcome().is_none());
    }

    #[test]
    fn test_preview_failure_returns_to_editing() {
        let mut flow = TransferFlow::new();
        flow.begin_quote();
        assert!(flow.preview_failed());
        assert!(flow.is_editing());
    }

    #[test]
    fn test_stale_results_are_ignored() {
        let mut flow = TransferFlow::new();
        assert!(!flow.preview_ready(PreviewMother::two_transfers()));
        assert!(!flow.preview_failed());
        assert!(flow.is_editing());

        let outcome = TransferOutcome::from_result(Err("boom".into()), Cluster::Devnet);
        assert!(!flow.settle(outcome));
        assert!(flow.last_outcome().is_none());
    }

    #[test]
    fn test_failure_outcome_has_no_signature() {
        let outcome = TransferOutcome::from_result(Err("boom".into()), Cluster::Mainnet);
        assert_eq!(outcome.signature(), None);
        assert_eq!(outcome.explorer_url(), None);

        let outcome = TransferOutcome::from_result(Ok("abc".into()), Cluster::Testnet);
        insta::assert_snapshot!(
            outcome.explorer_url().unwrap(),
            @"https://explorer.solana.com/tx/abc?cluster=testnet"
        );
    }

    // ------------------------------------------------------------------------
    // Async flows
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_quote_builds_preview_with_fee() {
        let ledger = MockLedger::new().with_fee(Some(5_000));
        let payer = PubkeyMother::payer();
        let instructions = PreviewMother::two_transfers().instructions;

        let preview = quote_transfer(&ledger, payer, instructions.clone())
            .await
            .unwrap();

        assert_eq!(preview.instructions, instructions);
        assert_eq!(preview.total_lamports, 3_000_000_000);
        assert_eq!(preview.estimated_fee_lamports, 5_000);
        assert_eq!(preview.user_total_debit_lamports, 3_000_005_000);
        assert_eq!(ledger.blockhash_calls(), 1);
    }

    #[tokio::test]
    async fn test_quote_treats_null_fee_as_zero() {
        let ledger = MockLedger::new().with_fee(None);
        let instructions = PreviewMother::two_transfers().instructions;

        let preview = quote_transfer(&ledger, PubkeyMother::payer(), instructions)
            .await
            .unwrap();

        assert_eq!(preview.estimated_fee_lamports, 0);
        assert_eq!(preview.user_total_debit_lamports, preview.total_lamports);
    }

    #[tokio::test]
    async fn test_quote_propagates_ledger_error() {
        let ledger = MockLedger::new().failing_blockhash();
        let instructions = PreviewMother::two_transfers().instructions;

        let err = quote_transfer(&ledger, PubkeyMother::payer(), instructions)
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::Rpc { .. }));
    }

    #[tokio::test]
    async fn test_quote_then_execute_refreshes_blockhash() {
        let ledger = MockLedger::new().with_fee(Some(5_000));
        let signer = SignerMother::keypair();
        let payer = signer.pubkey();
        let instructions = PreviewMother::transfers_from(payer);

        let preview = quote_transfer(&ledger, payer, instructions.clone())
            .await
            .unwrap();
        let signature = execute_transfer(&ledger, &signer, &preview).await.unwrap();

        assert_eq!(ledger.blockhash_calls(), 2);
        let sent = ledger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].signature(), Some(signature));
        assert_eq!(sent[0].message.fee_payer(), Some(&payer));
        assert_eq!(
            sent[0].message,
            Message::new(payer, &instructions, BlockhashMother::newer()).unwrap()
        );
    }

    #[tokio::test]
    async fn test_execute_rejects_foreign_payer() {
        let ledger = MockLedger::new();
        let signer = SignerMother::keypair();
        let preview = PreviewMother::two_transfers();

        let err = execute_transfer(&ledger, &signer, &preview)
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::Signing(_)));
        assert_eq!(ledger.blockhash_calls(), 0);
        assert!(ledger.sent().is_empty());
    }

    #[tokio::test]
    async fn test_execute_propagates_send_error() {
        let ledger = MockLedger::new().failing_send();
        let signer: KeypairSigner = SignerMother::keypair();
        let preview = TransferPreview::new(
            signer.pubkey(),
            PreviewMother::transfers_from(signer.pubkey()),
            0,
        )
        .unwrap();

        let err = execute_transfer(&ledger, &signer, &preview)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "RPC error -32002: Transaction simulation failed");
    }
}
