//! Shared test utilities and Mother pattern factories.
//!
//! Use these helpers to avoid copy-pasting setup code across tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ed25519_dalek::SigningKey;
use ratatui::{Terminal, backend::TestBackend};
use rstest::fixture;
use serde_json::{Value, json};

use crate::client::{KeypairSigner, LedgerClient, WalletSession};
use crate::domain::{
    AddressCheck, Blockhash, Message, Pubkey, RecipientList, Transaction, TransferError,
    TransferInstruction, TransferPreview,
};
use crate::state::{App, AppConfig, FormState};

// ============================================================================
// Mother Pattern Factories
// ============================================================================

/// Valid base58 addresses that decode to 32 bytes.
pub struct AddressMother;

impl AddressMother {
    #[must_use]
    pub fn alice() -> &'static str {
        "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
    }

    #[must_use]
    pub fn bob() -> &'static str {
        "So11111111111111111111111111111111111111112"
    }

    #[must_use]
    pub fn carol() -> &'static str {
        "SysvarRent111111111111111111111111111111111"
    }
}

pub struct PubkeyMother;

impl PubkeyMother {
    /// A payer key that no test signer owns.
    #[must_use]
    pub fn payer() -> Pubkey {
        Pubkey::new([200; 32])
    }

    /// Distinct recipient keys; `n` must not be zero (the System Program).
    #[must_use]
    pub fn recipient(n: u8) -> Pubkey {
        Pubkey::new([n; 32])
    }
}

pub struct BlockhashMother;

impl BlockhashMother {
    #[must_use]
    pub fn recent() -> Blockhash {
        Blockhash::new([42; 32])
    }

    #[must_use]
    pub fn newer() -> Blockhash {
        Blockhash::new([43; 32])
    }
}

pub struct SignerMother;

impl SignerMother {
    #[must_use]
    pub fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    #[must_use]
    pub fn keypair() -> KeypairSigner {
        KeypairSigner::new(Self::signing_key())
    }

    /// Solana CLI keypair file content for [`Self::keypair`].
    #[must_use]
    pub fn keypair_json() -> String {
        let bytes = Self::signing_key().to_keypair_bytes();
        let numbers: Vec<String> = bytes.iter().map(u8::to_string).collect();
        format!("[{}]", numbers.join(","))
    }
}

pub struct FormMother;

impl FormMother {
    /// Alice 1 SOL, Bob 2 SOL, Carol 3 SOL, first row selected.
    #[must_use]
    pub fn three_recipients() -> FormState {
        FormState::with_recipients(
            RecipientList::from_defaults([
                (AddressMother::alice(), "1"),
                (AddressMother::bob(), "2"),
                (AddressMother::carol(), "3"),
            ]),
            AddressCheck::StrictDecoder,
        )
    }
}

pub struct PreviewMother;

impl PreviewMother {
    /// 1 SOL and 2 SOL from `payer`.
    #[must_use]
    pub fn transfers_from(payer: Pubkey) -> Vec<TransferInstruction> {
        vec![
            TransferInstruction::new(payer, PubkeyMother::recipient(1), 1_000_000_000),
            TransferInstruction::new(payer, PubkeyMother::recipient(2), 2_000_000_000),
        ]
    }

    /// Two transfers paid by [`PubkeyMother::payer`], no fee.
    #[must_use]
    pub fn two_transfers() -> TransferPreview {
        let payer = PubkeyMother::payer();
        Self::with_fee(payer, 0)
    }

    #[must_use]
    pub fn with_fee(payer: Pubkey, fee: u64) -> TransferPreview {
        TransferPreview::new(payer, Self::transfers_from(payer), fee)
            .expect("preview arithmetic fits")
    }
}

// ============================================================================
// JSON Test Data Factories
// ============================================================================

/// JSON-RPC 2.0 response envelopes.
pub struct RpcJsonMother;

impl RpcJsonMother {
    #[must_use]
    pub fn result(result: Value) -> Value {
        json!({ "jsonrpc": "2.0", "id": 1, "result": result })
    }

    fn with_context(value: Value) -> Value {
        Self::result(json!({ "context": { "slot": 1 }, "value": value }))
    }

    #[must_use]
    pub fn latest_blockhash(blockhash: &str) -> Value {
        Self::with_context(json!({
            "blockhash": blockhash,
            "lastValidBlockHeight": 1000_u64
        }))
    }

    #[must_use]
    pub fn fee(fee: Option<u64>) -> Value {
        Self::with_context(json!(fee))
    }

    #[must_use]
    pub fn balance(lamports: u64) -> Value {
        Self::with_context(json!(lamports))
    }

    #[must_use]
    pub fn error(code: i64, message: &str) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": code, "message": message }
        })
    }
}

// ============================================================================
// Ledger Double
// ============================================================================

/// In-memory ledger recording what the flow asked of it.
#[derive(Debug)]
pub struct MockLedger {
    fee: Option<u64>,
    balance: u64,
    fail_blockhash: bool,
    fail_send: bool,
    blockhash_calls: AtomicUsize,
    sent: Mutex<Vec<Transaction>>,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fee: Some(5_000),
            balance: 10_000_000_000,
            fail_blockhash: false,
            fail_send: false,
            blockhash_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_fee(mut self, fee: Option<u64>) -> Self {
        self.fee = fee;
        self
    }

    #[must_use]
    pub fn failing_blockhash(mut self) -> Self {
        self.fail_blockhash = true;
        self
    }

    #[must_use]
    pub fn failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    pub fn blockhash_calls(&self) -> usize {
        self.blockhash_calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().expect("sent lock").clone()
    }
}

impl LedgerClient for MockLedger {
    async fn get_latest_blockhash(&self) -> Result<Blockhash, TransferError> {
        if self.fail_blockhash {
            return Err(TransferError::rpc(-32005, "Node is behind"));
        }
        let calls = self.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(if calls == 0 {
            BlockhashMother::recent()
        } else {
            BlockhashMother::newer()
        })
    }

    async fn get_fee_for_message(&self, _message: &Message) -> Result<Option<u64>, TransferError> {
        Ok(self.fee)
    }

    async fn get_balance(&self, _pubkey: &Pubkey) -> Result<u64, TransferError> {
        Ok(self.balance)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<String, TransferError> {
        if self.fail_send {
            return Err(TransferError::rpc(-32002, "Transaction simulation failed"));
        }
        self.sent.lock().expect("sent lock").push(transaction.clone());
        transaction
            .signature()
            .ok_or_else(|| TransferError::signing("unsigned transaction"))
    }
}

// ============================================================================
// App Factories
// ============================================================================

pub struct AppMother;

impl AppMother {
    /// Config pointing at an unroutable local endpoint so stray background
    /// requests fail fast instead of reaching a real cluster.
    #[must_use]
    pub fn offline_config() -> AppConfig {
        AppConfig {
            rpc_url: Some("http://127.0.0.1:9".to_string()),
            ..AppConfig::default()
        }
    }

    /// App with no wallet and an empty form.
    #[must_use]
    pub fn disconnected() -> App {
        App::with_parts(
            Self::offline_config(),
            WalletSession::disconnected(),
            FormState::new(AddressCheck::StrictDecoder),
        )
        .expect("app creation should succeed")
    }

    /// App with the test keypair connected and a valid three-row form.
    #[must_use]
    pub fn connected() -> App {
        App::with_parts(
            Self::offline_config(),
            WalletSession::connected(Arc::new(SignerMother::keypair())),
            FormMother::three_recipients(),
        )
        .expect("app creation should succeed")
    }
}

// ============================================================================
// rstest Fixtures
// ============================================================================

#[fixture]
pub fn test_terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(120, 40)).expect("terminal creation should succeed")
}

#[fixture]
pub fn test_terminal_80x24() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(80, 24)).expect("terminal creation should succeed")
}

/// Flattens a rendered buffer into lines of text for `contains` checks.
#[must_use]
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
