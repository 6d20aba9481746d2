//! Collaborators outside the process: the ledger RPC node and the wallet.
//!
//! - [`rpc`] - Solana JSON-RPC client implementing [`LedgerClient`]
//! - [`signer`] - Keypair-backed [`TransactionSigner`]
//! - [`wallet`] - The connected account session
//! - [`http`] - Shared HTTP client configuration
//!
//! The transfer flow is generic over [`LedgerClient`] and
//! [`TransactionSigner`] so it can run against in-memory doubles in tests.

use std::future::Future;

use crate::domain::{Blockhash, Message, Pubkey, Transaction, TransferError};

pub mod http;
pub mod rpc;
pub mod signer;
pub mod wallet;

// ============================================================================
// Re-exports
// ============================================================================

pub use http::HttpConfig;
pub use rpc::SolanaClient;
pub use signer::{KeypairSigner, TransactionSigner};
pub use wallet::WalletSession;

// ============================================================================
// Ledger Client
// ============================================================================

/// Read and submit operations against a Solana cluster.
pub trait LedgerClient: Send + Sync {
    /// Fetches a recent blockhash to anchor a message.
    fn get_latest_blockhash(&self) -> impl Future<Output = Result<Blockhash, TransferError>> + Send;

    /// Quotes the fee for a compiled message.
    ///
    /// `None` means the node could not price the message, e.g. because its
    /// blockhash is unknown.
    fn get_fee_for_message(
        &self,
        message: &Message,
    ) -> impl Future<Output = Result<Option<u64>, TransferError>> + Send;

    /// Balance of an account in lamports.
    fn get_balance(&self, pubkey: &Pubkey)
    -> impl Future<Output = Result<u64, TransferError>> + Send;

    /// Submits a signed transaction and returns its signature.
    fn send_transaction(
        &self,
        transaction: &Transaction,
    ) -> impl Future<Output = Result<String, TransferError>> + Send;
}
