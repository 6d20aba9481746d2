//! Domain types for batched SOL transfers.
//!
//! Everything here is pure: no I/O, no async. The client and state layers
//! build on these types.
//!
//! # Module Organization
//!
//! - [`amount`] - Decimal SOL text to lamports and back
//! - [`address`] - Public keys and recipient address validation
//! - [`recipients`] - The bounded recipient list and its validation
//! - [`split`] - Even split of a total across recipients
//! - [`transfer`] - Transfer instructions, messages and previews
//! - [`network`] - Cluster configuration
//! - [`error`] - Errors of ledger and signing operations

// ============================================================================
// Module Declarations
// ============================================================================

pub mod address;
pub mod amount;
pub mod error;
pub mod network;
pub mod recipients;
pub mod split;
pub mod transfer;

// ============================================================================
// Re-exports
// ============================================================================

pub use address::{AddressCheck, AddressError, Pubkey, truncate_address};
pub use amount::{AmountError, format_sol, lamports_to_decimal, parse_amount};
pub use error::TransferError;
pub use network::Cluster;
pub use recipients::{
    FieldErrors, MAX_RECIPIENTS, RecipientEntry, RecipientId, RecipientList, ValidationReport,
};
pub use split::allocate_even_split;
pub use transfer::{Blockhash, Message, Transaction, TransferInstruction, TransferPreview};
