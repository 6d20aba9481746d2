//! Error types for ledger and signing operations.
//!
//! Field-level input problems live next to their validators
//! ([`AmountError`](super::amount::AmountError),
//! [`AddressError`](super::address::AddressError)). This module covers the
//! failures of external calls, which end a preview or a send.

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Failure of a blockhash fetch, fee quote, balance query, sign or send.
///
/// These are terminal for the operation that raised them and are never
/// retried automatically.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Network-related errors from HTTP requests.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The RPC node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Message reported by the node.
        message: String,
    },

    /// JSON parsing or data structure errors.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what failed to parse.
        message: String,
    },

    /// The transfer cannot be built from the given input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The signer refused or failed to sign.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// No wallet account is connected.
    #[error("No wallet connected")]
    NotConnected,
}

impl TransferError {
    /// Create a new parse error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new RPC error from a JSON-RPC error object.
    #[must_use]
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// Create a new invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a new signing error.
    #[must_use]
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing(message.into())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_display() {
        let rpc_err = TransferError::rpc(-32002, "Blockhash not found");
        assert_eq!(rpc_err.to_string(), "RPC error -32002: Blockhash not found");

        let parse_err = TransferError::parse("missing result");
        assert_eq!(parse_err.to_string(), "Parse error: missing result");

        let invalid_err = TransferError::invalid_input("no recipients");
        assert_eq!(invalid_err.to_string(), "Invalid input: no recipients");

        let signing_err = TransferError::signing("payer mismatch");
        assert_eq!(signing_err.to_string(), "Signing failed: payer mismatch");

        assert_eq!(TransferError::NotConnected.to_string(), "No wallet connected");
    }

    #[test]
    fn test_rpc_error_creation() {
        match TransferError::rpc(-32600, "Invalid request") {
            TransferError::Rpc { code, message } => {
                assert_eq!(code, -32600);
                assert_eq!(message, "Invalid request");
            }
            other => panic!("Expected Rpc variant, got {other:?}"),
        }
    }
}
