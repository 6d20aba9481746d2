//! Solana JSON-RPC client.
//!
//! Speaks JSON-RPC 2.0 over HTTP POST to a single endpoint. Only the four
//! methods the transfer flow needs are implemented.
//!
//! # Example
//!
//! ```ignore
//! use crate::client::{HttpConfig, LedgerClient, SolanaClient};
//! use crate::domain::Cluster;
//!
//! let client = SolanaClient::new(Cluster::Devnet.rpc_url(), &HttpConfig::default())?;
//! let blockhash = client.get_latest_blockhash().await?;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::LedgerClient;
use super::http::HttpConfig;
use crate::domain::transfer::MAX_TRANSACTION_SIZE;
use crate::domain::{Blockhash, Message, Pubkey, Transaction, TransferError};

// ============================================================================
// Constants
// ============================================================================

/// Commitment level used for reads and preflight.
pub const COMMITMENT: &str = "confirmed";

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Result wrapper of methods that report the slot they were served at.
#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct LatestBlockhash {
    blockhash: String,
}

/// `getFeeForMessage` answers `value: null` for an unknown blockhash.
#[derive(Debug, Deserialize)]
struct FeeQuote {
    #[serde(default)]
    value: Option<u64>,
}

/// Unwraps a JSON-RPC envelope into its typed result.
///
/// # Errors
///
/// Returns [`TransferError::Rpc`] for an error object and
/// [`TransferError::Parse`] when the envelope or result is malformed.
pub(crate) fn parse_rpc_response<T: DeserializeOwned>(body: Value) -> Result<T, TransferError> {
    let response: RpcResponse<T> = serde_json::from_value(body)
        .map_err(|e| TransferError::parse(format!("unexpected RPC response: {e}")))?;

    if let Some(error) = response.error {
        return Err(TransferError::rpc(error.code, error.message));
    }
    response
        .result
        .ok_or_else(|| TransferError::parse("RPC response has no result"))
}

fn parse_latest_blockhash(body: Value) -> Result<Blockhash, TransferError> {
    let latest: WithContext<LatestBlockhash> = parse_rpc_response(body)?;
    latest.value.blockhash.parse()
}

fn parse_fee_quote(body: Value) -> Result<Option<u64>, TransferError> {
    let quote: FeeQuote = parse_rpc_response(body)?;
    Ok(quote.value)
}

fn parse_balance(body: Value) -> Result<u64, TransferError> {
    let balance: WithContext<u64> = parse_rpc_response(body)?;
    Ok(balance.value)
}

// ============================================================================
// Solana Client
// ============================================================================

/// JSON-RPC client bound to one cluster endpoint.
#[derive(Debug, Clone)]
pub struct SolanaClient {
    rpc_url: String,
    client: Client,
    next_id: Arc<AtomicU64>,
}

impl SolanaClient {
    /// Creates a client for an explicit RPC endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Network`] if the HTTP client fails to
    /// initialize.
    pub fn new(rpc_url: impl Into<String>, config: &HttpConfig) -> Result<Self, TransferError> {
        Ok(Self {
            rpc_url: rpc_url.into(),
            client: config.build_client()?,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    #[must_use]
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    async fn call(&self, method: &'static str, params: Value) -> Result<Value, TransferError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!(method, id, "rpc request");
        let response = self
            .client
            .post(&self.rpc_url)
            .header("accept", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;
        if !status.is_success() && body.get("error").is_none() {
            return Err(TransferError::rpc(
                i64::from(status.as_u16()),
                format!("HTTP {status} from {}", self.rpc_url),
            ));
        }
        Ok(body)
    }
}

impl LedgerClient for SolanaClient {
    async fn get_latest_blockhash(&self) -> Result<Blockhash, TransferError> {
        let body = self
            .call("getLatestBlockhash", json!([{ "commitment": COMMITMENT }]))
            .await?;
        parse_latest_blockhash(body)
    }

    async fn get_fee_for_message(&self, message: &Message) -> Result<Option<u64>, TransferError> {
        let encoded = STANDARD.encode(message.serialize());
        let body = self
            .call(
                "getFeeForMessage",
                json!([encoded, { "commitment": COMMITMENT }]),
            )
            .await?;
        parse_fee_quote(body)
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, TransferError> {
        let body = self
            .call(
                "getBalance",
                json!([pubkey.to_string(), { "commitment": COMMITMENT }]),
            )
            .await?;
        parse_balance(body)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<String, TransferError> {
        let wire = transaction.serialize();
        if wire.len() > MAX_TRANSACTION_SIZE {
            return Err(TransferError::invalid_input(format!(
                "transaction is {} bytes, the limit is {MAX_TRANSACTION_SIZE}",
                wire.len()
            )));
        }

        let body = self
            .call(
                "sendTransaction",
                json!([
                    STANDARD.encode(wire),
                    { "encoding": "base64", "preflightCommitment": COMMITMENT }
                ]),
            )
            .await?;
        parse_rpc_response(body)
    }
}

// ============================================================================
// Tests
// ============================================================================
