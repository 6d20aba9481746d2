//! System Program transfers and the legacy Solana transaction wire format.
//!
//! A batch is a single legacy message with one `Transfer` instruction per
//! recipient, all paid and signed by one fee payer.
//!
//! # Wire layout
//!
//! ```text
//! transaction = compact(sig_count) || signatures[64] || message
//! message     = header[3] || compact(n) || keys[32] || blockhash[32]
//!               || compact(m) || instruction*
//! instruction = program_index || compact(k) || account_index*
//!               || compact(d) || data
//! ```

use std::str::FromStr;

use super::address::{PUBKEY_BYTES, Pubkey};
use super::error::TransferError;

// ============================================================================
// Constants
// ============================================================================

/// The System Program id (all zero bytes, `1111...1111` in base58).
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::new([0; PUBKEY_BYTES]);

/// Index of `Transfer` in the System Program instruction enum.
const SYSTEM_TRANSFER_TAG: u32 = 2;

/// Largest serialized transaction the cluster accepts.
pub const MAX_TRANSACTION_SIZE: usize = 1232;

/// Byte length of an ed25519 signature.
pub const SIGNATURE_BYTES: usize = 64;

// ============================================================================
// Compact-u16
// ============================================================================

/// Appends `value` in Solana's compact-u16 (shortvec) encoding.
///
/// Seven bits per byte, low bits first, high bit set on every byte but the
/// last.
pub fn encode_compact_u16(value: u16, out: &mut Vec<u8>) {
    let mut rest = value;
    loop {
        let byte = (rest & 0x7f) as u8;
        rest >>= 7;
        if rest == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

fn encode_len(len: usize, out: &mut Vec<u8>) {
    // Message::new bounds every length well below u16::MAX.
    encode_compact_u16(u16::try_from(len).unwrap_or(u16::MAX), out);
}

// ============================================================================
// Blockhash
// ============================================================================

/// A recent blockhash, displayed in base58.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Blockhash([u8; 32]);

impl Blockhash {
    /// Wraps raw hash bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Borrows the raw hash bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for Blockhash {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        match bs58::decode(s).onto(&mut bytes) {
            Ok(32) => Ok(Self(bytes)),
            _ => Err(TransferError::parse(format!("invalid blockhash '{s}'"))),
        }
    }
}

impl std::fmt::Display for Blockhash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}

impl std::fmt::Debug for Blockhash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Blockhash({self})")
    }
}

// ============================================================================
// Instructions
// ============================================================================

/// One SOL transfer from the payer to a recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferInstruction {
    pub from: Pubkey,
    pub to: Pubkey,
    pub lamports: u64,
}

impl TransferInstruction {
    #[must_use]
    pub const fn new(from: Pubkey, to: Pubkey, lamports: u64) -> Self {
        Self { from, to, lamports }
    }

    /// System Program instruction data: `u32 LE tag || u64 LE lamports`.
    #[must_use]
    pub fn data(&self) -> [u8; 12] {
        let mut data = [0u8; 12];
        data[..4].copy_from_slice(&SYSTEM_TRANSFER_TAG.to_le_bytes());
        data[4..].copy_from_slice(&self.lamports.to_le_bytes());
        data
    }
}

/// An instruction with accounts replaced by indexes into the key table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

// ============================================================================
// Message
// ============================================================================

/// Counts that split the key table into signer and read-only groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

/// A compiled legacy message ready to be signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub account_keys: Vec<Pubkey>,
    pub recent_blockhash: Blockhash,
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    /// Compiles transfers paid by `payer` into a legacy message.
    ///
    /// Keys are ordered payer first, then each distinct recipient in order
    /// of first appearance, then the System Program.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::InvalidInput`] when there are no transfers,
    /// when a transfer is not funded by the payer, or when a recipient is
    /// the System Program itself.
    pub fn new(
        payer: Pubkey,
        transfers: &[TransferInstruction],
        recent_blockhash: Blockhash,
    ) -> Result<Self, TransferError> {
        if transfers.is_empty() {
            return Err(TransferError::invalid_input("no transfers to send"));
        }

        let mut account_keys = vec![payer];
        for transfer in transfers {
            if transfer.from != payer {
                return Err(TransferError::invalid_input(format!(
                    "transfer source {} is not the fee payer",
                    transfer.from
                )));
            }
            if transfer.to == SYSTEM_PROGRAM_ID {
                return Err(TransferError::invalid_input(
                    "cannot transfer to the System Program",
                ));
            }
            if !account_keys.contains(&transfer.to) {
                account_keys.push(transfer.to);
            }
        }
        account_keys.push(SYSTEM_PROGRAM_ID);

        let index_of = |key: &Pubkey| {
            account_keys
                .iter()
                .position(|k| k == key)
                .and_then(|i| u8::try_from(i).ok())
                .ok_or_else(|| TransferError::invalid_input("too many accounts"))
        };

        let program_id_index = index_of(&SYSTEM_PROGRAM_ID)?;
        let instructions = transfers
            .iter()
            .map(|transfer| {
                Ok(CompiledInstruction {
                    program_id_index,
                    accounts: vec![index_of(&transfer.from)?, index_of(&transfer.to)?],
                    data: transfer.data().to_vec(),
                })
            })
            .collect::<Result<Vec<_>, TransferError>>()?;

        Ok(Self {
            header: MessageHeader {
                num_required_signatures: 1,
                num_readonly_signed_accounts: 0,
                num_readonly_unsigned_accounts: 1,
            },
            account_keys,
            recent_blockhash,
            instructions,
        })
    }

    /// The account paying fees and signing, if any keys are present.
    #[must_use]
    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.account_keys.first()
    }

    /// Serializes the message into the bytes that get signed.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            3 + 1 + self.account_keys.len() * PUBKEY_BYTES + 32 + 1 + self.instructions.len() * 17,
        );

        out.push(self.header.num_required_signatures);
        out.push(self.header.num_readonly_signed_accounts);
        out.push(self.header.num_readonly_unsigned_accounts);

        encode_len(self.account_keys.len(), &mut out);
        for key in &self.account_keys {
            out.extend_from_slice(key.as_bytes());
        }

        out.extend_from_slice(self.recent_blockhash.as_bytes());

        encode_len(self.instructions.len(), &mut out);
        for instruction in &self.instructions {
            out.push(instruction.program_id_index);
            encode_len(instruction.accounts.len(), &mut out);
            out.extend_from_slice(&instruction.accounts);
            encode_len(instruction.data.len(), &mut out);
            out.extend_from_slice(&instruction.data);
        }

        out
    }
}

// ============================================================================
// Transaction
// ============================================================================

/// An ed25519 signature, displayed in base58.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_BYTES]);

impl Signature {
    #[must_use]
    pub const fn new(bytes: [u8; SIGNATURE_BYTES]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_BYTES] {
        &self.0
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({self})")
    }
}

/// A signed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub signatures: Vec<Signature>,
    pub message: Message,
}

impl Transaction {
    #[must_use]
    pub const fn new(message: Message, signatures: Vec<Signature>) -> Self {
        Self {
            signatures,
            message,
        }
    }

    /// The fee payer's signature, which also identifies the transaction.
    #[must_use]
    pub fn signature(&self) -> Option<String> {
        self.signatures.first().map(ToString::to_string)
    }

    /// Serializes the transaction for `sendTransaction`.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let message = self.message.serialize();
        let mut out = Vec::with_capacity(1 + self.signatures.len() * SIGNATURE_BYTES + message.len());
        encode_len(self.signatures.len(), &mut out);
        for signature in &self.signatures {
            out.extend_from_slice(signature.as_bytes());
        }
        out.extend_from_slice(&message);
        out
    }
}

// ============================================================================
// Preview
// ============================================================================

/// A quoted batch awaiting the user's confirmation.
///
/// The instruction list is frozen when the preview is built and is exactly
/// what gets sent on confirm; only the blockhash is refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPreview {
    pub payer: Pubkey,
    pub instructions: Vec<TransferInstruction>,
    pub total_lamports: u64,
    pub estimated_fee_lamports: u64,
    pub user_total_debit_lamports: u64,
}

impl TransferPreview {
    /// Builds a preview and its debit arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::InvalidInput`] if the total or the total plus
    /// fee overflows a lamport amount.
    pub fn new(
        payer: Pubkey,
        instructions: Vec<TransferInstruction>,
        estimated_fee_lamports: u64,
    ) -> Result<Self, TransferError> {
        let total_lamports = instructions
            .iter()
            .try_fold(0u64, |sum, ix| sum.checked_add(ix.lamports))
            .ok_or_else(|| TransferError::invalid_input("transfer total overflows"))?;
        let user_total_debit_lamports = total_lamports
            .checked_add(estimated_fee_lamports)
            .ok_or_else(|| TransferError::invalid_input("total debit overflows"))?;

        Ok(Self {
            payer,
            instructions,
            total_lamports,
            estimated_fee_lamports,
            user_total_debit_lamports,
        })
    }

    /// Number of transfers in the batch.
    #[must_use]
    pub fn recipient_count(&self) -> usize {
        self.instructions.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
