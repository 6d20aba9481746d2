//! Transaction signing with a local ed25519 keypair.
//!
//! Keys are read from the Solana CLI keypair format: a JSON array of 64
//! bytes, secret key followed by public key.

use std::path::Path;

use ed25519_dalek::{Signer, SigningKey};

use crate::domain::transfer::Signature;
use crate::domain::{Message, Pubkey, Transaction, TransferError};

// ============================================================================
// Signer Trait
// ============================================================================

/// Something that can sign a message as its fee payer.
pub trait TransactionSigner: Send + Sync {
    /// The public key this signer signs for.
    fn pubkey(&self) -> Pubkey;

    /// Signs `message` and wraps it into a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Signing`] if the message's fee payer is not
    /// this signer.
    fn sign_transaction(&self, message: Message) -> Result<Transaction, TransferError>;
}

// ============================================================================
// Keypair Signer
// ============================================================================

/// Signs with an in-memory ed25519 keypair.
pub struct KeypairSigner {
    key: SigningKey,
}

impl std::fmt::Debug for KeypairSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeypairSigner")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}

impl KeypairSigner {
    #[must_use]
    pub const fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Builds a signer from 64 keypair bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Signing`] if the slice is not 64 bytes or the
    /// public half does not match the secret half.
    pub fn from_keypair_bytes(bytes: &[u8]) -> Result<Self, TransferError> {
        let bytes: &[u8; 64] = bytes.try_into().map_err(|_| {
            TransferError::signing(format!("keypair must be 64 bytes, got {}", bytes.len()))
        })?;
        let key = SigningKey::from_keypair_bytes(bytes)
            .map_err(|e| TransferError::signing(format!("invalid keypair: {e}")))?;
        Ok(Self::new(key))
    }

    /// Parses the Solana CLI JSON keypair format.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Signing`] if the text is not a JSON byte
    /// array holding a valid keypair.
    pub fn from_json(text: &str) -> Result<Self, TransferError> {
        let bytes: Vec<u8> = serde_json::from_str(text)
            .map_err(|e| TransferError::signing(format!("keypair file is not a byte array: {e}")))?;
        Self::from_keypair_bytes(&bytes)
    }

    /// Loads a keypair file written by `solana-keygen`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Signing`] if the file cannot be read or does
    /// not hold a valid keypair.
    pub fn from_file(path: &Path) -> Result<Self, TransferError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            TransferError::signing(format!("cannot read keypair {}: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }
}

impl TransactionSigner for KeypairSigner {
    fn pubkey(&self) -> Pubkey {
        Pubkey::new(self.key.verifying_key().to_bytes())
    }

    fn sign_transaction(&self, message: Message) -> Result<Transaction, TransferError> {
        let signer = self.pubkey();
        match message.fee_payer() {
            Some(payer) if *payer == signer => {}
            Some(payer) => {
                return Err(TransferError::signing(format!(
                    "fee payer {payer} is not the connected account {signer}"
                )));
            }
            None => return Err(TransferError::signing("message has no fee payer")),
        }

        let signature = self.key.sign(&message.serialize());
        Ok(Transaction::new(
            message,
            vec![Signature::new(signature.to_bytes())],
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransferInstruction;
    use crate::test_utils::{BlockhashMother, PubkeyMother, SignerMother};
    use ed25519_dalek::{Verifier, VerifyingKey};

    fn message_paid_by(payer: Pubkey) -> Message {
        let transfers = [TransferInstruction::new(payer, PubkeyMother::recipient(1), 10)];
        Message::new(payer, &transfers, BlockhashMother::recent()).unwrap()
    }

    #[test]
    fn test_signed_transaction_verifies() {
        let signer = SignerMother::keypair();
        let message = message_paid_by(signer.pubkey());
        let bytes = message.serialize();

        let tx = signer.sign_transaction(message).unwrap();

        assert_eq!(tx.signatures.len(), 1);
        let verifying = VerifyingKey::from_bytes(signer.pubkey().as_bytes()).unwrap();
        let signature = ed25519_dalek::Signature::from_bytes(tx.signatures[0].as_bytes());
        assert!(verifying.verify(&bytes, &signature).is_ok());
    }

    #[test]
    fn test_sign_rejects_foreign_fee_payer() {
        let signer = SignerMother::keypair();
        let message = message_paid_by(PubkeyMother::payer());

        assert!(matches!(
            signer.sign_transaction(message),
            Err(TransferError::Signing(_))
        ));
    }

    #[test]
    fn test_from_json_round_trip() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let json = serde_json::to_string(&key.to_keypair_bytes().to_vec()).unwrap();

        let signer = KeypairSigner::from_json(&json).unwrap();
        assert_eq!(signer.pubkey(), Pubkey::new(key.verifying_key().to_bytes()));
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(KeypairSigner::from_json("not json").is_err());
        assert!(KeypairSigner::from_json("[1, 2, 3]").is_err());

        let mut bytes = SigningKey::from_bytes(&[7u8; 32]).to_keypair_bytes();
        bytes[40] ^= 0xff;
        let json = serde_json::to_string(&bytes.to_vec()).unwrap();
        assert!(KeypairSigner::from_json(&json).is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = KeypairSigner::from_file(Path::new("/nonexistent/splitpay/id.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read keypair"));
    }

    #[test]
    fn test_debug_hides_secret() {
        let signer = SignerMother::keypair();
        let debug = format!("{signer:?}");
        assert!(debug.contains("KeypairSigner"));
        assert!(debug.contains(&signer.pubkey().to_string()));
    }
}
