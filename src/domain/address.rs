//! Solana public keys and recipient address validation.
//!
//! Validation is layered: a structural check (length and base58 alphabet)
//! always runs, and [`AddressCheck::StrictDecoder`] additionally requires the
//! text to decode to exactly 32 bytes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Shortest base58 rendering of a 32-byte key.
pub const MIN_ADDRESS_LEN: usize = 32;

/// Longest base58 rendering of a 32-byte key.
pub const MAX_ADDRESS_LEN: usize = 44;

/// Byte length of a public key.
pub const PUBKEY_BYTES: usize = 32;

// ============================================================================
// Error Types
// ============================================================================

/// Problems with a recipient address entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The field was left empty.
    #[error("Address is required")]
    Required,
    /// Wrong length or a character outside the base58 alphabet.
    #[error("Invalid Solana address")]
    InvalidFormat,
    /// Structurally fine, but does not decode to a 32-byte key.
    #[error("Invalid Solana address")]
    Undecodable,
}

// ============================================================================
// Pubkey
// ============================================================================

/// A 32-byte ed25519 public key, displayed in base58.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pubkey([u8; PUBKEY_BYTES]);

impl Pubkey {
    /// Wraps raw key bytes.
    #[must_use]
    pub const fn new(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Returns the raw key bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; PUBKEY_BYTES] {
        self.0
    }

    /// Borrows the raw key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; PUBKEY_BYTES] {
        &self.0
    }
}

impl FromStr for Pubkey {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; PUBKEY_BYTES];
        match bs58::decode(s.trim()).onto(&mut bytes) {
            Ok(PUBKEY_BYTES) => Ok(Self(bytes)),
            _ => Err(AddressError::Undecodable),
        }
    }
}

impl TryFrom<String> for Pubkey {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pubkey> for String {
    fn from(value: Pubkey) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for Pubkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}

impl std::fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pubkey({self})")
    }
}

// ============================================================================
// Address Check
// ============================================================================

/// How strictly recipient addresses are validated.
///
/// Chosen once at startup from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressCheck {
    /// Structural check plus a base58 decode to exactly 32 bytes.
    #[default]
    StrictDecoder,
    /// Structural check only. Some accepted strings may still fail to
    /// decode when the transfer is built.
    HeuristicOnly,
}

impl AddressCheck {
    /// Builds the capability from the `strict_address_check` config flag.
    #[must_use]
    pub const fn from_strict(strict: bool) -> Self {
        if strict {
            Self::StrictDecoder
        } else {
            Self::HeuristicOnly
        }
    }

    /// Validates `text` and returns the decoded key when one is available.
    ///
    /// In heuristic mode a structurally valid address that does not decode
    /// yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Required`] for blank text,
    /// [`AddressError::InvalidFormat`] on a structural failure and
    /// [`AddressError::Undecodable`] when strict decoding fails.
    pub fn validate(self, text: &str) -> Result<Option<Pubkey>, AddressError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Required);
        }
        if !has_address_shape(trimmed) {
            return Err(AddressError::InvalidFormat);
        }

        match self {
            Self::StrictDecoder => trimmed.parse().map(Some),
            Self::HeuristicOnly => Ok(trimmed.parse().ok()),
        }
    }

    /// Returns `true` if `text` passes this check.
    #[must_use]
    pub fn is_valid_address(self, text: &str) -> bool {
        self.validate(text).is_ok()
    }
}

/// Length and alphabet check shared by both validation modes.
fn has_address_shape(text: &str) -> bool {
    (MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&text.len())
        && text.bytes().all(is_base58_char)
}

const fn is_base58_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() && !matches!(b, b'0' | b'O' | b'I' | b'l')
}

// ============================================================================
// Display Helpers
// ============================================================================

/// Shortens an address to `leading...trailing` characters.
///
/// Addresses short enough to show in full are returned unchanged.
#[must_use]
pub fn truncate_address(addr: &str, leading: usize, trailing: usize) -> String {
    let len = addr.chars().count();
    if len <= leading + trailing + 3 {
        return addr.to_string();
    }

    let prefix: String = addr.chars().take(leading).collect();
    let suffix: String = addr.chars().skip(len - trailing).collect();
    format!("{prefix}...{suffix}")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SYSTEM_PROGRAM: &str = "11111111111111111111111111111111";
    const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

    #[rstest]
    #[case(SYSTEM_PROGRAM)]
    #[case(TOKEN_PROGRAM)]
    #[case("  TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA  ")]
    fn test_valid_addresses(#[case] text: &str) {
        assert!(AddressCheck::StrictDecoder.is_valid_address(text));
        assert!(AddressCheck::HeuristicOnly.is_valid_address(text));
    }

    #[rstest]
    #[case("", AddressError::Required)]
    #[case("   ", AddressError::Required)]
    #[case("short", AddressError::InvalidFormat)]
    #[case("0x1234", AddressError::InvalidFormat)]
    #[case("0okenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA", AddressError::InvalidFormat)]
    #[case("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DAxx", AddressError::InvalidFormat)]
    #[case("1111111111111111111111111111111", AddressError::InvalidFormat)]
    #[case("Tokenkeg QfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA", AddressError::InvalidFormat)]
    fn test_invalid_addresses(#[case] text: &str, #[case] expected: AddressError) {
        assert_eq!(AddressCheck::StrictDecoder.validate(text), Err(expected));
        assert_eq!(AddressCheck::HeuristicOnly.validate(text), Err(expected));
    }

    #[test]
    fn test_strict_decoder_rejects_wrong_byte_length() {
        // 44 base58 'z' characters decode to more than 32 bytes.
        let oversized = "z".repeat(44);
        assert_eq!(
            AddressCheck::StrictDecoder.validate(&oversized),
            Err(AddressError::Undecodable)
        );
        assert_eq!(AddressCheck::HeuristicOnly.validate(&oversized), Ok(None));

        // 44 characters is within the shape bound but decodes to 33 bytes.
        let extended = format!("{TOKEN_PROGRAM}x");
        assert_eq!(
            AddressCheck::StrictDecoder.validate(&extended),
            Err(AddressError::Undecodable)
        );
        assert_eq!(AddressCheck::HeuristicOnly.validate(&extended), Ok(None));
    }

    #[test]
    fn test_validate_returns_decoded_key() {
        let key = AddressCheck::StrictDecoder
            .validate(SYSTEM_PROGRAM)
            .unwrap()
            .unwrap();
        assert_eq!(key, Pubkey::default());
    }

    #[test]
    fn test_from_strict() {
        assert_eq!(AddressCheck::from_strict(true), AddressCheck::StrictDecoder);
        assert_eq!(AddressCheck::from_strict(false), AddressCheck::HeuristicOnly);
    }

    #[test]
    fn test_pubkey_display_round_trip() {
        let key: Pubkey = TOKEN_PROGRAM.parse().unwrap();
        assert_eq!(key.to_string(), TOKEN_PROGRAM);
        assert_eq!(format!("{key:?}"), format!("Pubkey({TOKEN_PROGRAM})"));
    }

    #[test]
    fn test_pubkey_serde_as_string() {
        let key = Pubkey::new([1; 32]);
        let json = serde_json::to_string(&key).unwrap();
        let back: Pubkey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<Pubkey>("\"not-a-key\"").is_err());
    }

    #[test]
    fn test_address_error_messages() {
        assert_eq!(AddressError::Required.to_string(), "Address is required");
        assert_eq!(AddressError::InvalidFormat.to_string(), "Invalid Solana address");
    }

    #[rstest]
    #[case(TOKEN_PROGRAM, 6, 4, "Tokenk...Q5DA")]
    #[case("abcdefghij", 4, 4, "abcdefghij")]
    #[case("abcdefghijkl", 4, 4, "abcd...ijkl")]
    fn test_truncate_address(
        #[case] addr: &str,
        #[case] leading: usize,
        #[case] trailing: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(truncate_address(addr, leading, trailing), expected);
    }
}
