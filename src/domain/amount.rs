//! Decimal SOL amounts and their exact lamport representation.
//!
//! Amounts are edited as decimal text and converted to integer lamports
//! (1 SOL = 10^9 lamports) with integer arithmetic only. No step goes
//! through binary floating point.

use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Number of fractional digits in a SOL amount.
pub const SOL_DECIMALS: usize = 9;

/// Lamports in one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

// ============================================================================
// Error Types
// ============================================================================

/// Problems with a decimal amount entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The field was left empty.
    #[error("Amount is required")]
    Required,
    /// The text is not `digits` optionally followed by `.` and 1-9 digits.
    #[error("Amount must be a number with up to 9 decimals")]
    InvalidFormat,
    /// The value does not fit in a 64-bit lamport amount.
    #[error("Amount is larger than the maximum transferable value")]
    TooLarge,
}

// ============================================================================
// Input Sanitizing
// ============================================================================

/// Cleans raw keyboard or paste input into amount text.
///
/// Keeps ASCII digits and the first decimal point, truncates the fraction
/// to 9 digits and strips redundant leading zeros from the integer part.
/// Applying it twice gives the same result as applying it once.
///
/// # Example
///
/// ```ignore
/// assert_eq!(sanitize_amount_input("12,345.6789012345"), "12345.678901234");
/// ```
#[must_use]
pub fn sanitize_amount_input(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let (int_part, frac_part) = match filtered.split_once('.') {
        Some((int_part, rest)) => (int_part, Some(rest.replace('.', ""))),
        None => (filtered.as_str(), None),
    };

    let int_part = if int_part.len() > 1 {
        match int_part.trim_start_matches('0') {
            "" => "0",
            stripped => stripped,
        }
    } else {
        int_part
    };

    match frac_part {
        Some(frac) => {
            let keep = frac.len().min(SOL_DECIMALS);
            format!("{int_part}.{}", &frac[..keep])
        }
        None => int_part.to_string(),
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Returns `true` if `text` matches `digits ("." 1-9 digits)?`.
#[must_use]
pub fn is_valid_amount_format(text: &str) -> bool {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    match text.split_once('.') {
        Some((int_part, frac_part)) => {
            all_digits(int_part) && frac_part.len() <= SOL_DECIMALS && all_digits(frac_part)
        }
        None => all_digits(text),
    }
}

/// Validates user amount text and converts it to lamports.
///
/// # Errors
///
/// Returns [`AmountError::Required`] for blank text,
/// [`AmountError::InvalidFormat`] when the text is not a decimal with up to
/// 9 fractional digits, and [`AmountError::TooLarge`] when the value
/// overflows a lamport amount.
pub fn parse_amount(text: &str) -> Result<u64, AmountError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Required);
    }
    if !is_valid_amount_format(trimmed) {
        return Err(AmountError::InvalidFormat);
    }
    decimal_to_lamports(trimmed)
}

// ============================================================================
// Conversion
// ============================================================================

/// Converts decimal SOL text to lamports.
///
/// The fraction is right-padded (or truncated) to exactly 9 digits and an
/// empty integer part counts as zero, so `".5"` and `"0.5"` agree.
///
/// # Errors
///
/// Returns [`AmountError::InvalidFormat`] if either part contains anything
/// other than ASCII digits, and [`AmountError::TooLarge`] on overflow.
pub fn decimal_to_lamports(text: &str) -> Result<u64, AmountError> {
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(int_part) || !is_digits(frac_part) {
        return Err(AmountError::InvalidFormat);
    }

    let whole = match int_part.trim_start_matches('0') {
        "" => 0,
        digits => digits.parse::<u64>().map_err(|_| AmountError::TooLarge)?,
    };

    let mut fraction: u64 = 0;
    let mut digits = frac_part.bytes().chain(std::iter::repeat(b'0'));
    for _ in 0..SOL_DECIMALS {
        let digit = digits.next().unwrap_or(b'0') - b'0';
        fraction = fraction * 10 + u64::from(digit);
    }

    whole
        .checked_mul(LAMPORTS_PER_SOL)
        .and_then(|lamports| lamports.checked_add(fraction))
        .ok_or(AmountError::TooLarge)
}

/// Formats lamports as canonical decimal SOL text.
///
/// Trailing fractional zeros are stripped and the fraction is omitted when
/// it is zero. Accepts aggregated totals wider than a single amount.
#[must_use]
pub fn lamports_to_decimal(lamports: impl Into<u128>) -> String {
    let lamports = lamports.into();
    let per_sol = u128::from(LAMPORTS_PER_SOL);
    let whole = lamports / per_sol;
    let fraction = lamports % per_sol;

    if fraction == 0 {
        return whole.to_string();
    }

    let fraction = format!("{fraction:09}");
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

/// Formats lamports for display, e.g. `"1.5 SOL"`.
#[must_use]
pub fn format_sol(lamports: impl Into<u128>) -> String {
    format!("{} SOL", lamports_to_decimal(lamports))
}

// ============================================================================
// Tests
// ============================================================================
