//! Application constants for the SplitPay TUI.
//!
//! UI dimensions, display symbols and loop timing live here so the layout
//! and the event loop agree on them.

use std::time::Duration;

// ============================================================================
// Timing
// ============================================================================

/// Interval of the UI loop tick; timers (toast, copied indicator) count
/// these.
pub const TICK_RATE: Duration = Duration::from_millis(100);

// ============================================================================
// UI Dimension Constants
// ============================================================================

/// Height of the application header (title, cluster, account).
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the footer key hints.
pub const FOOTER_HEIGHT: u16 = 1;

/// Rows used by one recipient: the input line and its error line.
pub const RECIPIENT_ROW_HEIGHT: u16 = 2;

/// Width of the summary panel on wide terminals.
pub const SUMMARY_WIDTH: u16 = 38;

/// Terminal width below which the summary stacks under the list.
pub const NARROW_LAYOUT_WIDTH: u16 = 100;

// ============================================================================
// Display Symbols
// ============================================================================

/// Symbol shown before SOL amounts.
pub const SOL_SYMBOL: &str = "◎";

/// Leading characters kept when an address is shortened.
pub const ADDRESS_LEADING_CHARS: usize = 6;

/// Trailing characters kept when an address is shortened.
pub const ADDRESS_TRAILING_CHARS: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_rate_is_sub_second() {
        assert!(TICK_RATE < Duration::from_secs(1));
        assert!(!TICK_RATE.is_zero());
    }

    #[test]
    fn test_summary_fits_narrow_breakpoint() {
        assert!(SUMMARY_WIDTH < NARROW_LAYOUT_WIDTH / 2);
    }
}
