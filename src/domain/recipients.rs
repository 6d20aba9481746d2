//! The bounded, ordered list of transfer recipients.
//!
//! A [`RecipientList`] always holds between one and [`MAX_RECIPIENTS`]
//! entries. Entries are addressed by a [`RecipientId`] that is never reused,
//! so edits stay attached to the right row while rows come and go.

use std::collections::BTreeMap;

use super::address::{AddressCheck, AddressError};
use super::amount::{
    AmountError, decimal_to_lamports, is_valid_amount_format, lamports_to_decimal, parse_amount,
    sanitize_amount_input,
};

// ============================================================================
// Constants
// ============================================================================

/// Most recipients a single batch may hold.
pub const MAX_RECIPIENTS: usize = 20;

// ============================================================================
// Entries
// ============================================================================

/// Stable identifier of a recipient row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipientId(u64);

impl RecipientId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RecipientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One recipient row as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientEntry {
    /// Stable row identifier.
    pub id: RecipientId,
    /// Raw address text, trimmed only when validated or used.
    pub address: String,
    /// Sanitized decimal SOL text.
    pub amount_text: String,
}

impl RecipientEntry {
    fn empty(id: RecipientId) -> Self {
        Self {
            id,
            address: String::new(),
            amount_text: String::new(),
        }
    }

    /// Lamports for this row, if the amount text is a well-formed decimal.
    #[must_use]
    pub fn amount_lamports(&self) -> Option<u64> {
        let text = self.amount_text.trim();
        if !is_valid_amount_format(text) {
            return None;
        }
        decimal_to_lamports(text).ok()
    }
}

// ============================================================================
// Validation Report
// ============================================================================

/// Validation problems of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldErrors {
    pub address: Option<AddressError>,
    pub amount: Option<AmountError>,
}

impl FieldErrors {
    /// Returns `true` if the row has no problems.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.address.is_none() && self.amount.is_none()
    }
}

/// Per-row validation result, keyed by recipient id.
///
/// Only rows with at least one problem are present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    errors: BTreeMap<RecipientId, FieldErrors>,
}

impl ValidationReport {
    /// Returns `true` if every row passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Problems for one row, if any.
    #[must_use]
    pub fn get(&self, id: RecipientId) -> Option<&FieldErrors> {
        self.errors.get(&id)
    }

    /// Iterates over rows with problems in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&RecipientId, &FieldErrors)> {
        self.errors.iter()
    }

    /// Number of rows with problems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if no row has problems.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

// ============================================================================
// Recipient List
// ============================================================================

/// Ordered list of recipients, never empty and never above the cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientList {
    entries: Vec<RecipientEntry>,
    next_id: u64,
}

impl Default for RecipientList {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipientList {
    /// Creates a list holding a single empty row.
    #[must_use]
    pub fn new() -> Self {
        let mut list = Self {
            entries: Vec::with_capacity(MAX_RECIPIENTS),
            next_id: 0,
        };
        let id = list.fresh_id();
        list.entries.push(RecipientEntry::empty(id));
        list
    }

    /// Creates a list prefilled from `(address, amount)` pairs.
    ///
    /// Extra pairs past the cap are dropped, amounts are sanitized and an
    /// empty input yields a single empty row.
    #[must_use]
    pub fn from_defaults<A, M>(defaults: impl IntoIterator<Item = (A, M)>) -> Self
    where
        A: Into<String>,
        M: AsRef<str>,
    {
        let mut list = Self {
            entries: Vec::with_capacity(MAX_RECIPIENTS),
            next_id: 0,
        };

        for (address, amount) in defaults.into_iter().take(MAX_RECIPIENTS) {
            let id = list.fresh_id();
            list.entries.push(RecipientEntry {
                id,
                address: address.into(),
                amount_text: sanitize_amount_input(amount.as_ref()),
            });
        }

        if list.entries.is_empty() {
            let id = list.fresh_id();
            list.entries.push(RecipientEntry::empty(id));
        }
        list
    }

    fn fresh_id(&mut self) -> RecipientId {
        let id = RecipientId(self.next_id);
        self.next_id += 1;
        id
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Number of rows, always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows that can still be added before reaching the cap.
    #[must_use]
    pub fn remaining_slots(&self) -> usize {
        MAX_RECIPIENTS - self.entries.len()
    }

    /// Returns `true` when another row can be added.
    #[must_use]
    pub fn can_add(&self) -> bool {
        self.entries.len() < MAX_RECIPIENTS
    }

    /// Returns `true` when a row can be removed.
    #[must_use]
    pub fn can_remove(&self) -> bool {
        self.entries.len() > 1
    }

    /// Iterates over rows in display order.
    pub fn iter(&self) -> impl Iterator<Item = &RecipientEntry> {
        self.entries.iter()
    }

    /// Looks up a row by id.
    #[must_use]
    pub fn get(&self, id: RecipientId) -> Option<&RecipientEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Id of the row at a display position.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<RecipientId> {
        self.entries.get(index).map(|entry| entry.id)
    }

    /// Display position of a row.
    #[must_use]
    pub fn position(&self, id: RecipientId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Sum of every well-formed amount, in lamports.
    ///
    /// Empty or malformed amounts count as zero. The sum is wider than a
    /// single amount so it cannot overflow for a full list.
    #[must_use]
    pub fn total_lamports(&self) -> u128 {
        self.entries
            .iter()
            .filter_map(RecipientEntry::amount_lamports)
            .map(u128::from)
            .sum()
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Appends an empty row and returns its id.
    ///
    /// Returns `None` and leaves the list unchanged when it is full.
    pub fn add(&mut self) -> Option<RecipientId> {
        if !self.can_add() {
            return None;
        }
        let id = self.fresh_id();
        self.entries.push(RecipientEntry::empty(id));
        Some(id)
    }

    /// Removes a row by id.
    ///
    /// Returns `false` when the id is unknown or the row is the last one.
    pub fn remove(&mut self, id: RecipientId) -> bool {
        if !self.can_remove() {
            return false;
        }
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Replaces a row's address text.
    pub fn set_address(&mut self, id: RecipientId, text: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.address = text.into();
                true
            }
            None => false,
        }
    }

    /// Replaces a row's amount text after sanitizing it.
    pub fn set_amount(&mut self, id: RecipientId, text: &str) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.amount_text = sanitize_amount_input(text);
                true
            }
            None => false,
        }
    }

    /// Overwrites amounts positionally with canonical decimal text.
    ///
    /// Used for derived allocations. Rows past the end of `lamports` keep
    /// their amounts.
    pub fn overwrite_amounts(&mut self, lamports: &[u64]) {
        for (entry, amount) in self.entries.iter_mut().zip(lamports) {
            entry.amount_text = lamports_to_decimal(*amount);
        }
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Validates every row.
    ///
    /// Amounts are skipped in split mode, where they are derived rather than
    /// typed.
    #[must_use]
    pub fn validate(&self, split_mode: bool, check: AddressCheck) -> ValidationReport {
        let errors = self
            .entries
            .iter()
            .filter_map(|entry| {
                let errors = FieldErrors {
                    address: check.validate(&entry.address).err(),
                    amount: if split_mode {
                        None
                    } else {
                        parse_amount(&entry.amount_text).err()
                    },
                };
                (!errors.is_empty()).then_some((entry.id, errors))
            })
            .collect();

        ValidationReport { errors }
    }
}

// ============================================================================
// Tests
// ============================================================================
