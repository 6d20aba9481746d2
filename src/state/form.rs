//! The editable transfer form.
//!
//! [`FormState`] owns the recipient list, the split-mode flag and the split
//! total, plus which field has keyboard focus. Every mutation goes through
//! [`FormState::notify`] with a [`FormChange`]; changes to the split inputs
//! re-run the even split, which overwrites every row amount.

use crate::domain::amount::{decimal_to_lamports, is_valid_amount_format, sanitize_amount_input};
use crate::domain::{
    AddressCheck, AmountError, Pubkey, RecipientId, RecipientList, TransferError,
    TransferInstruction, ValidationReport, allocate_even_split, parse_amount,
};

// ============================================================================
// Field Focus
// ============================================================================

/// Input field that receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Address,
    Amount,
    /// The split total; only reachable in split mode.
    Total,
}

impl FormField {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Address => "Address",
            Self::Amount => "Amount (SOL)",
            Self::Total => "Total (SOL)",
        }
    }
}

// ============================================================================
// Change Events
// ============================================================================

/// A mutation of the form, raised after it has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormChange {
    AddressEdited(RecipientId),
    AmountEdited(RecipientId),
    RecipientAdded(RecipientId),
    RecipientRemoved(RecipientId),
    SplitToggled(bool),
    TotalChanged,
}

impl FormChange {
    /// Whether this change invalidates the split allocation.
    #[must_use]
    pub const fn affects_split(self) -> bool {
        matches!(
            self,
            Self::RecipientAdded(_)
                | Self::RecipientRemoved(_)
                | Self::SplitToggled(_)
                | Self::TotalChanged
        )
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validation result of the whole form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValidation {
    pub rows: ValidationReport,
    /// Problem with the split total; always `None` outside split mode.
    pub total: Option<AmountError>,
}

impl FormValidation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.rows.is_valid() && self.total.is_none()
    }

    /// One human-readable line per problem, for logs and toasts.
    #[must_use]
    pub fn messages(&self, recipients: &RecipientList) -> Vec<String> {
        let mut messages: Vec<String> = self
            .rows
            .iter()
            .flat_map(|(id, errors)| {
                let row = recipients.position(*id).map_or(0, |i| i + 1);
                let address = errors
                    .address
                    .map(|e| format!("Recipient {row}: {e}"));
                let amount = errors.amount.map(|e| format!("Recipient {row}: {e}"));
                address.into_iter().chain(amount)
            })
            .collect();

        if let Some(error) = self.total {
            messages.push(format!("Total: {error}"));
        }
        messages
    }
}

// ============================================================================
// Form State
// ============================================================================

/// Recipients, split settings and keyboard focus.
#[derive(Debug, Clone)]
pub struct FormState {
    recipients: RecipientList,
    split_evenly: bool,
    total_text: String,
    selected: usize,
    field: FormField,
    address_check: AddressCheck,
}

impl FormState {
    /// An empty form with a single blank recipient.
    #[must_use]
    pub fn new(address_check: AddressCheck) -> Self {
        Self::with_recipients(RecipientList::new(), address_check)
    }

    #[must_use]
    pub fn with_recipients(recipients: RecipientList, address_check: AddressCheck) -> Self {
        Self {
            recipients,
            split_evenly: false,
            total_text: String::new(),
            selected: 0,
            field: FormField::Address,
            address_check,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn recipients(&self) -> &RecipientList {
        &self.recipients
    }

    #[must_use]
    pub fn split_evenly(&self) -> bool {
        self.split_evenly
    }

    #[must_use]
    pub fn total_text(&self) -> &str {
        &self.total_text
    }

    #[must_use]
    pub fn address_check(&self) -> AddressCheck {
        self.address_check
    }

    /// Display index of the selected recipient.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<RecipientId> {
        self.recipients.id_at(self.selected)
    }

    #[must_use]
    pub fn focus(&self) -> FormField {
        self.field
    }

    /// Sum of the well-formed row amounts.
    #[must_use]
    pub fn total_lamports(&self) -> u128 {
        self.recipients.total_lamports()
    }

    /// Validates every row and, in split mode, the total.
    #[must_use]
    pub fn validate(&self) -> FormValidation {
        FormValidation {
            rows: self.recipients.validate(self.split_evenly, self.address_check),
            total: if self.split_evenly {
                parse_amount(&self.total_text).err()
            } else {
                None
            },
        }
    }

    // ========================================================================
    // Change Observer
    // ========================================================================

    /// Reacts to an applied mutation.
    ///
    /// This is the only place that triggers the split recompute, so every
    /// mutation method must route its change through here.
    pub fn notify(&mut self, change: FormChange) {
        tracing::trace!(?change, "form changed");
        if change.affects_split() {
            self.recompute_split();
        }
    }

    /// Overwrites every row amount with an even split of the total.
    ///
    /// Does nothing outside split mode or while the total is not a
    /// well-formed amount, so a half-typed total leaves the last good
    /// allocation in place.
    pub fn recompute_split(&mut self) {
        if !self.split_evenly {
            return;
        }
        let total_text = self.total_text.trim();
        if !is_valid_amount_format(total_text) {
            return;
        }
        let Ok(total) = decimal_to_lamports(total_text) else {
            return;
        };

        let allocations = allocate_even_split(total, self.recipients.len());
        self.recipients.overwrite_amounts(&allocations);
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Appends a recipient and selects it.
    pub fn add_recipient(&mut self) -> Option<RecipientId> {
        let id = self.recipients.add()?;
        self.selected = self.recipients.len() - 1;
        self.field = FormField::Address;
        self.notify(FormChange::RecipientAdded(id));
        Some(id)
    }

    /// Removes a recipient by id, keeping the selection in range.
    pub fn remove_recipient(&mut self, id: RecipientId) -> bool {
        if !self.recipients.remove(id) {
            return false;
        }
        self.selected = self.selected.min(self.recipients.len() - 1);
        self.notify(FormChange::RecipientRemoved(id));
        true
    }

    /// Removes the selected recipient.
    pub fn remove_selected(&mut self) -> bool {
        self.selected_id()
            .is_some_and(|id| self.remove_recipient(id))
    }

    pub fn set_address(&mut self, id: RecipientId, text: impl Into<String>) -> bool {
        if !self.recipients.set_address(id, text) {
            return false;
        }
        self.notify(FormChange::AddressEdited(id));
        true
    }

    /// Sets a row amount; ignored in split mode, where amounts are derived.
    pub fn set_amount(&mut self, id: RecipientId, text: &str) -> bool {
        if self.split_evenly || !self.recipients.set_amount(id, text) {
            return false;
        }
        self.notify(FormChange::AmountEdited(id));
        true
    }

    /// Sets the split total after sanitizing it.
    pub fn set_total(&mut self, text: &str) {
        self.total_text = sanitize_amount_input(text);
        self.notify(FormChange::TotalChanged);
    }

    /// Turns split mode on or off.
    ///
    /// Turning it on overwrites every row amount as soon as the total is
    /// well-formed. Turning it off keeps the derived amounts as editable
    /// values.
    pub fn set_split(&mut self, enabled: bool) {
        if self.split_evenly == enabled {
            return;
        }
        self.split_evenly = enabled;
        self.field = match (enabled, self.field) {
            (true, FormField::Amount) => FormField::Total,
            (false, FormField::Total) => FormField::Amount,
            (_, field) => field,
        };
        self.notify(FormChange::SplitToggled(enabled));
    }

    pub fn toggle_split(&mut self) {
        self.set_split(!self.split_evenly);
    }

    // ========================================================================
    // Keyboard Editing
    // ========================================================================

    /// Current text of the focused field.
    #[must_use]
    pub fn focused_text(&self) -> &str {
        match self.field {
            FormField::Total => &self.total_text,
            FormField::Address | FormField::Amount => self
                .selected_id()
                .and_then(|id| self.recipients.get(id))
                .map_or("", |entry| match self.field {
                    FormField::Address => entry.address.as_str(),
                    _ => entry.amount_text.as_str(),
                }),
        }
    }

    /// Replaces the focused field's text.
    fn set_focused_text(&mut self, text: &str) {
        match self.field {
            FormField::Total => self.set_total(text),
            FormField::Address => {
                if let Some(id) = self.selected_id() {
                    self.set_address(id, text);
                }
            }
            FormField::Amount => {
                if let Some(id) = self.selected_id() {
                    self.set_amount(id, text);
                }
            }
        }
    }

    /// Types a character into the focused field.
    pub fn push_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let mut text = self.focused_text().to_string();
        text.push(c);
        self.set_focused_text(&text);
    }

    /// Inserts pasted text into the focused field.
    ///
    /// Addresses are pasted trimmed; amounts go through the sanitizer.
    pub fn paste(&mut self, pasted: &str) {
        let mut text = self.focused_text().to_string();
        match self.field {
            FormField::Address => text.push_str(pasted.trim()),
            FormField::Amount | FormField::Total => text.push_str(pasted),
        }
        self.set_focused_text(&text);
    }

    /// Deletes the last character of the focused field.
    pub fn backspace(&mut self) {
        let mut text = self.focused_text().to_string();
        if text.pop().is_some() {
            self.set_focused_text(&text);
        }
    }

    /// Clears the focused field.
    pub fn clear_field(&mut self) {
        self.set_focused_text("");
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Moves focus to the next field, wrapping onto the next row.
    pub fn next_field(&mut self) {
        match (self.field, self.split_evenly) {
            (FormField::Address, false) => self.field = FormField::Amount,
            (FormField::Address, true) => self.field = FormField::Total,
            (FormField::Amount, _) => {
                self.field = FormField::Address;
                self.select_next();
            }
            (FormField::Total, _) => {
                self.field = FormField::Address;
                self.select_next();
            }
        }
    }

    /// Moves focus to the previous field, wrapping onto the previous row.
    pub fn prev_field(&mut self) {
        match (self.field, self.split_evenly) {
            (FormField::Address, split) => {
                self.select_prev();
                self.field = if split {
                    FormField::Total
                } else {
                    FormField::Amount
                };
            }
            (FormField::Amount | FormField::Total, _) => self.field = FormField::Address,
        }
    }

    /// Selects the next row, wrapping to the first.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.recipients.len();
    }

    /// Selects the previous row, wrapping to the last.
    pub fn select_prev(&mut self) {
        let len = self.recipients.len();
        self.selected = (self.selected + len - 1) % len;
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Freezes the current rows into transfer instructions paid by `payer`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::InvalidInput`] naming the first row whose
    /// address does not decode or whose amount does not parse. With
    /// heuristic address checks this can fail even after validation passed.
    pub fn build_instructions(
        &self,
        payer: Pubkey,
    ) -> Result<Vec<TransferInstruction>, TransferError> {
        self.recipients
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let to: Pubkey = entry.address.trim().parse().map_err(|e| {
                    TransferError::invalid_input(format!("Recipient {}: {e}", i + 1))
                })?;
                let lamports = parse_amount(&entry.amount_text).map_err(|e| {
                    TransferError::invalid_input(format!("Recipient {}: {e}", i + 1))
                })?;
                Ok(TransferInstruction::new(payer, to, lamports))
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AddressError, MAX_RECIPIENTS};
    use crate::test_utils::{AddressMother, FormMother, PubkeyMother};

    fn amounts(form: &FormState) -> Vec<String> {
        form.recipients()
            .iter()
            .map(|e| e.amount_text.clone())
            .collect()
    }

    #[test]
    fn test_split_ten_across_three() {
        let mut form = FormMother::three_recipients();
        form.set_split(true);
        form.set_total("10");

        assert_eq!(amounts(&form), ["3.333333334", "3.333333333", "3.333333333"]);
        assert_eq!(form.total_lamports(), 10_000_000_000);
    }

    #[test]
    fn test_split_recomputes_on_count_change() {
        let mut form = FormMother::three_recipients();
        form.set_split(true);
        form.set_total("1");

        form.add_recipient();
        assert_eq!(amounts(&form), ["0.25", "0.25", "0.25", "0.25"]);

        form.select_prev();
        form.remove_selected();
        assert_eq!(form.recipients().len(), 3);
        assert_eq!(amounts(&form), ["0.333333334", "0.333333333", "0.333333333"]);
    }

    #[test]
    fn test_split_discards_manual_amounts_when_enabled() {
        let mut form = FormMother::three_recipients();
        form.set_total("3");
        assert_eq!(amounts(&form), ["1", "2", "3"]);

        form.set_split(true);
        assert_eq!(amounts(&form), ["1", "1", "1"]);
    }

    #[test]
    fn test_total_is_inert_outside_split_mode() {
        let mut form = FormMother::three_recipients();
        form.set_total("99");
        assert_eq!(amounts(&form), ["1", "2", "3"]);
    }

    #[test]
    fn test_invalid_total_keeps_previous_allocation() {
        let mut form = FormMother::three_recipients();
        form.set_split(true);
        form.set_total("3");
        form.set_total("3.");

        assert_eq!(form.total_text(), "3.");
        assert_eq!(amounts(&form), ["1", "1", "1"]);
        assert_eq!(form.validate().total, Some(AmountError::InvalidFormat));
    }

    #[test]
    fn test_set_amount_ignored_in_split_mode() {
        let mut form = FormMother::three_recipients();
        form.set_split(true);
        form.set_total("3");
        let id = form.selected_id().unwrap();

        assert!(!form.set_amount(id, "7"));
        assert_eq!(form.recipients().get(id).unwrap().amount_text, "1");
    }

    #[test]
    fn test_disabling_split_keeps_amounts_editable() {
        let mut form = FormMother::three_recipients();
        form.set_split(true);
        form.set_total("3");
        form.set_split(false);

        let id = form.selected_id().unwrap();
        assert!(form.set_amount(id, "5"));
        assert_eq!(amounts(&form), ["5", "1", "1"]);
    }

    #[test]
    fn test_validation_gating() {
        let mut form = FormState::new(AddressCheck::StrictDecoder);
        assert!(!form.validate().is_valid());

        let id = form.selected_id().unwrap();
        form.set_address(id, AddressMother::alice());
        form.set_amount(id, "1.5");
        assert!(form.validate().is_valid());

        form.set_address(id, "short");
        let validation = form.validate();
        assert_eq!(
            validation.rows.get(id).unwrap().address,
            Some(AddressError::InvalidFormat)
        );
    }

    #[test]
    fn test_split_mode_requires_valid_total() {
        let mut form = FormMother::three_recipients();
        form.set_split(true);
        assert_eq!(form.validate().total, Some(AmountError::Required));

        form.set_total("2");
        assert!(form.validate().is_valid());
    }

    #[test]
    fn test_validation_messages_name_rows() {
        let mut form = FormMother::three_recipients();
        let second = form.recipients().id_at(1).unwrap();
        form.set_address(second, "0x1234");
        form.set_split(true);

        let messages = form.validate().messages(form.recipients());
        assert_eq!(
            messages,
            ["Recipient 2: Invalid Solana address", "Total: Amount is required"]
        );
    }

    #[test]
    fn test_keyboard_editing_of_amount() {
        let mut form = FormState::new(AddressCheck::StrictDecoder);
        form.next_field();
        assert_eq!(form.focus(), FormField::Amount);

        for c in "0012,5.1234567891".chars() {
            form.push_char(c);
        }
        assert_eq!(form.focused_text(), "125.123456789");

        form.backspace();
        assert_eq!(form.focused_text(), "125.12345678");

        form.clear_field();
        assert_eq!(form.focused_text(), "");
    }

    #[test]
    fn test_keyboard_editing_of_address() {
        let mut form = FormState::new(AddressCheck::StrictDecoder);
        form.paste(&format!("  {}\n", AddressMother::alice()));
        assert_eq!(form.focused_text(), AddressMother::alice());

        form.push_char('\u{7}');
        assert_eq!(form.focused_text(), AddressMother::alice());
    }

    #[test]
    fn test_typing_total_recomputes_each_keystroke() {
        let mut form = FormMother::three_recipients();
        form.set_split(true);
        assert_eq!(form.focus(), FormField::Address);
        form.next_field();
        assert_eq!(form.focus(), FormField::Total);

        form.push_char('6');
        assert_eq!(amounts(&form), ["2", "2", "2"]);
        form.push_char('0');
        assert_eq!(amounts(&form), ["20", "20", "20"]);
    }

    #[test]
    fn test_field_navigation_wraps_rows() {
        let mut form = FormMother::three_recipients();
        assert_eq!((form.selected_index(), form.focus()), (0, FormField::Address));

        form.next_field();
        form.next_field();
        assert_eq!((form.selected_index(), form.focus()), (1, FormField::Address));

        form.prev_field();
        assert_eq!((form.selected_index(), form.focus()), (0, FormField::Amount));

        form.prev_field();
        form.prev_field();
        assert_eq!((form.selected_index(), form.focus()), (2, FormField::Amount));
    }

    #[test]
    fn test_toggle_split_moves_amount_focus_to_total() {
        let mut form = FormMother::three_recipients();
        form.next_field();
        form.toggle_split();
        assert_eq!(form.focus(), FormField::Total);
        form.toggle_split();
        assert_eq!(form.focus(), FormField::Amount);
    }

    #[test]
    fn test_add_selects_new_row_and_respects_cap() {
        let mut form = FormState::new(AddressCheck::StrictDecoder);
        for _ in 0..MAX_RECIPIENTS + 5 {
            form.add_recipient();
        }
        assert_eq!(form.recipients().len(), MAX_RECIPIENTS);
        assert_eq!(form.selected_index(), MAX_RECIPIENTS - 1);
        assert!(form.add_recipient().is_none());
    }

    #[test]
    fn test_remove_keeps_selection_in_range() {
        let mut form = FormMother::three_recipients();
        form.select_prev();
        assert_eq!(form.selected_index(), 2);
        assert!(form.remove_selected());
        assert_eq!(form.selected_index(), 1);

        assert!(form.remove_selected());
        assert!(!form.remove_selected());
        assert_eq!(form.recipients().len(), 1);
    }

    #[test]
    fn test_build_instructions() {
        let form = FormMother::three_recipients();
        let payer = PubkeyMother::payer();

        let instructions = form.build_instructions(payer).unwrap();

        let lamports: Vec<u64> = instructions.iter().map(|ix| ix.lamports).collect();
        assert_eq!(lamports, [1_000_000_000, 2_000_000_000, 3_000_000_000]);
        assert!(instructions.iter().all(|ix| ix.from == payer));
        assert_eq!(instructions[0].to.to_string(), AddressMother::alice());
    }

    #[test]
    fn test_build_instructions_reports_undecodable_row() {
        let mut form = FormMother::three_recipients();
        let second = form.recipients().id_at(1).unwrap();
        form.set_address(second, "z".repeat(44));

        assert!(!form.validate().rows.is_valid());
        let err = form.build_instructions(PubkeyMother::payer()).unwrap_err();
        assert!(err.to_string().contains("Recipient 2"));
    }

    #[test]
    fn test_change_kinds_affecting_split() {
        let id = RecipientList::new().id_at(0).unwrap();
        assert!(FormChange::TotalChanged.affects_split());
        assert!(FormChange::SplitToggled(true).affects_split());
        assert!(FormChange::RecipientAdded(id).affects_split());
        assert!(FormChange::RecipientRemoved(id).affects_split());
        assert!(!FormChange::AddressEdited(id).affects_split());
        assert!(!FormChange::AmountEdited(id).affects_split());
    }
}
