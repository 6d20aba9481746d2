//! Recipients panel: one two-line row per recipient.
//!
//! The first line holds the address and amount inputs, the second the
//! validation errors of that row. Errors are shown as the user types.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::commands::InputContext;
use crate::constants::{RECIPIENT_ROW_HEIGHT, SOL_SYMBOL};
use crate::domain::address::MAX_ADDRESS_LEN;
use crate::domain::{FieldErrors, MAX_RECIPIENTS, RecipientEntry};
use crate::state::{App, FormField};
use crate::theme::{ACCENT_COLOR, DERIVED_STYLE, FIELD_ERROR_STYLE, MUTED_COLOR, PRIMARY_COLOR};
use crate::ui::helpers::{create_border_block, input_span};
use crate::ui::layout::window_start;

/// Address column width: the longest address plus the cursor.
const ADDRESS_FIELD_WIDTH: usize = MAX_ADDRESS_LEN + 1;

/// Width of the `▶ 12. ` row prefix.
const ROW_PREFIX_WIDTH: usize = 6;

// ============================================================================
// Rendering
// ============================================================================

/// Renders the recipient rows, scrolled so the selected row is visible.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let form = &app.form;
    let recipients = form.recipients();
    let editable = app.transfer.is_editing() && app.get_input_context() == InputContext::Form;

    let title = format!("Recipients ({}/{MAX_RECIPIENTS})", recipients.len());
    let block = create_border_block(&title, editable && form.focus() != FormField::Total);
    frame.render_widget(block.clone(), area);

    let inner = block.inner(area);
    let visible = usize::from(inner.height / RECIPIENT_ROW_HEIGHT);
    if visible == 0 {
        return;
    }

    let validation = form.validate();
    let selected = form.selected_index();
    let start = window_start(selected, visible, recipients.len());

    let lines: Vec<Line> = recipients
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .flat_map(|(index, entry)| {
            let errors = validation.rows.get(entry.id).copied().unwrap_or_default();
            let active = (editable && index == selected).then_some(form.focus());
            row_lines(index, entry, errors, active, form.split_evenly())
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);

    if recipients.len() > visible {
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .symbols(scrollbar::VERTICAL)
            .track_symbol(None)
            .begin_symbol(None)
            .end_symbol(None)
            .style(Style::default().fg(MUTED_COLOR))
            .track_style(Style::default().fg(Color::DarkGray));

        let mut state = ScrollbarState::default()
            .content_length(recipients.len())
            .viewport_content_length(visible)
            .position(start);

        frame.render_stateful_widget(scrollbar, inner, &mut state);
    }
}

/// The input line and the error line of one recipient.
///
/// `active` is the field being edited when this row is selected.
fn row_lines<'a>(
    index: usize,
    entry: &'a RecipientEntry,
    errors: FieldErrors,
    active: Option<FormField>,
    split: bool,
) -> [Line<'a>; 2] {
    let marker = if active.is_some() { "▶" } else { " " };
    let prefix = Span::styled(
        format!("{marker} {:>2}. ", index + 1),
        Style::default()
            .fg(PRIMARY_COLOR)
            .add_modifier(Modifier::BOLD),
    );

    let address = input_span(
        &entry.address,
        "address",
        active == Some(FormField::Address),
        Style::default(),
    );
    let amount_style = if split {
        DERIVED_STYLE
    } else {
        Style::default().fg(ACCENT_COLOR)
    };
    let amount = input_span(
        &entry.amount_text,
        "0",
        active == Some(FormField::Amount),
        amount_style,
    );

    let address_pad = ADDRESS_FIELD_WIDTH.saturating_sub(address.width());
    let input_line = Line::from(vec![
        prefix,
        address,
        Span::raw(" ".repeat(address_pad + 2)),
        Span::styled(format!("{SOL_SYMBOL} "), Style::default().fg(MUTED_COLOR)),
        amount,
    ]);

    let address_error = errors.address.map(|e| e.to_string()).unwrap_or_default();
    let amount_error = errors.amount.map(|e| e.to_string()).unwrap_or_default();
    let error_pad = ADDRESS_FIELD_WIDTH.saturating_sub(address_error.chars().count());
    let error_line = if errors.is_empty() {
        Line::default()
    } else {
        Line::from(vec![
            Span::raw(" ".repeat(ROW_PREFIX_WIDTH)),
            Span::styled(address_error, FIELD_ERROR_STYLE),
            Span::raw(" ".repeat(error_pad + 2)),
            Span::styled(amount_error, FIELD_ERROR_STYLE),
        ])
    };

    [input_line, error_line]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AddressCheck, RecipientList};
    use crate::state::FormState;
    use crate::test_utils::{AddressMother, AppMother, buffer_text, test_terminal};
    use ratatui::{Terminal, backend::TestBackend};
    use rstest::rstest;

    #[rstest]
    fn test_renders_rows_and_amounts(mut test_terminal: Terminal<TestBackend>) {
        let app = AppMother::connected();

        test_terminal
            .draw(|frame| render(&app, frame, Rect::new(0, 0, 90, 10)))
            .unwrap();

        let text = buffer_text(&test_terminal);
        assert!(text.contains("Recipients (3/20)"));
        assert!(text.contains(&format!("▶  1. {}▏", AddressMother::alice())));
        assert!(text.contains(&format!("   2. {}", AddressMother::bob())));
        assert!(text.contains("◎ 3"));
        assert!(!text.contains("required"));
    }

    #[rstest]
    fn test_errors_render_under_the_row(mut test_terminal: Terminal<TestBackend>) {
        let mut app = AppMother::disconnected();
        app.form = FormState::with_recipients(
            RecipientList::from_defaults([("not-an-address", "1.2.3.4x")]),
            AddressCheck::StrictDecoder,
        );

        test_terminal
            .draw(|frame| render(&app, frame, Rect::new(0, 0, 90, 6)))
            .unwrap();

        let text = buffer_text(&test_terminal);
        assert!(text.contains("Invalid Solana address"));
    }

    #[rstest]
    fn test_empty_row_shows_required(mut test_terminal: Terminal<TestBackend>) {
        let app = AppMother::disconnected();

        test_terminal
            .draw(|frame| render(&app, frame, Rect::new(0, 0, 90, 6)))
            .unwrap();

        let text = buffer_text(&test_terminal);
        assert!(text.contains("Address is required"));
        assert!(text.contains("Amount is required"));
    }

    #[rstest]
    fn test_scrolls_to_selected_row(mut test_terminal: Terminal<TestBackend>) {
        let mut app = AppMother::disconnected();
        for _ in 0..9 {
            app.form.add_recipient();
        }

        // Two rows fit; the tenth row is selected after the adds.
        test_terminal
            .draw(|frame| render(&app, frame, Rect::new(0, 0, 90, 6)))
            .unwrap();

        let text = buffer_text(&test_terminal);
        assert!(text.contains("▶ 10."));
        assert!(text.contains("   9."));
        assert!(!text.contains("   1."));
    }

    #[test]
    fn test_split_amounts_are_not_active() {
        let entry = RecipientEntry {
            id: RecipientList::new().id_at(0).unwrap(),
            address: String::new(),
            amount_text: "1.5".to_string(),
        };
        let [input, _] = row_lines(0, &entry, FieldErrors::default(), None, true);

        let amount = input.spans.last().unwrap();
        assert_eq!(amount.content, "1.5");
        assert_eq!(amount.style, DERIVED_STYLE);
    }
}
