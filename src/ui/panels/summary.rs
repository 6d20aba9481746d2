//! Summary panel: split mode, batch total and transfer status.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::commands::InputContext;
use crate::constants::{ADDRESS_LEADING_CHARS, ADDRESS_TRAILING_CHARS, SOL_SYMBOL};
use crate::domain::{lamports_to_decimal, truncate_address};
use crate::state::{App, FormField, TransferOutcome, TransferPhase};
use crate::theme::{
    ACCENT_COLOR, ERROR_COLOR, FIELD_ERROR_STYLE, MUTED_COLOR, PRIMARY_COLOR, SUCCESS_COLOR,
    WARNING_COLOR,
};
use crate::ui::helpers::{create_border_block, input_span};

/// Braille spinner frames, advanced once per tick.
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Width of the label column.
const LABEL_WIDTH: usize = 11;

/// Renders the summary panel.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let form = &app.form;
    let editing_total = app.transfer.is_editing()
        && app.get_input_context() == InputContext::Form
        && form.focus() == FormField::Total;

    let block = create_border_block("Summary", editing_total);
    frame.render_widget(block.clone(), area);

    let validation = form.validate();
    let mut lines = Vec::new();

    let mode = if form.split_evenly() {
        "Split evenly"
    } else {
        "Individual amounts"
    };
    lines.push(labeled("Mode", vec![Span::raw(mode)]));

    if form.split_evenly() {
        lines.push(labeled(
            "Split",
            vec![
                Span::styled(format!("{SOL_SYMBOL} "), Style::default().fg(MUTED_COLOR)),
                input_span(
                    form.total_text(),
                    "0",
                    editing_total,
                    Style::default().fg(ACCENT_COLOR),
                ),
            ],
        ));
        if let Some(error) = validation.total {
            lines.push(labeled("", vec![Span::styled(error.to_string(), FIELD_ERROR_STYLE)]));
        }
    }

    lines.push(labeled(
        "Recipients",
        vec![Span::raw(form.recipients().len().to_string())],
    ));
    lines.push(labeled(
        "Total",
        vec![Span::styled(
            format!("{SOL_SYMBOL} {}", lamports_to_decimal(form.total_lamports())),
            Style::default()
                .fg(ACCENT_COLOR)
                .add_modifier(Modifier::BOLD),
        )],
    ));
    lines.push(Line::default());

    let problems = validation.messages(form.recipients()).len();
    lines.push(labeled(
        "Status",
        vec![status_span(app.transfer.phase(), problems, app.animation_tick)],
    ));
    if let Some(outcome) = app.transfer.last_outcome() {
        lines.push(labeled("Last", vec![outcome_span(outcome)]));
    }

    frame.render_widget(Paragraph::new(lines), block.inner(area));
}

fn labeled<'a>(label: &'a str, mut value: Vec<Span<'a>>) -> Line<'a> {
    let mut spans = vec![Span::styled(
        format!("{label:<LABEL_WIDTH$}"),
        Style::default().fg(MUTED_COLOR),
    )];
    spans.append(&mut value);
    Line::from(spans)
}

/// Spinner frame for an animation tick.
#[must_use]
pub fn spinner_frame(tick: u64) -> &'static str {
    let index = usize::try_from(tick % SPINNER_FRAMES.len() as u64).unwrap_or(0);
    SPINNER_FRAMES[index]
}

fn status_span(phase: &TransferPhase, problems: usize, tick: u64) -> Span<'static> {
    match phase {
        TransferPhase::Editing if problems == 0 => {
            Span::styled("Ready", Style::default().fg(SUCCESS_COLOR))
        }
        TransferPhase::Editing => Span::styled(
            format!("{problems} field error(s)"),
            Style::default().fg(WARNING_COLOR),
        ),
        TransferPhase::Quoting => Span::styled(
            format!("{} Preparing preview", spinner_frame(tick)),
            Style::default().fg(PRIMARY_COLOR),
        ),
        TransferPhase::Previewing(_) => {
            Span::styled("Awaiting confirmation", Style::default().fg(PRIMARY_COLOR))
        }
        TransferPhase::Sending(_) => Span::styled(
            format!("{} Sending", spinner_frame(tick)),
            Style::default().fg(PRIMARY_COLOR),
        ),
    }
}

fn outcome_span(outcome: &TransferOutcome) -> Span<'static> {
    match outcome {
        TransferOutcome::Success { signature, .. } => Span::styled(
            format!(
                "✓ {}",
                truncate_address(signature, ADDRESS_LEADING_CHARS, ADDRESS_TRAILING_CHARS)
            ),
            Style::default().fg(SUCCESS_COLOR),
        ),
        TransferOutcome::Failure { .. } => {
            Span::styled("✗ Failed", Style::default().fg(ERROR_COLOR))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
