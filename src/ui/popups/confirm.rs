//! Confirmation popups: the transfer preview and quit.

use ratatui::{
    Frame,
    layout::{Alignment, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::constants::{ADDRESS_LEADING_CHARS, ADDRESS_TRAILING_CHARS, SOL_SYMBOL};
use crate::domain::{Cluster, TransferPreview, lamports_to_decimal, truncate_address};
use crate::theme::{ACCENT_COLOR, MUTED_COLOR, WARNING_COLOR};
use crate::ui::helpers::{create_popup_block, key_hints_line};
use crate::ui::layout::centered_popup_area;

const TRANSFER_POPUP_WIDTH: u16 = 56;

/// Rows besides the transfer list: title line, blank, three totals, blank,
/// separator, hints and borders.
const TRANSFER_POPUP_CHROME: u16 = 10;

// ============================================================================
// Public API
// ============================================================================

/// Renders the transfer preview for confirmation.
///
/// Lists each transfer, the batch total, the estimated network fee and the
/// total debit. Transfers that do not fit are summarized in a final line.
pub fn render_transfer(frame: &mut Frame, area: Rect, preview: &TransferPreview, cluster: Cluster) {
    let rows = u16::try_from(preview.recipient_count()).unwrap_or(u16::MAX);
    let popup_area = centered_popup_area(
        area,
        TRANSFER_POPUP_WIDTH,
        rows.saturating_add(TRANSFER_POPUP_CHROME),
    );

    let popup_block = create_popup_block("Confirm Transfer");
    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup_block.clone(), popup_area);

    let inner = popup_block.inner(popup_area);
    let list_capacity = usize::from(inner.height.saturating_sub(TRANSFER_POPUP_CHROME - 2));

    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("Send {} transfer(s) on ", preview.recipient_count())),
            Span::styled(
                cluster.as_str(),
                Style::default()
                    .fg(WARNING_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
    ];
    lines.extend(transfer_lines(preview, list_capacity));
    lines.push(Line::default());
    lines.push(amount_line("Total", preview.total_lamports, false));
    lines.push(amount_line("Est. fee", preview.estimated_fee_lamports, false));
    lines.push(amount_line("Debit", preview.user_total_debit_lamports, true));

    frame.render_widget(Paragraph::new(lines), inner.inner(Margin::new(1, 0)));

    render_footer(frame, popup_area, &[("y/Enter", "Send"), ("n/Esc", "Cancel")]);
}

/// Renders the quit confirmation popup.
pub fn render_quit(frame: &mut Frame, area: Rect) {
    let popup_area = centered_popup_area(area, 50, 7);

    let popup_block = create_popup_block("Confirm Quit");
    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup_block.clone(), popup_area);

    let inner_area = popup_block.inner(popup_area);
    let message_area = Rect::new(inner_area.x, inner_area.y + 1, inner_area.width, 1);

    frame.render_widget(
        Paragraph::new("Quit SplitPay?").alignment(Alignment::Center),
        message_area,
    );

    render_footer(frame, popup_area, &[("y", "Yes"), ("n/Esc", "No")]);
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// One line per transfer, at most `capacity` lines.
fn transfer_lines(preview: &TransferPreview, capacity: usize) -> Vec<Line<'static>> {
    let count = preview.instructions.len();
    let shown = if count > capacity {
        capacity.saturating_sub(1)
    } else {
        count
    };

    let mut lines: Vec<Line> = preview
        .instructions
        .iter()
        .take(shown)
        .map(|ix| {
            let to = truncate_address(
                &ix.to.to_string(),
                ADDRESS_LEADING_CHARS,
                ADDRESS_TRAILING_CHARS,
            );
            Line::from(vec![
                Span::raw(format!("  → {to:<16}")),
                Span::styled(
                    format!("{SOL_SYMBOL} {}", lamports_to_decimal(ix.lamports)),
                    Style::default().fg(ACCENT_COLOR),
                ),
            ])
        })
        .collect();

    if shown < count {
        lines.push(Line::styled(
            format!("  … and {} more", count - shown),
            Style::default().fg(MUTED_COLOR),
        ));
    }
    lines
}

fn amount_line(label: &'static str, lamports: u64, emphasize: bool) -> Line<'static> {
    let mut style = Style::default().fg(ACCENT_COLOR);
    if emphasize {
        style = style.add_modifier(Modifier::BOLD);
    }
    Line::from(vec![
        Span::styled(format!("{label:<20}"), Style::default().fg(MUTED_COLOR)),
        Span::styled(
            format!("{SOL_SYMBOL} {}", lamports_to_decimal(lamports)),
            style,
        ),
    ])
}

/// Separator plus key hints along the bottom of a popup.
fn render_footer(frame: &mut Frame, popup_area: Rect, hints: &[(&'static str, &'static str)]) {
    if popup_area.height < 4 {
        return;
    }

    let separator = "─".repeat(usize::from(popup_area.width.saturating_sub(2)));
    let separator_area = Rect::new(
        popup_area.x + 1,
        popup_area.y + popup_area.height - 3,
        popup_area.width - 2,
        1,
    );
    frame.render_widget(
        Paragraph::new(separator).style(Style::default().fg(Color::DarkGray)),
        separator_area,
    );

    let help_area = Rect::new(
        popup_area.x,
        popup_area.y + popup_area.height - 2,
        popup_area.width,
        1,
    );
    frame.render_widget(
        Paragraph::new(key_hints_line(hints)).alignment(Alignment::Center),
        help_area,
    );
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransferInstruction;
    use crate::test_utils::{
        PreviewMother, PubkeyMother, buffer_text, test_terminal, test_terminal_80x24,
    };
    use ratatui::{Terminal, backend::TestBackend};
    use rstest::rstest;

    #[rstest]
    fn test_transfer_popup_shows_debit(mut test_terminal: Terminal<TestBackend>) {
        let preview = PreviewMother::with_fee(PubkeyMother::payer(), 5_000);

        test_terminal
            .draw(|frame| render_transfer(frame, frame.area(), &preview, Cluster::Testnet))
            .unwrap();

        let text = buffer_text(&test_terminal);
        assert!(text.contains("Send 2 transfer(s) on Testnet"));
        assert!(text.contains("◎ 1"));
        assert!(text.contains("◎ 2"));
        assert!(text.contains("◎ 0.000005"));
        assert!(text.contains("◎ 3.000005"));
        assert!(text.contains("y/Enter:Send"));
    }

    #[rstest]
    fn test_long_batch_is_summarized(mut test_terminal_80x24: Terminal<TestBackend>) {
        let payer = PubkeyMother::payer();
        let instructions = (1..=20)
            .map(|n| TransferInstruction::new(payer, PubkeyMother::recipient(n), 1_000))
            .collect();
        let preview = TransferPreview::new(payer, instructions, 5_000).unwrap();

        test_terminal_80x24
            .draw(|frame| render_transfer(frame, frame.area(), &preview, Cluster::Devnet))
            .unwrap();

        let text = buffer_text(&test_terminal_80x24);
        assert!(text.contains("Send 20 transfer(s) on Devnet"));
        assert!(text.contains("more"));
        assert!(text.contains("◎ 0.00002"));
    }

    #[test]
    fn test_transfer_lines_capacity() {
        let preview = PreviewMother::two_transfers();
        assert_eq!(transfer_lines(&preview, 5).len(), 2);

        let lines = transfer_lines(&preview, 1);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].to_string(), "  … and 2 more");
    }

    #[rstest]
    fn test_quit_popup(mut test_terminal_80x24: Terminal<TestBackend>) {
        test_terminal_80x24
            .draw(|frame| render_quit(frame, frame.area()))
            .unwrap();

        let text = buffer_text(&test_terminal_80x24);
        assert!(text.contains("Quit SplitPay?"));
        assert!(text.contains("y:Yes  n/Esc:No"));
    }
}
