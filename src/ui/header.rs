//! Header rendering for SplitPay TUI
//!
//! Renders the application title, the cluster, the connected account with
//! its balance, and how many recipient slots are left.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::constants::{ADDRESS_LEADING_CHARS, ADDRESS_TRAILING_CHARS, SOL_SYMBOL};
use crate::domain::{lamports_to_decimal, truncate_address};
use crate::state::{App, BalanceState};
use crate::theme::{ERROR_COLOR, MUTED_COLOR, PRIMARY_COLOR, SUCCESS_COLOR, WARNING_COLOR};

use super::helpers::create_border_block;

/// Render the application header
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let header_block = create_border_block("", false);
    frame.render_widget(header_block.clone(), area);

    if area.height <= 2 {
        return;
    }

    let inner = header_block.inner(area);
    let slots = slots_text(app.form.recipients().remaining_slots());
    let slots_width = u16::try_from(slots.chars().count() + 1).unwrap_or(u16::MAX);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(slots_width)])
        .split(inner);

    let mut spans = vec![
        " ".into(),
        "[".into(),
        "split".green().bold(),
        "pay".cyan().bold(),
        "]".into(),
        "  ".into(),
        Span::styled(
            app.cluster().as_str(),
            Style::default()
                .fg(SUCCESS_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}  ", app.rpc_url()), Style::default().fg(MUTED_COLOR)),
    ];
    spans.extend(account_spans(app));

    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
    frame.render_widget(
        Paragraph::new(slots)
            .style(Style::default().fg(MUTED_COLOR))
            .alignment(Alignment::Right),
        chunks[1],
    );
}

/// Remaining capacity of the recipient list.
#[must_use]
pub fn slots_text(remaining: usize) -> String {
    format!("{remaining} slot(s) left")
}

/// Connection status, address and balance.
fn account_spans(app: &App) -> Vec<Span<'static>> {
    let Some(payer) = app.wallet.payer() else {
        return vec![Span::styled("○ No wallet", Style::default().fg(WARNING_COLOR))];
    };

    let address = truncate_address(
        &payer.to_string(),
        ADDRESS_LEADING_CHARS,
        ADDRESS_TRAILING_CHARS,
    );
    let mut spans = vec![
        Span::styled("● ", Style::default().fg(SUCCESS_COLOR)),
        Span::styled(address, Style::default().fg(PRIMARY_COLOR)),
    ];
    if app.ui.is_copied() {
        spans.push(Span::styled(" (copied)", Style::default().fg(SUCCESS_COLOR)));
    }
    if let Some((text, failed)) = balance_text(&app.balance) {
        let color = if failed { ERROR_COLOR } else { MUTED_COLOR };
        spans.push(Span::styled(format!("  {text}"), Style::default().fg(color)));
    }
    spans
}

/// Balance label and whether it reports a failure.
#[must_use]
pub fn balance_text(balance: &BalanceState) -> Option<(String, bool)> {
    match balance {
        BalanceState::Unknown => None,
        BalanceState::Loading => Some(("balance …".to_string(), false)),
        BalanceState::Loaded(lamports) => {
            Some((format!("{SOL_SYMBOL} {}", lamports_to_decimal(*lamports)), false))
        }
        BalanceState::Failed(_) => Some(("balance unavailable".to_string(), true)),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MAX_RECIPIENTS;
    use crate::test_utils::{AppMother, buffer_text, test_terminal};
    use insta::assert_snapshot;
    use ratatui::{Terminal, backend::TestBackend};
    use rstest::rstest;

    #[test]
    fn test_slots_text() {
        assert_snapshot!(slots_text(MAX_RECIPIENTS - 3), @"17 slot(s) left");
    }

    #[rstest]
    #[case(BalanceState::Unknown, None)]
    #[case(BalanceState::Loading, Some(("balance …".to_string(), false)))]
    #[case(BalanceState::Loaded(1_500_000_000), Some(("◎ 1.5".to_string(), false)))]
    #[case(
        BalanceState::Failed("timeout".into()),
        Some(("balance unavailable".to_string(), true))
    )]
    fn test_balance_text(#[case] balance: BalanceState, #[case] expected: Option<(String, bool)>) {
        assert_eq!(balance_text(&balance), expected);
    }

    #[rstest]
    fn test_header_connected(mut test_terminal: Terminal<TestBackend>) {
        let mut app = AppMother::connected();
        app.balance = BalanceState::Loaded(2_000_000_000);
        app.ui.start_copied_indicator(5);

        test_terminal
            .draw(|frame| render(frame, Rect::new(0, 0, 120, 3), &app))
            .unwrap();

        let text = buffer_text(&test_terminal);
        assert!(text.contains("[splitpay]"));
        assert!(text.contains("Devnet"));
        assert!(text.contains("http://127.0.0.1:9"));
        assert!(text.contains("(copied)"));
        assert!(text.contains("◎ 2"));
        assert!(text.contains("17 slot(s) left"));
    }

    #[rstest]
    fn test_header_disconnected(mut test_terminal: Terminal<TestBackend>) {
        let app = AppMother::disconnected();

        test_terminal
            .draw(|frame| render(frame, Rect::new(0, 0, 120, 3), &app))
            .unwrap();

        let text = buffer_text(&test_terminal);
        assert!(text.contains("○ No wallet"));
        assert!(text.contains("19 slot(s) left"));
    }
}
