use alloy::primitives::{Address, U256};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::Component;
use crate::events::AppEvent;
use crate::theme::THEME;
use crate::utils;

/// Account overview: who we are acting as and what we hold, plus a short
/// summary of ledger activity.
pub struct Home {
    pub account: Option<Address>,
    pub signing: bool,
    pub eth_balance: Option<U256>,
    pub onx_balance: Option<U256>,
    pub completed_count: usize,
    pub claims_count: usize,
}

impl Home {
    pub fn new() -> Self {
        Self {
            account: None,
            signing: false,
            eth_balance: None,
            onx_balance: None,
            completed_count: 0,
            claims_count: 0,
        }
    }
}

impl Component for Home {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => Some(AppEvent::Back),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let outer_block = Block::default()
            .title(" Account ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());
        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let account_line = match self.account {
            Some(addr) => Line::from(vec![
                Span::styled("  Account:   ", THEME.muted_style()),
                Span::styled(format!("{addr}"), THEME.address_style()),
                Span::styled(
                    if self.signing { "  (signing)" } else { "  (read-only)" },
                    THEME.muted_style(),
                ),
            ]),
            None => Line::from(Span::styled(
                "  No account configured: pass --private-key or --account",
                THEME.error_style(),
            )),
        };

        let balance = |label: &'static str, value: Option<U256>, unit: &'static str| {
            let text = value
                .map(|v| format!("{} {unit}", utils::format_ether(v)))
                .unwrap_or_else(|| "...".to_string());
            Line::from(vec![
                Span::styled(format!("  {label}"), THEME.muted_style()),
                Span::styled(text, THEME.value_style()),
            ])
        };

        let lines = vec![
            Line::from(""),
            account_line,
            Line::from(""),
            balance("ETH:       ", self.eth_balance, "ETH"),
            balance("ONX:       ", self.onx_balance, "ONX"),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Completed: ", THEME.muted_style()),
                Span::styled(self.completed_count.to_string(), THEME.accent_style()),
                Span::styled("   Claims: ", THEME.muted_style()),
                Span::styled(self.claims_count.to_string(), THEME.accent_style()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  [2] Completed work   [3] Claims   [4] Transfer ONX   [r] Refresh",
                THEME.muted_style(),
            )),
        ];

        let paragraph = Paragraph::new(lines).style(Style::default().fg(THEME.text));
        frame.render_widget(paragraph, inner);
    }
}
