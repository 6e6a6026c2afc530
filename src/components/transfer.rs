use alloy::primitives::Address;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::Component;
use crate::events::AppEvent;
use crate::theme::THEME;
use crate::utils;

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Recipient,
    Amount,
}

/// ONX transfer form: recipient address and decimal amount.
pub struct TransferForm {
    recipient: String,
    amount: String,
    focus: Field,
    pub error: Option<String>,
    pub submitting: bool,
}

impl TransferForm {
    pub fn new() -> Self {
        Self {
            recipient: String::new(),
            amount: String::new(),
            focus: Field::Recipient,
            error: None,
            submitting: false,
        }
    }

    pub fn reset(&mut self) {
        self.recipient.clear();
        self.amount.clear();
        self.focus = Field::Recipient;
        self.error = None;
        self.submitting = false;
    }

    fn active_input(&mut self) -> &mut String {
        match self.focus {
            Field::Recipient => &mut self.recipient,
            Field::Amount => &mut self.amount,
        }
    }

    fn submit(&mut self) -> Option<AppEvent> {
        let to = match self.recipient.trim().parse::<Address>() {
            Ok(addr) => addr,
            Err(_) => {
                self.error = Some("Invalid recipient address".to_string());
                return None;
            }
        };
        let amount = match utils::parse_ether(&self.amount) {
            Some(a) => a,
            None => {
                self.error = Some("Invalid ONX amount".to_string());
                return None;
            }
        };

        self.error = None;
        self.submitting = true;
        Some(AppEvent::Transfer { to, amount })
    }
}

impl Component for TransferForm {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Field::Recipient => Field::Amount,
                    Field::Amount => Field::Recipient,
                };
                None
            }
            KeyCode::Enter => {
                if self.submitting {
                    return None;
                }
                self.submit()
            }
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'u' {
                    self.active_input().clear();
                } else {
                    self.active_input().push(c);
                }
                self.error = None;
                None
            }
            KeyCode::Backspace => {
                self.active_input().pop();
                self.error = None;
                None
            }
            KeyCode::Esc => Some(AppEvent::Back),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let outer_block = Block::default()
            .title(" Transfer ONX ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());
        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let field_line = |label: &'static str, value: &str, focused: bool| {
            let cursor = if focused { "_" } else { "" };
            let style = if focused {
                Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(THEME.text)
            };
            Line::from(vec![
                Span::styled(format!("  {label}"), THEME.muted_style()),
                Span::styled(format!("{value}{cursor}"), style),
            ])
        };

        let mut lines = vec![
            Line::from(""),
            field_line(
                "Recipient: ",
                &self.recipient,
                self.focus == Field::Recipient,
            ),
            field_line("Amount:    ", &self.amount, self.focus == Field::Amount),
            Line::from(""),
            Line::from(Span::styled(
                "  [Enter] Send  [Tab] Next field  [Esc] Back",
                THEME.muted_style(),
            )),
        ];

        if self.submitting {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  Submitting...",
                THEME.accent_style(),
            )));
        }

        if let Some(ref err) = self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("  Error: ", THEME.muted_style()),
                Span::styled(err.clone(), THEME.error_style()),
            ]));
        }

        let paragraph = Paragraph::new(lines).style(Style::default().fg(THEME.text));
        frame.render_widget(paragraph, inner);
    }
}
