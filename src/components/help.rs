use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Returns true if it consumed the event
    pub fn handle_key(&mut self, _key: KeyEvent) -> bool {
        if self.visible {
            self.visible = false;
            true
        } else {
            false
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let popup_width = area.width * 60 / 100;
        let popup_height = area.height * 70 / 100;
        let x = area.x + (area.width - popup_width) / 2;
        let y = area.y + (area.height - popup_height) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .style(Style::default().bg(THEME.surface));

        let entry = |keys: &'static str, action: &'static str| {
            Line::from(vec![
                Span::styled(keys, THEME.accent_style()),
                Span::styled(action, Style::default().fg(THEME.text)),
            ])
        };
        let section = |title: &'static str| {
            Line::from(Span::styled(
                title,
                THEME.accent_style().add_modifier(Modifier::BOLD),
            ))
        };

        let help_text = vec![
            section("Views"),
            entry("  1        ", "Home"),
            entry("  2        ", "Completed work"),
            entry("  3        ", "Claims"),
            entry("  4        ", "Transfer ONX"),
            Line::from(""),
            section("Navigation"),
            entry("  \u{2191}/k      ", "Move up"),
            entry("  \u{2193}/j      ", "Move down"),
            entry("  g / G    ", "Top / bottom"),
            entry("  Esc      ", "Go back / Close"),
            Line::from(""),
            section("Event tables"),
            entry("  d/Enter  ", "Download deliverable for selected contract"),
            entry("  v        ", "Validate (submit) selected contract"),
            entry("  e        ", "Export rows to CSV"),
            entry("  E        ", "Export rows to JSON"),
            entry("  r        ", "Refresh from chain"),
            Line::from(""),
            section("Transfer"),
            entry("  Tab      ", "Switch field"),
            entry("  Enter    ", "Send transfer"),
            Line::from(""),
            section("Other"),
            entry("  ?        ", "Toggle this help"),
            entry("  q        ", "Quit"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
    }
}
