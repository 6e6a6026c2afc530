use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;
use crate::utils;

pub struct StatusBar {
    pub connected: bool,
    pub ws_connected: bool,
    pub latest_block: u64,
    pub loading: bool,
    pub error_message: Option<String>,
    /// Non-error notice: confirmed tx, finished download or export.
    pub notice: Option<String>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            connected: false,
            ws_connected: false,
            latest_block: 0,
            loading: false,
            error_message: None,
            notice: None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let bg = Block::default().style(THEME.header_style());
        frame.render_widget(bg, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(40)])
            .split(area);

        // --- Left: error > notice > loading > key hints ---
        let left_content = if let Some(ref err) = self.error_message {
            Line::from(vec![
                Span::styled(
                    " ! ",
                    Style::default()
                        .fg(THEME.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(err.as_str(), Style::default().fg(THEME.warning)),
            ])
        } else if let Some(ref notice) = self.notice {
            Line::from(vec![
                Span::styled(" \u{2713} ", THEME.success_style()),
                Span::styled(notice.as_str(), Style::default().fg(THEME.text)),
            ])
        } else if self.loading {
            Line::from(Span::styled(" Loading...", THEME.accent_style()))
        } else {
            Line::from(vec![
                Span::styled(" \u{2191}\u{2193}", THEME.accent_style()),
                Span::styled(":Navigate  ", THEME.muted_style()),
                Span::styled("d", THEME.accent_style()),
                Span::styled(":Download  ", THEME.muted_style()),
                Span::styled("v", THEME.accent_style()),
                Span::styled(":Validate  ", THEME.muted_style()),
                Span::styled("e", THEME.accent_style()),
                Span::styled(":Export  ", THEME.muted_style()),
                Span::styled("r", THEME.accent_style()),
                Span::styled(":Refresh  ", THEME.muted_style()),
                Span::styled("?", THEME.accent_style()),
                Span::styled(":Help  ", THEME.muted_style()),
                Span::styled("q", THEME.accent_style()),
                Span::styled(":Quit", THEME.muted_style()),
            ])
        };

        let left = Paragraph::new(left_content).style(THEME.header_style());
        frame.render_widget(left, chunks[0]);

        // --- Right: live subscription + connection + block number ---
        let (dot_color, status_text) = if self.connected {
            (THEME.success, "Connected")
        } else {
            (THEME.error, "Disconnected")
        };

        let (ws_color, ws_text) = if self.ws_connected {
            (THEME.success, "Live")
        } else {
            (THEME.text_muted, "Live:--")
        };

        let block_str = utils::format_number(self.latest_block);

        let right_content = Line::from(vec![
            Span::styled(ws_text, Style::default().fg(ws_color)),
            Span::styled(" | ", THEME.muted_style()),
            Span::styled("\u{25cf} ", Style::default().fg(dot_color)),
            Span::styled(status_text, Style::default().fg(dot_color)),
            Span::styled(" | ", THEME.muted_style()),
            Span::styled(format!("#{block_str} "), THEME.accent_style()),
        ]);

        let right = Paragraph::new(right_content)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(right, chunks[1]);
    }
}
