use alloy::primitives::Address;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::Component;
use crate::data::types::DisplayRow;
use crate::events::{AppEvent, ExportFormat};
use crate::theme::THEME;

/// Table over factory event display rows, shared by the Completed and
/// Claims views. Holds derived rows only; the app owns the ledger and
/// replaces `rows`/`contracts` wholesale on every refresh.
pub struct EventTable {
    title: &'static str,
    pub rows: Vec<DisplayRow>,
    /// Untruncated contract address per row, for download/validate targets.
    pub contracts: Vec<Address>,
    pub loading: bool,
    table_state: TableState,
    scroll_state: ScrollbarState,
}

impl EventTable {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
            contracts: Vec::new(),
            loading: false,
            table_state: TableState::default(),
            scroll_state: ScrollbarState::default(),
        }
    }

    /// Replace the displayed rows with a fresh snapshot.
    pub fn set_rows(&mut self, rows: Vec<DisplayRow>, contracts: Vec<Address>) {
        self.rows = rows;
        self.contracts = contracts;
        self.loading = false;
        if self.table_state.selected().is_none() && !self.rows.is_empty() {
            self.table_state.select(Some(0));
        }
        if let Some(sel) = self.table_state.selected() {
            if sel >= self.rows.len() {
                self.table_state
                    .select(self.rows.len().checked_sub(1));
            }
        }
    }

    fn selected_contract(&self) -> Option<Address> {
        let idx = self.table_state.selected()?;
        self.contracts.get(idx).copied()
    }

    fn select_next(&mut self) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = if current + 1 >= len { current } else { current + 1 };
        self.table_state.select(Some(next));
        self.scroll_state = self.scroll_state.position(next);
    }

    fn select_prev(&mut self) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let prev = current.saturating_sub(1);
        self.table_state.select(Some(prev));
        self.scroll_state = self.scroll_state.position(prev);
    }

    fn select_first(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.table_state.select(Some(0));
        self.scroll_state = self.scroll_state.position(0);
    }

    fn select_last(&mut self) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        self.table_state.select(Some(len - 1));
        self.scroll_state = self.scroll_state.position(len - 1);
    }
}

fn build_rows(rows: &[DisplayRow]) -> Vec<Row<'static>> {
    rows.iter()
        .map(|r| {
            let field = |i: usize| r.vals.get(i).map(|(_, v)| v.clone()).unwrap_or_default();
            Row::new(vec![
                Cell::from(r.headers[0].clone()).style(THEME.accent_style()),
                Cell::from(r.headers[1].clone()).style(THEME.value_style()),
                Cell::from(field(0)).style(THEME.address_style()),
                Cell::from(field(1)).style(THEME.address_style()),
                Cell::from(field(2)).style(THEME.address_style()),
                Cell::from(field(3)).style(THEME.muted_style()),
            ])
        })
        .collect()
}

impl Component for EventTable {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_prev();
                None
            }
            KeyCode::Char('g') => {
                self.select_first();
                None
            }
            KeyCode::Char('G') => {
                self.select_last();
                None
            }
            KeyCode::Char('d') | KeyCode::Enter => {
                self.selected_contract().map(AppEvent::Download)
            }
            KeyCode::Char('v') => self.selected_contract().map(AppEvent::Validate),
            KeyCode::Char('e') => Some(AppEvent::Export(ExportFormat::Csv)),
            KeyCode::Char('E') => Some(AppEvent::Export(ExportFormat::Json)),
            KeyCode::Esc | KeyCode::Backspace => Some(AppEvent::Back),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let outer_block = Block::default()
            .title(format!(" {} ({}) ", self.title, self.rows.len()))
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());

        if self.rows.is_empty() {
            let inner = outer_block.inner(area);
            frame.render_widget(outer_block, area);
            let msg = if self.loading {
                "Loading events..."
            } else {
                "No events for this account"
            };
            let text = Paragraph::new(msg)
                .style(THEME.muted_style())
                .alignment(Alignment::Center);
            frame.render_widget(text, inner);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Name"),
            Cell::from("Value"),
            Cell::from("Contract"),
            Cell::from("Requester"),
            Cell::from("Validator"),
            Cell::from("Deadline"),
        ])
        .style(THEME.table_header_style())
        .bottom_margin(0);

        let rows = build_rows(&self.rows);
        let widths = [
            Constraint::Length(24),
            Constraint::Length(14),
            Constraint::Length(24),
            Constraint::Length(24),
            Constraint::Length(24),
            Constraint::Min(22),
        ];

        self.scroll_state = self.scroll_state.content_length(self.rows.len());

        let table = Table::new(rows, widths)
            .header(header)
            .block(outer_block)
            .row_highlight_style(THEME.selected_style())
            .highlight_symbol(" > ");

        frame.render_stateful_widget(table, area, &mut self.table_state);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut self.scroll_state);
    }
}
