use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tokio::sync::mpsc;

use crate::components::event_table::EventTable;
use crate::components::header::Header;
use crate::components::help::HelpOverlay;
use crate::components::home::Home;
use crate::components::status_bar::StatusBar;
use crate::components::transfer::TransferForm;
use crate::components::Component;
use crate::data::export;
use crate::data::ledger::EventLedger;
use crate::data::types::build_display_rows;
use crate::data::ChainService;
use crate::events::{AppEvent, ExportFormat, View};
use crate::theme::THEME;

pub struct App {
    // Navigation
    view_stack: Vec<View>,
    current_view: View,

    // Components
    header: Header,
    home: Home,
    completed: EventTable,
    claims: EventTable,
    transfer: TransferForm,
    status_bar: StatusBar,
    help: HelpOverlay,

    // State snapshots feeding the views
    completed_ledger: EventLedger,
    claims_ledger: EventLedger,

    // Data
    chain: Arc<ChainService>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    export_dir: PathBuf,

    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn with_service(
        chain: Arc<ChainService>,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        export_dir: PathBuf,
        tick_rate_ms: u64,
    ) -> Self {
        let mut home = Home::new();
        home.account = chain.account();
        home.signing = chain.signing();

        Self {
            view_stack: Vec::new(),
            current_view: View::Home,
            header: Header::new(),
            home,
            completed: EventTable::new("Completed"),
            claims: EventTable::new("Claims"),
            transfer: TransferForm::new(),
            status_bar: StatusBar::new(),
            help: HelpOverlay::new(),
            completed_ledger: EventLedger::new(),
            claims_ledger: EventLedger::new(),
            chain,
            event_rx,
            export_dir,
            should_quit: false,
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub async fn run(&mut self, mut terminal: ratatui::DefaultTerminal) -> color_eyre::Result<()> {
        // Initial data load
        self.chain.fetch_latest_block_number();
        self.chain.fetch_balances();
        self.completed.loading = true;
        self.claims.loading = true;
        self.chain.refresh_completed(None);
        self.chain.refresh_claims(None);

        let mut interval = tokio::time::interval(self.tick_rate);
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    terminal.draw(|frame| self.render(frame))?;
                }
                Some(Ok(event)) = events.next() => {
                    self.handle_terminal_event(event);
                }
                Some(app_event) = self.event_rx.recv() => {
                    self.handle_app_event(app_event);
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(
            Block::default().style(Style::default().bg(THEME.bg)),
            area,
        );

        // Layout: header (1) | content (fill) | status bar (1)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.render(frame, chunks[0]);

        match self.current_view {
            View::Home => self.home.render(frame, chunks[1]),
            View::Completed => self.completed.render(frame, chunks[1]),
            View::Claims => self.claims.render(frame, chunks[1]),
            View::Transfer => self.transfer.render(frame, chunks[1]),
        }

        self.status_bar.render(frame, chunks[2]);

        self.help.render(frame, area);
    }

    fn handle_terminal_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only handle key press events (not release/repeat) for cross-platform compat
            if key.kind != KeyEventKind::Press {
                return;
            }

            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                self.should_quit = true;
                return;
            }

            // Help overlay consumes all keys when visible
            if self.help.handle_key(key) {
                return;
            }

            // The transfer form owns the keyboard while active, since its
            // text fields need the characters the global map would eat.
            if self.current_view == View::Transfer {
                if let Some(event) = self.transfer.handle_key(key) {
                    self.handle_app_event(event);
                }
                return;
            }

            // Global keys
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('?') => {
                    self.help.toggle();
                    return;
                }
                KeyCode::Char('1') => {
                    self.navigate_to(View::Home);
                    return;
                }
                KeyCode::Char('2') => {
                    self.navigate_to(View::Completed);
                    return;
                }
                KeyCode::Char('3') => {
                    self.navigate_to(View::Claims);
                    return;
                }
                KeyCode::Char('4') => {
                    self.navigate_to(View::Transfer);
                    return;
                }
                KeyCode::Char('r') => {
                    self.refresh_current_view();
                    return;
                }
                _ => {}
            }

            // Delegate to current view's component
            let app_event = match self.current_view {
                View::Home => self.home.handle_key(key),
                View::Completed => self.completed.handle_key(key),
                View::Claims => self.claims.handle_key(key),
                View::Transfer => unreachable!("handled above"),
            };

            if let Some(event) = app_event {
                self.handle_app_event(event);
            }
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Connected(chain_id) => {
                self.header.chain_id = chain_id;
                self.status_bar.connected = true;
            }
            AppEvent::LatestBlockNumber(number) => {
                self.header.latest_block = number;
                self.status_bar.latest_block = number;
                self.status_bar.connected = true;
            }
            AppEvent::WsConnected => {
                self.status_bar.ws_connected = true;
                // Backfill anything missed while the subscription was down.
                self.chain
                    .refresh_completed(self.completed_ledger.last_block());
                self.chain.refresh_claims(self.claims_ledger.last_block());
            }
            AppEvent::WsDisconnected => {
                self.status_bar.ws_connected = false;
            }
            AppEvent::ValidatedBatch(records) => {
                self.status_bar.loading = false;
                self.completed_ledger.merge_batch(records);
                self.apply_completed_snapshot();
            }
            AppEvent::ClaimedBatch(records) => {
                self.status_bar.loading = false;
                self.claims_ledger.merge_batch(records);
                self.apply_claims_snapshot();
            }
            AppEvent::NewValidated(record) => {
                if self.completed_ledger.merge(record) {
                    self.apply_completed_snapshot();
                }
            }
            AppEvent::NewClaimed(record) => {
                if self.claims_ledger.merge(record) {
                    self.apply_claims_snapshot();
                }
            }
            AppEvent::Balances { eth, onx } => {
                self.home.eth_balance = Some(eth);
                self.home.onx_balance = Some(onx);
            }
            AppEvent::Download(contract) => {
                self.status_bar.loading = true;
                self.status_bar.notice = None;
                self.chain.download(contract);
            }
            AppEvent::Validate(contract) => {
                self.status_bar.loading = true;
                self.status_bar.notice = None;
                self.chain.validate(contract);
            }
            AppEvent::Transfer { to, amount } => {
                self.status_bar.loading = true;
                self.status_bar.notice = None;
                self.chain.transfer(to, amount);
            }
            AppEvent::Export(format) => {
                self.export_current_view(format);
            }
            AppEvent::TxSubmitted { action, hash } => {
                self.status_bar.loading = false;
                self.status_bar.error_message = None;
                self.status_bar.notice = Some(format!("{action} confirmed: {hash:#x}"));
                if action == "transfer" {
                    self.transfer.reset();
                }
            }
            AppEvent::TxFailed { action, msg } => {
                self.status_bar.error_message = Some(msg);
                self.status_bar.loading = false;
                if action == "transfer" {
                    self.transfer.submitting = false;
                }
            }
            AppEvent::DownloadComplete(path) => {
                self.status_bar.loading = false;
                self.status_bar.notice = Some(format!("Saved {path}"));
            }
            AppEvent::ExportComplete(msg) => {
                self.status_bar.notice = Some(msg);
            }
            AppEvent::Navigate(view) => {
                self.navigate_to(view);
            }
            AppEvent::Back => {
                self.go_back();
            }
            AppEvent::Error(msg) => {
                self.status_bar.error_message = Some(msg);
                self.status_bar.loading = false;
                // Stop the "Loading events..." placeholders; the ledgers
                // themselves are untouched by a failed fetch.
                self.completed.loading = false;
                self.claims.loading = false;
            }
        }
    }

    /// Rebuild the Completed view from a complete ledger snapshot. Rows are
    /// replaced wholesale; a failed fetch never reaches this point.
    fn apply_completed_snapshot(&mut self) {
        let snapshot = self.completed_ledger.snapshot();
        let contracts = snapshot.iter().map(|r| r.contract).collect();
        self.completed
            .set_rows(build_display_rows(&snapshot), contracts);
        self.home.completed_count = self.completed_ledger.len();
    }

    fn apply_claims_snapshot(&mut self) {
        let snapshot = self.claims_ledger.snapshot();
        let contracts = snapshot.iter().map(|r| r.contract).collect();
        self.claims
            .set_rows(build_display_rows(&snapshot), contracts);
        self.home.claims_count = self.claims_ledger.len();
    }

    fn refresh_current_view(&mut self) {
        self.status_bar.error_message = None;
        match self.current_view {
            View::Home => {
                self.chain.fetch_latest_block_number();
                self.chain.fetch_balances();
            }
            View::Completed => {
                self.status_bar.loading = true;
                self.chain
                    .refresh_completed(self.completed_ledger.last_block());
            }
            View::Claims => {
                self.status_bar.loading = true;
                self.chain.refresh_claims(self.claims_ledger.last_block());
            }
            View::Transfer => {}
        }
    }

    fn export_current_view(&mut self, format: ExportFormat) {
        let (records, stem) = match self.current_view {
            View::Completed => (self.completed_ledger.snapshot(), "completed"),
            View::Claims => (self.claims_ledger.snapshot(), "claims"),
            _ => return,
        };

        let ext = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        if let Err(e) = std::fs::create_dir_all(&self.export_dir) {
            self.handle_app_event(AppEvent::Error(format!("Failed to create export dir: {e}")));
            return;
        }
        let path = self
            .export_dir
            .join(format!(
                "onyx-{stem}-{}.{ext}",
                Utc::now().format("%Y%m%d-%H%M%S")
            ))
            .display()
            .to_string();

        let result = match format {
            ExportFormat::Csv => export::export_records_csv(&records, &path),
            ExportFormat::Json => export::export_records_json(&records, &path),
        };

        match result {
            Ok(msg) => self.handle_app_event(AppEvent::ExportComplete(msg)),
            Err(msg) => self.handle_app_event(AppEvent::Error(msg)),
        }
    }

    fn navigate_to(&mut self, view: View) {
        self.header.current_tab = view.tab_index();
        self.status_bar.error_message = None;
        self.status_bar.notice = None;

        let old_view = std::mem::replace(&mut self.current_view, view);
        if old_view != view {
            self.view_stack.push(old_view);
        }

        match view {
            View::Home => {
                self.chain.fetch_latest_block_number();
                self.chain.fetch_balances();
            }
            View::Completed => {
                if self.completed_ledger.is_empty() {
                    self.completed.loading = true;
                    self.status_bar.loading = true;
                    self.chain.refresh_completed(None);
                }
            }
            View::Claims => {
                if self.claims_ledger.is_empty() {
                    self.claims.loading = true;
                    self.status_bar.loading = true;
                    self.chain.refresh_claims(None);
                }
            }
            View::Transfer => {
                self.transfer.reset();
            }
        }
    }

    fn go_back(&mut self) {
        if let Some(prev_view) = self.view_stack.pop() {
            self.current_view = prev_view;
            self.header.current_tab = prev_view.tab_index();
            self.status_bar.error_message = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, B256, U256};

    use super::*;
    use crate::data::provider::EthProvider;
    use crate::data::types::WorkRecord;

    fn test_app() -> App {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let chain = Arc::new(ChainService::new(
            EthProvider::offline(Some(Address::ZERO)),
            Address::ZERO,
            Address::ZERO,
            "http://localhost:3001".to_string(),
            PathBuf::from("/tmp"),
            960_000,
            event_tx,
        ));
        App::with_service(chain, event_rx, PathBuf::from("/tmp"), 100)
    }

    fn record(block: u64, log_index: u64) -> WorkRecord {
        WorkRecord {
            contract: Address::from_slice(&[0x11; 20]),
            name: [0u8; 32],
            requester: Address::from_slice(&[0x22; 20]),
            validator: Address::from_slice(&[0x33; 20]),
            deadline: 1700000000,
            value: U256::from(1u64),
            block_number: block,
            tx_hash: B256::from_slice(&[block as u8; 32]),
            log_index,
        }
    }

    #[test]
    fn test_error_leaves_applied_rows_unchanged() {
        let mut app = test_app();
        app.handle_app_event(AppEvent::ValidatedBatch(vec![record(10, 0), record(11, 0)]));
        assert_eq!(app.completed.rows.len(), 2);
        let before = app.completed.rows.clone();

        app.handle_app_event(AppEvent::Error("eth_getLogs failed".to_string()));
        assert_eq!(app.completed.rows, before);
        assert_eq!(app.completed_ledger.len(), 2);
        assert_eq!(
            app.status_bar.error_message.as_deref(),
            Some("eth_getLogs failed")
        );
    }

    #[test]
    fn test_error_clears_table_loading() {
        let mut app = test_app();
        app.completed.loading = true;
        app.claims.loading = true;

        app.handle_app_event(AppEvent::Error("No account configured".to_string()));
        assert!(!app.completed.loading);
        assert!(!app.claims.loading);
        assert!(!app.status_bar.loading);
    }

    #[test]
    fn test_unrelated_error_keeps_transfer_in_flight() {
        let mut app = test_app();
        app.transfer.submitting = true;

        app.handle_app_event(AppEvent::Error(
            "Failed to get block number: timeout".to_string(),
        ));
        assert!(app.transfer.submitting);

        app.handle_app_event(AppEvent::TxFailed {
            action: "transfer",
            msg: "Transfer failed: nonce too low".to_string(),
        });
        assert!(!app.transfer.submitting);
        assert_eq!(
            app.status_bar.error_message.as_deref(),
            Some("Transfer failed: nonce too low")
        );
    }

    #[test]
    fn test_failed_validate_leaves_transfer_alone() {
        let mut app = test_app();
        app.transfer.submitting = true;

        app.handle_app_event(AppEvent::TxFailed {
            action: "validate",
            msg: "Validate failed: reverted".to_string(),
        });
        assert!(app.transfer.submitting);
    }
}
