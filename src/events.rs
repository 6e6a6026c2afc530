use alloy::primitives::{Address, B256, U256};

use crate::data::types::WorkRecord;

/// Pages the user can navigate to. Exact-match, no nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Completed,
    Claims,
    Transfer,
}

impl View {
    /// Position in the header tab bar.
    pub fn tab_index(self) -> usize {
        match self {
            View::Home => 0,
            View::Completed => 1,
            View::Claims => 2,
            View::Transfer => 3,
        }
    }
}

/// Export formats for the event tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Messages sent from background data tasks to the main app loop.
#[derive(Debug)]
pub enum AppEvent {
    // Connection
    Connected(u64), // chain_id
    LatestBlockNumber(u64),
    WsConnected,
    WsDisconnected,

    // Ledger data
    ValidatedBatch(Vec<WorkRecord>),
    ClaimedBatch(Vec<WorkRecord>),
    NewValidated(WorkRecord),
    NewClaimed(WorkRecord),

    // Account overview
    Balances { eth: U256, onx: U256 },

    // User intents from view components
    Download(Address),
    Validate(Address),
    Export(ExportFormat),
    Transfer { to: Address, amount: U256 },

    // Action results
    TxSubmitted { action: &'static str, hash: B256 },
    TxFailed { action: &'static str, msg: String },
    DownloadComplete(String),
    ExportComplete(String),

    // Navigation
    Navigate(View),
    Back,

    // Status
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_indices_match_tab_bar_order() {
        assert_eq!(View::Home.tab_index(), 0);
        assert_eq!(View::Completed.tab_index(), 1);
        assert_eq!(View::Claims.tab_index(), 2);
        assert_eq!(View::Transfer.tab_index(), 3);
    }
}
