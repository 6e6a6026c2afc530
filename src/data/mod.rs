pub mod cache;
pub mod contracts;
pub mod download;
pub mod export;
pub mod ledger;
pub mod provider;
pub mod types;
pub mod ws;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, U256};
use tokio::sync::mpsc;
use tokio::sync::RwLock;

use crate::data::cache::DataCache;
use crate::data::provider::EthProvider;
use crate::data::types::WorkRecord;
use crate::events::AppEvent;

/// How many dataHash reads to attempt before give up. The contract's
/// content identifier is written in the same transaction that completes a
/// work item, so a just-validated contract can briefly read back empty.
const DATA_HASH_ATTEMPTS: u32 = 5;
const DATA_HASH_RETRY_DELAY: Duration = Duration::from_millis(200);

/// Spawns background chain work and reports results over the app event
/// channel. All failures become `AppEvent::Error`; no task mutates display
/// state directly.
pub struct ChainService {
    provider: Arc<EthProvider>,
    cache: Arc<RwLock<DataCache>>,
    factory: Address,
    token: Address,
    files_url: String,
    download_dir: PathBuf,
    deploy_block: u64,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl ChainService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        provider: EthProvider,
        factory: Address,
        token: Address,
        files_url: String,
        download_dir: PathBuf,
        deploy_block: u64,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            cache: Arc::new(RwLock::new(DataCache::new())),
            factory,
            token,
            files_url,
            download_dir,
            deploy_block,
            event_tx,
        }
    }

    pub fn account(&self) -> Option<Address> {
        self.provider.account()
    }

    pub fn signing(&self) -> bool {
        self.provider.signing()
    }

    fn require_account(&self) -> Option<Address> {
        let account = self.provider.account();
        if account.is_none() {
            let _ = self.event_tx.send(AppEvent::Error(
                "No account configured (set --private-key or --account)".to_string(),
            ));
        }
        account
    }

    /// Fetch the latest block number and report it.
    pub fn fetch_latest_block_number(&self) {
        let provider = Arc::clone(&self.provider);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match provider.get_latest_block_number().await {
                Ok(number) => {
                    let _ = tx.send(AppEvent::LatestBlockNumber(number));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!("Failed to get block number: {e}")));
                }
            }
        });
    }

    /// Fetch Validated events for the active account. `from_block` bounds a
    /// backfill; None means the full history from the deploy block.
    pub fn refresh_completed(&self, from_block: Option<u64>) {
        let Some(account) = self.require_account() else {
            return;
        };
        let provider = Arc::clone(&self.provider);
        let tx = self.event_tx.clone();
        let filter = contracts::validated_filter(
            self.factory,
            account,
            from_block.unwrap_or(self.deploy_block),
        );

        tokio::spawn(async move {
            match provider.get_logs(&filter).await {
                Ok(logs) => {
                    let records: Vec<WorkRecord> =
                        logs.iter().filter_map(contracts::decode_validated).collect();
                    let _ = tx.send(AppEvent::ValidatedBatch(records));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!(
                        "Failed to fetch Validated events: {e}"
                    )));
                }
            }
        });
    }

    /// Fetch Claimed events for the active account as requester.
    pub fn refresh_claims(&self, from_block: Option<u64>) {
        let Some(account) = self.require_account() else {
            return;
        };
        let provider = Arc::clone(&self.provider);
        let tx = self.event_tx.clone();
        let filter = contracts::claimed_filter(
            self.factory,
            account,
            from_block.unwrap_or(self.deploy_block),
        );

        tokio::spawn(async move {
            match provider.get_logs(&filter).await {
                Ok(logs) => {
                    let records: Vec<WorkRecord> =
                        logs.iter().filter_map(contracts::decode_claimed).collect();
                    let _ = tx.send(AppEvent::ClaimedBatch(records));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!(
                        "Failed to fetch Claimed events: {e}"
                    )));
                }
            }
        });
    }

    /// Fetch ETH and ONX balances for the active account.
    pub fn fetch_balances(&self) {
        let Some(account) = self.require_account() else {
            return;
        };
        let provider = Arc::clone(&self.provider);
        let cache = Arc::clone(&self.cache);
        let token = self.token;
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            {
                let c = cache.read().await;
                if let Some((eth, onx)) = c.get_balances() {
                    let _ = tx.send(AppEvent::Balances { eth, onx });
                    return;
                }
            }

            let eth = match provider.get_balance(account).await {
                Ok(b) => b,
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!("Failed to fetch balance: {e}")));
                    return;
                }
            };

            let onx = match provider
                .call_contract(token, contracts::balance_of_calldata(account))
                .await
                .and_then(|ret| contracts::decode_balance_of(&ret))
            {
                Ok(b) => b,
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!(
                        "Failed to fetch token balance: {e}"
                    )));
                    return;
                }
            };

            {
                let mut c = cache.write().await;
                c.put_balances(eth, onx);
            }

            let _ = tx.send(AppEvent::Balances { eth, onx });
        });
    }

    /// Submit the work contract from the active account and report the
    /// confirmed transaction hash.
    pub fn validate(&self, contract: Address) {
        let provider = Arc::clone(&self.provider);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match provider
                .send_contract(contract, contracts::submit_calldata())
                .await
            {
                Ok(hash) => {
                    let _ = tx.send(AppEvent::TxSubmitted {
                        action: "validate",
                        hash,
                    });
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::TxFailed {
                        action: "validate",
                        msg: format!("Validate failed: {e}"),
                    });
                }
            }
        });
    }

    /// Transfer ONX tokens from the active account.
    pub fn transfer(&self, to: Address, amount: U256) {
        let provider = Arc::clone(&self.provider);
        let token = self.token;
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match provider
                .send_contract(token, contracts::transfer_calldata(to, amount))
                .await
            {
                Ok(hash) => {
                    let _ = tx.send(AppEvent::TxSubmitted {
                        action: "transfer",
                        hash,
                    });
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::TxFailed {
                        action: "transfer",
                        msg: format!("Transfer failed: {e}"),
                    });
                }
            }
        });
    }

    /// Resolve the contract's content identifier and fetch the file it
    /// references. A freshly validated contract may read back an empty
    /// identifier, so the read is retried a bounded number of times.
    pub fn download(&self, contract: Address) {
        let provider = Arc::clone(&self.provider);
        let cache = Arc::clone(&self.cache);
        let files_url = self.files_url.clone();
        let dir = self.download_dir.clone();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let cached = {
                let mut c = cache.write().await;
                c.get_data_hash(&contract)
            };

            let id = match cached {
                Some(id) => id,
                None => {
                    let mut id = String::new();
                    for attempt in 0..DATA_HASH_ATTEMPTS {
                        match provider
                            .call_contract(contract, contracts::data_hash_calldata())
                            .await
                            .and_then(|ret| contracts::decode_data_hash(&ret))
                        {
                            Ok(hash) if !hash.is_empty() => {
                                id = hash;
                                break;
                            }
                            Ok(_) => {}
                            Err(e) => {
                                if attempt + 1 == DATA_HASH_ATTEMPTS {
                                    let _ = tx.send(AppEvent::Error(format!(
                                        "Failed to read content identifier: {e}"
                                    )));
                                    return;
                                }
                            }
                        }
                        tokio::time::sleep(DATA_HASH_RETRY_DELAY).await;
                    }

                    if id.is_empty() {
                        let _ = tx.send(AppEvent::Error(
                            "Deliverable not yet available for this contract".to_string(),
                        ));
                        return;
                    }

                    {
                        let mut c = cache.write().await;
                        c.put_data_hash(contract, id.clone());
                    }
                    id
                }
            };

            match download::fetch_file(&files_url, &id, &dir).await {
                Ok(path) => {
                    let _ = tx.send(AppEvent::DownloadComplete(path.display().to_string()));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!("Download failed: {e}")));
                }
            }
        });
    }
}
