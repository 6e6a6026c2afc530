use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder, WsConnect};
use color_eyre::eyre::eyre;
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::data::contracts;
use crate::events::AppEvent;

/// WebSocket subscription service for live factory events. Each decoded
/// log is forwarded as a single-record merge; the app never re-fetches
/// history in response to a notification.
pub struct WsService {
    event_tx: mpsc::UnboundedSender<AppEvent>,
    shutdown_tx: Option<mpsc::UnboundedSender<()>>,
}

impl WsService {
    pub fn new(event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            event_tx,
            shutdown_tx: None,
        }
    }

    /// Connect to a WebSocket endpoint and subscribe to the account-scoped
    /// factory filter, reconnecting with exponential backoff on failure.
    pub fn connect(&mut self, ws_url: &str, factory: Address, account: Address) {
        let (shutdown_tx, mut shutdown_rx) = mpsc::unbounded_channel::<()>();
        self.shutdown_tx = Some(shutdown_tx);

        let url = ws_url.to_string();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let mut backoff = Duration::from_secs(1);
            let max_backoff = Duration::from_secs(30);

            loop {
                match Self::connect_and_subscribe(
                    &url,
                    factory,
                    account,
                    event_tx.clone(),
                    &mut shutdown_rx,
                )
                .await
                {
                    Ok(()) => {
                        // Clean shutdown requested
                        let _ = event_tx.send(AppEvent::WsDisconnected);
                        return;
                    }
                    Err(_) => {
                        let _ = event_tx.send(AppEvent::WsDisconnected);
                        tokio::select! {
                            _ = tokio::time::sleep(backoff) => {
                                backoff = (backoff * 2).min(max_backoff);
                            }
                            _ = shutdown_rx.recv() => {
                                return;
                            }
                        }
                    }
                }
            }
        });
    }

    async fn connect_and_subscribe(
        url: &str,
        factory: Address,
        account: Address,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        shutdown_rx: &mut mpsc::UnboundedReceiver<()>,
    ) -> Result<(), color_eyre::eyre::Report> {
        let ws = WsConnect::new(url.to_string());
        let provider = ProviderBuilder::new().on_ws(ws).await?;

        let filter = contracts::live_filter(factory, account);
        let sub = provider.subscribe_logs(&filter).await?;
        let mut stream = sub.into_stream();

        let _ = event_tx.send(AppEvent::WsConnected);

        loop {
            tokio::select! {
                maybe_log = stream.next() => {
                    let Some(log) = maybe_log else {
                        // Stream ended: the node dropped us, reconnect.
                        return Err(eyre!("log subscription ended"));
                    };
                    if let Some(record) = contracts::decode_validated(&log) {
                        let _ = event_tx.send(AppEvent::NewValidated(record));
                    } else if let Some(record) = contracts::decode_claimed(&log) {
                        let _ = event_tx.send(AppEvent::NewClaimed(record));
                    }
                }
                _ = shutdown_rx.recv() => {
                    return Ok(());
                }
            }
        }
    }

    /// Shut down the WebSocket connection.
    pub fn disconnect(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for WsService {
    fn drop(&mut self) {
        self.disconnect();
    }
}
