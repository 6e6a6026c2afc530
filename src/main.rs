mod app;
mod components;
mod config;
mod data;
mod events;
mod theme;
mod utils;

use std::sync::Arc;

use alloy::signers::local::PrivateKeySigner;
use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;

use crate::app::App;
use crate::config::Config;
use crate::data::provider::EthProvider;
use crate::data::ChainService;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::parse();

    let signer = match &config.private_key {
        Some(key) => Some(key.parse::<PrivateKeySigner>()?),
        None => None,
    };

    // Connect to the Ethereum node
    eprintln!("Connecting to {}...", config.rpc_url);
    let provider = EthProvider::connect(&config.rpc_url, signer, config.account).await?;
    let chain_id = provider.chain_id();
    let account = provider.account();
    eprintln!("Connected to chain {chain_id}");

    // Create event channel
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    // Send initial connected event
    let _ = event_tx.send(events::AppEvent::Connected(chain_id));

    let download_dir = config
        .download_dir
        .clone()
        .unwrap_or_else(data::download::default_download_dir);

    let chain = Arc::new(ChainService::new(
        provider,
        config.factory,
        config.token,
        config.files_url.clone(),
        download_dir.clone(),
        config.deploy_block,
        event_tx.clone(),
    ));

    let mut app = App::with_service(
        Arc::clone(&chain),
        event_rx,
        download_dir,
        config.tick_rate_ms,
    );

    // Live event subscription when a WebSocket endpoint is configured.
    // Kept alive for the whole run; dropping it tears the stream down.
    let mut ws_service = data::ws::WsService::new(event_tx.clone());
    if let (Some(ws_url), Some(account)) = (&config.ws_url, account) {
        ws_service.connect(ws_url, config.factory, account);
    }

    // Initialize terminal
    let terminal = ratatui::init();
    let result = app.run(terminal).await;

    // Restore terminal
    ratatui::restore();

    result
}
