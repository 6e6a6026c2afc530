use std::path::PathBuf;

use alloy::primitives::Address;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "onyx-tui", about = "Terminal client for the Onyx requirement-engineering contracts")]
pub struct Config {
    /// RPC endpoint URL
    #[arg(short, long, default_value = "http://localhost:8545")]
    pub rpc_url: String,

    /// WebSocket RPC endpoint URL for live event subscriptions
    #[arg(long)]
    pub ws_url: Option<String>,

    /// Hex private key used to submit validate/transfer transactions
    #[arg(long, env = "ONYX_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Account to watch in read-only mode (ignored when a key is given)
    #[arg(long)]
    pub account: Option<Address>,

    /// Deployed ReqEngContractFactory address
    #[arg(long)]
    pub factory: Address,

    /// Deployed OnyxToken address
    #[arg(long)]
    pub token: Address,

    /// Base URL of the file server holding contract deliverables
    #[arg(long, default_value = "http://localhost:3001")]
    pub files_url: String,

    /// Block the factory was deployed at; historical queries start here
    #[arg(long, default_value = "960000")]
    pub deploy_block: u64,

    /// Directory downloads are written to (defaults to the OS download dir)
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// Tick rate in milliseconds for UI refresh
    #[arg(long, default_value = "100")]
    pub tick_rate_ms: u64,
}
