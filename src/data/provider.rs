use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{Filter, Log, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use color_eyre::eyre::{eyre, Result};

/// Wrapper over the alloy provider. Boxed as a trait object to avoid
/// spelling out the filler-stack generics, which differ between the
/// read-only and wallet-backed builds.
pub struct EthProvider {
    provider: Box<dyn Provider + Send + Sync>,
    chain_id: u64,
    account: Option<Address>,
    signing: bool,
}

impl EthProvider {
    /// Connect to an Ethereum node via HTTP RPC. When a signer is given,
    /// the provider signs and submits transactions from that key; otherwise
    /// `account` (if any) scopes event filters in read-only mode.
    pub async fn connect(
        rpc_url: &str,
        signer: Option<PrivateKeySigner>,
        account: Option<Address>,
    ) -> Result<Self> {
        let url = rpc_url.parse()?;

        let signing = signer.is_some();
        let (provider, account): (Box<dyn Provider + Send + Sync>, Option<Address>) =
            match signer {
                Some(signer) => {
                    let address = signer.address();
                    let wallet = EthereumWallet::from(signer);
                    let provider = ProviderBuilder::new().wallet(wallet).on_http(url);
                    (Box::new(provider), Some(address))
                }
                None => {
                    let provider = ProviderBuilder::new().on_http(url);
                    (Box::new(provider), account)
                }
            };

        let chain_id = provider.get_chain_id().await?;
        Ok(Self {
            provider,
            chain_id,
            account,
            signing,
        })
    }

    /// Provider that never connects, for exercising event handling without
    /// a node.
    #[cfg(test)]
    pub fn offline(account: Option<Address>) -> Self {
        let provider = ProviderBuilder::new().on_http("http://localhost:0".parse().unwrap());
        Self {
            provider: Box::new(provider),
            chain_id: 0,
            account,
            signing: false,
        }
    }

    /// Whether a signer is attached, i.e. transactions can be sent.
    pub fn signing(&self) -> bool {
        self.signing
    }

    /// Chain ID obtained at connection time.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The active account: the signer address, or the configured
    /// read-only address.
    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub async fn get_latest_block_number(&self) -> Result<u64> {
        let number = self.provider.get_block_number().await?;
        Ok(number)
    }

    /// ETH balance of an address at the latest block.
    pub async fn get_balance(&self, address: Address) -> Result<U256> {
        let balance = self.provider.get_balance(address).await?;
        Ok(balance)
    }

    /// Fetch logs matching a filter.
    pub async fn get_logs(&self, filter: &Filter) -> Result<Vec<Log>> {
        let logs = self.provider.get_logs(filter).await?;
        Ok(logs)
    }

    /// Read-only contract call (eth_call) with pre-encoded calldata.
    pub async fn call_contract(&self, to: Address, calldata: Vec<u8>) -> Result<Bytes> {
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_input(Bytes::from(calldata));
        let ret = self.provider.call(tx).await?;
        Ok(ret)
    }

    /// Submit a state-mutating contract call from the active account and
    /// wait until it lands, returning the transaction hash.
    pub async fn send_contract(&self, to: Address, calldata: Vec<u8>) -> Result<B256> {
        let from = self
            .account
            .ok_or_else(|| eyre!("no signing account configured (set --private-key)"))?;

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_input(Bytes::from(calldata));

        let pending = self.provider.send_transaction(tx).await?;
        let hash = pending.watch().await?;
        Ok(hash)
    }
}
