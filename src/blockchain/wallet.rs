//! Local-key wallet provider.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized
//! - Every account exposure and every transaction goes through the approver

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::TransportError;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};
use tokio::time::timeout;

use crate::blockchain::networks::ChainParams;
use crate::blockchain::provider::{ApprovalRequest, Approver, InjectedProvider, WalletProvider};
use crate::blockchain::types::{ProviderError, ProviderResult, TxReceipt};
use crate::config::WalletConfig;

type SharedProvider = Arc<dyn Provider + Send + Sync>;

/// Errors raised while constructing a wallet.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Environment variable {0} not set")]
    MissingKey(String),

    #[error("Invalid private key format: {0}")]
    InvalidKey(String),

    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },
}

struct ActiveChain {
    chain_id: u64,
    provider: SharedProvider,
}

/// Wallet backed by a single private key and JSON-RPC endpoints.
///
/// Behaves like a browser wallet extension: it remembers the chains it
/// knows about, which chain is selected, and whether this client has been
/// granted access to the account.
pub struct LocalKeyWallet {
    signer: PrivateKeySigner,
    /// Chain id → RPC URL for every chain the wallet can switch to.
    known_chains: RwLock<HashMap<u64, url::Url>>,
    active: RwLock<ActiveChain>,
    authorized: AtomicBool,
    approver: Arc<dyn Approver>,
    chain_tx: broadcast::Sender<u64>,
    rpc_timeout: Duration,
}

impl LocalKeyWallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// The wallet starts on `config.initial_chain_id`, which is the only
    /// chain it knows until more are added.
    pub fn from_private_key(
        private_key_hex: &str,
        config: &WalletConfig,
        approver: Arc<dyn Approver>,
    ) -> Result<Self, WalletError> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| WalletError::InvalidKey(format!("{}", e)))?;

        let rpc_url = parse_rpc_url(&config.initial_rpc_url)?;
        let provider = connect(&signer, rpc_url.clone());
        let (chain_tx, _) = broadcast::channel(16);

        tracing::info!(
            address = %signer.address(),
            chain_id = config.initial_chain_id,
            pre_authorized = config.pre_authorized,
            "Wallet initialized"
        );

        Ok(Self {
            signer,
            known_chains: RwLock::new(HashMap::from([(config.initial_chain_id, rpc_url)])),
            active: RwLock::new(ActiveChain {
                chain_id: config.initial_chain_id,
                provider,
            }),
            authorized: AtomicBool::new(config.pre_authorized),
            approver,
            chain_tx,
            rpc_timeout: Duration::from_secs(config.rpc_timeout_secs),
        })
    }

    /// Load wallet from the environment variable named in the config.
    pub fn from_env(config: &WalletConfig, approver: Arc<dyn Approver>) -> Result<Self, WalletError> {
        let private_key = std::env::var(&config.private_key_env)
            .map_err(|_| WalletError::MissingKey(config.private_key_env.clone()))?;

        Self::from_private_key(&private_key, config, approver)
    }

    /// Look for a wallet the way a dapp looks for an injected provider.
    ///
    /// A missing or unusable key yields `InjectedProvider::Absent`; this is
    /// a normal state, not an error.
    pub fn detect(config: &WalletConfig, approver: Arc<dyn Approver>) -> InjectedProvider {
        match Self::from_env(config, approver) {
            Ok(wallet) => InjectedProvider::Present(Arc::new(wallet)),
            Err(WalletError::MissingKey(var)) => {
                tracing::info!(env = %var, "No wallet key found, wallet provider absent");
                InjectedProvider::Absent
            }
            Err(e) => {
                tracing::error!(error = %e, "Wallet could not be loaded, wallet provider absent");
                InjectedProvider::Absent
            }
        }
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    async fn ask(&self, request: ApprovalRequest) -> bool {
        self.approver.approve(&request).await
    }

    async fn active_provider(&self) -> SharedProvider {
        self.active.read().await.provider.clone()
    }

    /// Make `chain_id` the selected chain and notify subscribers if it changed.
    async fn select_chain(&self, chain_id: u64, rpc_url: url::Url) {
        let mut active = self.active.write().await;
        if active.chain_id == chain_id {
            return;
        }
        active.chain_id = chain_id;
        active.provider = connect(&self.signer, rpc_url);
        drop(active);

        tracing::info!(chain_id = chain_id, "Wallet switched chain");
        // No subscribers is fine: nobody is listening yet.
        let _ = self.chain_tx.send(chain_id);
    }
}

fn parse_rpc_url(url: &str) -> Result<url::Url, WalletError> {
    url.parse().map_err(|e: url::ParseError| WalletError::InvalidRpcUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn connect(signer: &PrivateKeySigner, rpc_url: url::Url) -> SharedProvider {
    let wallet = EthereumWallet::from(signer.clone());
    Arc::new(ProviderBuilder::new().wallet(wallet).connect_http(rpc_url)) as SharedProvider
}

fn rpc_error(e: TransportError) -> ProviderError {
    match e.as_error_resp() {
        Some(payload) => ProviderError::new(payload.code, payload.message.to_string()),
        None => ProviderError::internal(e.to_string()),
    }
}

fn timed_out(what: &str, after: Duration) -> ProviderError {
    ProviderError::internal(format!("{} timed out after {} seconds", what, after.as_secs()))
}

#[async_trait]
impl WalletProvider for LocalKeyWallet {
    async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
        if !self.authorized.load(Ordering::SeqCst) {
            let approved = self
                .ask(ApprovalRequest::ConnectAccount {
                    account: self.address(),
                })
                .await;
            if !approved {
                return Err(ProviderError::user_rejected());
            }
            self.authorized.store(true, Ordering::SeqCst);
        }
        Ok(vec![self.address()])
    }

    async fn accounts(&self) -> ProviderResult<Vec<Address>> {
        if self.authorized.load(Ordering::SeqCst) {
            Ok(vec![self.address()])
        } else {
            Ok(Vec::new())
        }
    }

    async fn chain_id(&self) -> ProviderResult<u64> {
        Ok(self.active.read().await.chain_id)
    }

    async fn switch_chain(&self, chain_id: u64) -> ProviderResult<()> {
        let rpc_url = self.known_chains.read().await.get(&chain_id).cloned();
        match rpc_url {
            Some(url) => {
                self.select_chain(chain_id, url).await;
                Ok(())
            }
            None => Err(ProviderError::unrecognized_chain(chain_id)),
        }
    }

    async fn add_chain(&self, params: &ChainParams) -> ProviderResult<()> {
        let raw_url = params
            .rpc_urls
            .first()
            .ok_or_else(|| ProviderError::new(-32602, "rpcUrls must contain at least one endpoint"))?;
        let rpc_url = parse_rpc_url(raw_url).map_err(|e| ProviderError::new(-32602, e.to_string()))?;

        let approved = self
            .ask(ApprovalRequest::AddChain {
                chain_id: params.chain_id,
                chain_name: params.chain_name.clone(),
            })
            .await;
        if !approved {
            return Err(ProviderError::user_rejected());
        }

        // The endpoint must actually serve the chain it claims to.
        let probe = connect(&self.signer, rpc_url.clone());
        let reported = match timeout(self.rpc_timeout, probe.get_chain_id()).await {
            Ok(Ok(id)) => id,
            Ok(Err(e)) => return Err(rpc_error(e)),
            Err(_) => return Err(timed_out("eth_chainId", self.rpc_timeout)),
        };
        if reported != params.chain_id {
            return Err(ProviderError::new(
                -32602,
                format!(
                    "Chain ID returned by RPC {:#x} does not match {:#x}",
                    reported, params.chain_id
                ),
            ));
        }

        self.known_chains
            .write()
            .await
            .insert(params.chain_id, rpc_url.clone());
        tracing::info!(chain_id = params.chain_id, chain_name = %params.chain_name, "Chain added to wallet");

        self.select_chain(params.chain_id, rpc_url).await;
        Ok(())
    }

    fn subscribe_chain_changed(&self) -> broadcast::Receiver<u64> {
        self.chain_tx.subscribe()
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> ProviderResult<TxHash> {
        if !self.authorized.load(Ordering::SeqCst) {
            return Err(ProviderError::unauthorized());
        }
        if let Some(from) = tx.from {
            if from != self.address() {
                return Err(ProviderError::unauthorized());
            }
        }

        let approved = self
            .ask(ApprovalRequest::SendTransaction {
                to: tx.to.and_then(|kind| kind.to().copied()),
                value: tx.value.unwrap_or_default(),
                gas_limit: tx.gas,
            })
            .await;
        if !approved {
            return Err(ProviderError::user_rejected());
        }

        let provider = self.active_provider().await;
        match timeout(self.rpc_timeout, provider.send_transaction(tx)).await {
            Ok(Ok(pending)) => {
                let hash = *pending.tx_hash();
                tracing::debug!(tx_hash = %hash, "Transaction broadcast");
                Ok(hash)
            }
            Ok(Err(e)) => Err(rpc_error(e)),
            Err(_) => Err(timed_out("eth_sendTransaction", self.rpc_timeout)),
        }
    }

    async fn transaction_receipt(&self, hash: TxHash) -> ProviderResult<Option<TxReceipt>> {
        let provider = self.active_provider().await;
        match timeout(self.rpc_timeout, provider.get_transaction_receipt(hash)).await {
            Ok(Ok(receipt)) => Ok(receipt.map(|r| TxReceipt {
                hash: r.transaction_hash,
                success: r.status(),
                block_number: r.block_number,
            })),
            Ok(Err(e)) => Err(rpc_error(e)),
            Err(_) => Err(timed_out("eth_getTransactionReceipt", self.rpc_timeout)),
        }
    }
}

impl std::fmt::Debug for LocalKeyWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalKeyWallet")
            .field("address", &self.address())
            .field("authorized", &self.authorized.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::provider::AutoApprove;
    use alloy::network::TransactionBuilder;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    struct Deny;

    #[async_trait]
    impl Approver for Deny {
        async fn approve(&self, _request: &ApprovalRequest) -> bool {
            false
        }
    }

    fn wallet(pre_authorized: bool, approver: Arc<dyn Approver>) -> LocalKeyWallet {
        let config = WalletConfig {
            initial_chain_id: 31337,
            initial_rpc_url: "http://localhost:8545".to_string(),
            pre_authorized,
            ..WalletConfig::default()
        };
        LocalKeyWallet::from_private_key(TEST_PRIVATE_KEY, &config, approver).unwrap()
    }

    #[test]
    fn test_wallet_from_private_key() {
        let wallet = wallet(false, Arc::new(AutoApprove));
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let config = WalletConfig::default();
        let wallet =
            LocalKeyWallet::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY), &config, Arc::new(AutoApprove))
                .unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let result = LocalKeyWallet::from_private_key("invalid_key", &WalletConfig::default(), Arc::new(AutoApprove));
        assert!(matches!(result, Err(WalletError::InvalidKey(_))));
    }

    #[test]
    fn test_missing_env_means_absent() {
        let config = WalletConfig {
            private_key_env: "FNS_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..WalletConfig::default()
        };
        let provider = LocalKeyWallet::detect(&config, Arc::new(AutoApprove));
        assert!(!provider.is_present());
    }

    #[tokio::test]
    async fn test_accounts_hidden_until_requested() {
        let wallet = wallet(false, Arc::new(AutoApprove));
        assert!(wallet.accounts().await.unwrap().is_empty());

        let requested = wallet.request_accounts().await.unwrap();
        assert_eq!(requested, vec![wallet.address()]);
        assert_eq!(wallet.accounts().await.unwrap(), vec![wallet.address()]);
    }

    #[tokio::test]
    async fn test_pre_authorized_accounts() {
        let wallet = wallet(true, Arc::new(Deny));
        assert_eq!(wallet.accounts().await.unwrap(), vec![wallet.address()]);
    }

    #[tokio::test]
    async fn test_rejected_connection() {
        let wallet = wallet(false, Arc::new(Deny));
        let err = wallet.request_accounts().await.unwrap_err();
        assert!(err.is_user_rejection());
        assert!(wallet.accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_switch_to_unknown_chain() {
        let wallet = wallet(true, Arc::new(AutoApprove));
        let err = wallet.switch_chain(80001).await.unwrap_err();
        assert!(err.is_unrecognized_chain());
        assert_eq!(wallet.chain_id().await.unwrap(), 31337);
    }

    #[tokio::test]
    async fn test_switch_to_current_chain_is_silent() {
        let wallet = wallet(true, Arc::new(AutoApprove));
        let mut changes = wallet.subscribe_chain_changed();
        wallet.switch_chain(31337).await.unwrap();
        assert!(changes.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unauthorized_send() {
        let wallet = wallet(false, Arc::new(AutoApprove));
        let err = wallet
            .send_transaction(TransactionRequest::default().with_to(Address::ZERO))
            .await
            .unwrap_err();
        assert_eq!(err.code, ProviderError::UNAUTHORIZED);
    }
}
