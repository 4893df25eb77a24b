//! Wallet provider capability.
//!
//! A `WalletProvider` is the Rust-side equivalent of an injected EIP-1193
//! provider: account access, chain selection and transaction submission all
//! go through it, and it is the only thing that can sign.

use std::fmt;
use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::blockchain::networks::ChainParams;
use crate::blockchain::types::{ProviderResult, TxReceipt};

/// Requests exposed by a wallet to the client.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the user to expose their accounts (`eth_requestAccounts`).
    async fn request_accounts(&self) -> ProviderResult<Vec<Address>>;

    /// Accounts already authorized for this client, without prompting (`eth_accounts`).
    async fn accounts(&self) -> ProviderResult<Vec<Address>>;

    /// Chain the wallet is currently on (`eth_chainId`).
    async fn chain_id(&self) -> ProviderResult<u64>;

    /// Switch the wallet to a known chain (`wallet_switchEthereumChain`).
    async fn switch_chain(&self, chain_id: u64) -> ProviderResult<()>;

    /// Register a chain with the wallet and switch to it (`wallet_addEthereumChain`).
    async fn add_chain(&self, params: &ChainParams) -> ProviderResult<()>;

    /// Subscribe to `chainChanged` notifications.
    fn subscribe_chain_changed(&self) -> broadcast::Receiver<u64>;

    /// Sign and broadcast a transaction (`eth_sendTransaction`).
    async fn send_transaction(&self, tx: TransactionRequest) -> ProviderResult<TxHash>;

    /// Receipt for a mined transaction, `None` while pending.
    async fn transaction_receipt(&self, hash: TxHash) -> ProviderResult<Option<TxReceipt>>;
}

/// Result of looking for a wallet at startup.
///
/// Authorization is not part of the variant: a present wallet is
/// "authorized" exactly when `accounts()` returns a non-empty list.
#[derive(Clone)]
pub enum InjectedProvider {
    Absent,
    Present(Arc<dyn WalletProvider>),
}

impl InjectedProvider {
    pub fn get(&self) -> Option<&Arc<dyn WalletProvider>> {
        match self {
            InjectedProvider::Absent => None,
            InjectedProvider::Present(provider) => Some(provider),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, InjectedProvider::Present(_))
    }
}

impl fmt::Debug for InjectedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectedProvider::Absent => f.write_str("InjectedProvider::Absent"),
            InjectedProvider::Present(_) => f.write_str("InjectedProvider::Present(..)"),
        }
    }
}

/// Something the wallet asks the user to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalRequest {
    ConnectAccount { account: Address },
    AddChain { chain_id: u64, chain_name: String },
    SendTransaction {
        to: Option<Address>,
        value: U256,
        gas_limit: Option<u64>,
    },
}

impl fmt::Display for ApprovalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalRequest::ConnectAccount { account } => {
                write!(f, "Connect account {} to this client?", account)
            }
            ApprovalRequest::AddChain { chain_id, chain_name } => {
                write!(f, "Allow this client to add and switch to {} ({:#x})?", chain_name, chain_id)
            }
            ApprovalRequest::SendTransaction { to, value, gas_limit } => {
                let to = to.map(|a| a.to_string()).unwrap_or_else(|| "<contract creation>".to_string());
                write!(
                    f,
                    "Send transaction to {} with value {} wei (gas limit {})?",
                    to,
                    value,
                    gas_limit.map(|g| g.to_string()).unwrap_or_else(|| "auto".to_string())
                )
            }
        }
    }
}

/// Consent source used by a wallet before it exposes accounts or signs.
#[async_trait]
pub trait Approver: Send + Sync {
    async fn approve(&self, request: &ApprovalRequest) -> bool;
}

/// Approves everything. Used with `--yes` and in non-interactive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

#[async_trait]
impl Approver for AutoApprove {
    async fn approve(&self, _request: &ApprovalRequest) -> bool {
        true
    }
}
