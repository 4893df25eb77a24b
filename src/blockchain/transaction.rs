//! Transaction building, signing, and confirmation monitoring.
//!
//! # Responsibilities
//! - Build transactions with a fixed gas ceiling and attached value
//! - Hand them to the wallet for signing and broadcast
//! - Poll for the receipt until it shows up or the window closes
//!
//! # Design Decisions
//! - No retries: a failed broadcast is reported, the user re-initiates
//! - Waiting can only end by receipt or timeout; there is no cancel

use std::sync::Arc;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use tokio::time::{interval, timeout};

use crate::blockchain::provider::WalletProvider;
use crate::blockchain::types::{ProviderResult, TransactionError, TxReceipt};
use crate::config::ContractConfig;

/// How long and how often to look for a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl From<&ContractConfig> for ConfirmationPolicy {
    fn from(config: &ContractConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.confirmation_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

/// An authorized account able to sign through the wallet.
#[derive(Clone)]
pub struct Signer {
    provider: Arc<dyn WalletProvider>,
    account: Address,
}

impl Signer {
    pub fn new(provider: Arc<dyn WalletProvider>, account: Address) -> Self {
        Self { provider, account }
    }

    /// Get the signing account.
    pub fn address(&self) -> Address {
        self.account
    }

    /// Build a transaction request.
    ///
    /// # Arguments
    /// * `to` - Destination address
    /// * `value` - Amount of native token to attach
    /// * `data` - Call data
    /// * `gas_limit` - Fixed gas ceiling, no estimation
    pub fn build(&self, to: Address, value: U256, data: Bytes, gas_limit: u64) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.account)
            .with_to(to)
            .with_value(value)
            .with_input(data)
            .with_gas_limit(gas_limit)
    }

    /// Sign and broadcast a call, returning a handle to await its receipt.
    pub async fn send(
        &self,
        to: Address,
        value: U256,
        data: Bytes,
        gas_limit: u64,
    ) -> ProviderResult<PendingTransaction> {
        let tx = self.build(to, value, data, gas_limit);
        let hash = self.provider.send_transaction(tx).await?;

        tracing::info!(tx_hash = %hash, from = %self.account, to = %to, value = %value, "Transaction submitted");

        Ok(PendingTransaction {
            hash,
            provider: self.provider.clone(),
        })
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").field("account", &self.account).finish()
    }
}

/// A broadcast transaction whose receipt has not been seen yet.
pub struct PendingTransaction {
    hash: TxHash,
    provider: Arc<dyn WalletProvider>,
}

impl PendingTransaction {
    /// Wait for the transaction to be mined.
    ///
    /// Returns the receipt whatever its status; a reverted transaction is a
    /// receipt with `success == false`, not an error.
    pub async fn confirm(self, policy: ConfirmationPolicy) -> Result<TxReceipt, TransactionError> {
        let result = timeout(policy.timeout, async {
            let mut ticker = interval(policy.poll_interval);

            loop {
                ticker.tick().await;

                match self.provider.transaction_receipt(self.hash).await? {
                    Some(receipt) => {
                        tracing::info!(
                            tx_hash = %self.hash,
                            block_number = ?receipt.block_number,
                            success = receipt.success,
                            "Transaction mined"
                        );
                        return Ok::<TxReceipt, TransactionError>(receipt);
                    }
                    None => {
                        tracing::debug!(tx_hash = %self.hash, "Transaction pending");
                    }
                }
            }
        })
        .await;

        match result {
            Ok(receipt) => receipt,
            Err(_) => Err(TransactionError::ConfirmationTimeout(policy.timeout.as_secs())),
        }
    }
}
