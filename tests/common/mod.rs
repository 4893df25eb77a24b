//! Shared utilities for integration tests: a scriptable wallet and a
//! notifier that records alerts.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{address, Address, TxHash};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use tokio::sync::broadcast;

use fresh_name_service::blockchain::{
    ChainParams, ConfirmationPolicy, InjectedProvider, ProviderError, ProviderResult, TxReceipt,
    WalletProvider,
};
use fresh_name_service::config::NetworkConfig;
use fresh_name_service::registration::TransactionOrchestrator;
use fresh_name_service::session::ConnectionManager;
use fresh_name_service::ui::Notifier;

pub const ACCOUNT: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
pub const CONTRACT: Address = address!("5fbdb2315678afecb367f032d93f642f64180aa3");
pub const GAS_LIMIT: u64 = 1_000_000;

/// What the chain does with a transaction once sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mined {
    Success,
    Reverted,
    /// Never mined.
    Pending,
}

/// Every request the client made, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RequestAccounts,
    Accounts,
    ChainId,
    SwitchChain(u64),
    AddChain(u64),
    SendTransaction,
}

pub struct MockWallet {
    authorized: AtomicBool,
    grant_access: AtomicBool,
    chain_id: Mutex<u64>,
    known_chains: Mutex<Vec<u64>>,
    switch_error: Mutex<Option<ProviderError>>,
    add_error: Mutex<Option<ProviderError>>,
    send_error: Mutex<Option<ProviderError>>,
    plans: Mutex<VecDeque<Mined>>,
    mined: Mutex<HashMap<TxHash, Mined>>,
    calls: Mutex<Vec<Call>>,
    sent: Mutex<Vec<TransactionRequest>>,
    chain_tx: broadcast::Sender<u64>,
}

impl MockWallet {
    /// A wallet on `chain_id` that has (or has not) already authorized the client.
    pub fn new(authorized: bool, chain_id: u64) -> Self {
        let (chain_tx, _) = broadcast::channel(16);
        Self {
            authorized: AtomicBool::new(authorized),
            grant_access: AtomicBool::new(true),
            chain_id: Mutex::new(chain_id),
            known_chains: Mutex::new(vec![chain_id]),
            switch_error: Mutex::new(None),
            add_error: Mutex::new(None),
            send_error: Mutex::new(None),
            plans: Mutex::new(VecDeque::new()),
            mined: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            chain_tx,
        }
    }

    pub fn reject_access(self) -> Self {
        self.grant_access.store(false, Ordering::SeqCst);
        self
    }

    pub fn knowing(self, chain_id: u64) -> Self {
        self.known_chains.lock().unwrap().push(chain_id);
        self
    }

    pub fn failing_switch(self, error: ProviderError) -> Self {
        *self.switch_error.lock().unwrap() = Some(error);
        self
    }

    pub fn failing_add(self, error: ProviderError) -> Self {
        *self.add_error.lock().unwrap() = Some(error);
        self
    }

    pub fn failing_send(self, error: ProviderError) -> Self {
        *self.send_error.lock().unwrap() = Some(error);
        self
    }

    /// Outcome of the next transactions, in send order.
    pub fn mining(self, outcomes: &[Mined]) -> Self {
        self.plans.lock().unwrap().extend(outcomes.iter().copied());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn current_chain(&self) -> u64 {
        *self.chain_id.lock().unwrap()
    }

    /// Simulate the user picking another network in the wallet.
    pub fn emit_chain_change(&self, chain_id: u64) {
        *self.chain_id.lock().unwrap() = chain_id;
        let _ = self.chain_tx.send(chain_id);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
        self.record(Call::RequestAccounts);
        if !self.grant_access.load(Ordering::SeqCst) {
            return Err(ProviderError::user_rejected());
        }
        self.authorized.store(true, Ordering::SeqCst);
        Ok(vec![ACCOUNT])
    }

    async fn accounts(&self) -> ProviderResult<Vec<Address>> {
        self.record(Call::Accounts);
        if self.authorized.load(Ordering::SeqCst) {
            Ok(vec![ACCOUNT])
        } else {
            Ok(Vec::new())
        }
    }

    async fn chain_id(&self) -> ProviderResult<u64> {
        self.record(Call::ChainId);
        Ok(self.current_chain())
    }

    async fn switch_chain(&self, chain_id: u64) -> ProviderResult<()> {
        self.record(Call::SwitchChain(chain_id));
        if let Some(e) = self.switch_error.lock().unwrap().clone() {
            return Err(e);
        }
        if !self.known_chains.lock().unwrap().contains(&chain_id) {
            return Err(ProviderError::unrecognized_chain(chain_id));
        }
        if self.current_chain() != chain_id {
            self.emit_chain_change(chain_id);
        }
        Ok(())
    }

    async fn add_chain(&self, params: &ChainParams) -> ProviderResult<()> {
        self.record(Call::AddChain(params.chain_id));
        if let Some(e) = self.add_error.lock().unwrap().clone() {
            return Err(e);
        }
        self.known_chains.lock().unwrap().push(params.chain_id);
        self.emit_chain_change(params.chain_id);
        Ok(())
    }

    fn subscribe_chain_changed(&self) -> broadcast::Receiver<u64> {
        self.chain_tx.subscribe()
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> ProviderResult<TxHash> {
        self.record(Call::SendTransaction);
        if let Some(e) = self.send_error.lock().unwrap().clone() {
            return Err(e);
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(tx);
        let hash = TxHash::with_last_byte(sent.len() as u8);

        let plan = self.plans.lock().unwrap().pop_front().unwrap_or(Mined::Success);
        self.mined.lock().unwrap().insert(hash, plan);
        Ok(hash)
    }

    async fn transaction_receipt(&self, hash: TxHash) -> ProviderResult<Option<TxReceipt>> {
        let plan = self.mined.lock().unwrap().get(&hash).copied();
        Ok(match plan {
            Some(Mined::Success) => Some(TxReceipt {
                hash,
                success: true,
                block_number: Some(100),
            }),
            Some(Mined::Reverted) => Some(TxReceipt {
                hash,
                success: false,
                block_number: Some(100),
            }),
            Some(Mined::Pending) | None => None,
        })
    }
}

/// Keeps every alert shown to the user.
#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

pub fn target_chain() -> ChainParams {
    ChainParams::from(&NetworkConfig::default())
}

pub fn present(wallet: &Arc<MockWallet>) -> InjectedProvider {
    InjectedProvider::Present(wallet.clone())
}

pub fn manager(provider: InjectedProvider, notifier: &Arc<RecordingNotifier>) -> ConnectionManager {
    ConnectionManager::new(provider, target_chain(), notifier.clone(), "Get a wallet first.")
}

pub fn fast_policy() -> ConfirmationPolicy {
    ConfirmationPolicy {
        timeout: Duration::from_millis(500),
        poll_interval: Duration::from_millis(1),
    }
}

pub fn orchestrator(notifier: &Arc<RecordingNotifier>) -> TransactionOrchestrator {
    TransactionOrchestrator::new(Some(CONTRACT), GAS_LIMIT, fast_policy(), target_chain(), notifier.clone())
}
