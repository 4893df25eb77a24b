//! Registration flow: pay for a name, then attach its record.
//!
//! # State Transitions
//! ```text
//! Idle → SubmittingRegister → RegisterConfirmed → SubmittingRecord → RecordConfirmed → Idle
//!                           ↘ RegisterFailed → Idle
//! ```
//!
//! # Design Decisions
//! - Validation happens before any chain call; short names never reach the wallet
//! - `setRecord` is only sent after `register` mined successfully
//! - No retries and no idempotency key; resubmitting sends a new transaction
//! - Dropping an attempt mid-flight (reload) resets the state to Idle but
//!   does not cancel what was already broadcast

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

use crate::blockchain::{ChainParams, ConfirmationPolicy, Signer, TxReceipt};
use crate::config::ContractConfig;
use crate::error::{ClientError, ClientResult};
use crate::registration::contract::{register_calldata, set_record_calldata};
use crate::registration::pricing::PriceTier;
use crate::registration::request::RegistrationRequest;
use crate::session::{ConnectionManager, Session};
use crate::ui::Notifier;

/// Where a registration attempt currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Idle,
    SubmittingRegister,
    RegisterConfirmed,
    SubmittingRecord,
    RecordConfirmed,
    RegisterFailed,
}

/// How an attempt that reached the chain ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Both transactions succeeded and the request was cleared.
    Completed { register: TxReceipt, record: TxReceipt },
    /// `register` reverted; nothing else was sent.
    RegisterFailed { register: TxReceipt },
    /// `register` succeeded but `setRecord` reverted.
    RecordFailed { register: TxReceipt, record: TxReceipt },
}

/// Submits the register / setRecord pair against the Domains contract.
pub struct TransactionOrchestrator {
    contract: Option<Address>,
    gas_limit: u64,
    policy: ConfirmationPolicy,
    chain: ChainParams,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<AttemptState>,
}

impl TransactionOrchestrator {
    /// Create an orchestrator.
    ///
    /// `chain` is only used to build explorer links.
    pub fn new(
        contract: Option<Address>,
        gas_limit: u64,
        policy: ConfirmationPolicy,
        chain: ChainParams,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (state, _) = watch::channel(AttemptState::Idle);
        Self {
            contract,
            gas_limit,
            policy,
            chain,
            notifier,
            state,
        }
    }

    /// Build from the `[contract]` config section. An empty address means
    /// the client can show prices but not register.
    pub fn from_config(config: &ContractConfig, chain: ChainParams, notifier: Arc<dyn Notifier>) -> Self {
        let contract = config.address.trim().parse::<Address>().ok();
        Self::new(contract, config.gas_limit, ConfirmationPolicy::from(config), chain, notifier)
    }

    pub fn contract(&self) -> Option<Address> {
        self.contract
    }

    pub fn state(&self) -> AttemptState {
        *self.state.borrow()
    }

    /// Watch attempt progress, e.g. to disable a mint control while busy.
    pub fn subscribe(&self) -> watch::Receiver<AttemptState> {
        self.state.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.state() != AttemptState::Idle
    }

    fn set_state(&self, state: AttemptState) {
        tracing::debug!(state = ?state, "Registration state");
        self.state.send_replace(state);
    }

    /// Register `request.name` and attach `request.record` to it.
    ///
    /// Alerts the user on every failure path. The request is cleared only
    /// when both transactions succeed.
    pub async fn submit_registration(
        &self,
        connection: &ConnectionManager,
        session: &Session,
        request: &mut RegistrationRequest,
    ) -> ClientResult<RegistrationOutcome> {
        let tier = match request.computed_price() {
            Ok(tier) => tier,
            Err(e) => {
                tracing::warn!(name = %request.name, error = %e, "Name rejected");
                self.notifier.alert(&e.to_string());
                return Err(e.into());
            }
        };

        let Some(contract) = self.contract else {
            tracing::error!("No contract address configured");
            self.notifier
                .alert("No contract address configured; set [contract].address.");
            return Err(ClientError::NoContract);
        };

        let signer = match connection.signer(session) {
            Ok(signer) => signer,
            Err(e) => {
                tracing::warn!(error = %e, "Registration needs a connected wallet");
                self.notifier.alert("Connect your wallet first.");
                return Err(e);
            }
        };

        let span = tracing::info_span!(
            "registration",
            attempt_id = %Uuid::new_v4(),
            name = %request.name
        );

        let result = self
            .run_attempt(&signer, contract, tier, request)
            .instrument(span)
            .await;

        if let Err(e) = &result {
            tracing::error!(error = %e, "Registration attempt failed");
            self.notifier.alert(&failure_message(e));
        }
        result
    }

    async fn run_attempt(
        &self,
        signer: &Signer,
        contract: Address,
        tier: PriceTier,
        request: &mut RegistrationRequest,
    ) -> ClientResult<RegistrationOutcome> {
        let _idle = IdleOnExit(&self.state);
        let name = request.name.clone();
        let record = request.record.clone();

        tracing::info!(price = tier.as_decimal(), "Asking the wallet to sign the registration");
        self.set_state(AttemptState::SubmittingRegister);
        let register = self
            .send_and_confirm(signer, contract, tier.wei(), register_calldata(&name))
            .await?;

        if !register.success {
            self.set_state(AttemptState::RegisterFailed);
            tracing::warn!(tx_hash = %register.hash, "Registration transaction failed");
            self.notifier.alert("Transaction failed! Please try again.");
            return Ok(RegistrationOutcome::RegisterFailed { register });
        }

        self.set_state(AttemptState::RegisterConfirmed);
        tracing::info!(
            tx_hash = %register.hash,
            block_number = ?register.block_number,
            link = %self.link(&register),
            "Domain minted!"
        );

        self.set_state(AttemptState::SubmittingRecord);
        let record_receipt = self
            .send_and_confirm(signer, contract, U256::ZERO, set_record_calldata(&name, &record))
            .await?;

        if !record_receipt.success {
            tracing::warn!(tx_hash = %record_receipt.hash, "Record transaction failed");
            self.notifier
                .alert("Domain minted, but setting the record failed. Please try again.");
            return Ok(RegistrationOutcome::RecordFailed {
                register,
                record: record_receipt,
            });
        }

        self.set_state(AttemptState::RecordConfirmed);
        tracing::info!(
            tx_hash = %record_receipt.hash,
            link = %self.link(&record_receipt),
            "Record set!"
        );
        request.clear();

        Ok(RegistrationOutcome::Completed {
            register,
            record: record_receipt,
        })
    }

    async fn send_and_confirm(
        &self,
        signer: &Signer,
        contract: Address,
        value: U256,
        data: alloy::primitives::Bytes,
    ) -> ClientResult<TxReceipt> {
        let pending = signer.send(contract, value, data, self.gas_limit).await?;
        let receipt = pending.confirm(self.policy).await?;
        Ok(receipt)
    }

    fn link(&self, receipt: &TxReceipt) -> String {
        let hash = receipt.hash.to_string();
        self.chain.explorer_tx_url(&hash).unwrap_or(hash)
    }
}

impl std::fmt::Debug for TransactionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionOrchestrator")
            .field("contract", &self.contract)
            .field("gas_limit", &self.gas_limit)
            .field("state", &self.state())
            .finish()
    }
}

/// Puts the state machine back to Idle however the attempt ends,
/// including when its future is dropped.
struct IdleOnExit<'a>(&'a watch::Sender<AttemptState>);

impl Drop for IdleOnExit<'_> {
    fn drop(&mut self) {
        self.0.send_replace(AttemptState::Idle);
    }
}

fn failure_message(error: &ClientError) -> String {
    match error {
        ClientError::Provider(e) if e.is_user_rejection() => {
            "Transaction rejected in the wallet.".to_string()
        }
        ClientError::Provider(e) => format!("Transaction could not be sent: {}", e.message),
        ClientError::Transaction(e) => format!("Transaction status unknown: {}", e),
        other => other.to_string(),
    }
}
