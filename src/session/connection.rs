//! Chain connection manager.
//!
//! # Responsibilities
//! - Detect the wallet and read already-authorized accounts on startup
//! - Ask the user for account access on demand
//! - Read the active chain and map it to a label
//! - Move the wallet to the target chain, adding it when unknown
//!
//! # Design Decisions
//! - A missing wallet is a state, not an error: probing logs, connecting alerts
//! - Chain changes are not handled here; the runtime reloads the whole client

use std::sync::Arc;

use alloy::primitives::Address;
use tokio::sync::broadcast;

use crate::blockchain::{ChainParams, InjectedProvider, Signer};
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::ui::Notifier;

/// Owns the wallet handle and performs every connection-related transition
/// on a caller-provided `Session`.
pub struct ConnectionManager {
    provider: InjectedProvider,
    target: ChainParams,
    notifier: Arc<dyn Notifier>,
    install_hint: String,
}

impl ConnectionManager {
    pub fn new(
        provider: InjectedProvider,
        target: ChainParams,
        notifier: Arc<dyn Notifier>,
        install_hint: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            target,
            notifier,
            install_hint: install_hint.into(),
        }
    }

    pub fn provider(&self) -> &InjectedProvider {
        &self.provider
    }

    pub fn target(&self) -> &ChainParams {
        &self.target
    }

    /// Startup probe. Never prompts the user and never alerts.
    pub async fn probe_connection(&self, session: &mut Session) {
        let Some(provider) = self.provider.get() else {
            tracing::warn!("Make sure you have a wallet! No wallet provider detected");
            return;
        };
        tracing::debug!("Wallet provider detected");

        match provider.accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(&account) => {
                    tracing::info!(account = %account, "Found an authorized account");
                    session.set_account(account);
                }
                None => tracing::info!("No authorized account found"),
            },
            Err(e) => tracing::warn!(error = %e, "Could not read authorized accounts"),
        }

        self.refresh_chain(session).await;
    }

    /// Re-read the active chain from the wallet.
    pub async fn refresh_chain(&self, session: &mut Session) {
        let Some(provider) = self.provider.get() else {
            return;
        };

        match provider.chain_id().await {
            Ok(chain_id) => {
                session.set_chain(chain_id);
                tracing::info!(
                    chain_id = chain_id,
                    network = %session.active_chain_label(),
                    "Active network"
                );
            }
            Err(e) => tracing::warn!(error = %e, "Could not read active chain"),
        }
    }

    /// Ask the wallet for account access.
    ///
    /// Returns the connected account, or `None` after telling the user why not.
    pub async fn connect(&self, session: &mut Session) -> Option<Address> {
        let Some(provider) = self.provider.get() else {
            self.notifier.alert(&self.install_hint);
            return None;
        };

        match provider.request_accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(&account) => {
                    tracing::info!(account = %account, "Connected");
                    session.set_account(account);
                    Some(account)
                }
                None => {
                    tracing::warn!("Wallet returned no accounts");
                    self.notifier.alert("The wallet did not expose any account.");
                    None
                }
            },
            Err(e) if e.is_user_rejection() => {
                tracing::info!("User rejected the connection request");
                self.notifier.alert("Connection request rejected in the wallet.");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "Connecting to the wallet failed");
                self.notifier
                    .alert(&format!("Could not connect the wallet: {}", e.message));
                None
            }
        }
    }

    /// Forget the active account locally. The wallet keeps its authorization.
    pub fn disconnect(&self, session: &mut Session) {
        if let Some(account) = session.active_account() {
            tracing::info!(account = %account, "Disconnected");
        }
        session.disconnect();
    }

    /// Ask the wallet to switch to the target chain, adding it if unknown.
    pub async fn switch_to_target_network(&self) -> ClientResult<()> {
        let Some(provider) = self.provider.get() else {
            self.notifier.alert(&self.install_hint);
            return Err(ClientError::NoWallet);
        };
        let target = &self.target;

        match provider.switch_chain(target.chain_id).await {
            Ok(()) => {
                tracing::info!(chain_id = target.chain_id, "Switched to target network");
                Ok(())
            }
            Err(e) if e.is_unrecognized_chain() => {
                tracing::info!(
                    chain_id = target.chain_id,
                    chain_name = %target.chain_name,
                    "Target network unknown to wallet, adding it"
                );
                match provider.add_chain(target).await {
                    Ok(()) => {
                        tracing::info!(chain_id = target.chain_id, "Target network added");
                        Ok(())
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Adding target network failed");
                        self.notifier
                            .alert(&format!("Could not add {}: {}", target.chain_name, e.message));
                        Err(e.into())
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Switching network failed");
                self.notifier
                    .alert(&format!("Could not switch to {}: {}", target.chain_name, e.message));
                Err(e.into())
            }
        }
    }

    /// Signer for the session's active account.
    pub fn signer(&self, session: &Session) -> ClientResult<Signer> {
        let provider = self.provider.get().ok_or(ClientError::NoWallet)?;
        let account = session.active_account().ok_or(ClientError::NotConnected)?;
        Ok(Signer::new(provider.clone(), *account))
    }

    /// Chain-change notifications, if there is a wallet to send them.
    pub fn chain_changes(&self) -> Option<broadcast::Receiver<u64>> {
        self.provider.get().map(|p| p.subscribe_chain_changed())
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("provider", &self.provider)
            .field("target_chain_id", &self.target.chain_id)
            .finish()
    }
}
