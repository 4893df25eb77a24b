//! Client context.
//!
//! Everything the front end works with lives in one `Client`: the
//! connection manager, the orchestrator, the session and the form. A reload
//! throws the whole value away and builds a new one.

use std::sync::Arc;

use crate::blockchain::{ChainParams, InjectedProvider, TxReceipt};
use crate::config::ClientConfig;
use crate::registration::{RegistrationOutcome, RegistrationRequest, TransactionOrchestrator};
use crate::session::{ConnectionManager, Session};
use crate::ui::display::{full_name, status_line, truncate_account};
use crate::ui::{Command, Notifier, HELP};

/// What the shell should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Client {
    connection: ConnectionManager,
    orchestrator: TransactionOrchestrator,
    notifier: Arc<dyn Notifier>,
    session: Session,
    request: RegistrationRequest,
    tld: String,
    currency: String,
}

impl Client {
    pub fn new(
        connection: ConnectionManager,
        orchestrator: TransactionOrchestrator,
        notifier: Arc<dyn Notifier>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            connection,
            orchestrator,
            notifier,
            session: Session::new(),
            request: RegistrationRequest::default(),
            tld: config.contract.tld.clone(),
            currency: config.network.native_currency.symbol.clone(),
        }
    }

    /// Build a fresh client around `provider` and probe the wallet.
    pub async fn bootstrap(
        provider: InjectedProvider,
        config: &ClientConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let target = ChainParams::from(&config.network);
        let install_hint = format!(
            "No wallet found. Export {} with your private key to connect one.",
            config.wallet.private_key_env
        );
        let connection = ConnectionManager::new(provider, target.clone(), notifier.clone(), install_hint);
        let orchestrator = TransactionOrchestrator::from_config(&config.contract, target, notifier.clone());

        let mut client = Self::new(connection, orchestrator, notifier, config);
        client.connection.probe_connection(&mut client.session).await;
        client
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    pub fn orchestrator(&self) -> &TransactionOrchestrator {
        &self.orchestrator
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn request(&self) -> &RegistrationRequest {
        &self.request
    }

    pub fn header(&self) -> String {
        status_line(&self.session)
    }

    fn price_line(&self) -> String {
        match self.request.computed_price() {
            Ok(tier) => format!(
                "{} costs {} {}",
                full_name(&self.request.name, &self.tld),
                tier.as_decimal(),
                self.currency
            ),
            Err(e) => e.to_string(),
        }
    }

    /// Run one shell command against this client.
    pub async fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Connect => {
                if let Some(account) = self.connection.connect(&mut self.session).await {
                    println!("Connected {}", truncate_account(&account));
                }
            }
            Command::Disconnect => {
                self.connection.disconnect(&mut self.session);
                println!("{}", self.header());
            }
            Command::Status => {
                println!("{}", self.header());
                if !self.request.name.is_empty() {
                    println!("  name:   {}", full_name(&self.request.name, &self.tld));
                    println!("  record: {}", self.request.record);
                    println!("  {}", self.price_line());
                }
            }
            Command::Name(name) => {
                self.request.name = name;
                println!("{}", self.price_line());
            }
            Command::Record(record) => {
                self.request.record = record;
            }
            Command::Price => println!("{}", self.price_line()),
            Command::Mint => {
                let outcome = self
                    .orchestrator
                    .submit_registration(&self.connection, &self.session, &mut self.request)
                    .await;
                if let Ok(RegistrationOutcome::Completed { register, .. }) = outcome {
                    println!("{}", minted_line(&register));
                }
            }
            Command::SetData => {
                self.notifier
                    .alert("Set data is not available; the record is set when minting.");
            }
            Command::SwitchNetwork => {
                if self.connection.switch_to_target_network().await.is_ok() {
                    println!("Wallet is on {}", self.connection.target().chain_name);
                }
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }
}

fn minted_line(register: &TxReceipt) -> String {
    match register.block_number {
        Some(block) => format!("Minted and recorded in block {} (tx {})", block, register.hash),
        None => format!("Minted and recorded (tx {})", register.hash),
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("session", &self.session)
            .field("request", &self.request)
            .field("orchestrator", &self.orchestrator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::TxHash;

    #[test]
    fn test_minted_line_shows_block() {
        let mut receipt = TxReceipt {
            hash: TxHash::ZERO,
            success: true,
            block_number: Some(42),
        };
        assert!(minted_line(&receipt).contains("in block 42"));

        receipt.block_number = None;
        assert!(!minted_line(&receipt).contains("block"));
    }
}
