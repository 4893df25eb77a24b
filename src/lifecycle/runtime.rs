//! Interactive runtime and reload handling.
//!
//! # Data Flow
//! ```text
//! input line ──────────┐
//! chainChanged ────────┼──▶ select! ──▶ command → Client::execute
//! config file change ──┤              └─ chain / config change → drop Client, bootstrap again
//! shutdown (Ctrl-C) ───┘              └─ shutdown / EOF / quit → exit
//! ```
//!
//! # Design Decisions
//! - Any chain change reloads everything; nothing is resynchronized in place
//! - A command still running when the chain changes is dropped, not
//!   cancelled: a transaction already broadcast may still be mined
//! - A config change also rebuilds the wallet; a chain change does not

use std::fmt;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use crate::blockchain::{Approver, InjectedProvider};
use crate::client::{Client, Flow};
use crate::config::{ClientConfig, ConfigWatcher};
use crate::lifecycle::shutdown::wait_for_shutdown;
use crate::lifecycle::startup::detect_wallet;
use crate::ui::{Command, LineSource, Notifier};

/// Why the client state was thrown away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadReason {
    ChainChanged(u64),
    ConfigChanged,
}

impl fmt::Display for ReloadReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReloadReason::ChainChanged(chain_id) => write!(f, "network changed to {:#x}", chain_id),
            ReloadReason::ConfigChanged => f.write_str("configuration changed"),
        }
    }
}

/// Wait for the next chain-change notification.
///
/// Never resolves when there is no wallet or the wallet went away.
pub async fn next_chain_change(rx: &mut Option<broadcast::Receiver<u64>>) -> u64 {
    let Some(receiver) = rx.as_mut() else {
        return std::future::pending().await;
    };
    loop {
        match receiver.recv().await {
            Ok(chain_id) => return chain_id,
            // Missed some notifications; the chain certainly changed.
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => {
                *rx = None;
                return std::future::pending().await;
            }
        }
    }
}

async fn next_config(rx: &mut Option<mpsc::UnboundedReceiver<ClientConfig>>) -> ClientConfig {
    let Some(receiver) = rx.as_mut() else {
        return std::future::pending().await;
    };
    match receiver.recv().await {
        Some(config) => config,
        None => {
            *rx = None;
            std::future::pending().await
        }
    }
}

/// Drive `work` to completion unless the chain changes first.
///
/// On a chain change the future is dropped and the new chain id returned.
pub async fn run_until_chain_change<F: Future>(
    work: F,
    chain_rx: &mut Option<broadcast::Receiver<u64>>,
) -> Result<F::Output, u64> {
    tokio::select! {
        output = work => Ok(output),
        chain_id = next_chain_change(chain_rx) => Err(chain_id),
    }
}

fn prompt() {
    print!("fns> ");
    let _ = std::io::stdout().flush();
}

/// What ended one client's lifetime.
enum Event {
    Exit,
    ChainChanged(u64),
    ConfigChanged(ClientConfig),
}

/// The interactive shell: one `Client` at a time, rebuilt on every reload.
pub struct Shell {
    config: ClientConfig,
    provider: InjectedProvider,
    approver: Arc<dyn Approver>,
    notifier: Arc<dyn Notifier>,
    input: LineSource,
    config_rx: Option<mpsc::UnboundedReceiver<ClientConfig>>,
    shutdown: broadcast::Receiver<()>,
    client: Client,
    // Subscribed together with the client so no notification slips between
    // bootstrap and the next step.
    chain_rx: Option<broadcast::Receiver<u64>>,
}

impl Shell {
    /// Bootstrap the first client around `provider`.
    pub async fn start(
        config: ClientConfig,
        provider: InjectedProvider,
        approver: Arc<dyn Approver>,
        notifier: Arc<dyn Notifier>,
        input: LineSource,
        shutdown: broadcast::Receiver<()>,
    ) -> Self {
        let client = Client::bootstrap(provider.clone(), &config, notifier.clone()).await;
        let chain_rx = client.connection().chain_changes();
        println!("{}", client.header());

        Self {
            config,
            provider,
            approver,
            notifier,
            input,
            config_rx: None,
            shutdown,
            client,
            chain_rx,
        }
    }

    /// Reload on configs delivered through `rx`.
    pub fn with_config_updates(mut self, rx: mpsc::UnboundedReceiver<ClientConfig>) -> Self {
        self.config_rx = Some(rx);
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut Client {
        &mut self.client
    }

    /// Run commands until the client has to be rebuilt, then rebuild it.
    ///
    /// Returns why it was rebuilt, or `None` when the shell should exit.
    pub async fn step(&mut self) -> Option<ReloadReason> {
        let reason = match self.drive().await {
            Event::Exit => return None,
            Event::ChainChanged(chain_id) => ReloadReason::ChainChanged(chain_id),
            Event::ConfigChanged(config) => {
                self.config = config;
                self.provider = detect_wallet(&self.config, self.approver.clone());
                ReloadReason::ConfigChanged
            }
        };

        println!();
        tracing::info!(reason = %reason, "Reloading client");
        self.client = Client::bootstrap(self.provider.clone(), &self.config, self.notifier.clone()).await;
        self.chain_rx = self.client.connection().chain_changes();
        println!("{}", self.client.header());
        Some(reason)
    }

    /// Run until input closes, the user quits or shutdown is triggered.
    pub async fn run(mut self) {
        while self.step().await.is_some() {}
        tracing::info!("Shell closed");
    }

    async fn drive(&mut self) -> Event {
        loop {
            prompt();
            tokio::select! {
                line = self.input.next_line() => {
                    let Some(line) = line else {
                        return Event::Exit;
                    };
                    let command = match Command::parse(&line) {
                        Ok(Some(command)) => command,
                        Ok(None) => continue,
                        Err(e) => {
                            println!("{}", e);
                            continue;
                        }
                    };

                    let result = tokio::select! {
                        result = run_until_chain_change(self.client.execute(command), &mut self.chain_rx) => result,
                        _ = wait_for_shutdown(&mut self.shutdown) => return Event::Exit,
                    };
                    match result {
                        Ok(Flow::Continue) => {}
                        Ok(Flow::Quit) => return Event::Exit,
                        Err(chain_id) => {
                            tracing::warn!(
                                chain_id = chain_id,
                                "Network changed while a request was outstanding; its result will not be tracked"
                            );
                            return Event::ChainChanged(chain_id);
                        }
                    }
                }
                chain_id = next_chain_change(&mut self.chain_rx) => return Event::ChainChanged(chain_id),
                config = next_config(&mut self.config_rx) => return Event::ConfigChanged(config),
                _ = wait_for_shutdown(&mut self.shutdown) => return Event::Exit,
            }
        }
    }
}

/// Run the interactive shell until the user quits, input closes or shutdown.
pub async fn run_shell(
    config: ClientConfig,
    config_path: Option<PathBuf>,
    input: LineSource,
    approver: Arc<dyn Approver>,
    notifier: Arc<dyn Notifier>,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), Box<dyn std::error::Error>> {
    let watched = match &config_path {
        Some(path) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            Some((watcher.run()?, rx))
        }
        None => None,
    };

    let provider = detect_wallet(&config, approver.clone());
    let shell = Shell::start(config, provider, approver, notifier, input, shutdown).await;

    // The watcher handle stays alive until the shell returns.
    let (_watcher, shell) = match watched {
        Some((watcher, rx)) => (Some(watcher), shell.with_config_updates(rx)),
        None => (None, shell),
    };

    shell.run().await;
    Ok(())
}
