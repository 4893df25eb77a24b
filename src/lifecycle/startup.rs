//! Startup orchestration.
//!
//! # Responsibilities
//! - Pick the approver for the wallet (prompt or auto)
//! - Detect the wallet from the environment
//! - Build and probe the first client
//!
//! # Design Decisions
//! - A missing wallet does not stop startup; the client runs unconnected
//! - Configuration errors do stop startup (they are reported by `main`)

use std::sync::Arc;

use crate::blockchain::{Approver, AutoApprove, InjectedProvider, LocalKeyWallet};
use crate::client::Client;
use crate::config::{ApprovalMode, ClientConfig};
use crate::ui::{ConsoleApprover, LineSource, Notifier};

/// Approver matching the configured mode; `force_auto` wins (`--yes`).
///
/// Prompts read their answers from `input`.
pub fn approver_for(mode: ApprovalMode, force_auto: bool, input: &LineSource) -> Arc<dyn Approver> {
    if force_auto || mode == ApprovalMode::Auto {
        Arc::new(AutoApprove)
    } else {
        Arc::new(ConsoleApprover::new(input.clone()))
    }
}

/// Detect the wallet described by `config`.
pub fn detect_wallet(config: &ClientConfig, approver: Arc<dyn Approver>) -> InjectedProvider {
    LocalKeyWallet::detect(&config.wallet, approver)
}

/// Detect the wallet and build a probed client in one step.
pub async fn start(
    config: &ClientConfig,
    approver: Arc<dyn Approver>,
    notifier: Arc<dyn Notifier>,
) -> (InjectedProvider, Client) {
    let provider = detect_wallet(config, approver);
    let client = Client::bootstrap(provider.clone(), config, notifier).await;
    tracing::info!(status = %client.header(), "Client ready");
    (provider, client)
}
