//! Session state.
//!
//! # State Transitions
//! ```text
//! created (unconnected, unknown network)
//!     → set_account: connected
//!     → set_chain: label follows the chain id table
//!     → disconnect: unconnected, network kept
//! ```
//!
//! The session is rebuilt from scratch on every reload; nothing carries over.

use alloy::primitives::Address;

use crate::blockchain::networks::{network_label, UNKNOWN_NETWORK};

/// Account and network the client is currently working with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    active_account: Option<Address>,
    active_chain_id: Option<u64>,
    active_chain_label: String,
}

impl Session {
    pub fn new() -> Self {
        Self {
            active_account: None,
            active_chain_id: None,
            active_chain_label: UNKNOWN_NETWORK.to_string(),
        }
    }

    pub fn active_account(&self) -> Option<&Address> {
        self.active_account.as_ref()
    }

    pub fn active_chain_id(&self) -> Option<u64> {
        self.active_chain_id
    }

    pub fn active_chain_label(&self) -> &str {
        &self.active_chain_label
    }

    pub fn is_connected(&self) -> bool {
        self.active_account.is_some()
    }

    pub fn set_account(&mut self, account: Address) {
        self.active_account = Some(account);
    }

    pub fn set_chain(&mut self, chain_id: u64) {
        self.active_chain_id = Some(chain_id);
        self.active_chain_label = network_label(chain_id).to_string();
    }

    pub fn disconnect(&mut self) {
        self.active_account = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
