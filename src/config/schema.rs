//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the name-service client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Wallet provider settings.
    pub wallet: WalletConfig,

    /// Target network the client asks the wallet to switch to.
    pub network: NetworkConfig,

    /// Name-service contract settings.
    pub contract: ContractConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// How the wallet asks for consent on account access and transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalMode {
    /// Every request is approved without asking.
    Auto,
    /// Ask on the terminal before exposing accounts or sending.
    Prompt,
}

/// Wallet provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Environment variable holding the hex private key.
    pub private_key_env: String,

    /// Chain the wallet is on when the client starts.
    pub initial_chain_id: u64,

    /// JSON-RPC endpoint for the initial chain.
    pub initial_rpc_url: String,

    /// Treat the key's account as already authorized for this client.
    pub pre_authorized: bool,

    /// Consent mode for account access and transactions.
    pub approval: ApprovalMode,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            private_key_env: "FNS_WALLET_PRIVATE_KEY".to_string(),
            initial_chain_id: 1,
            initial_rpc_url: "https://eth.llamarpc.com".to_string(),
            pre_authorized: false,
            approval: ApprovalMode::Prompt,
            rpc_timeout_secs: 10,
        }
    }
}

/// Native currency metadata of the target chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NativeCurrencyConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Target network parameters, used for switch and add-chain requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Chain ID (e.g., 80001 for Polygon Mumbai).
    pub chain_id: u64,

    /// Human readable chain name registered with the wallet.
    pub chain_name: String,

    /// JSON-RPC endpoints.
    pub rpc_urls: Vec<String>,

    /// Native currency metadata.
    pub native_currency: NativeCurrencyConfig,

    /// Block explorer base URLs.
    pub block_explorer_urls: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: 80001,
            chain_name: "Polygon Mumbai Testnet".to_string(),
            rpc_urls: vec!["https://rpc-mumbai.maticvigil.com/".to_string()],
            native_currency: NativeCurrencyConfig {
                name: "Mumbai Matic".to_string(),
                symbol: "MATIC".to_string(),
                decimals: 18,
            },
            block_explorer_urls: vec!["https://mumbai.polygonscan.com/".to_string()],
        }
    }
}

/// Name-service contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Address of the Domains contract. Empty until deployed/configured.
    pub address: String,

    /// Top-level domain shown next to names.
    pub tld: String,

    /// Fixed gas ceiling attached to every transaction.
    pub gas_limit: u64,

    /// Maximum time to wait for a receipt in seconds.
    pub confirmation_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            tld: "fresh".to_string(),
            gas_limit: 1_000_000,
            confirmation_timeout_secs: 180,
            poll_interval_ms: 2000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
