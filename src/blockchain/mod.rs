//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variable (private key)
//!     → wallet.rs (LocalKeyWallet: accounts, chains, signing)
//!     → provider.rs (WalletProvider capability, InjectedProvider detection)
//!     → transaction.rs (build, hand to wallet, poll for receipt)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - A missing wallet is a normal state, never a startup failure

pub mod networks;
pub mod provider;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use networks::{network_label, ChainParams, NativeCurrency, NetworkFamily};
pub use provider::{ApprovalRequest, Approver, AutoApprove, InjectedProvider, WalletProvider};
pub use transaction::{ConfirmationPolicy, PendingTransaction, Signer};
pub use types::{ProviderError, ProviderResult, TransactionError, TxReceipt};
pub use wallet::{LocalKeyWallet, WalletError};
