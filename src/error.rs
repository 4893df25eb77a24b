//! Client-level error type.

use thiserror::Error;

use crate::blockchain::{ProviderError, TransactionError};
use crate::registration::NameError;

/// Errors surfaced by client operations.
///
/// None of these is fatal: every operation that returns one has already
/// logged it and the client goes back to idle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("no wallet available")]
    NoWallet,

    #[error("wallet not connected")]
    NotConnected,

    #[error("contract address not configured")]
    NoContract,

    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
