//! Chain-specific types and error definitions.

use alloy::primitives::TxHash;
use thiserror::Error;

/// Error returned by a wallet provider request.
///
/// Codes follow EIP-1193 / EIP-3085 so callers can branch on them the same
/// way a dapp branches on an injected provider's errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provider error {code}: {message}")]
pub struct ProviderError {
    pub code: i64,
    pub message: String,
}

impl ProviderError {
    /// The user rejected the request.
    pub const USER_REJECTED: i64 = 4001;
    /// The requested account or method has not been authorized.
    pub const UNAUTHORIZED: i64 = 4100;
    /// The requested chain has not been added to the wallet.
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;
    /// Catch-all for RPC and transport failures.
    pub const INTERNAL: i64 = -32603;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn user_rejected() -> Self {
        Self::new(Self::USER_REJECTED, "User rejected the request.")
    }

    pub fn unauthorized() -> Self {
        Self::new(
            Self::UNAUTHORIZED,
            "The requested account has not been authorized by the user.",
        )
    }

    pub fn unrecognized_chain(chain_id: u64) -> Self {
        Self::new(
            Self::UNRECOGNIZED_CHAIN,
            format!("Unrecognized chain ID {:#x}. Try adding the chain first.", chain_id),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL, message)
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Self::USER_REJECTED
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Self::UNRECOGNIZED_CHAIN
    }
}

/// Result type for provider requests.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Outcome of a mined transaction, as far as the client cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxReceipt {
    pub hash: TxHash,
    /// `true` when the transaction executed without reverting.
    pub success: bool,
    pub block_number: Option<u64>,
}

/// Errors raised while sending or confirming a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// The wallet or the chain rejected the request.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// No receipt showed up within the confirmation window.
    #[error("Transaction not confirmed after {0} seconds")]
    ConfirmationTimeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert!(ProviderError::user_rejected().is_user_rejection());
        assert!(ProviderError::unrecognized_chain(137).is_unrecognized_chain());
        assert!(!ProviderError::internal("boom").is_unrecognized_chain());
    }

    #[test]
    fn test_error_display() {
        let err = ProviderError::unrecognized_chain(80001);
        assert!(err.to_string().starts_with("provider error 4902"));
        assert!(err.to_string().contains("0x13881"));
    }
}
