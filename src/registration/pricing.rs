//! Name price tiers.
//!
//! The tiers mirror the Domains contract's `price()` function. If they
//! drift, the contract rejects the registration on chain.

use alloy::primitives::U256;
use thiserror::Error;

/// Shortest name the contract accepts.
pub const MIN_NAME_LENGTH: usize = 3;

/// Why a name cannot be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Domain name must not be empty")]
    Empty,

    #[error("Domain must be at least 3 characters long")]
    TooShort { length: usize },
}

/// Fixed fee for a name, by length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTier {
    /// Exactly three characters.
    Premium,
    /// Exactly four characters.
    Standard,
    /// Five characters or more.
    Basic,
}

impl PriceTier {
    /// Price in wei.
    pub fn wei(self) -> U256 {
        const E17: u128 = 100_000_000_000_000_000;
        match self {
            PriceTier::Premium => U256::from(5 * E17),
            PriceTier::Standard => U256::from(3 * E17),
            PriceTier::Basic => U256::from(E17),
        }
    }

    /// Price in whole native units, as the user sees it.
    pub fn as_decimal(self) -> &'static str {
        match self {
            PriceTier::Premium => "0.5",
            PriceTier::Standard => "0.3",
            PriceTier::Basic => "0.1",
        }
    }
}

/// Check a name against the length rules without pricing it.
pub fn validate_name(name: &str) -> Result<usize, NameError> {
    let length = name.chars().count();
    if length == 0 {
        return Err(NameError::Empty);
    }
    if length < MIN_NAME_LENGTH {
        return Err(NameError::TooShort { length });
    }
    Ok(length)
}

/// Price tier for a name.
pub fn compute_price(name: &str) -> Result<PriceTier, NameError> {
    let tier = match validate_name(name)? {
        3 => PriceTier::Premium,
        4 => PriceTier::Standard,
        _ => PriceTier::Basic,
    };
    Ok(tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_by_length() {
        assert_eq!(compute_price("abc"), Ok(PriceTier::Premium));
        assert_eq!(compute_price("abcd"), Ok(PriceTier::Standard));
        assert_eq!(compute_price("abcde"), Ok(PriceTier::Basic));
        assert_eq!(compute_price(&"x".repeat(40)), Ok(PriceTier::Basic));
    }

    #[test]
    fn test_short_names_rejected() {
        assert_eq!(compute_price(""), Err(NameError::Empty));
        assert_eq!(compute_price("a"), Err(NameError::TooShort { length: 1 }));
        assert_eq!(compute_price("ab"), Err(NameError::TooShort { length: 2 }));
    }

    #[test]
    fn test_length_counts_characters() {
        // Two characters, six bytes.
        assert!(compute_price("日本").is_err());
        assert_eq!(compute_price("日本語"), Ok(PriceTier::Premium));
    }

    #[test]
    fn test_prices_descend() {
        assert!(PriceTier::Premium.wei() > PriceTier::Standard.wei());
        assert!(PriceTier::Standard.wei() > PriceTier::Basic.wei());
        assert_eq!(PriceTier::Premium.wei(), U256::from(500_000_000_000_000_000u128));
        assert_eq!(PriceTier::Basic.as_decimal(), "0.1");
    }
}
