//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and endpoint URLs parse
//! - Validate value ranges (timeouts > 0, gas ceiling > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::ClientConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("contract.address '{0}' is not a valid address")]
    InvalidContractAddress(String),

    #[error("{field} '{value}' is not a valid URL")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("network.rpc_urls must contain at least one endpoint")]
    NoRpcUrls,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let address = config.contract.address.trim();
    if !address.is_empty() && address.parse::<Address>().is_err() {
        errors.push(ValidationError::InvalidContractAddress(address.to_string()));
    }

    check_url(&mut errors, "wallet.initial_rpc_url", &config.wallet.initial_rpc_url);
    if config.network.rpc_urls.is_empty() {
        errors.push(ValidationError::NoRpcUrls);
    }
    for url in &config.network.rpc_urls {
        check_url(&mut errors, "network.rpc_urls", url);
    }
    for url in &config.network.block_explorer_urls {
        check_url(&mut errors, "network.block_explorer_urls", url);
    }

    if config.network.chain_id == 0 {
        errors.push(ValidationError::Zero("network.chain_id"));
    }
    if config.contract.gas_limit == 0 {
        errors.push(ValidationError::Zero("contract.gas_limit"));
    }
    if config.contract.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::Zero("contract.confirmation_timeout_secs"));
    }
    if config.contract.poll_interval_ms == 0 {
        errors.push(ValidationError::Zero("contract.poll_interval_ms"));
    }
    if config.wallet.rpc_timeout_secs == 0 {
        errors.push(ValidationError::Zero("wallet.rpc_timeout_secs"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if url::Url::parse(value).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}
