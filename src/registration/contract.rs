//! Domains contract ABI.

use alloy::primitives::Bytes;
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    /// Name-service contract: pays for a name, then attaches a record to it.
    interface IDomains {
        function register(string name) external payable;
        function setRecord(string name, string record) external;
    }
}

/// Calldata for `register(name)`.
pub fn register_calldata(name: &str) -> Bytes {
    IDomains::registerCall {
        name: name.to_string(),
    }
    .abi_encode()
    .into()
}

/// Calldata for `setRecord(name, record)`.
pub fn set_record_calldata(name: &str, record: &str) -> Bytes {
    IDomains::setRecordCall {
        name: name.to_string(),
        record: record.to_string(),
    }
    .abi_encode()
    .into()
}
