//! Registration subsystem.
//!
//! # Data Flow
//! ```text
//! user input → RegistrationRequest (name, record)
//!     → pricing.rs (length tier, rejects < 3 chars)
//!     → orchestrator.rs (register → confirm → setRecord → confirm → clear)
//!     → contract.rs (ABI calldata for both calls)
//! ```

pub mod contract;
pub mod orchestrator;
pub mod pricing;
pub mod request;

pub use orchestrator::{AttemptState, RegistrationOutcome, TransactionOrchestrator};
pub use pricing::{compute_price, validate_name, NameError, PriceTier, MIN_NAME_LENGTH};
pub use request::RegistrationRequest;
