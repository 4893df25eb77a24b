//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!       (account, chain_id, tx_hash, attempt_id)
//!     → logging.rs (stderr, filtered by RUST_LOG or config)
//! ```
//!
//! # Design Decisions
//! - Registration attempts run inside a span carrying a UUID attempt id
//! - Alerts for the user are separate from logs (see `ui::notifier`)

pub mod logging;

pub use logging::init_logging;
