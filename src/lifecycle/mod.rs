//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Pick approver → Detect wallet → Bootstrap client (probe)
//!
//! Runtime (runtime.rs):
//!     Input lines → Shell → Client
//!     chainChanged / config change → Drop client → Bootstrap again
//!     Ctrl-C (shutdown.rs) / EOF / quit → Exit
//! ```
//!
//! # Design Decisions
//! - The wallet outlives client reloads, as a browser extension outlives a page
//! - Reload is the only reaction to a chain change

pub mod runtime;
pub mod shutdown;
pub mod startup;

pub use runtime::{run_shell, run_until_chain_change, ReloadReason, Shell};
pub use shutdown::Shutdown;
pub use startup::{approver_for, detect_wallet, start};
