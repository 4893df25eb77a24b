//! Session subsystem: who is connected, on which network.
//!
//! # Data Flow
//! ```text
//! startup → ConnectionManager::probe_connection → Session (account?, network)
//! user    → connect / disconnect / switch-network → Session
//! wallet  → chainChanged → runtime drops the Session and probes again
//! ```

pub mod connection;
pub mod state;

pub use connection::ConnectionManager;
pub use state::Session;
