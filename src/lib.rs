//! Fresh Name Service client library

pub mod blockchain;
pub mod client;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod registration;
pub mod session;
pub mod ui;

pub use client::{Client, Flow};
pub use config::schema::ClientConfig;
pub use error::{ClientError, ClientResult};
