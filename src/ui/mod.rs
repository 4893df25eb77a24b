//! Terminal front end.
//!
//! # Responsibilities
//! - Alerts the user must see (notifier.rs)
//! - Consent prompts on behalf of the wallet (approver.rs)
//! - The single terminal line reader (input.rs)
//! - Shell command grammar (command.rs)
//! - Account / network formatting (display.rs)

pub mod approver;
pub mod command;
pub mod display;
pub mod input;
pub mod notifier;

pub use approver::ConsoleApprover;
pub use command::{Command, ParseError, HELP};
pub use input::LineSource;
pub use notifier::{ConsoleNotifier, Notifier};
