//! User-visible alerts.

/// Sink for messages the user must see.
///
/// Logging records what happened; an alert is the one line the user is
/// told about it.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Prints alerts to stderr, leaving stdout for command output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }
}
