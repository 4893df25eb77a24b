//! Terminal input shared by the shell and the approval prompt.
//!
//! # Design Decisions
//! - Lines are read on a plain OS thread, outside the runtime, so a read
//!   that never completes cannot hold up shutdown
//! - There is exactly one reader; whoever is waiting for a line (the shell
//!   or a pending approval) gets the next one

use std::io::BufRead;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

/// A shared, ordered stream of input lines.
#[derive(Debug, Clone)]
pub struct LineSource {
    lines: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl LineSource {
    pub fn new(lines: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            lines: Arc::new(Mutex::new(lines)),
        }
    }

    /// A source fed by hand, plus the sender feeding it.
    pub fn channel() -> (mpsc::UnboundedSender<String>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx))
    }

    /// Lines from standard input.
    pub fn stdin() -> Self {
        let (tx, source) = Self::channel();

        let spawned = std::thread::Builder::new()
            .name("fns-stdin".to_string())
            .spawn(move || {
                for line in std::io::stdin().lock().lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to read from stdin");
                            break;
                        }
                    }
                }
            });

        // The sender went down with the closure, so the source reads as closed.
        if let Err(e) = spawned {
            tracing::error!(error = %e, "Could not start the input thread");
        }
        source
    }

    /// Next line, or `None` once input is closed.
    pub async fn next_line(&self) -> Option<String> {
        self.lines.lock().await.recv().await
    }
}
