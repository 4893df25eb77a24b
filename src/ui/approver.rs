//! Terminal consent prompts for the local wallet.

use std::io::{self, Write};

use async_trait::async_trait;

use crate::blockchain::{ApprovalRequest, Approver};
use crate::ui::input::LineSource;

/// Asks `[y/N]` on the terminal; anything but yes is a rejection.
///
/// Answers come from the same `LineSource` as shell commands, so the line
/// after a command that needs consent is the answer.
#[derive(Debug, Clone)]
pub struct ConsoleApprover {
    input: LineSource,
}

impl ConsoleApprover {
    pub fn new(input: LineSource) -> Self {
        Self { input }
    }
}

#[async_trait]
impl Approver for ConsoleApprover {
    async fn approve(&self, request: &ApprovalRequest) -> bool {
        let mut stderr = io::stderr();
        if write!(stderr, "wallet> {} [y/N] ", request).and_then(|_| stderr.flush()).is_err() {
            return false;
        }

        match self.input.next_line().await {
            Some(answer) => is_yes(&answer),
            None => {
                tracing::warn!("Input closed before the approval was answered");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    #[test]
    fn test_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }

    #[tokio::test]
    async fn test_answer_read_from_line_source() {
        let (tx, input) = LineSource::channel();
        let approver = ConsoleApprover::new(input);
        let request = ApprovalRequest::ConnectAccount { account: Address::ZERO };

        tx.send("y".to_string()).unwrap();
        tx.send("n".to_string()).unwrap();
        assert!(approver.approve(&request).await);
        assert!(!approver.approve(&request).await);

        drop(tx);
        assert!(!approver.approve(&request).await);
    }
}
