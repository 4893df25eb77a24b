//! Shutdown coordination for the shell.

use tokio::sync::broadcast;

/// Coordinator for shutdown.
///
/// Anything that must stop on Ctrl-C subscribes; `trigger` stops them all.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Trigger on the first Ctrl-C.
    ///
    /// Installing the handler replaces the default SIGINT kill, so every
    /// subscriber must actually return once triggered.
    pub fn trigger_on_ctrl_c(&self) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Ctrl-C received, shutting down");
                    let _ = tx.send(());
                }
                Err(e) => tracing::error!(error = %e, "Could not listen for Ctrl-C"),
            }
        });
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once shutdown was triggered (or its coordinator is gone).
pub async fn wait_for_shutdown(rx: &mut broadcast::Receiver<()>) {
    let _ = rx.recv().await;
}
