//! Configuration file watcher for hot reload.
//!
//! Watches the file's directory rather than the file: editors usually save
//! by writing a new file and renaming it over the old one, which drops a
//! watch placed on the file itself.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::ClientConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ClientConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ClientConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching in a background thread.
    ///
    /// The returned handle must be kept alive for as long as updates are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();
        // Content currently in effect; saves that change nothing are skipped.
        let applied = Mutex::new(std::fs::read_to_string(&path).ok());

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches(&event, &path) => {
                    let Ok(content) = std::fs::read_to_string(&path) else {
                        // Mid-rename; the follow-up create event carries the new file.
                        return;
                    };
                    let Ok(mut applied) = applied.lock() else {
                        return;
                    };
                    if applied.as_deref() == Some(content.as_str()) {
                        return;
                    }

                    match parse_config(&content) {
                        Ok(new_config) => {
                            tracing::info!(path = ?path, "Config file changed, reloading");
                            *applied = Some(content);
                            let _ = tx.send(new_config);
                        }
                        Err(e) => {
                            tracing::error!(
                                "Failed to reload config: {}. Keeping current configuration.",
                                e
                            );
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        let dir = watch_dir(&self.path);
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Config watcher started");
        Ok(watcher)
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Whether a filesystem event may have changed the watched file.
fn touches(event: &Event, path: &Path) -> bool {
    let relevant_kind = event.kind.is_modify() || event.kind.is_create();
    relevant_kind
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == path.file_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, EventKind, ModifyKind, RemoveKind};

    #[test]
    fn test_touches_only_our_file() {
        let path = Path::new("/etc/fns/client.toml");

        let ours = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(PathBuf::from("/etc/fns/client.toml"));
        assert!(touches(&ours, path));

        let created = Event::new(EventKind::Create(CreateKind::File)).add_path(PathBuf::from("/etc/fns/client.toml"));
        assert!(touches(&created, path));

        let other = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(PathBuf::from("/etc/fns/other.toml"));
        assert!(!touches(&other, path));

        let removed = Event::new(EventKind::Remove(RemoveKind::File)).add_path(PathBuf::from("/etc/fns/client.toml"));
        assert!(!touches(&removed, path));
    }

    #[test]
    fn test_watch_dir() {
        assert_eq!(watch_dir(Path::new("/etc/fns/client.toml")), PathBuf::from("/etc/fns"));
        assert_eq!(watch_dir(Path::new("client.toml")), PathBuf::from("."));
    }
}
