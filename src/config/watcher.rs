//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, PollWatcher, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::{AppConfig, ServerConfig};

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<AppConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<AppConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned handle must be kept alive for as long as updates are wanted.
    pub fn run(self, server: &ServerConfig) -> Result<Box<dyn Watcher + Send>, notify::Error> {
        let handler = reload_handler(self.path.clone(), self.update_tx.clone());
        let interval = Duration::from_millis(server.poll_interval_ms.max(1));

        let mut watcher: Box<dyn Watcher + Send> = if server.use_polling {
            Box::new(PollWatcher::new(
                handler,
                Config::default().with_poll_interval(interval),
            )?)
        } else {
            Box::new(RecommendedWatcher::new(handler, Config::default())?)
        };

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(
            path = ?self.path,
            polling = server.use_polling,
            "Config watcher started"
        );
        Ok(watcher)
    }
}

fn reload_handler(
    path: PathBuf,
    tx: mpsc::UnboundedSender<AppConfig>,
) -> impl FnMut(notify::Result<Event>) + Send + 'static {
    move |res: notify::Result<Event>| match res {
        Ok(event) => {
            if event.kind.is_modify() || event.kind.is_create() {
                tracing::info!("Config file change detected, reloading...");
                match load_config(&path) {
                    Ok(new_config) => {
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
        }
        Err(e) => tracing::error!("Watch error: {:?}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_polling_watcher_delivers_valid_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        fs::write(&path, "[views]\ncache = true\n").unwrap();

        let server = ServerConfig {
            use_polling: true,
            poll_interval_ms: 50,
            ..ServerConfig::default()
        };
        let (watcher, mut updates) = ConfigWatcher::new(&path);
        let _handle = watcher.run(&server).unwrap();

        // Let the poller take its baseline snapshot before changing the file
        tokio::time::sleep(Duration::from_millis(200)).await;
        fs::write(&path, "[views]\ncache = false\n").unwrap();

        let update = tokio::time::timeout(Duration::from_secs(5), updates.recv())
            .await
            .expect("no reload within timeout")
            .expect("channel closed");
        assert!(!update.views.cache);
    }
}
