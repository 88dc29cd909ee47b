//! Content watching for rebuilds.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the content watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A post was created or modified
    Changed(PathBuf),

    /// A post was deleted
    Removed(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::Changed(path) | Self::Removed(path) => path,
        }
    }
}

/// Watches content directories and reports post changes.
pub struct ContentWatcher {
    _watcher: RecommendedWatcher,
}

impl ContentWatcher {
    /// Start watching `paths` recursively.
    ///
    /// Returns the watcher and a channel to receive events. A burst of changes
    /// is delivered as one event, the last of the burst, once no further
    /// change has arrived for `debounce`.
    pub fn new(
        paths: &[PathBuf],
        debounce: Duration,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            } else {
                tracing::warn!("Not watching missing path {}", path.display());
            }
        }

        std::thread::spawn(move || {
            while let Ok(event) = sync_rx.recv() {
                let Some(mut pending) = classify(&event) else {
                    continue;
                };

                // Hold the latest change until the tree has been quiet for `debounce`.
                let disconnected = loop {
                    match sync_rx.recv_timeout(debounce) {
                        Ok(event) => {
                            if let Some(latest) = classify(&event) {
                                pending = latest;
                            }
                        }
                        Err(RecvTimeoutError::Timeout) => break false,
                        Err(RecvTimeoutError::Disconnected) => break true,
                    }
                };

                if async_tx.blocking_send(pending).is_err() || disconnected {
                    break;
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

fn classify(event: &notify::Event) -> Option<WatchEvent> {
    event
        .paths
        .iter()
        .rev()
        .find_map(|path| classify_event(path, &event.kind))
}

/// Classify a notify event; anything that is not a post is ignored.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::EventKind;

    if path.extension().and_then(|e| e.to_str()) != Some("mdx") {
        return None;
    }

    match kind {
        EventKind::Create(_) | EventKind::Modify(_) => Some(WatchEvent::Changed(path.to_path_buf())),
        EventKind::Remove(_) => Some(WatchEvent::Removed(path.to_path_buf())),
        _ => None,
    }
}
