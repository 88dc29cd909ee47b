//! Watch mode: rebuild on content changes.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use quire_content::BuildMode;
use quire_static::{ContentWatcher, StaticBuilder};

use super::build::report;

/// Run the dev command.
pub async fn run(config_path: &Path, mode: Option<BuildMode>) -> Result<()> {
    let (builder, _) = super::load_builder(config_path, mode)?;
    let blog_root = builder.config().blog_root();

    rebuild(&builder).await;

    let (_watcher, mut rx) = ContentWatcher::new(&[blog_root.clone()], Duration::from_millis(200))
        .context("Failed to start content watcher")?;

    tracing::info!("Watching {} for changes (Ctrl+C to stop)", blog_root.display());

    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else {
                    break;
                };
                tracing::info!("{} changed, rebuilding", event.path().display());
                rebuild(&builder).await;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping");
                break;
            }
        }
    }

    Ok(())
}

/// Build once; failures are logged and the watcher keeps running.
async fn rebuild(builder: &StaticBuilder) {
    match builder.build().await {
        Ok(result) => report(&result),
        Err(e) => tracing::error!("Build failed: {}", e),
    }
}
